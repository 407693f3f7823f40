//! End-of-game detection for each variant, plus read-only board analysis.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::board::Board;
use crate::cell::Tile;
use crate::common::{Coord, Player};
use crate::rules::attacks;
use crate::variant::{valid_moves, GameVariant};

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Winner of a finished game, or `None` while play goes on.
///
/// `last_mover` is the player who made the move just applied. When the
/// variant's own goal is not met and the player to move next has no valid
/// move, `last_mover` wins.
pub fn winner(board: &Board, variant: GameVariant, last_mover: Player) -> Option<Player> {
    match variant {
        GameVariant::Katarenga => {
            katarenga_winner(board).or_else(|| blocked_winner(board, variant, last_mover))
        }
        GameVariant::Congress => {
            congress_winner(board).or_else(|| blocked_winner(board, variant, last_mover))
        }
        GameVariant::Isolation => isolation_winner(board, last_mover),
    }
}

/// `last_mover`, if the opponent is left without a valid move.
pub fn blocked_winner(board: &Board, variant: GameVariant, last_mover: Player) -> Option<Player> {
    if valid_moves(board, variant, last_mover.opponent()).is_empty() {
        Some(last_mover)
    } else {
        None
    }
}

/// Elimination first, then occupation of both target corners. Player 1 aims
/// for the bottom corners, player 2 for the top ones.
pub fn katarenga_winner(board: &Board) -> Option<Player> {
    let counts = pawn_counts(board);
    if counts.one == 0 {
        return Some(Player::Two);
    }
    if counts.two == 0 {
        return Some(Player::One);
    }
    let rows = board.rows();
    let last = board.cols() - 1;
    let holds = |player: Player, row: usize| {
        board.occupant((row, 0)) == Some(player) && board.occupant((row, last)) == Some(player)
    };
    if holds(Player::One, rows - 1) {
        return Some(Player::One);
    }
    if holds(Player::Two, 0) {
        return Some(Player::Two);
    }
    None
}

/// First player, in seat order, whose pieces form one orthogonally
/// connected group. Players without pieces are skipped.
pub fn congress_winner(board: &Board) -> Option<Player> {
    Player::ALL.into_iter().find(|&player| {
        let pieces = board.pieces(player);
        !pieces.is_empty() && is_connected(board, player)
    })
}

/// Full board or no safe cell left: either way the last mover wins.
pub fn isolation_winner(board: &Board, last_mover: Player) -> Option<Player> {
    if board.occupied_count() >= board.playable_count() {
        return Some(last_mover);
    }
    if safe_cells(board).is_empty() {
        return Some(last_mover);
    }
    None
}

/// Whether every piece of `player` is reachable from the first one through
/// orthogonal steps over that player's own pieces.
pub fn is_connected(board: &Board, player: Player) -> bool {
    let pieces = board.pieces(player);
    match pieces.first() {
        Some(&start) => flood(board, player, start).len() == pieces.len(),
        None => false,
    }
}

fn flood(board: &Board, player: Player, start: Coord) -> Vec<Coord> {
    let mut seen = alloc::vec![false; board.rows() * board.cols()];
    let mut group = Vec::new();
    let mut queue = VecDeque::new();
    seen[start.0 * board.cols() + start.1] = true;
    queue.push_back(start);
    while let Some(at) = queue.pop_front() {
        group.push(at);
        for (dr, dc) in ORTHOGONAL {
            let Some(next) = board.offset(at, dr, dc) else {
                continue;
            };
            let idx = next.0 * board.cols() + next.1;
            if !seen[idx] && board.occupant(next) == Some(player) {
                seen[idx] = true;
                queue.push_back(next);
            }
        }
    }
    group
}

/// Orthogonally connected groups of `player`'s pieces, each listed in
/// discovery order, groups ordered by their first cell.
pub fn connected_components(board: &Board, player: Player) -> Vec<Vec<Coord>> {
    let mut groups: Vec<Vec<Coord>> = Vec::new();
    for at in board.pieces(player) {
        if groups.iter().any(|g| g.contains(&at)) {
            continue;
        }
        groups.push(flood(board, player, at));
    }
    groups
}

/// Empty colored cell that no piece on the board attacks.
pub fn is_safe(board: &Board, at: Coord) -> bool {
    match board.get(at) {
        Some(cell) if !cell.is_sentinel() && cell.is_empty() => board
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .all(|(from, _)| !attacks(board, from, at)),
        _ => false,
    }
}

/// All safe cells, row-major.
pub fn safe_cells(board: &Board) -> Vec<Coord> {
    board
        .iter()
        .map(|(at, _)| at)
        .filter(|&at| is_safe(board, at))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnCounts {
    pub one: usize,
    pub two: usize,
}

impl PawnCounts {
    pub fn of(&self, player: Player) -> usize {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }
}

pub fn pawn_counts(board: &Board) -> PawnCounts {
    board
        .iter()
        .filter_map(|(_, cell)| cell.occupant())
        .fold(PawnCounts::default(), |mut acc, p| {
            match p {
                Player::One => acc.one += 1,
                Player::Two => acc.two += 1,
            }
            acc
        })
}

/// Occupants of the four outer corners, left then right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerStatus {
    pub top: [Option<Player>; 2],
    pub bottom: [Option<Player>; 2],
}

/// Corner occupancy, or `None` when the board has no corner tiles.
pub fn corner_status(board: &Board) -> Option<CornerStatus> {
    let rows = board.rows();
    let cols = board.cols();
    let corners = [(0, 0), (0, cols - 1), (rows - 1, 0), (rows - 1, cols - 1)];
    if !corners
        .iter()
        .all(|&at| board.tile(at).is_some_and(Tile::is_corner))
    {
        return None;
    }
    let [tl, tr, bl, br] = corners.map(|at| board.occupant(at));
    Some(CornerStatus {
        top: [tl, tr],
        bottom: [bl, br],
    })
}

/// Variant-specific part of [`GameInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantDetail {
    Katarenga { corners: Option<CornerStatus> },
    Congress { groups: [usize; 2] },
    Isolation { safe_cells: usize, empty_cells: usize },
}

/// Summary of a position for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub variant: GameVariant,
    pub current_player: Player,
    pub size: (usize, usize),
    pub pawns: PawnCounts,
    pub detail: VariantDetail,
}

pub fn analyze(board: &Board, variant: GameVariant, current_player: Player) -> GameInfo {
    let detail = match variant {
        GameVariant::Katarenga => VariantDetail::Katarenga {
            corners: corner_status(board),
        },
        GameVariant::Congress => VariantDetail::Congress {
            groups: Player::ALL.map(|p| connected_components(board, p).len()),
        },
        GameVariant::Isolation => VariantDetail::Isolation {
            safe_cells: safe_cells(board).len(),
            empty_cells: board.playable_count().saturating_sub(board.occupied_count()),
        },
    };
    GameInfo {
        variant,
        current_player,
        size: (board.rows(), board.cols()),
        pawns: pawn_counts(board),
        detail,
    }
}
