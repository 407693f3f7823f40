//! The three games played on the shared board: setup, move validation and
//! move enumeration.

use alloc::vec::Vec;
use core::fmt;

use crate::board::{Board, DEFAULT_SQUARES};
use crate::cell::Tile;
use crate::common::{BoardError, Coord, Move, MoveError, Player};
use crate::config::{BORDERED_SIZE, PLAY_SIZE};
use crate::rules::is_legal;
use crate::victory::is_safe;

const CONGRESS_ONE: [Coord; 8] = [
    (0, 3),
    (0, 6),
    (1, 0),
    (3, 7),
    (4, 0),
    (6, 7),
    (7, 1),
    (7, 4),
];

const CONGRESS_TWO: [Coord; 8] = [
    (0, 1),
    (0, 4),
    (1, 7),
    (3, 0),
    (4, 7),
    (6, 0),
    (7, 3),
    (7, 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameVariant {
    /// Capture race towards the far corners on a bordered board.
    Katarenga = 1,
    /// First to gather all pieces into one connected group.
    Congress = 2,
    /// Place pieces on unattacked cells until someone cannot.
    Isolation = 3,
}

impl GameVariant {
    pub const ALL: [GameVariant; 3] = [
        GameVariant::Katarenga,
        GameVariant::Congress,
        GameVariant::Isolation,
    ];

    /// Identifier carried as `game_type` on the wire.
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(GameVariant::Katarenga),
            2 => Some(GameVariant::Congress),
            3 => Some(GameVariant::Isolation),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GameVariant::Katarenga => "Katarenga",
            GameVariant::Congress => "Congress",
            GameVariant::Isolation => "Isolation",
        }
    }

    /// `(rows, cols)` of the live board.
    pub const fn board_size(self) -> (usize, usize) {
        match self {
            GameVariant::Katarenga => (BORDERED_SIZE, BORDERED_SIZE),
            GameVariant::Congress | GameVariant::Isolation => (PLAY_SIZE, PLAY_SIZE),
        }
    }

    /// Whether moves are placements rather than steps.
    pub const fn places_pieces(self) -> bool {
        matches!(self, GameVariant::Isolation)
    }

    /// Turn an 8x8 tile layout into the starting board of this variant.
    ///
    /// Any pieces on the layout are discarded.
    pub fn setup(self, layout: &Board) -> Result<Board, BoardError> {
        if (layout.rows(), layout.cols()) != (PLAY_SIZE, PLAY_SIZE) {
            return Err(BoardError::WrongDimensions {
                expected: (PLAY_SIZE, PLAY_SIZE),
                found: (layout.rows(), layout.cols()),
            });
        }
        if let Some((at, _)) = layout.iter().find(|(_, cell)| cell.is_sentinel()) {
            return Err(BoardError::NotAColor(at));
        }
        let base = layout.base();
        match self {
            GameVariant::Katarenga => {
                let mut board = base.with_border();
                for col in 1..=PLAY_SIZE {
                    board.set_occupant((1, col), Some(Player::One))?;
                    board.set_occupant((PLAY_SIZE, col), Some(Player::Two))?;
                }
                Ok(board)
            }
            GameVariant::Congress => {
                let mut board = base;
                for at in CONGRESS_ONE {
                    board.set_occupant(at, Some(Player::One))?;
                }
                for at in CONGRESS_TWO {
                    board.set_occupant(at, Some(Player::Two))?;
                }
                Ok(board)
            }
            GameVariant::Isolation => Ok(base),
        }
    }

    /// Starting board built from the four built-in squares in order.
    pub fn standard_board(self) -> Result<Board, BoardError> {
        let [a, b, c, d] = &DEFAULT_SQUARES;
        self.setup(&Board::from_squares([a, b, c, d]))
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Katarenga corner entry: from the last interior row on a player's way
/// into one of the two corners behind it, regardless of the origin tile.
fn is_corner_entry(board: &Board, player: Player, from: Coord, to: Coord) -> bool {
    let rows = board.rows();
    let cols = board.cols();
    if rows < 4 || cols < 3 {
        return false;
    }
    let (from_row, corner_row) = match player {
        Player::One => (rows - 2, rows - 1),
        Player::Two => (1, 0),
    };
    from.0 == from_row
        && (1..cols - 1).contains(&from.1)
        && to.0 == corner_row
        && (to.1 == 0 || to.1 == cols - 1)
        && board.tile(to).is_some_and(|t| t.is_corner())
}

/// Check a move by `player` against the rules of `variant`.
pub fn validate_move(
    board: &Board,
    variant: GameVariant,
    player: Player,
    mv: Move,
) -> Result<(), MoveError> {
    let dest = board.get(mv.to).ok_or(MoveError::OutOfBounds)?;
    if variant.places_pieces() {
        if mv.from.is_some() {
            return Err(MoveError::UnexpectedOrigin);
        }
        if dest.is_sentinel() {
            return Err(MoveError::Unplayable);
        }
        if !dest.is_empty() {
            return Err(MoveError::Occupied);
        }
        if !is_safe(board, mv.to) {
            return Err(MoveError::UnderAttack);
        }
        return Ok(());
    }

    let from = mv.from.ok_or(MoveError::MissingOrigin)?;
    let origin = board.get(from).ok_or(MoveError::OutOfBounds)?;
    if origin.occupant() != Some(player) {
        return Err(MoveError::NotYourPiece);
    }
    if dest.occupant() == Some(player) {
        return Err(MoveError::Occupied);
    }
    if variant == GameVariant::Katarenga && is_corner_entry(board, player, from, mv.to) {
        return Ok(());
    }
    if dest.is_sentinel() {
        return Err(MoveError::Unplayable);
    }
    if !is_legal(board, from, mv.to) {
        return Err(MoveError::IllegalMove);
    }
    Ok(())
}

/// Apply a move for `player`: vacate the origin, if any, and occupy the
/// destination, capturing whatever stood there.
pub fn apply_move(board: &mut Board, player: Player, mv: Move) -> Result<(), BoardError> {
    match board.tile(mv.to) {
        None => return Err(BoardError::OutOfBounds(mv.to)),
        Some(Tile::Border) => return Err(BoardError::Unplayable(mv.to)),
        Some(_) => {}
    }
    if let Some(from) = mv.from {
        board.set_occupant(from, None)?;
    }
    board.set_occupant(mv.to, Some(player))
}

/// Every move `player` may make, row-major by origin then destination.
pub fn valid_moves(board: &Board, variant: GameVariant, player: Player) -> Vec<Move> {
    let targets: Vec<Coord> = board.iter().map(|(at, _)| at).collect();
    if variant.places_pieces() {
        return targets
            .into_iter()
            .map(Move::place)
            .filter(|&mv| validate_move(board, variant, player, mv).is_ok())
            .collect();
    }
    board
        .pieces(player)
        .into_iter()
        .flat_map(|from| targets.iter().map(move |&to| Move::step(from, to)))
        .filter(|&mv| validate_move(board, variant, player, mv).is_ok())
        .collect()
}
