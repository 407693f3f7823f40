//! Movement rules. The tile color under a piece decides how it moves.

use alloc::vec::Vec;

use crate::board::Board;
use crate::cell::Tile;
use crate::common::Coord;

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Movement rule selected by the origin tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRule {
    /// One step in any of the eight directions.
    Adjacent,
    /// Knight jump; intermediate cells are ignored.
    Leap,
    /// Any distance along a diagonal.
    DiagonalSlide,
    /// Any distance along a row or column.
    OrthogonalSlide,
}

impl MoveRule {
    /// Rule for a tile color, `None` for border and corner tiles.
    pub const fn for_tile(tile: Tile) -> Option<Self> {
        match tile {
            Tile::Blue => Some(MoveRule::Adjacent),
            Tile::Green => Some(MoveRule::Leap),
            Tile::Yellow => Some(MoveRule::DiagonalSlide),
            Tile::Red => Some(MoveRule::OrthogonalSlide),
            Tile::Border | Tile::TopCorner | Tile::BottomCorner => None,
        }
    }

    /// Tile color that stops a slide when crossed.
    pub const fn blocking_tile(self) -> Option<Tile> {
        match self {
            MoveRule::DiagonalSlide => Some(Tile::Yellow),
            MoveRule::OrthogonalSlide => Some(Tile::Red),
            MoveRule::Adjacent | MoveRule::Leap => None,
        }
    }

    /// Whether `to` is reachable from `from` under this rule on `board`.
    ///
    /// Only geometry and the path are checked; what stands on `to` is the
    /// caller's concern.
    pub fn reaches(self, board: &Board, from: Coord, to: Coord) -> bool {
        if from == to {
            return false;
        }
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        let steps = dr.abs().max(dc.abs());
        let (sr, sc) = (dr.signum(), dc.signum());
        match self {
            MoveRule::Adjacent => steps == 1,
            MoveRule::Leap => KNIGHT_OFFSETS.contains(&(dr, dc)),
            MoveRule::DiagonalSlide => {
                dr.abs() == dc.abs() && self.path_clear(board, from, steps, sr, sc)
            }
            MoveRule::OrthogonalSlide => {
                (dr == 0) != (dc == 0) && self.path_clear(board, from, steps, sr, sc)
            }
        }
    }

    /// Checks the `steps - 1` cells strictly between the origin and the
    /// destination along `(sr, sc)`.
    fn path_clear(self, board: &Board, from: Coord, steps: isize, sr: isize, sc: isize) -> bool {
        let blocker = self.blocking_tile();
        (1..steps).all(|k| {
            match board.offset(from, sr * k, sc * k).and_then(|at| board.get(at)) {
                Some(cell) => cell.is_empty() && Some(cell.tile()) != blocker,
                None => false,
            }
        })
    }
}

/// Whether the piece standing on `from` may move to `to`.
///
/// The mover is whoever occupies `from`. The destination must be a colored
/// tile that is empty or holds an opposing piece; sentinels are never
/// reached by an ordinary move.
pub fn is_legal(board: &Board, from: Coord, to: Coord) -> bool {
    let (Some(origin), Some(dest)) = (board.get(from), board.get(to)) else {
        return false;
    };
    let Some(mover) = origin.occupant() else {
        return false;
    };
    let Some(rule) = MoveRule::for_tile(origin.tile()) else {
        return false;
    };
    if dest.is_sentinel() || dest.occupant() == Some(mover) {
        return false;
    }
    rule.reaches(board, from, to)
}

/// Whether the piece on `from` threatens `target`, whoever owns either cell.
pub fn attacks(board: &Board, from: Coord, target: Coord) -> bool {
    let Some(origin) = board.get(from) else {
        return false;
    };
    if origin.is_empty() || !board.contains(target) {
        return false;
    }
    MoveRule::for_tile(origin.tile()).is_some_and(|rule| rule.reaches(board, from, target))
}

/// Every destination the piece on `from` can legally move to, row-major.
pub fn reachable(board: &Board, from: Coord) -> Vec<Coord> {
    board
        .iter()
        .map(|(at, _)| at)
        .filter(|&to| is_legal(board, from, to))
        .collect()
}
