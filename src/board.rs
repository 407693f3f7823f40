//! Rectangular board of cells, plus construction from 4x4 square patterns.

use alloc::vec::Vec;

use crate::cell::{Cell, Tile};
use crate::common::{BoardError, Coord, Player};
use crate::config::{PLAY_SIZE, SQUARE_SIZE};

/// A 4x4 tile pattern. Four of them make up the playable interior.
pub type Square = [[Tile; SQUARE_SIZE]; SQUARE_SIZE];

const B: Tile = Tile::Blue;
const G: Tile = Tile::Green;
const Y: Tile = Tile::Yellow;
const R: Tile = Tile::Red;

/// Built-in square patterns, in the order the layout file lists them.
pub const DEFAULT_SQUARES: [Square; 4] = [
    [[R, B, B, R], [B, B, R, Y], [Y, B, R, B], [R, R, B, R]],
    [[G, G, Y, Y], [B, R, R, B], [B, Y, G, G], [R, B, B, R]],
    [[B, B, B, B], [G, G, G, G], [Y, Y, Y, Y], [R, R, R, R]],
    [[R, Y, G, B], [B, G, Y, R], [R, Y, G, B], [B, G, Y, R]],
];

/// Rotate a square 90 degrees clockwise.
pub fn rotate_right(square: &Square) -> Square {
    let n = SQUARE_SIZE;
    core::array::from_fn(|r| core::array::from_fn(|c| square[n - 1 - c][r]))
}

/// Rotate a square 90 degrees counter-clockwise.
pub fn rotate_left(square: &Square) -> Square {
    let n = SQUARE_SIZE;
    core::array::from_fn(|r| core::array::from_fn(|c| square[c][n - 1 - r]))
}

/// Mirror a square left to right.
pub fn flip_horizontal(square: &Square) -> Square {
    let n = SQUARE_SIZE;
    core::array::from_fn(|r| core::array::from_fn(|c| square[r][n - 1 - c]))
}

/// Grid of cells with fixed dimensions.
///
/// The tile of every cell is fixed at construction; play only changes
/// occupants through [`Board::set_occupant`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Board of the given size with every cell set to `cell`.
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            rows,
            cols,
            cells: alloc::vec![cell; rows * cols],
        }
    }

    /// Build a board from rows of cells. Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(BoardError::Ragged);
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Decode a grid of cell codes, checking only its structure.
    pub fn from_codes(codes: &[Vec<u8>]) -> Result<Self, BoardError> {
        let rows = codes
            .iter()
            .map(|row| row.iter().map(|&code| Cell::from_code(code)).collect())
            .collect::<Result<Vec<Vec<Cell>>, BoardError>>()?;
        Self::from_rows(rows)
    }

    /// Encode the board as rows of cell codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    /// Assemble the 8x8 interior from four squares laid out as
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn from_squares(squares: [&Square; 4]) -> Self {
        let mut board = Self::filled(PLAY_SIZE, PLAY_SIZE, Cell::BORDER);
        for (quadrant, square) in squares.iter().enumerate() {
            let row0 = (quadrant / 2) * SQUARE_SIZE;
            let col0 = (quadrant % 2) * SQUARE_SIZE;
            for (r, line) in square.iter().enumerate() {
                for (c, &tile) in line.iter().enumerate() {
                    let idx = board.index((row0 + r, col0 + c));
                    board.cells[idx] = Cell::empty(tile);
                }
            }
        }
        board
    }

    /// Wrap the board in a one-cell border, marking the four outer corners.
    pub fn with_border(&self) -> Self {
        let rows = self.rows + 2;
        let cols = self.cols + 2;
        let mut bordered = Self::filled(rows, cols, Cell::BORDER);
        for ((r, c), cell) in self.iter() {
            let idx = bordered.index((r + 1, c + 1));
            bordered.cells[idx] = cell;
        }
        for at in [(0, 0), (0, cols - 1)] {
            let idx = bordered.index(at);
            bordered.cells[idx] = Cell::empty(Tile::TopCorner);
        }
        for at in [(rows - 1, 0), (rows - 1, cols - 1)] {
            let idx = bordered.index(at);
            bordered.cells[idx] = Cell::empty(Tile::BottomCorner);
        }
        bordered
    }

    /// The same layout with every occupant removed.
    pub fn base(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|c| c.with_occupant(None)).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, (r, c): Coord) -> bool {
        r < self.rows && c < self.cols
    }

    fn index(&self, (r, c): Coord) -> usize {
        r * self.cols + c
    }

    pub fn get(&self, at: Coord) -> Option<Cell> {
        if self.contains(at) {
            Some(self.cells[self.index(at)])
        } else {
            None
        }
    }

    pub fn tile(&self, at: Coord) -> Option<Tile> {
        self.get(at).map(Cell::tile)
    }

    pub fn occupant(&self, at: Coord) -> Option<Player> {
        self.get(at).and_then(Cell::occupant)
    }

    /// Replace the occupant of a cell, leaving its tile untouched.
    pub fn set_occupant(&mut self, at: Coord, occupant: Option<Player>) -> Result<(), BoardError> {
        if !self.contains(at) {
            return Err(BoardError::OutOfBounds(at));
        }
        let idx = self.index(at);
        let cell = self.cells[idx];
        if cell.tile() == Tile::Border && occupant.is_some() {
            return Err(BoardError::Unplayable(at));
        }
        self.cells[idx] = cell.with_occupant(occupant);
        Ok(())
    }

    /// Coordinate reached by moving `(dr, dc)` from `at`, if still on the board.
    pub fn offset(&self, (r, c): Coord, dr: isize, dc: isize) -> Option<Coord> {
        let nr = r.checked_add_signed(dr)?;
        let nc = c.checked_add_signed(dc)?;
        if self.contains((nr, nc)) {
            Some((nr, nc))
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / cols, i % cols), cell))
    }

    /// Coordinates of every piece belonging to `player`, row-major.
    pub fn pieces(&self, player: Player) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.occupant() == Some(player))
            .map(|(at, _)| at)
            .collect()
    }

    /// Number of cells with a tile color (everything but border and corners).
    pub fn playable_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_sentinel()).count()
    }

    /// Number of cells holding a piece.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}
