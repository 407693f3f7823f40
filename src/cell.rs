//! Cell codec. A cell travels as the code `10 * tile + occupant`: tiles
//! Blue=1, Green=2, Yellow=3, Red=4, occupant 0 (empty) or a player number.
//! Border cells are `0`; the Katarenga corners are `50` (top row) and `60`
//! (bottom row) and may carry an occupant once entered (`61`, `52`, ...).

use crate::common::{BoardError, Player};

pub const BORDER_CODE: u8 = 0;
pub const TOP_CORNER_CODE: u8 = 50;
pub const BOTTOM_CORNER_CODE: u8 = 60;

/// Tile kind of a cell. The four colors select a movement rule; the rest
/// are sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Moves one step in any direction.
    Blue,
    /// Leaps like a knight.
    Green,
    /// Slides diagonally.
    Yellow,
    /// Slides orthogonally.
    Red,
    Border,
    TopCorner,
    BottomCorner,
}

impl Tile {
    pub const COLORS: [Tile; 4] = [Tile::Blue, Tile::Green, Tile::Yellow, Tile::Red];

    /// Tens digit of the cell code.
    pub const fn digit(self) -> u8 {
        match self {
            Tile::Border => 0,
            Tile::Blue => 1,
            Tile::Green => 2,
            Tile::Yellow => 3,
            Tile::Red => 4,
            Tile::TopCorner => 5,
            Tile::BottomCorner => 6,
        }
    }

    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Tile::Border),
            1 => Some(Tile::Blue),
            2 => Some(Tile::Green),
            3 => Some(Tile::Yellow),
            4 => Some(Tile::Red),
            5 => Some(Tile::TopCorner),
            6 => Some(Tile::BottomCorner),
            _ => None,
        }
    }

    pub const fn is_color(self) -> bool {
        matches!(self, Tile::Blue | Tile::Green | Tile::Yellow | Tile::Red)
    }

    pub const fn is_corner(self) -> bool {
        matches!(self, Tile::TopCorner | Tile::BottomCorner)
    }
}

/// A single board cell: its tile plus the piece standing on it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    tile: Tile,
    occupant: Option<Player>,
}

impl Cell {
    pub const BORDER: Cell = Cell::empty(Tile::Border);

    pub const fn new(tile: Tile, occupant: Option<Player>) -> Self {
        Self { tile, occupant }
    }

    pub const fn empty(tile: Tile) -> Self {
        Self {
            tile,
            occupant: None,
        }
    }

    pub const fn tile(self) -> Tile {
        self.tile
    }

    pub const fn occupant(self) -> Option<Player> {
        self.occupant
    }

    pub const fn is_empty(self) -> bool {
        self.occupant.is_none()
    }

    /// Border and corner cells are never ordinary move destinations.
    pub const fn is_sentinel(self) -> bool {
        !self.tile.is_color()
    }

    /// Same tile, different occupant.
    pub const fn with_occupant(self, occupant: Option<Player>) -> Self {
        Self {
            tile: self.tile,
            occupant,
        }
    }

    pub fn code(self) -> u8 {
        self.tile.digit() * 10 + self.occupant.map_or(0, Player::number)
    }

    pub fn from_code(code: u8) -> Result<Self, BoardError> {
        let tile = Tile::from_digit(code / 10).ok_or(BoardError::InvalidCell(code))?;
        let occupant = match code % 10 {
            0 => None,
            n => Some(Player::from_number(n).ok_or(BoardError::InvalidCell(code))?),
        };
        // Border cells never hold a piece.
        if tile == Tile::Border && occupant.is_some() {
            return Err(BoardError::InvalidCell(code));
        }
        Ok(Self { tile, occupant })
    }
}
