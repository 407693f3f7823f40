//! Common types: players, coordinates, moves, outcomes and engine errors.

use core::fmt;

/// Board coordinate as `(row, col)`.
pub type Coord = (usize, usize);

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Occupant digit used in cell codes and on the wire.
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A move: a step from `from` to `to`, or a placement when `from` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Option<Coord>,
    pub to: Coord,
}

impl Move {
    pub const fn step(from: Coord, to: Coord) -> Self {
        Self {
            from: Some(from),
            to,
        }
    }

    pub const fn place(to: Coord) -> Self {
        Self { from: None, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some((r, c)) => write!(f, "({}, {}) -> ({}, {})", r, c, self.to.0, self.to.1),
            None => write!(f, "place ({}, {})", self.to.0, self.to.1),
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    /// The peer link dropped before a winner was known.
    Disconnected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(p) => write!(f, "{} wins", p),
            Outcome::Disconnected => write!(f, "Disconnection"),
        }
    }
}

/// Errors returned by board construction and cell decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Cell code outside the `10 * tile + occupant` scheme.
    InvalidCell(u8),
    /// Board has no rows or no columns.
    Empty,
    /// Rows of differing lengths.
    Ragged,
    /// Board does not have the dimensions the caller requires.
    WrongDimensions {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Layout cell that is not one of the four tile colors.
    NotAColor(Coord),
    /// Coordinate outside the board.
    OutOfBounds(Coord),
    /// Attempt to put a piece on a border cell.
    Unplayable(Coord),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidCell(code) => write!(f, "Invalid cell code {}", code),
            BoardError::Empty => write!(f, "Board has no cells"),
            BoardError::Ragged => write!(f, "Board rows have different lengths"),
            BoardError::WrongDimensions { expected, found } => write!(
                f,
                "Board must be {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            BoardError::NotAColor((r, c)) => {
                write!(f, "Layout cell ({}, {}) is not a tile color", r, c)
            }
            BoardError::OutOfBounds((r, c)) => write!(f, "({}, {}) is outside the board", r, c),
            BoardError::Unplayable((r, c)) => write!(f, "({}, {}) cannot hold a piece", r, c),
        }
    }
}

/// Reasons a move is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The game has not been started.
    NotStarted,
    /// The game is already finished.
    GameOver,
    /// The local seat is not the player to move.
    NotYourTurn,
    /// Origin or destination is outside the board.
    OutOfBounds,
    /// The variant moves pieces but no origin was given.
    MissingOrigin,
    /// The variant places pieces but an origin was given.
    UnexpectedOrigin,
    /// The origin does not hold a piece of the moving player.
    NotYourPiece,
    /// The destination is already occupied.
    Occupied,
    /// The destination is a border or corner cell.
    Unplayable,
    /// The destination is attacked by a piece on the board.
    UnderAttack,
    /// The origin tile's movement rule does not reach the destination.
    IllegalMove,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NotStarted => write!(f, "The game has not started"),
            MoveError::GameOver => write!(f, "The game is over"),
            MoveError::NotYourTurn => write!(f, "It's not your turn"),
            MoveError::OutOfBounds => write!(f, "Position is outside the board"),
            MoveError::MissingOrigin => write!(f, "Select a pawn to move"),
            MoveError::UnexpectedOrigin => write!(f, "Pieces are placed, not moved, in this game"),
            MoveError::NotYourPiece => write!(f, "That's not your pawn"),
            MoveError::Occupied => write!(f, "Square is occupied"),
            MoveError::Unplayable => write!(f, "Square cannot be played"),
            MoveError::UnderAttack => write!(f, "Square is under attack"),
            MoveError::IllegalMove => write!(f, "Invalid movement"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}
