//! Wire messages exchanged between two game instances.
//!
//! Each message is a JSON object with a `type` field, sent as one line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{BoardError, Coord, Move, MoveError, Outcome, Player};
use crate::variant::GameVariant;

/// Marker sent in place of a player number when a game ends by disconnection.
pub const DISCONNECTION_MARKER: &str = "Disconnection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Host's live board and the variant being played.
    BoardData { board: Vec<Vec<u8>>, game_type: u8 },
    /// The game begins with `current_player` to move.
    GameStart { current_player: u8 },
    /// A move already applied by the sender.
    Move {
        from: Option<[usize; 2]>,
        to: [usize; 2],
        player: u8,
    },
    GameEnd { winner: WireWinner },
    Chat { message: String },
}

/// `winner` field of `GAME_END`: a player number or the disconnection marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireWinner {
    Player(u8),
    Marker(String),
}

impl WireWinner {
    pub fn outcome(&self) -> Result<Outcome, ProtocolError> {
        match self {
            WireWinner::Player(n) => Ok(Outcome::Winner(player_from_wire(*n)?)),
            WireWinner::Marker(m) if m == DISCONNECTION_MARKER => Ok(Outcome::Disconnected),
            WireWinner::Marker(_) => Err(ProtocolError::InvalidField("winner")),
        }
    }
}

impl From<Outcome> for WireWinner {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(p) => WireWinner::Player(p.number()),
            Outcome::Disconnected => WireWinner::Marker(DISCONNECTION_MARKER.to_string()),
        }
    }
}

impl Message {
    pub fn board_data(board: &Board, variant: GameVariant) -> Self {
        Message::BoardData {
            board: board.to_codes(),
            game_type: variant.id(),
        }
    }

    pub fn game_start(current_player: Player) -> Self {
        Message::GameStart {
            current_player: current_player.number(),
        }
    }

    pub fn moved(mv: Move, player: Player) -> Self {
        Message::Move {
            from: mv.from.map(|(r, c)| [r, c]),
            to: [mv.to.0, mv.to.1],
            player: player.number(),
        }
    }

    pub fn game_end(outcome: Outcome) -> Self {
        Message::GameEnd {
            winner: outcome.into(),
        }
    }

    pub fn chat(message: impl Into<String>) -> Self {
        Message::Chat {
            message: message.into(),
        }
    }

    /// Wire name of the message type.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::BoardData { .. } => "BOARD_DATA",
            Message::GameStart { .. } => "GAME_START",
            Message::Move { .. } => "MOVE",
            Message::GameEnd { .. } => "GAME_END",
            Message::Chat { .. } => "CHAT",
        }
    }
}

/// Serialize a message to a single-line JSON frame, without the newline.
pub fn encode(msg: &Message) -> Result<String, ProtocolError> {
    serde_json::to_string(msg).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

pub fn decode(frame: &str) -> Result<Message, ProtocolError> {
    serde_json::from_str(frame.trim()).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

pub fn player_from_wire(n: u8) -> Result<Player, ProtocolError> {
    Player::from_number(n).ok_or(ProtocolError::InvalidField("player"))
}

pub fn variant_from_wire(id: u8) -> Result<GameVariant, ProtocolError> {
    GameVariant::from_id(id).ok_or(ProtocolError::InvalidField("game_type"))
}

/// Decode a `BOARD_DATA` grid. Only the cell codes and the shape are checked.
pub fn board_from_wire(codes: &[Vec<u8>]) -> Result<Board, ProtocolError> {
    Board::from_codes(codes).map_err(ProtocolError::InvalidBoard)
}

pub fn move_from_wire(from: Option<[usize; 2]>, to: [usize; 2]) -> Move {
    let coord = |[r, c]: [usize; 2]| -> Coord { (r, c) };
    Move {
        from: from.map(coord),
        to: coord(to),
    }
}

/// Errors raised while decoding or applying an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Not valid JSON, or not one of the known message shapes.
    Malformed(String),
    /// A field holds a value outside its domain.
    InvalidField(&'static str),
    InvalidBoard(BoardError),
    /// The message is not acceptable in the current session phase.
    OutOfOrder(&'static str),
    /// A verified inbound move failed validation.
    RejectedMove(MoveError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "Malformed frame: {}", e),
            ProtocolError::InvalidField(name) => write!(f, "Invalid value for field '{}'", name),
            ProtocolError::InvalidBoard(e) => write!(f, "Invalid board: {}", e),
            ProtocolError::OutOfOrder(kind) => write!(f, "Unexpected {} message", kind),
            ProtocolError::RejectedMove(e) => write!(f, "Rejected move: {}", e),
        }
    }
}

impl std::error::Error for ProtocolError {}
