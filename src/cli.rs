//! Terminal front-end helpers: board rendering, command parsing and an
//! observer that forwards session notifications to the input loop.

use std::fmt::Write as _;

use tokio::sync::mpsc;

use crate::board::{flip_horizontal, rotate_left, rotate_right, Board, Square, DEFAULT_SQUARES};
use crate::cell::{Cell, Tile};
use crate::common::{Move, Outcome, Player};
use crate::session::SessionObserver;

/// Session notification as seen by the terminal loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Board(Board),
    Turn(Player),
    Ended(Outcome),
    Chat(String),
}

/// Observer forwarding every notification on a channel.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SessionObserver for ChannelObserver {
    fn board_updated(&mut self, board: &Board) {
        let _ = self.tx.send(UiEvent::Board(board.clone()));
    }

    fn player_changed(&mut self, player: Player) {
        let _ = self.tx.send(UiEvent::Turn(player));
    }

    fn game_ended(&mut self, outcome: Outcome) {
        let _ = self.tx.send(UiEvent::Ended(outcome));
    }

    fn chat_received(&mut self, message: &str) {
        let _ = self.tx.send(UiEvent::Chat(message.to_string()));
    }
}

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Blue => 'b',
        Tile::Green => 'g',
        Tile::Yellow => 'y',
        Tile::Red => 'r',
        Tile::Border => '#',
        Tile::TopCorner | Tile::BottomCorner => '*',
    }
}

fn cell_str(cell: Cell) -> String {
    let piece = match cell.occupant() {
        Some(p) => char::from(b'0' + p.number()),
        None if cell.tile() == Tile::Border => '#',
        None => '.',
    };
    format!("{}{}", tile_char(cell.tile()), piece)
}

/// Draw the board with row and column indices. Each cell shows its tile
/// letter followed by the occupying player, or `.` when empty.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for c in 0..board.cols() {
        let _ = write!(out, " {:>2}", c);
    }
    out.push('\n');
    for r in 0..board.rows() {
        let _ = write!(out, "{:2} ", r);
        for c in 0..board.cols() {
            if let Some(cell) = board.get((r, c)) {
                let _ = write!(out, " {}", cell_str(cell));
            }
        }
        out.push('\n');
    }
    out
}

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Chat(String),
    Moves,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  r1 c1 r2 c2   move the pawn at (r1, c1) to (r2, c2)
  r c           place a pawn at (r, c) (Isolation)
  moves         list the valid moves
  chat <text>   send a message to the other player
  quit          leave the game";

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if let Some(text) = line.strip_prefix("chat ") {
        return Some(Command::Chat(text.trim().to_string()));
    }
    match line {
        "moves" => return Some(Command::Moves),
        "help" | "?" => return Some(Command::Help),
        "quit" | "exit" => return Some(Command::Quit),
        _ => {}
    }
    let nums = line
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match nums.as_slice() {
        [r, c] => Some(Command::Play(Move::place((*r, *c)))),
        [r1, c1, r2, c2] => Some(Command::Play(Move::step((*r1, *c1), (*r2, *c2)))),
        _ => None,
    }
}

/// Parse one square selector: a built-in square number `1`-`4`, optionally
/// followed by transforms `r` (rotate right), `l` (rotate left) and `f`
/// (flip), applied left to right.
pub fn parse_square(text: &str) -> Option<Square> {
    let mut chars = text.trim().chars();
    let index = chars.next()?.to_digit(10)? as usize;
    let mut square = *DEFAULT_SQUARES.get(index.checked_sub(1)?)?;
    for op in chars {
        square = match op.to_ascii_lowercase() {
            'r' => rotate_right(&square),
            'l' => rotate_left(&square),
            'f' => flip_horizontal(&square),
            _ => return None,
        };
    }
    Some(square)
}

/// Parse four comma-separated square selectors into an 8x8 layout.
pub fn parse_layout(text: &str) -> Option<Board> {
    let squares = text
        .split(',')
        .map(parse_square)
        .collect::<Option<Vec<Square>>>()?;
    match squares.as_slice() {
        [a, b, c, d] => Some(Board::from_squares([a, b, c, d])),
        _ => None,
    }
}

/// End-of-game line from the point of view of `me` (`None` for hot-seat).
pub fn describe_outcome(outcome: Outcome, me: Option<Player>) -> String {
    match (outcome, me) {
        (Outcome::Disconnected, _) => "The other player disconnected.".to_string(),
        (Outcome::Winner(w), Some(me)) if w == me => "You win!".to_string(),
        (Outcome::Winner(w), Some(_)) => format!("You lose. {} wins.", w),
        (Outcome::Winner(w), None) => format!("{} wins!", w),
    }
}
