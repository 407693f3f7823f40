//! Game session: the live board, turn order and the exchange of frames with
//! the remote peer.
//!
//! Moves made locally are validated before they are applied and sent. Moves
//! received from the peer are trusted and applied as sent, unless
//! [`SessionConfig::verify_inbound_moves`] is set.

use std::fmt;

use log::{debug, info, warn};

use crate::board::Board;
use crate::common::{Move, MoveError, Outcome, Player};
use crate::config::SessionConfig;
use crate::protocol::{
    board_from_wire, decode, encode, move_from_wire, player_from_wire, variant_from_wire,
    Message, ProtocolError,
};
use crate::variant::{apply_move, valid_moves, validate_move, GameVariant};
use crate::victory::{analyze, winner, GameInfo};

/// Outbound half of a peer link, as seen by the session.
pub trait FrameSink: Send {
    /// Queue one frame for the peer. Returns `false` if it could not be sent.
    fn send_frame(&self, frame: &str) -> bool;
}

/// Sink for sessions without a peer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn send_frame(&self, _frame: &str) -> bool {
        false
    }
}

/// Notifications for the presentation layer. All methods default to no-ops.
pub trait SessionObserver: Send {
    fn board_updated(&mut self, _board: &Board) {}
    fn player_changed(&mut self, _player: Player) {}
    fn game_ended(&mut self, _outcome: Outcome) {}
    fn chat_received(&mut self, _message: &str) {}
}

/// Which seat this instance plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Plays player 1 and owns the board setup.
    Host,
    /// Plays player 2.
    Guest,
    /// Hot-seat play; both players move on this instance.
    Local,
}

impl Role {
    pub const fn local_player(self) -> Option<Player> {
        match self {
            Role::Host => Some(Player::One),
            Role::Guest => Some(Player::Two),
            Role::Local => None,
        }
    }

    /// Whether this role may move for `player`.
    pub fn controls(self, player: Player) -> bool {
        self.local_player().map_or(true, |p| p == player)
    }

    const fn chat_prefix(self) -> Option<&'static str> {
        match self {
            Role::Host => Some("Host"),
            Role::Guest => Some("Client"),
            Role::Local => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    BoardSet,
    Started,
    Finished(Outcome),
}

/// Snapshot of the session for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub variant: GameVariant,
    pub phase: Phase,
    pub current_player: Player,
    pub role: Role,
    pub local_player: Option<Player>,
}

impl SessionStatus {
    pub fn is_started(&self) -> bool {
        matches!(self.phase, Phase::Started | Phase::Finished(_))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Whether the local seat is the one to move in a running game.
    pub fn is_local_turn(&self) -> bool {
        self.phase == Phase::Started && self.role.controls(self.current_player)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The game cannot start before a board is set.
    NoBoard,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoBoard => write!(f, "No board has been set"),
        }
    }
}

impl std::error::Error for SessionError {}

pub struct GameSession {
    variant: GameVariant,
    role: Role,
    config: SessionConfig,
    board: Option<Board>,
    current_player: Player,
    started: bool,
    outcome: Option<Outcome>,
    sink: Box<dyn FrameSink>,
    observer: Option<Box<dyn SessionObserver>>,
}

impl GameSession {
    pub fn new(
        variant: GameVariant,
        role: Role,
        sink: Box<dyn FrameSink>,
        config: SessionConfig,
    ) -> Self {
        Self {
            variant,
            role,
            config,
            board: None,
            current_player: Player::One,
            started: false,
            outcome: None,
            sink,
            observer: None,
        }
    }

    /// Hot-seat session with no peer.
    pub fn local(variant: GameVariant) -> Self {
        Self::new(variant, Role::Local, Box::new(NullSink), SessionConfig::default())
    }

    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    /// Install a live board. Any game in progress is discarded. The host
    /// forwards the board to its peer.
    pub fn set_board(&mut self, board: Board) {
        self.board = Some(board);
        self.started = false;
        self.outcome = None;
        if self.role == Role::Host {
            if let Some(board) = &self.board {
                self.transmit(&Message::board_data(board, self.variant));
            }
        }
        info!("{} board set", self.variant);
        self.notify_board();
    }

    /// Start play with player 1 to move. The host announces the start.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.board.is_none() {
            return Err(SessionError::NoBoard);
        }
        self.started = true;
        self.outcome = None;
        self.current_player = Player::One;
        if self.role == Role::Host {
            self.transmit(&Message::game_start(Player::One));
        }
        info!("{} started", self.variant);
        self.notify_player();
        Ok(())
    }

    /// Make a move for the current player. On error nothing changes and
    /// nothing is sent.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if !self.started {
            return Err(MoveError::NotStarted);
        }
        let player = self.current_player;
        if !self.role.controls(player) {
            return Err(MoveError::NotYourTurn);
        }
        let board = self.board.as_mut().ok_or(MoveError::NotStarted)?;
        if let Err(e) = validate_move(board, self.variant, player, mv) {
            debug!("Rejected {} for {}: {}", mv, player, e);
            return Err(e);
        }
        apply_move(board, player, mv).map_err(|_| MoveError::IllegalMove)?;
        debug!("{} played {}", player, mv);
        self.transmit(&Message::moved(mv, player));
        self.notify_board();
        self.after_move(player);
        Ok(())
    }

    /// Handle one frame received from the peer. Frames that cannot be used
    /// are logged and dropped without touching the session.
    pub fn handle_frame(&mut self, frame: &str) -> Result<(), ProtocolError> {
        let result = decode(frame).and_then(|msg| self.handle_message(msg));
        if let Err(e) = &result {
            warn!("Dropped frame: {}", e);
        }
        result
    }

    fn handle_message(&mut self, msg: Message) -> Result<(), ProtocolError> {
        match msg {
            Message::BoardData { board, game_type } => {
                let variant = variant_from_wire(game_type)?;
                let board = board_from_wire(&board)?;
                self.variant = variant;
                self.board = Some(board);
                self.started = false;
                self.outcome = None;
                info!("Received {} board", variant);
                self.notify_board();
            }
            Message::GameStart { current_player } => {
                let player = player_from_wire(current_player)?;
                if self.board.is_none() {
                    return Err(ProtocolError::OutOfOrder("GAME_START"));
                }
                self.started = true;
                self.outcome = None;
                self.current_player = player;
                info!("{} started, {} to move", self.variant, player);
                self.notify_player();
            }
            Message::Move { from, to, player } => {
                let player = player_from_wire(player)?;
                if !self.started || self.outcome.is_some() {
                    return Err(ProtocolError::OutOfOrder("MOVE"));
                }
                let mv = move_from_wire(from, to);
                let board = self
                    .board
                    .as_mut()
                    .ok_or(ProtocolError::OutOfOrder("MOVE"))?;
                if self.config.verify_inbound_moves {
                    if player != self.current_player {
                        return Err(ProtocolError::RejectedMove(MoveError::NotYourTurn));
                    }
                    validate_move(board, self.variant, player, mv)
                        .map_err(ProtocolError::RejectedMove)?;
                }
                apply_move(board, player, mv).map_err(ProtocolError::InvalidBoard)?;
                debug!("Peer {} played {}", player, mv);
                self.notify_board();
                self.after_move(player);
            }
            Message::GameEnd { winner } => {
                let outcome = winner.outcome()?;
                if self.outcome.is_some() {
                    debug!("Ignoring GAME_END ({}) after the game ended", outcome);
                    return Ok(());
                }
                self.finish(outcome, false);
            }
            Message::Chat { message } => {
                if let Some(observer) = self.observer.as_mut() {
                    observer.chat_received(&message);
                }
            }
        }
        Ok(())
    }

    /// The peer link dropped. An unfinished game ends by disconnection.
    pub fn handle_disconnect(&mut self) {
        if self.outcome.is_none() {
            warn!("Peer disconnected");
            self.finish(Outcome::Disconnected, false);
        }
    }

    /// Send a chat line tagged with this seat's name. Returns `false` when
    /// there is no peer or the send failed.
    pub fn send_chat(&mut self, text: &str) -> bool {
        let Some(prefix) = self.role.chat_prefix() else {
            return false;
        };
        self.transmit(&Message::chat(format!("{}: {}", prefix, text)))
    }

    fn after_move(&mut self, last_mover: Player) {
        let Some(board) = &self.board else {
            return;
        };
        match winner(board, self.variant, last_mover) {
            Some(w) => self.finish(Outcome::Winner(w), true),
            None => {
                self.current_player = last_mover.opponent();
                self.notify_player();
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, announce: bool) {
        self.outcome = Some(outcome);
        info!("Game over: {}", outcome);
        if announce {
            self.transmit(&Message::game_end(outcome));
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.game_ended(outcome);
        }
    }

    fn transmit(&self, msg: &Message) -> bool {
        if self.role == Role::Local {
            return false;
        }
        let sent = match encode(msg) {
            Ok(frame) => self.sink.send_frame(&frame),
            Err(e) => {
                warn!("Could not encode {}: {}", msg.kind(), e);
                false
            }
        };
        if !sent {
            warn!("Failed to send {} frame", msg.kind());
        }
        sent
    }

    fn notify_board(&mut self) {
        if let (Some(observer), Some(board)) = (self.observer.as_mut(), self.board.as_ref()) {
            observer.board_updated(board);
        }
    }

    fn notify_player(&mut self) {
        let player = self.current_player;
        if let Some(observer) = self.observer.as_mut() {
            observer.player_changed(player);
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn phase(&self) -> Phase {
        match (self.outcome, self.started, &self.board) {
            (Some(outcome), _, _) => Phase::Finished(outcome),
            (None, true, _) => Phase::Started,
            (None, false, Some(_)) => Phase::BoardSet,
            (None, false, None) => Phase::Created,
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            variant: self.variant,
            phase: self.phase(),
            current_player: self.current_player,
            role: self.role,
            local_player: self.role.local_player(),
        }
    }

    pub fn game_info(&self) -> Option<GameInfo> {
        self.board
            .as_ref()
            .map(|board| analyze(board, self.variant, self.current_player))
    }

    /// Valid moves of the player to move, empty outside a running game.
    pub fn valid_moves(&self) -> Vec<Move> {
        match (&self.board, self.phase()) {
            (Some(board), Phase::Started) => valid_moves(board, self.variant, self.current_player),
            _ => Vec::new(),
        }
    }
}
