/// Side length of the playable interior shared by every variant.
pub const PLAY_SIZE: usize = 8;
/// Katarenga wraps the interior in a one-cell border holding the corners.
pub const BORDERED_SIZE: usize = PLAY_SIZE + 2;
/// Side length of a square pattern; four of them tile the interior.
pub const SQUARE_SIZE: usize = 4;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Longest frame accepted from a peer, newline excluded.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Behaviour switches for a game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Re-run move validation on MOVE frames received from the peer instead
    /// of applying them as sent.
    pub verify_inbound_moves: bool,
}

/// Limits applied by the peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    pub max_frame_len: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_frame_len: MAX_FRAME_LEN,
        }
    }
}
