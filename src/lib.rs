#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod board;
mod cell;
mod common;
mod config;
pub mod rules;
mod variant;
pub mod victory;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use ai::*;
pub use board::*;
pub use cell::*;
pub use common::*;
pub use config::*;
pub use variant::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{Message, ProtocolError};
#[cfg(feature = "std")]
pub use session::*;
#[cfg(feature = "std")]
pub use transport::{Link, LinkEvent};
