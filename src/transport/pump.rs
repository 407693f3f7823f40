use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use tokio::task::JoinHandle;

use super::{LinkEvent, LinkEvents};
use crate::session::GameSession;

/// Session shared between the link pump and the front-end.
pub type SharedSession = Arc<Mutex<GameSession>>;

pub fn shared(session: GameSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Feed link events into the session until the link disconnects.
pub fn spawn_session_pump(session: SharedSession, mut events: LinkEvents) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                LinkEvent::Connected(Some(addr)) => info!("Peer {} attached", addr),
                LinkEvent::Connected(None) => info!("Peer attached"),
                LinkEvent::Frame(frame) => {
                    // Rejected frames are logged by the session.
                    let _ = lock_session(&session).handle_frame(&frame);
                }
                LinkEvent::Disconnected => {
                    lock_session(&session).handle_disconnect();
                    break;
                }
            }
        }
    })
}
