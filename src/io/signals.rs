//! Unix signal handling for the session.
//!
//! SIGINT, SIGTERM and SIGHUP all end the session the same way a quit key
//! does: a `SessionEvent::Shutdown` is queued for the session loop, which then
//! runs the normal cleanup path (bridge reset, terminal restore).

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::core::SessionEvent;

/// Event channel and run flag shared by the session threads.
pub struct SignalState {
    /// Cleared once a shutdown has been requested.
    pub running: Arc<AtomicBool>,
    /// Session loop end of the event channel.
    pub event_receiver: Receiver<SessionEvent>,
    /// Cloned into every producer (signals, ticker, input).
    pub event_sender: Sender<SessionEvent>,
}

impl SignalState {
    /// Channel and flag without any OS signal registration.
    pub fn detached() -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<SessionEvent>();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            event_receiver,
            event_sender,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Mark the session as stopping.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Register the shutdown signals and spawn the thread that forwards them.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running = Arc::clone(&state.running);
    let sender = state.event_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            let user_message = match sig {
                SIGINT => {
                    if debug_enabled {
                        "Received SIGINT (Ctrl+C), initiating graceful shutdown..."
                    } else {
                        "Received interrupt signal, initiating graceful shutdown..."
                    }
                }
                SIGTERM => "Received termination request, initiating graceful shutdown...",
                SIGHUP => "Received hangup signal, initiating graceful shutdown...",
                _ => "Received shutdown signal, initiating graceful shutdown...",
            };

            log_pipe!();
            log_info!("{}", user_message);

            running.store(false, Ordering::SeqCst);

            // Receiver gone means the session already finished.
            if sender.send(SessionEvent::Shutdown).is_err() {
                break;
            }
        }
    });

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_state_starts_running() {
        let state = SignalState::detached();
        assert!(state.is_running());
        state.stop();
        assert!(!state.is_running());
    }

    #[test]
    fn test_events_flow_through_channel() {
        let state = SignalState::detached();
        let sender = state.event_sender.clone();
        thread::spawn(move || {
            sender.send(SessionEvent::Tick).unwrap();
            sender.send(SessionEvent::Shutdown).unwrap();
        })
        .join()
        .unwrap();

        assert!(matches!(state.event_receiver.recv(), Ok(SessionEvent::Tick)));
        assert!(matches!(
            state.event_receiver.recv(),
            Ok(SessionEvent::Shutdown)
        ));
    }
}
