//! Terminal input reader thread.
//!
//! crossterm's `event::read` blocks, so input is read on its own thread and
//! forwarded to the session channel. The thread polls with a short timeout so
//! it notices a stop request without needing another key press.

use crossterm::event;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::common::constants::INPUT_POLL_INTERVAL;
use crate::core::SessionEvent;

pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    /// Start forwarding terminal events to `sender`.
    ///
    /// A read failure ends the session: with no input the user could not quit.
    pub fn spawn(sender: Sender<SessionEvent>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                let polled = event::poll(INPUT_POLL_INTERVAL).and_then(|ready| {
                    if ready {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                });

                match polled {
                    Ok(Some(event)) => {
                        if sender.send(SessionEvent::Input(event)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log_warning!("Failed to read terminal input: {e}");
                        let _ = sender.send(SessionEvent::Shutdown);
                        break;
                    }
                }
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the reader and wait for it. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}
