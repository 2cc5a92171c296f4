//! Periodic tick source for the session.
//!
//! The ticker runs a callback on its own thread at a fixed cadence. It does
//! not accumulate or compensate for missed ticks: each tick only prompts the
//! session to compare the wall clock against the timer deadline, so a late or
//! skipped tick corrects itself on the next one.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Ticker {
    interval: Duration,
    running: Option<RunningTicker>,
}

struct RunningTicker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Begin invoking `callback` once per interval.
    ///
    /// Starting an already running ticker replaces the previous callback.
    pub fn start<F>(&mut self, mut callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel();

        let (stop, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;
        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => callback(),
                    // Explicit stop or the ticker was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        self.running = Some(RunningTicker { stop, handle });
    }

    /// Stop ticking. Safe to call repeatedly or before `start`.
    pub fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.stop.send(());
            let _ = running.handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
