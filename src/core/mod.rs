//! Core session logic.
//!
//! A session is a single-writer event loop. Three producers feed one channel:
//!
//! - the ticker (`SessionEvent::Tick`, once per second)
//! - the terminal input thread (`SessionEvent::Input`)
//! - the signal thread (`SessionEvent::Shutdown`)
//!
//! The loop applies each event to the `LightController` and repaints. No
//! other thread touches the light state, so no two mutations ever overlap.
//!
//! Shutdown runs in a fixed order: stop the ticker, stop input, reset the
//! screen brightness bridge, release the idle inhibition, restore the terminal.

pub mod controller;
pub mod ticker;

use anyhow::{Context, Result};
use crossterm::event::Event;
use std::io::{self, Write};

use crate::{
    common::{constants::TICK_INTERVAL, utils::TerminalGuard},
    config,
    i18n::Labels,
    io::{idle, signals::SignalState, terminal::InputReader},
    state::{LightSnapshot, TimerRequest},
    time::TimeSource,
    ui::Ui,
};

pub use controller::{Intent, LightController};
pub use ticker::Ticker;

/// Everything the session loop reacts to.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Periodic timer check.
    Tick,
    /// A terminal key, mouse or resize event.
    Input(Event),
    /// Leave the session (signal or input failure).
    Shutdown,
}

/// Parameters for creating a Core instance.
pub(crate) struct CoreParams {
    pub controller: LightController,
    pub signal_state: SignalState,
    pub terminal: TerminalGuard,
    pub time_source: Box<dyn TimeSource>,
    pub labels: &'static Labels,
    pub inhibit_idle: bool,
    pub initial_timer: Option<TimerRequest>,
    pub debug_enabled: bool,
}

pub(crate) struct Core {
    controller: LightController,
    signal_state: SignalState,
    terminal: TerminalGuard,
    time_source: Box<dyn TimeSource>,
    labels: &'static Labels,
    inhibit_idle: bool,
    initial_timer: Option<TimerRequest>,
    debug_enabled: bool,
    ticker: Ticker,
    ui: Ui,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        let (columns, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            controller: params.controller,
            signal_state: params.signal_state,
            terminal: params.terminal,
            time_source: params.time_source,
            labels: params.labels,
            inhibit_idle: params.inhibit_idle,
            initial_timer: params.initial_timer,
            debug_enabled: params.debug_enabled,
            ticker: Ticker::new(TICK_INTERVAL),
            ui: Ui::new(columns, rows),
        }
    }

    /// Run the session until the user quits or a shutdown signal arrives.
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!(
                "Base directory: {}",
                crate::common::utils::private_path(&custom_dir)
            );
        }

        let mut inhibitor = idle::inhibit_if_enabled(self.inhibit_idle, self.debug_enabled);

        if let Some(request) = self.initial_timer.take() {
            let now = self.time_source.now();
            self.controller.handle(Intent::RequestTimer(request), now);
        }

        let tick_sender = self.signal_state.event_sender.clone();
        self.ticker.start(move || {
            let _ = tick_sender.send(SessionEvent::Tick);
        });
        let mut input = InputReader::spawn(self.signal_state.event_sender.clone());

        let result = self.main_loop();

        self.ticker.cancel();
        input.stop();
        self.controller.shutdown();
        if let Some(mut inhibitor) = inhibitor.take() {
            inhibitor.release();
        }
        self.terminal.restore();

        log_block_start!("Night light closed");
        log_end!();
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        self.render(&mut stdout)?;

        while self.signal_state.is_running() {
            // Every producer holds a sender clone; a closed channel means they are all gone.
            let Ok(event) = self.signal_state.event_receiver.recv() else {
                break;
            };

            if !self.process_event(event) {
                self.signal_state.stop();
                break;
            }
            self.render(&mut stdout)?;
        }
        Ok(())
    }

    /// Apply one event. Returns `false` when the session should end.
    fn process_event(&mut self, event: SessionEvent) -> bool {
        let now = self.time_source.now();
        match event {
            SessionEvent::Tick => {
                self.controller.tick(now);
                true
            }
            SessionEvent::Input(event) => {
                let snapshot = self.snapshot();
                match self.ui.handle_event(
                    &event,
                    &snapshot,
                    self.controller.screen_capable(),
                    now.time(),
                ) {
                    Some(intent) => self.controller.handle(intent, now),
                    None => true,
                }
            }
            SessionEvent::Shutdown => {
                if self.debug_enabled {
                    log_debug!("Shutdown requested");
                }
                false
            }
        }
    }

    fn snapshot(&self) -> LightSnapshot {
        self.controller
            .state()
            .snapshot(self.time_source.now(), self.labels)
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let snapshot = self.snapshot();
        self.ui.sync(&snapshot);
        self.ui
            .draw(out, &snapshot, self.labels, self.controller.screen_capable())
            .context("Failed to draw the night light")
    }
}
