//! Owner of the light state and its host side effects.
//!
//! `LightController` is the only writer of `LightState`. User intents and
//! ticks arrive here, one at a time, from the session loop; screen brightness
//! changes are forwarded to the bridge when the host allowed it at startup.

use chrono::{DateTime, Local};

use crate::backend::ScreenBrightnessBridge;
use crate::state::{LightState, Rgb, TimerRequest};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Toggle,
    SetBrightness(f32),
    AdjustBrightness(f32),
    SetScreenBrightness(f32),
    AdjustScreenBrightness(f32),
    CycleColor,
    SelectColor(usize),
    CycleStyle,
    SelectStyle(usize),
    SetCustomColor(Rgb),
    RequestTimer(TimerRequest),
    CancelTimer,
    Quit,
}

pub struct LightController {
    state: LightState,
    bridge: Box<dyn ScreenBrightnessBridge>,
    screen_capable: bool,
    /// Set once the bridge has been reset.
    released: bool,
    debug_enabled: bool,
}

impl LightController {
    /// Start a session with default state.
    ///
    /// Checks the bridge capability once and, when granted, pushes the default
    /// screen brightness so the slider and the display agree.
    pub fn new(mut bridge: Box<dyn ScreenBrightnessBridge>, debug_enabled: bool) -> Self {
        let screen_capable = bridge.check_capability();
        let state = LightState::new();

        if screen_capable {
            bridge.apply(state.screen_brightness());
        }
        if debug_enabled {
            log_pipe!();
            log_debug!(
                "{} bridge capability: {}",
                bridge.backend_name(),
                if screen_capable { "granted" } else { "unavailable" }
            );
        }

        Self {
            state,
            bridge,
            screen_capable,
            released: false,
            debug_enabled,
        }
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn screen_capable(&self) -> bool {
        self.screen_capable
    }

    pub fn bridge_name(&self) -> &'static str {
        self.bridge.backend_name()
    }

    /// Apply one intent. Returns `false` when the session should end.
    pub fn handle(&mut self, intent: Intent, now: DateTime<Local>) -> bool {
        match intent {
            Intent::Toggle => {
                self.state.toggle();
                log_decorated!("Light {}", if self.state.is_on() { "on" } else { "off" });
            }
            Intent::SetBrightness(value) => self.state.set_brightness(value),
            Intent::AdjustBrightness(delta) => {
                self.state.set_brightness(self.state.brightness() + delta);
            }
            Intent::SetScreenBrightness(value) => self.set_screen_brightness(value),
            Intent::AdjustScreenBrightness(delta) => {
                self.set_screen_brightness(self.state.screen_brightness() + delta);
            }
            Intent::CycleColor => self.state.cycle_color(),
            Intent::SelectColor(index) => self.state.select_color(index),
            Intent::CycleStyle => self.state.cycle_style(),
            Intent::SelectStyle(index) => self.state.select_style(index),
            Intent::SetCustomColor(color) => {
                self.state.set_custom_color(color);
                log_decorated!("Custom color set to {color}");
            }
            Intent::RequestTimer(request) => match self.state.request_timer(request, now) {
                Some(deadline) => {
                    log_decorated!("Timer set {request}, light off at {}", deadline.format("%H:%M"));
                }
                None => {
                    log_warning!("Timer {request} ignored");
                }
            },
            Intent::CancelTimer => {
                if self.state.timer_deadline().is_some() {
                    self.state.cancel_timer();
                    log_decorated!("Timer cancelled");
                }
            }
            Intent::Quit => return false,
        }

        if self.debug_enabled {
            log_debug!(
                "{intent:?} -> on={} brightness={:.2} color={} style={} screen={:.2}",
                self.state.is_on(),
                self.state.brightness(),
                self.state.color_index(),
                self.state.style().as_str(),
                self.state.screen_brightness()
            );
        }
        true
    }

    /// Periodic timer check. Returns `true` if the light was just switched off.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        let expired = self.state.tick(now);
        if expired {
            log_block_start!("Timer elapsed, light switched off");
        }
        expired
    }

    /// Hand the display back to the host. Later calls and the drop are no-ops.
    pub fn shutdown(&mut self) {
        if self.screen_capable && !self.released {
            self.released = true;
            self.bridge.reset();
            if self.debug_enabled {
                log_debug!("Screen brightness restored");
            }
        }
    }

    fn set_screen_brightness(&mut self, value: f32) {
        let stored = self.state.set_screen_brightness(value);
        if self.screen_capable {
            self.bridge.apply(stored);
        }
    }
}

impl Drop for LightController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
