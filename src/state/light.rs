//! The light session state machine.
//!
//! `LightState` is the single source of truth for the light. Every mutation
//! is total: numeric inputs are clamped and indices wrap, so none of these
//! operations can fail. The presentation layer never reads fields one at a
//! time during a frame; it takes a `LightSnapshot` instead.

use chrono::{DateTime, Local};

use crate::common::constants::*;
use crate::i18n::Labels;
use crate::state::palette::{Palette, Rgb};
use crate::state::style::{LightStyle, Shape};
use crate::state::timer::{Countdown, TimerRequest};

/// A color at a given opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub opacity: f32,
}

impl Glow {
    /// The visible color of this glow over a black background.
    pub fn composite(&self) -> Rgb {
        self.color.blend_over(Rgb::BLACK, self.opacity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    is_on: bool,
    brightness: f32,
    color_index: usize,
    style_index: usize,
    screen_brightness: f32,
    timer_deadline: Option<DateTime<Local>>,
    palette: Palette,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            is_on: DEFAULT_IS_ON,
            brightness: DEFAULT_BRIGHTNESS,
            color_index: DEFAULT_COLOR_INDEX,
            style_index: DEFAULT_STYLE_INDEX,
            screen_brightness: DEFAULT_SCREEN_BRIGHTNESS,
            timer_deadline: None,
            palette: Palette::default(),
        }
    }
}

impl LightState {
    pub fn new() -> Self {
        Self::default()
    }

    // # Accessors

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn style_index(&self) -> usize {
        self.style_index
    }

    pub fn screen_brightness(&self) -> f32 {
        self.screen_brightness
    }

    pub fn timer_deadline(&self) -> Option<DateTime<Local>> {
        self.timer_deadline
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // # Mutations

    /// Flip the light. Switching off also drops any pending timer.
    pub fn toggle(&mut self) {
        self.is_on = !self.is_on;
        if !self.is_on {
            self.timer_deadline = None;
        }
    }

    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = clamp_or(value, MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS);
    }

    /// Store the desired screen brightness and return the stored value.
    pub fn set_screen_brightness(&mut self, value: f32) -> f32 {
        self.screen_brightness =
            clamp_or(value, MINIMUM_SCREEN_BRIGHTNESS, MAXIMUM_SCREEN_BRIGHTNESS);
        self.screen_brightness
    }

    pub fn cycle_color(&mut self) {
        self.select_color(self.color_index + 1);
    }

    pub fn select_color(&mut self, index: usize) {
        self.color_index = index % self.palette.len();
    }

    pub fn cycle_style(&mut self) {
        self.select_style(self.style_index + 1);
    }

    pub fn select_style(&mut self, index: usize) {
        self.style_index = index % LightStyle::COUNT;
    }

    /// Overwrite the reserved custom slot and select it.
    pub fn set_custom_color(&mut self, color: Rgb) {
        self.palette.set_custom(color);
        self.color_index = self.palette.custom_index();
    }

    /// Arm the auto-off timer.
    ///
    /// Returns the stored deadline, or `None` when nothing was armed: a dark
    /// light never carries a timer, and a deadline that would not lie strictly
    /// after `now` is ignored (an existing timer stays as it was).
    pub fn request_timer(
        &mut self,
        request: TimerRequest,
        now: DateTime<Local>,
    ) -> Option<DateTime<Local>> {
        if !self.is_on {
            return None;
        }
        let deadline = request.resolve(&now).filter(|deadline| *deadline > now)?;
        self.timer_deadline = Some(deadline);
        Some(deadline)
    }

    pub fn cancel_timer(&mut self) {
        self.timer_deadline = None;
    }

    /// Periodic expiry check. Returns `true` only on the call that switched
    /// the light off; later calls are no-ops.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        match self.timer_deadline {
            Some(deadline) if now >= deadline => {
                self.is_on = false;
                self.timer_deadline = None;
                true
            }
            _ => false,
        }
    }

    // # Derived values

    pub fn style(&self) -> LightStyle {
        LightStyle::from_index(self.style_index)
    }

    pub fn shape(&self) -> Shape {
        self.style().shape()
    }

    pub fn color(&self) -> Rgb {
        self.palette.get(self.color_index)
    }

    /// Main body of the light.
    pub fn glow(&self) -> Glow {
        if self.is_on {
            Glow {
                color: self.color(),
                opacity: self.brightness,
            }
        } else {
            Glow {
                color: Rgb::NEUTRAL_GRAY,
                opacity: GLOW_OPACITY_OFF,
            }
        }
    }

    /// Soft layer drawn behind the body.
    pub fn halo(&self) -> Glow {
        if self.is_on {
            Glow {
                color: self.color(),
                opacity: HALO_OPACITY_ON,
            }
        } else {
            Glow {
                color: Rgb::NEUTRAL_GRAY,
                opacity: HALO_OPACITY_OFF,
            }
        }
    }

    /// Tint for controls; white would vanish on the panel, so it maps to gray.
    pub fn accent(&self) -> Rgb {
        if self.color_index == 0 {
            Rgb::NEUTRAL_GRAY
        } else {
            self.color()
        }
    }

    pub fn countdown(&self, now: DateTime<Local>) -> Option<Countdown> {
        self.timer_deadline
            .map(|deadline| Countdown::until(&deadline, &now))
    }

    /// Freeze everything the presentation layer needs for one frame.
    pub fn snapshot(&self, now: DateTime<Local>, labels: &Labels) -> LightSnapshot {
        LightSnapshot {
            is_on: self.is_on,
            brightness: self.brightness,
            color_index: self.color_index,
            color: self.color(),
            style: self.style(),
            shape: self.shape(),
            screen_brightness: self.screen_brightness,
            glow: self.glow(),
            halo: self.halo(),
            accent: self.accent(),
            timer_text: self.countdown(now).map(|c| c.render(labels)),
            palette: self.palette.clone(),
        }
    }
}

/// Immutable view of `LightState` for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSnapshot {
    pub is_on: bool,
    pub brightness: f32,
    pub color_index: usize,
    pub color: Rgb,
    pub style: LightStyle,
    pub shape: Shape,
    pub screen_brightness: f32,
    pub glow: Glow,
    pub halo: Glow,
    pub accent: Rgb,
    /// `None` when no timer is armed.
    pub timer_text: Option<String>,
    pub palette: Palette,
}

/// Clamp into `[min, max]`; NaN maps to `min`.
fn clamp_or(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
