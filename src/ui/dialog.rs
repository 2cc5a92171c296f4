//! Modal dialogs: timer setup and custom color entry.
//!
//! Dialogs only collect input. They hand a finished value back to the caller
//! and never touch the light state themselves.

use chrono::{NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};

use crate::state::{Rgb, TimerPreset, TimerRequest};

/// Result of feeding one key to a dialog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogOutcome<T> {
    /// Still open.
    Pending,
    /// Confirmed with a value; close the dialog.
    Commit(T),
    /// Dismissed without a value.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Duration,
    ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockField {
    Hour,
    Minute,
}

/// Timer setup: one of the presets, or a wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerDialog {
    pub mode: TimerMode,
    pub preset: TimerPreset,
    pub hour: u32,
    pub minute: u32,
    pub field: ClockField,
}

impl TimerDialog {
    /// Open on the first preset, with the clock picker at `now`.
    pub fn new(now: NaiveTime) -> Self {
        Self {
            mode: TimerMode::Duration,
            preset: TimerPreset::ThirtyMinutes,
            hour: now.hour(),
            minute: now.minute(),
            field: ClockField::Hour,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<TimerRequest> {
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Enter => return self.commit(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = match self.mode {
                    TimerMode::Duration => TimerMode::ClockTime,
                    TimerMode::ClockTime => TimerMode::Duration,
                };
            }
            code => match self.mode {
                TimerMode::Duration => self.handle_duration_key(code),
                TimerMode::ClockTime => self.handle_clock_key(code),
            },
        }
        DialogOutcome::Pending
    }

    /// The request the dialog would commit right now.
    pub fn request(&self) -> Option<TimerRequest> {
        match self.mode {
            TimerMode::Duration => Some(TimerRequest::from_preset(self.preset)),
            TimerMode::ClockTime => TimerRequest::at(self.hour, self.minute).ok(),
        }
    }

    fn commit(&self) -> DialogOutcome<TimerRequest> {
        match self.request() {
            Some(request) => DialogOutcome::Commit(request),
            None => DialogOutcome::Pending,
        }
    }

    fn handle_duration_key(&mut self, code: KeyCode) {
        let count = TimerPreset::ALL.len();
        let index = self.preset.index();
        match code {
            KeyCode::Left | KeyCode::Up => {
                self.preset = TimerPreset::from_index(index + count - 1);
            }
            KeyCode::Right | KeyCode::Down => {
                self.preset = TimerPreset::from_index(index + 1);
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.preset = TimerPreset::from_index(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    fn handle_clock_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Right => {
                self.field = match self.field {
                    ClockField::Hour => ClockField::Minute,
                    ClockField::Minute => ClockField::Hour,
                };
            }
            KeyCode::Up => self.step_field(1),
            KeyCode::Down => self.step_field(-1),
            KeyCode::PageUp => self.step_field(10),
            KeyCode::PageDown => self.step_field(-10),
            _ => {}
        }
    }

    fn step_field(&mut self, delta: i32) {
        match self.field {
            ClockField::Hour => self.hour = wrap(self.hour, delta, 24),
            ClockField::Minute => self.minute = wrap(self.minute, delta, 60),
        }
    }
}

fn wrap(value: u32, delta: i32, modulus: u32) -> u32 {
    (value as i32 + delta).rem_euclid(modulus as i32) as u32
}

/// Field of the color dialog that has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Red,
    Green,
    Blue,
    Hex,
}

impl ColorField {
    const ORDER: [ColorField; 4] = [
        ColorField::Red,
        ColorField::Green,
        ColorField::Blue,
        ColorField::Hex,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Custom color entry by channel or by hex code.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDialog {
    pub color: Rgb,
    pub field: ColorField,
    /// Hex text as typed; may be incomplete while editing.
    pub hex: String,
}

impl ColorDialog {
    pub fn new(initial: Rgb) -> Self {
        Self {
            color: initial,
            field: ColorField::Red,
            hex: initial.to_hex(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<Rgb> {
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Enter => {
                if self.field == ColorField::Hex {
                    return match Rgb::from_hex(&self.hex) {
                        Ok(color) => DialogOutcome::Commit(color),
                        Err(_) => DialogOutcome::Pending,
                    };
                }
                return DialogOutcome::Commit(self.color);
            }
            KeyCode::Tab => self.focus(self.field.next()),
            KeyCode::BackTab => self.focus(self.field.previous()),
            code if self.field == ColorField::Hex => self.edit_hex(code),
            KeyCode::Up | KeyCode::Right => self.step_channel(1),
            KeyCode::Down | KeyCode::Left => self.step_channel(-1),
            KeyCode::PageUp => self.step_channel(16),
            KeyCode::PageDown => self.step_channel(-16),
            _ => {}
        }
        DialogOutcome::Pending
    }

    fn focus(&mut self, field: ColorField) {
        // Leaving the hex field with a half-typed code reverts it.
        if self.field == ColorField::Hex {
            self.hex = self.color.to_hex();
        }
        self.field = field;
    }

    fn edit_hex(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_hexdigit() && self.hex.len() < 6 => {
                self.hex.push(c.to_ascii_uppercase());
            }
            KeyCode::Backspace => {
                self.hex.pop();
            }
            _ => return,
        }
        if matches!(self.hex.len(), 3 | 6)
            && let Ok(color) = Rgb::from_hex(&self.hex)
        {
            self.color = color;
        }
    }

    fn step_channel(&mut self, delta: i16) {
        let channel = match self.field {
            ColorField::Red => &mut self.color.r,
            ColorField::Green => &mut self.color.g,
            ColorField::Blue => &mut self.color.b,
            ColorField::Hex => return,
        };
        *channel = (i16::from(*channel) + delta).clamp(0, 255) as u8;
        self.hex = self.color.to_hex();
    }
}
