//! Screen geometry: where the light and each control sit for a terminal size.
//!
//! The light fills the top of the screen; the control panel occupies a fixed
//! band of rows at the bottom. Hit testing uses the same geometry that drawing
//! does, so a click always lands on what is displayed under it.

use crate::common::constants::{
    MAXIMUM_BRIGHTNESS, MAXIMUM_SCREEN_BRIGHTNESS, MINIMUM_BRIGHTNESS, MINIMUM_SCREEN_BRIGHTNESS,
};
use crate::state::palette::PALETTE_SIZE;
use crate::ui::slider::Slider;

/// Rows reserved for the panel below the light.
pub const PANEL_ROWS: u16 = 8;
/// Columns reserved for a control's label before its widget.
pub const LABEL_COLUMNS: u16 = 32;
/// Columns reserved after a slider for its percentage.
pub const VALUE_COLUMNS: u16 = 6;
/// Columns per palette swatch, brackets included.
pub const SWATCH_STRIDE: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// What a pointer position refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Toggle,
    Brightness(f32),
    ScreenBrightness(f32),
    Color(usize),
    Style,
    Timer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub columns: u16,
    pub rows: u16,
    pub light: Rect,
    pub panel_x: u16,
    pub toggle_row: u16,
    pub brightness: Slider,
    pub screen: Slider,
    pub swatch_row: u16,
    pub swatch_x: u16,
    pub action_row: u16,
    pub timer_x: u16,
    pub hint_row: u16,
}

impl Layout {
    pub fn compute(columns: u16, rows: u16) -> Self {
        let panel_x = 2u16.min(columns);
        let panel_width = columns.saturating_sub(panel_x * 2);
        let widget_x = panel_x.saturating_add(LABEL_COLUMNS);
        let slider_width = panel_width
            .saturating_sub(LABEL_COLUMNS)
            .saturating_sub(VALUE_COLUMNS)
            .max(1);

        let hint_row = rows.saturating_sub(1);
        let action_row = rows.saturating_sub(3);
        let swatch_row = rows.saturating_sub(4);
        let screen_row = rows.saturating_sub(5);
        let brightness_row = rows.saturating_sub(6);
        let toggle_row = rows.saturating_sub(PANEL_ROWS);

        Self {
            columns,
            rows,
            light: Rect {
                x: 0,
                y: 0,
                width: columns,
                height: toggle_row.saturating_sub(1),
            },
            panel_x,
            toggle_row,
            brightness: Slider::new(
                widget_x,
                brightness_row,
                slider_width,
                MINIMUM_BRIGHTNESS,
                MAXIMUM_BRIGHTNESS,
            ),
            screen: Slider::new(
                widget_x,
                screen_row,
                slider_width,
                MINIMUM_SCREEN_BRIGHTNESS,
                MAXIMUM_SCREEN_BRIGHTNESS,
            ),
            swatch_row,
            swatch_x: widget_x,
            action_row,
            timer_x: panel_x.saturating_add(panel_width / 2),
            hint_row,
        }
    }

    /// Column of swatch `index`.
    pub fn swatch_column(&self, index: usize) -> u16 {
        self.swatch_x
            .saturating_add(SWATCH_STRIDE.saturating_mul(index as u16))
    }

    /// Which control, if any, is under (`column`, `row`).
    ///
    /// With the light off only the on/off control is shown, so it is the only
    /// thing that can be hit.
    pub fn hit(&self, column: u16, row: u16, is_on: bool) -> Option<Hit> {
        if row == self.toggle_row {
            return Some(Hit::Toggle);
        }
        if !is_on {
            return None;
        }

        if self.brightness.contains(column, row) {
            return Some(Hit::Brightness(self.brightness.value_at(column)));
        }
        if self.screen.contains(column, row) {
            return Some(Hit::ScreenBrightness(self.screen.value_at(column)));
        }
        if row == self.swatch_row && column >= self.swatch_x {
            let index = usize::from((column - self.swatch_x) / SWATCH_STRIDE);
            return (index < PALETTE_SIZE).then_some(Hit::Color(index));
        }
        if row == self.action_row && column >= self.panel_x {
            return Some(if column >= self.timer_x {
                Hit::Timer
            } else {
                Hit::Style
            });
        }
        None
    }
}
