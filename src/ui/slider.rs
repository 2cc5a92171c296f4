//! Horizontal slider geometry.
//!
//! A slider occupies `width` cells starting at column `x`. Pointer positions
//! map to values through the slider's own extent, never the screen width.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub x: u16,
    pub row: u16,
    pub width: u16,
    pub min: f32,
    pub max: f32,
}

impl Slider {
    pub fn new(x: u16, row: u16, width: u16, min: f32, max: f32) -> Self {
        Self {
            x,
            row,
            width,
            min,
            max,
        }
    }

    /// Whether a pointer at (`column`, `row`) is over the track.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row && column >= self.x && column < self.x.saturating_add(self.width)
    }

    /// Value under `column`, clamped to `[min, max]`.
    ///
    /// The first cell maps to `min` and the last to `max`.
    pub fn value_at(&self, column: u16) -> f32 {
        if self.width <= 1 {
            return self.max;
        }
        let offset = column.saturating_sub(self.x).min(self.width - 1);
        if offset == self.width - 1 {
            return self.max;
        }
        let fraction = f32::from(offset) / f32::from(self.width - 1);
        self.min + fraction * (self.max - self.min)
    }

    /// Index of the thumb cell for `value`.
    pub fn thumb_offset(&self, value: f32) -> u16 {
        if self.width <= 1 || self.max <= self.min {
            return 0;
        }
        let fraction = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (fraction * f32::from(self.width - 1)).round() as u16
    }

    /// Track text: filled up to the thumb, empty after it.
    pub fn track(&self, value: f32) -> String {
        let thumb = self.thumb_offset(value);
        (0..self.width)
            .map(|i| match i.cmp(&thumb) {
                std::cmp::Ordering::Less => '━',
                std::cmp::Ordering::Equal => '●',
                std::cmp::Ordering::Greater => '─',
            })
            .collect()
    }
}
