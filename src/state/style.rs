//! Light shapes.
//!
//! The set is closed: each `LightStyle` maps to exactly one geometric `Shape`
//! through `LightStyle::shape`, so dispatch never goes through string tags.

use crate::common::constants::{RING_THICKNESS, ROUNDED_CORNER_RATIO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightStyle {
    Circle,
    RoundedSquare,
    Ring,
}

impl LightStyle {
    /// All styles in cycling order.
    pub const ALL: [LightStyle; 3] = [
        LightStyle::Circle,
        LightStyle::RoundedSquare,
        LightStyle::Ring,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Style at `index`, wrapping modulo the style count.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        match self {
            LightStyle::Circle => 0,
            LightStyle::RoundedSquare => 1,
            LightStyle::Ring => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightStyle::Circle => "circle",
            LightStyle::RoundedSquare => "rounded-square",
            LightStyle::Ring => "ring",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            LightStyle::Circle => Shape::Circle,
            LightStyle::RoundedSquare => Shape::RoundedSquare {
                corner_ratio: ROUNDED_CORNER_RATIO,
            },
            LightStyle::Ring => Shape::Ring {
                thickness: RING_THICKNESS,
            },
        }
    }
}

/// Geometry of the light, in a normalized box spanning `[-1, 1]` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle,
    /// `corner_ratio` is the corner radius relative to the half-size.
    RoundedSquare { corner_ratio: f32 },
    /// `thickness` is the band width relative to the outer radius.
    Ring { thickness: f32 },
}

impl Shape {
    /// Whether the normalized point `(x, y)` is inside the filled area.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Shape::Circle => x * x + y * y <= 1.0,
            Shape::RoundedSquare { corner_ratio } => {
                if x.abs() > 1.0 || y.abs() > 1.0 {
                    return false;
                }
                let inner = 1.0 - corner_ratio;
                let dx = (x.abs() - inner).max(0.0);
                let dy = (y.abs() - inner).max(0.0);
                dx * dx + dy * dy <= corner_ratio * corner_ratio
            }
            Shape::Ring { thickness } => {
                let distance = (x * x + y * y).sqrt();
                distance <= 1.0 && distance >= 1.0 - thickness
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(LightStyle::from_index(0), LightStyle::Circle);
        assert_eq!(LightStyle::from_index(2), LightStyle::Ring);
        assert_eq!(LightStyle::from_index(3), LightStyle::Circle);
        assert_eq!(LightStyle::from_index(7), LightStyle::RoundedSquare);
    }

    #[test]
    fn test_index_round_trips_through_all() {
        for (i, style) in LightStyle::ALL.iter().enumerate() {
            assert_eq!(style.index(), i);
        }
    }

    #[test]
    fn test_circle_contains() {
        let shape = LightStyle::Circle.shape();
        assert!(shape.contains(0.0, 0.0));
        assert!(shape.contains(0.7, 0.7));
        assert!(!shape.contains(0.8, 0.8));
    }

    #[test]
    fn test_rounded_square_corners_are_cut() {
        let shape = LightStyle::RoundedSquare.shape();
        assert!(shape.contains(0.95, 0.0));
        assert!(shape.contains(0.8, 0.8));
        assert!(!shape.contains(0.99, 0.99));
        assert!(!shape.contains(1.1, 0.0));
    }

    #[test]
    fn test_ring_has_hollow_center() {
        let shape = LightStyle::Ring.shape();
        assert!(!shape.contains(0.0, 0.0));
        assert!(!shape.contains(0.5, 0.0));
        assert!(shape.contains(0.85, 0.0));
        assert!(!shape.contains(1.05, 0.0));
    }
}
