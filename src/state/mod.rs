//! Light session state: the state machine and the value types it is built from.
//!
//! - `light`: `LightState` and its render snapshot
//! - `palette`: colors and the fixed palette with its custom slot
//! - `style`: the closed set of shapes
//! - `timer`: timer requests, deadline resolution and countdowns

pub mod light;
pub mod palette;
pub mod style;
pub mod timer;

pub use light::{Glow, LightSnapshot, LightState};
pub use palette::{Palette, Rgb};
pub use style::{LightStyle, Shape};
pub use timer::{Countdown, TimerPreset, TimerRequest};
