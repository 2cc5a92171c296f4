//! Time handling: the clock abstraction used by the session.

pub mod source;

#[cfg(any(test, feature = "testing-support"))]
pub use source::ManualTimeSource;
pub use source::{RealTimeSource, TimeSource};
