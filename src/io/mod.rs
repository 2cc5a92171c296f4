// External I/O operations module
pub mod idle; // Screensaver inhibition over D-Bus
pub mod signals; // Unix signal handling
pub mod terminal; // Terminal input thread
