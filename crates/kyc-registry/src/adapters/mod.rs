//! Adapters: concrete implementations of the registry's ports.

pub mod clock;

pub use clock::{ManualClock, SystemClock};
