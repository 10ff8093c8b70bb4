//! Scroll surface implementations.

mod recording;

pub use recording::{RecordingSurface, ScrollCommand};
