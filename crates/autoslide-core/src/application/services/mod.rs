//! Application services - drive the carousel and tab-strip use cases.
//!
//! Services own the domain state, execute reducer effects against ports,
//! and expose the small surface a host card needs.

pub mod carousel_controller;
pub mod tab_strip;

pub use carousel_controller::{CarouselController, TimerRole};
pub use tab_strip::TabStripController;
