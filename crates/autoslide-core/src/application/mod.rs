//! Application layer for autoslide.
//!
//! This layer contains:
//! - **Services**: controllers that own state and execute effects
//! - **Ports**: Interface definitions (traits) for the host UI runtime
//! - **Errors**: Application-specific error types
//!
//! The application layer executes what the domain decides but contains no
//! carousel rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CarouselController, TabStripController, TimerRole};

// Re-export port traits (for adapter implementation)
pub use ports::{Clock, OffsetStore, Scheduler, ScrollSurface};

pub use error::ApplicationError;
