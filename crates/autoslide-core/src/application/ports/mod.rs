//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `autoslide-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ScrollSurface`: scroll commands against the list view
//!   - `Scheduler` / `Clock`: timers and time
//!   - `OffsetStore`: persisted tab-strip offsets
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `CarouselController::dispatch`, `TabStripController::on_scroll`

pub mod output;

pub use output::{Clock, OffsetStore, Scheduler, ScrollSurface};

#[cfg(test)]
pub use output::{MockOffsetStore, MockScrollSurface};
