// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for autoslide.
//!
//! Pure carousel logic: no timers, no surfaces, no clocks. Time arrives as
//! a `Duration` in [`reducer::ReduceContext`]; side effects leave as
//! [`event::Effect`] values for the application layer to execute.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: the state machine is synchronous
//! - **No I/O**: scroll commands and timers are effects, not calls
//! - **Deterministic**: same state + event + context gives the same result
//!
// Public API - what the world sees
pub mod config;
pub mod error;
pub mod event;
pub mod navigation;
pub mod reducer;
pub mod state;
pub mod value_objects;

// Re-exports for convenience
pub use config::{CarouselConfig, CarouselConfigBuilder};
pub use error::{DomainError, ErrorCategory};
pub use event::{CarouselEvent, Effect, Transition};
pub use navigation::{ActiveTabMemo, TabRoute, active_tab};
pub use reducer::{ReduceContext, offset_to_index, reduce};
pub use state::{CarouselState, InteractionKind, InteractionState, Lifecycle, Motion, Snapshot};
pub use value_objects::{
    ScrollOutcome, ScrollRejection, SlideSet, SlideSetId, StripKey, TimerHandle,
};
