//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the controllers need from the host UI runtime.
//! The `autoslide-adapters` crate provides implementations.

use std::time::Duration;

use crate::domain::{ScrollOutcome, StripKey, TimerHandle};
use crate::error::AutoslideResult;

/// Port for the horizontally scrolling, page-snapping list a carousel drives.
///
/// Implemented by:
/// - `autoslide_adapters::surface::RecordingSurface` (testing / simulation)
/// - the host UI toolkit's list view (production)
///
/// ## Design Notes
///
/// - Commands report rejection as a value; they never panic.
/// - Callbacks (scroll, drag, momentum) flow the other way, as
///   `CarouselEvent`s dispatched by the host.
#[cfg_attr(test, mockall::automock)]
pub trait ScrollSurface: Send + Sync {
    /// Scroll so that slide `index` is in view.
    fn scroll_to_index(&self, index: usize, animated: bool) -> ScrollOutcome;

    /// Scroll to an absolute horizontal offset; the surface clamps.
    fn scroll_to_offset(&self, offset: f64, animated: bool) -> ScrollOutcome;

    /// Width of one slide, or 0 until layout has completed.
    fn measured_slide_width(&self) -> f64;
}

/// Port for the host event loop's timers.
///
/// Expiries are not callbacks: the host hands fired handles back to the
/// owning controller, which ignores any handle it no longer holds.
pub trait Scheduler: Send + Sync {
    /// Arm a timer that fires every `period` until cancelled.
    fn schedule_repeating(&self, period: Duration) -> TimerHandle;

    /// Arm a timer that fires once after `delay`.
    fn schedule_once(&self, delay: Duration) -> TimerHandle;

    /// Cancel a timer. Cancelling an unknown or fired handle is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// Port for the monotonic clock the scheduler runs on.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Port for persisted tab-strip scroll offsets.
///
/// Implemented by:
/// - `autoslide_adapters::offset_store::InMemoryOffsetStore`
///
/// Last write wins; entries are never cleared.
#[cfg_attr(test, mockall::automock)]
pub trait OffsetStore: Send + Sync {
    fn load(&self, key: &StripKey) -> AutoslideResult<Option<f64>>;

    fn save(&self, key: &StripKey, offset: f64) -> AutoslideResult<()>;
}
