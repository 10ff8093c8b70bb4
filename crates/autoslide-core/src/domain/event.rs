//! Events fed into the reducer and effects it asks the shell to perform.

use crate::domain::state::CarouselState;
use crate::domain::value_objects::{ScrollRejection, SlideSet};

/// Everything that can happen to a carousel.
///
/// Surface callbacks, timer expiries, and the outcome of scroll commands all
/// arrive through this one type, so there is a single entry point for every
/// state change.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    // === Surface lifecycle ===
    /// Surface mounted; `slide_width` may still be 0 if layout is pending.
    Mounted { slide_width: f64 },
    LayoutMeasured { slide_width: f64 },
    Unmounted,

    // === Host card ===
    /// Host re-rendered with a (possibly) new slide set.
    SlidesChanged(SlideSet),

    // === Surface callbacks ===
    DragStarted,
    Scrolled { offset: f64 },
    DragEnded { offset: f64 },
    MomentumEnded { offset: f64 },

    // === Timers ===
    Tick,
    SettleElapsed,
    CooldownExpired,

    // === Scroll command feedback ===
    IndexScrollFailed { target: usize, reason: ScrollRejection },
    OffsetScrollFailed { target: usize, reason: ScrollRejection },
}

impl CarouselEvent {
    /// Short name used in logs and timelines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted { .. } => "mounted",
            Self::LayoutMeasured { .. } => "layout-measured",
            Self::Unmounted => "unmounted",
            Self::SlidesChanged(_) => "slides-changed",
            Self::DragStarted => "drag-started",
            Self::Scrolled { .. } => "scrolled",
            Self::DragEnded { .. } => "drag-ended",
            Self::MomentumEnded { .. } => "momentum-ended",
            Self::Tick => "tick",
            Self::SettleElapsed => "settle-elapsed",
            Self::CooldownExpired => "cooldown-expired",
            Self::IndexScrollFailed { .. } => "index-scroll-failed",
            Self::OffsetScrollFailed { .. } => "offset-scroll-failed",
        }
    }
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Arm the repeating advance timer, cancelling any previous one first.
    ArmTicker,
    DisarmTicker,
    ScrollToIndex { index: usize, animated: bool },
    /// `target` is the logical index the offset corresponds to.
    ScrollToOffset { target: usize, offset: f64, animated: bool },
    ScheduleSettle,
    CancelSettle,
    ScheduleCooldownExpiry,
    CancelCooldownExpiry,
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CarouselState,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn unchanged(state: &CarouselState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}
