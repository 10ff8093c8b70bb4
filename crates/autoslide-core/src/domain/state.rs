//! Carousel state record.
//!
//! Everything the controller knows lives here. The re-entrancy flags a
//! callback-driven carousel would need ("the next scroll is mine", "a retry
//! is pending") are modelled as [`Motion`] states instead.

use std::time::Duration;

use serde::Serialize;

use crate::domain::value_objects::SlideSet;

/// Who currently owns the carousel's motion from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// Timer is eligible to advance.
    Idle,
    /// Finger down; ticks are suppressed.
    UserDragging,
    /// User just let go; ticks are suppressed until `deadline`.
    CoolingDown { deadline: Duration },
}

impl InteractionState {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Self::Idle => InteractionKind::Idle,
            Self::UserDragging => InteractionKind::UserDragging,
            Self::CoolingDown { .. } => InteractionKind::CoolingDown,
        }
    }
}

/// Payload-free view of [`InteractionState`] for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    Idle,
    UserDragging,
    CoolingDown,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::UserDragging => "user-dragging",
            Self::CoolingDown => "cooling-down",
        })
    }
}

/// Programmatic scroll bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Nothing in flight.
    Settled,
    /// An advance to `target` was issued; scroll callbacks belong to it.
    Programmatic { target: usize, previous: usize },
    /// Index scroll to `target` was rejected; an offset retry is scheduled.
    AwaitingFallback { target: usize, previous: usize },
}

/// Mount lifecycle of the owning card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, surface not mounted yet.
    Detached,
    Mounted,
    /// Unmounted. Terminal: every later event is ignored.
    TornDown,
}

/// Complete state of one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    pub(crate) slides: SlideSet,
    pub(crate) index: usize,
    pub(crate) slide_width: f64,
    pub(crate) last_offset: f64,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) interaction: InteractionState,
    pub(crate) motion: Motion,
    pub(crate) ticker_armed: bool,
}

impl CarouselState {
    pub fn new(slides: SlideSet) -> Self {
        Self {
            slides,
            index: 0,
            slide_width: 0.0,
            last_offset: 0.0,
            lifecycle: Lifecycle::Detached,
            interaction: InteractionState::Idle,
            motion: Motion::Settled,
            ticker_armed: false,
        }
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Most recent offset reported by the surface.
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn ticker_armed(&self) -> bool {
        self.ticker_armed
    }

    /// Whether the repeating timer should exist right now.
    pub fn wants_ticker(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted && self.slide_width > 0.0 && self.slides.auto_advances()
    }

    pub fn snapshot(&self, now: Duration) -> Snapshot {
        let cooldown_remaining_ms = match self.interaction {
            InteractionState::CoolingDown { deadline } => {
                Some(deadline.saturating_sub(now).as_millis() as u64)
            }
            _ => None,
        };
        Snapshot {
            at_ms: now.as_millis() as u64,
            current_index: self.index,
            slide_count: self.slides.len(),
            current_slide: self.slides.get(self.index).map(str::to_owned),
            interaction: self.interaction.kind(),
            cooldown_remaining_ms,
            ticker_armed: self.ticker_armed,
        }
    }
}

/// What a host card needs to render pagination, frozen at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub at_ms: u64,
    pub current_index: usize,
    pub slide_count: usize,
    pub current_slide: Option<String>,
    pub interaction: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining_ms: Option<u64>,
    pub ticker_armed: bool,
}

impl Snapshot {
    /// Number of pagination dots; zero slides render nothing.
    pub fn dot_count(&self) -> usize {
        self.slide_count
    }
}
