//! autoslide Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for an
//! interaction-aware auto-advancing carousel, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Host UI / autoslide-cli           │
//! │  (delivers gestures, timer expiries)    │
//! └──────────────────┬──────────────────────┘
//!                    │ dispatch(event)
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (CarouselController, TabStripController)│
//! │      execute effects, own timers        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ScrollSurface, Scheduler, Clock,       │
//! │  OffsetStore)                           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    autoslide-adapters (Infrastructure)  │
//! │ (VirtualScheduler, RecordingSurface,    │
//! │  InMemoryOffsetStore)                   │
//! └─────────────────────────────────────────┘
//!
//!          Domain Layer (Pure Logic)
//!   reduce(state, event, ctx) -> (state, effects)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use autoslide_core::prelude::*;
//!
//! # fn wire(surface: Box<dyn ScrollSurface>, scheduler: Box<dyn Scheduler>, clock: Box<dyn Clock>) -> AutoslideResult<()> {
//! let slides = SlideSet::new(["https://cdn/banner-1.png", "https://cdn/banner-2.png"]);
//! let mut carousel =
//!     CarouselController::new(slides, CarouselConfig::default(), surface, scheduler, clock)?;
//!
//! carousel.mount();
//! carousel.dispatch(CarouselEvent::DragStarted);
//! carousel.dispatch(CarouselEvent::DragEnded { offset: 412.0 });
//! println!("dot {} of {}", carousel.current_index(), carousel.slide_count());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CarouselController, TabStripController, TimerRole,
        ports::{Clock, OffsetStore, Scheduler, ScrollSurface},
    };
    pub use crate::domain::{
        ActiveTabMemo, CarouselConfig, CarouselEvent, InteractionKind, InteractionState,
        ScrollOutcome, ScrollRejection, SlideSet, Snapshot, StripKey, TabRoute, TimerHandle,
        active_tab,
    };
    pub use crate::error::{AutoslideError, AutoslideResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
