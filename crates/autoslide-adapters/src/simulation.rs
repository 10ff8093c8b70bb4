//! Script-driven simulation on virtual time.
//!
//! Wires a [`CarouselController`] to a [`RecordingSurface`] and a
//! [`VirtualScheduler`], replays a [`Script`] of user gestures and host
//! changes, and reports how the index moved.
//!
//! Ordering at equal instants: timers due at or before `t` fire first, then
//! the scripted actions at `t` run in insertion order.

use std::time::Duration;

use autoslide_core::{
    application::CarouselController,
    domain::{CarouselConfig, CarouselEvent, Snapshot, SlideSet},
    error::AutoslideResult,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    scheduler::{SchedulerStats, VirtualScheduler},
    surface::{RecordingSurface, ScrollCommand},
};

/// Malformed script or simulation setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("drag ends at {end_ms}ms before it starts at {start_ms}ms")]
    DragEndsBeforeStart { start_ms: u64, end_ms: u64 },

    #[error("slide width must be finite and non-negative, got {width}")]
    InvalidWidth { width: f64 },
}

/// Something the user or the host does at a scripted instant.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptAction {
    DragStart,
    /// Release the drag. Lands on `to_index` when given, otherwise where the
    /// content currently rests.
    DragEnd { to_index: Option<usize> },
    /// Host re-rendered with a new slide list (always a new identity).
    ReplaceSlides(Vec<String>),
    Layout { slide_width: f64 },
    Unmount,
}

impl ScriptAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DragStart => "drag-start",
            Self::DragEnd { .. } => "drag-end",
            Self::ReplaceSlides(_) => "slides-changed",
            Self::Layout { .. } => "layout",
            Self::Unmount => "unmount",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    pub at: Duration,
    pub action: ScriptAction,
}

/// Time-ordered list of scripted actions.
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<ScriptedEvent>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping time order; equal instants keep insertion order.
    pub fn push(&mut self, at: Duration, action: ScriptAction) {
        let pos = self.events.partition_point(|e| e.at <= at);
        self.events.insert(pos, ScriptedEvent { at, action });
    }

    pub fn at(mut self, at: Duration, action: ScriptAction) -> Self {
        self.push(at, action);
        self
    }

    /// A full gesture: press at `start`, release at `end`.
    pub fn drag(
        mut self,
        start: Duration,
        end: Duration,
        to_index: Option<usize>,
    ) -> Result<Self, ScriptError> {
        if end < start {
            return Err(ScriptError::DragEndsBeforeStart {
                start_ms: start.as_millis() as u64,
                end_ms: end.as_millis() as u64,
            });
        }
        self.push(start, ScriptAction::DragStart);
        self.push(end, ScriptAction::DragEnd { to_index });
        Ok(self)
    }

    pub fn events(&self) -> &[ScriptedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// One observable change in the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// What caused it: a timer role or a scripted action.
    pub trigger: &'static str,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub timeline: Vec<TimelineEntry>,
    pub commands: Vec<ScrollCommand>,
    pub stats: SchedulerStats,
    #[serde(rename = "final")]
    pub final_snapshot: Snapshot,
}

impl SimulationReport {
    /// `(at_ms, index)` for every entry where the index moved.
    pub fn index_changes(&self) -> Vec<(u64, usize)> {
        let mut last = None;
        self.timeline
            .iter()
            .filter_map(|entry| {
                let index = entry.snapshot.current_index;
                let changed = last.is_some_and(|prev| prev != index);
                last = Some(index);
                changed.then_some((entry.snapshot.at_ms, index))
            })
            .collect()
    }
}

/// Simulation setup. Each [`Simulation::run`] builds fresh adapters.
#[derive(Debug, Clone)]
pub struct Simulation {
    slides: SlideSet,
    config: CarouselConfig,
    slide_width: f64,
    rejected_indices: Vec<usize>,
    reject_offsets: bool,
}

impl Simulation {
    pub fn new(
        slides: SlideSet,
        config: CarouselConfig,
        slide_width: f64,
    ) -> Result<Self, ScriptError> {
        if !slide_width.is_finite() || slide_width < 0.0 {
            return Err(ScriptError::InvalidWidth { width: slide_width });
        }
        Ok(Self {
            slides,
            config,
            slide_width,
            rejected_indices: Vec::new(),
            reject_offsets: false,
        })
    }

    /// The surface refuses index scrolls to `index`.
    pub fn reject_index(mut self, index: usize) -> Self {
        self.rejected_indices.push(index);
        self
    }

    /// The surface refuses offset scrolls too, so fallbacks fail.
    pub fn reject_offsets(mut self, reject: bool) -> Self {
        self.reject_offsets = reject;
        self
    }

    #[instrument(skip_all, fields(slides = self.slides.len(), until_ms = until.as_millis() as u64))]
    pub fn run(&self, script: &Script, until: Duration) -> AutoslideResult<SimulationReport> {
        let surface = RecordingSurface::new(self.slide_width).with_items(self.slides.len());
        for &index in &self.rejected_indices {
            surface.reject_index(index);
        }
        surface.reject_offset_scrolls(self.reject_offsets);
        let scheduler = VirtualScheduler::new();

        let controller = CarouselController::new(
            self.slides.clone(),
            self.config,
            Box::new(surface.clone()),
            Box::new(scheduler.clone()),
            Box::new(scheduler.clone()),
        )?;

        let mut run = Run {
            controller,
            surface,
            scheduler,
            timeline: Vec::new(),
        };

        run.controller.mount();
        run.record("mount");

        for scripted in script.events().iter().take_while(|e| e.at <= until) {
            run.fire_timers(scripted.at);
            run.apply(&scripted.action);
        }
        run.fire_timers(until);

        let report = run.finish();
        info!(
            entries = report.timeline.len(),
            final_index = report.final_snapshot.current_index,
            "Simulation finished"
        );
        Ok(report)
    }
}

/// Live adapters for one run.
struct Run {
    controller: CarouselController,
    surface: RecordingSurface,
    scheduler: VirtualScheduler,
    timeline: Vec<TimelineEntry>,
}

impl Run {
    fn record(&mut self, trigger: &'static str) {
        self.timeline.push(TimelineEntry {
            trigger,
            snapshot: self.controller.snapshot(),
        });
    }

    /// Report where an accepted animated scroll came to rest.
    fn settle_momentum(&mut self) {
        if let Some(offset) = self.surface.take_momentum() {
            self.controller
                .dispatch(CarouselEvent::MomentumEnded { offset });
        }
    }

    fn fire_timers(&mut self, until: Duration) {
        while let Some((_, handle)) = self.scheduler.pop_due(until) {
            let before = self.controller.snapshot();
            let Some(role) = self.controller.timer_fired(handle) else {
                continue;
            };
            self.settle_momentum();

            let after = self.controller.snapshot();
            if before.current_index != after.current_index
                || before.interaction != after.interaction
                || before.ticker_armed != after.ticker_armed
            {
                self.record(role.name());
            }
        }
        self.scheduler.advance_to(until);
    }

    fn apply(&mut self, action: &ScriptAction) {
        debug!(action = action.name(), "Applying scripted action");
        match action {
            ScriptAction::DragStart => self.controller.dispatch(CarouselEvent::DragStarted),
            ScriptAction::DragEnd { to_index } => {
                if let Some(index) = to_index {
                    let width = self.controller.state().slide_width();
                    self.surface.drag_to(*index as f64 * width);
                }
                let offset = self.surface.offset();
                self.controller.dispatch(CarouselEvent::DragEnded { offset });
            }
            ScriptAction::ReplaceSlides(slides) => {
                self.surface.set_item_count(slides.len());
                self.controller
                    .set_slides(SlideSet::new(slides.iter().map(String::as_str)));
            }
            ScriptAction::Layout { slide_width } => {
                self.surface.set_slide_width(*slide_width);
                self.controller.dispatch(CarouselEvent::LayoutMeasured {
                    slide_width: *slide_width,
                });
            }
            ScriptAction::Unmount => self.controller.unmount(),
        }
        self.settle_momentum();
        self.record(action.name());
    }

    fn finish(self) -> SimulationReport {
        SimulationReport {
            final_snapshot: self.controller.snapshot(),
            timeline: self.timeline,
            commands: self.surface.commands(),
            stats: self.scheduler.stats(),
        }
    }
}
