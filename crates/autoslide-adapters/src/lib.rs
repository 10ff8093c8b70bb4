//! Infrastructure adapters for autoslide.
//!
//! This crate implements the ports defined in `autoslide-core::application::ports`
//! for headless hosts: a deterministic virtual clock, a scroll surface that
//! records what it was asked to do, an in-memory offset store, and a
//! script-driven simulation that wires them to a controller.

pub mod offset_store;
pub mod scheduler;
pub mod simulation;
pub mod surface;

// Re-export commonly used adapters
pub use offset_store::InMemoryOffsetStore;
pub use scheduler::{SchedulerStats, VirtualScheduler};
pub use simulation::{
    Script, ScriptAction, ScriptError, ScriptedEvent, Simulation, SimulationReport, TimelineEntry,
};
pub use surface::{RecordingSurface, ScrollCommand};
