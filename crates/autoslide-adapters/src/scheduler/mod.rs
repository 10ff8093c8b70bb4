//! Scheduler and clock implementations.

mod virtual_time;

pub use virtual_time::{SchedulerStats, VirtualScheduler};
