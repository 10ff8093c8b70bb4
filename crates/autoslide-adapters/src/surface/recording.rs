//! A headless scroll surface that records every command it receives.
//!
//! Behaves like a paged horizontal list: index scrolls land on
//! `index * slide_width`, offset scrolls are clamped to the content extent.
//! Rejections can be injected to exercise the fallback paths.

use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use autoslide_core::{
    application::ports::ScrollSurface,
    domain::{ScrollOutcome, ScrollRejection},
};
use serde::Serialize;
use tracing::trace;

/// One scroll command as the surface saw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScrollCommand {
    ToIndex {
        index: usize,
        animated: bool,
        accepted: bool,
    },
    ToOffset {
        offset: f64,
        animated: bool,
        accepted: bool,
    },
}

impl ScrollCommand {
    pub fn accepted(&self) -> bool {
        match self {
            Self::ToIndex { accepted, .. } | Self::ToOffset { accepted, .. } => *accepted,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    slide_width: f64,
    item_count: Option<usize>,
    offset: f64,
    commands: Vec<ScrollCommand>,
    rejected_indices: HashSet<usize>,
    reject_offsets: bool,
    /// Resting offset of the last accepted animated scroll, until taken.
    momentum: Option<f64>,
}

impl Inner {
    fn max_offset(&self) -> f64 {
        match self.item_count {
            Some(count) => count.saturating_sub(1) as f64 * self.slide_width,
            None => f64::INFINITY,
        }
    }

    fn land(&mut self, offset: f64, animated: bool) {
        self.offset = offset.clamp(0.0, self.max_offset().max(0.0));
        if animated {
            self.momentum = Some(self.offset);
        }
    }
}

/// Thread-safe recording surface. Clones share state, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<RwLock<Inner>>,
}

impl RecordingSurface {
    /// A surface already measured at `slide_width`; pass `0.0` for unmeasured.
    pub fn new(slide_width: f64) -> Self {
        let surface = Self::default();
        surface.write().slide_width = slide_width;
        surface
    }

    /// Builder-style variant that also knows how many items are rendered.
    pub fn with_items(self, count: usize) -> Self {
        self.set_item_count(count);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_slide_width(&self, width: f64) {
        self.write().slide_width = width;
    }

    pub fn set_item_count(&self, count: usize) {
        self.write().item_count = Some(count);
    }

    /// Refuse index scrolls to `index` from now on.
    pub fn reject_index(&self, index: usize) {
        self.write().rejected_indices.insert(index);
    }

    pub fn reject_offset_scrolls(&self, reject: bool) {
        self.write().reject_offsets = reject;
    }

    /// Move the content as a user gesture would. Not recorded as a command.
    pub fn drag_to(&self, offset: f64) {
        let mut inner = self.write();
        inner.land(offset, false);
    }

    pub fn offset(&self) -> f64 {
        self.read().offset
    }

    pub fn commands(&self) -> Vec<ScrollCommand> {
        self.read().commands.clone()
    }

    /// Take the resting offset of the last animated scroll, if it has not
    /// been reported yet.
    pub fn take_momentum(&self) -> Option<f64> {
        self.write().momentum.take()
    }
}

impl ScrollSurface for RecordingSurface {
    fn scroll_to_index(&self, index: usize, animated: bool) -> ScrollOutcome {
        let mut inner = self.write();

        let outcome = if inner.slide_width <= 0.0 {
            Err(ScrollRejection::NotMeasured)
        } else if inner.rejected_indices.contains(&index) {
            Err(ScrollRejection::Rejected {
                reason: format!("index {index} not laid out"),
            })
        } else {
            match inner.item_count {
                Some(len) if index >= len => Err(ScrollRejection::OutOfRange { index, len }),
                _ => Ok(()),
            }
        };

        if outcome.is_ok() {
            let target = index as f64 * inner.slide_width;
            inner.land(target, animated);
        }
        inner.commands.push(ScrollCommand::ToIndex {
            index,
            animated,
            accepted: outcome.is_ok(),
        });
        trace!(index, animated, accepted = outcome.is_ok(), "scroll_to_index");
        outcome
    }

    fn scroll_to_offset(&self, offset: f64, animated: bool) -> ScrollOutcome {
        let mut inner = self.write();

        let outcome = if inner.reject_offsets {
            Err(ScrollRejection::Rejected {
                reason: "offset scrolling disabled".into(),
            })
        } else if !offset.is_finite() {
            Err(ScrollRejection::Rejected {
                reason: format!("non-finite offset {offset}"),
            })
        } else {
            Ok(())
        };

        if outcome.is_ok() {
            inner.land(offset, animated);
        }
        inner.commands.push(ScrollCommand::ToOffset {
            offset,
            animated,
            accepted: outcome.is_ok(),
        });
        trace!(offset, animated, accepted = outcome.is_ok(), "scroll_to_offset");
        outcome
    }

    fn measured_slide_width(&self) -> f64 {
        self.read().slide_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_scroll_lands_on_page() {
        let surface = RecordingSurface::new(320.0).with_items(3);
        surface.scroll_to_index(2, true).unwrap();

        assert_eq!(surface.offset(), 640.0);
        assert_eq!(surface.take_momentum(), Some(640.0));
        assert_eq!(surface.take_momentum(), None);
    }

    #[test]
    fn unmeasured_surface_rejects_index_scrolls() {
        let surface = RecordingSurface::new(0.0);
        assert_eq!(
            surface.scroll_to_index(1, true),
            Err(ScrollRejection::NotMeasured)
        );
        assert!(!surface.commands()[0].accepted());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let surface = RecordingSurface::new(100.0).with_items(2);
        assert_eq!(
            surface.scroll_to_index(5, false),
            Err(ScrollRejection::OutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let surface = RecordingSurface::new(100.0).with_items(3);
        surface.scroll_to_offset(9_000.0, false).unwrap();
        assert_eq!(surface.offset(), 200.0);
        assert_eq!(surface.take_momentum(), None);

        surface.scroll_to_offset(-50.0, false).unwrap();
        assert_eq!(surface.offset(), 0.0);
    }

    #[test]
    fn injected_rejections_are_recorded() {
        let surface = RecordingSurface::new(100.0);
        surface.reject_index(1);
        surface.reject_offset_scrolls(true);

        assert!(surface.scroll_to_index(1, true).is_err());
        assert!(surface.scroll_to_offset(100.0, true).is_err());
        assert!(surface.scroll_to_index(2, true).is_ok());

        let accepted: Vec<bool> = surface.commands().iter().map(ScrollCommand::accepted).collect();
        assert_eq!(accepted, vec![false, false, true]);
    }

    #[test]
    fn drag_moves_without_recording() {
        let surface = RecordingSurface::new(100.0);
        surface.drag_to(150.0);
        assert_eq!(surface.offset(), 150.0);
        assert!(surface.commands().is_empty());
    }
}
