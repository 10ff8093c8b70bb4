//! Tab Strip Controller - remembers a horizontal tab strip's scroll offset.
//!
//! No timer. Every scroll writes the offset to the [`OffsetStore`] under the
//! strip's key; on mount a stored offset is restored with one non-animated
//! scroll. Restoration is best-effort and unvalidated: the surface clamps.

use tracing::{debug, instrument, trace};

use crate::{
    application::ports::{OffsetStore, ScrollSurface},
    domain::StripKey,
    error::AutoslideResult,
};

/// Persisted-offset controller for one mounted tab strip.
pub struct TabStripController {
    key: StripKey,
    store: Box<dyn OffsetStore>,
    surface: Box<dyn ScrollSurface>,
    restored: bool,
}

impl TabStripController {
    pub fn new(key: StripKey, store: Box<dyn OffsetStore>, surface: Box<dyn ScrollSurface>) -> Self {
        Self {
            key,
            store,
            surface,
            restored: false,
        }
    }

    /// Restore the stored offset, once per mount.
    ///
    /// Returns the offset that was requested, if any. A surface rejection is
    /// logged and swallowed; a store failure is returned.
    #[instrument(skip_all, fields(strip = %self.key))]
    pub fn mount(&mut self) -> AutoslideResult<Option<f64>> {
        if self.restored {
            return Ok(None);
        }
        self.restored = true;

        let Some(offset) = self.store.load(&self.key)? else {
            trace!("No stored offset");
            return Ok(None);
        };

        match self.surface.scroll_to_offset(offset, false) {
            Ok(()) => debug!(offset, "Restored tab strip offset"),
            Err(reason) => debug!(offset, %reason, "Restore rejected by surface"),
        }
        Ok(Some(offset))
    }

    /// Record the latest scroll position. Non-finite offsets are dropped.
    pub fn on_scroll(&self, offset: f64) -> AutoslideResult<()> {
        if !offset.is_finite() {
            trace!(strip = %self.key, "Dropping non-finite offset");
            return Ok(());
        }
        self.store.save(&self.key, offset)
    }

    pub fn key(&self) -> &StripKey {
        &self.key
    }
}

impl std::fmt::Debug for TabStripController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStripController")
            .field("key", &self.key)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}
