//! In-memory offset store.
//!
//! Lives for the life of the process: a remounted tab strip finds the offset
//! its previous instance saved, nothing survives a restart.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use autoslide_core::{
    application::{ApplicationError, ports::OffsetStore},
    domain::StripKey,
    error::AutoslideResult,
};
use tracing::trace;

/// Thread-safe in-memory offset store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOffsetStore {
    inner: Arc<RwLock<HashMap<StripKey, f64>>>,
}

impl InMemoryOffsetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of strips with a stored offset.
    pub fn len(&self) -> AutoslideResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.len())
    }

    pub fn is_empty(&self) -> AutoslideResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl OffsetStore for InMemoryOffsetStore {
    fn load(&self, key: &StripKey) -> AutoslideResult<Option<f64>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(key).copied())
    }

    fn save(&self, key: &StripKey, offset: f64) -> AutoslideResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        trace!(strip = %key, offset, "Offset saved");
        inner.insert(key.clone(), offset);
        Ok(())
    }
}
