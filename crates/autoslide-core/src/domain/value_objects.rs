//! Domain value objects: slide sets, timer handles, strip keys and scroll
//! outcomes.
//!
//! These are plain values with no behaviour beyond construction, identity
//! and display. All state-machine rules live in `reducer.rs`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::DomainError;

// ── SlideSet ─────────────────────────────────────────────────────────────────

/// Identity of a [`SlideSet`].
///
/// A host card re-rendering with a freshly fetched banner list produces a new
/// identity even when the URLs are unchanged; cloning keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideSetId(Uuid);

impl SlideSetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlideSetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlideSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Ordered banner identifiers (usually image URLs) shown by one carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSet {
    id: SlideSetId,
    slides: Arc<[String]>,
}

impl SlideSet {
    /// Build a set with a fresh identity.
    pub fn new<I, S>(slides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slides: Vec<String> = slides.into_iter().map(Into::into).collect();
        Self {
            id: SlideSetId::new(),
            slides: slides.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn id(&self) -> SlideSetId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(String::as_str)
    }

    /// Whether a set of this size is ever auto-advanced.
    pub fn auto_advances(&self) -> bool {
        self.len() > 1
    }
}

impl Default for SlideSet {
    fn default() -> Self {
        Self::empty()
    }
}

// ── TimerHandle ──────────────────────────────────────────────────────────────

/// Opaque handle returned by a scheduler for one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

// ── StripKey ─────────────────────────────────────────────────────────────────

/// Stable identity of a persisted tab strip, used as the offset-store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StripKey(String);

impl StripKey {
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStripKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ScrollRejection ──────────────────────────────────────────────────────────

/// Why a scrollable surface refused a scroll command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollRejection {
    /// Layout has not been measured yet.
    #[error("surface not measured yet")]
    NotMeasured,

    /// The index is outside what the surface currently renders.
    #[error("index {index} out of range for {len} rendered items")]
    OutOfRange { index: usize, len: usize },

    #[error("scroll rejected: {reason}")]
    Rejected { reason: String },
}

/// Result of one imperative scroll command.
pub type ScrollOutcome = Result<(), ScrollRejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let set = SlideSet::new(["a", "b"]);
        assert_eq!(set.clone().id(), set.id());
    }

    #[test]
    fn equal_contents_get_distinct_identities() {
        let first = SlideSet::new(["a", "b"]);
        let second = SlideSet::new(["a", "b"]);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn single_slide_never_auto_advances() {
        assert!(!SlideSet::empty().auto_advances());
        assert!(!SlideSet::new(["only"]).auto_advances());
        assert!(SlideSet::new(["a", "b"]).auto_advances());
    }

    #[test]
    fn strip_key_rejects_blank() {
        assert_eq!(StripKey::new("   "), Err(DomainError::EmptyStripKey));
        assert_eq!(StripKey::new(" home-tabs ").unwrap().as_str(), "home-tabs");
    }

    #[test]
    fn slide_lookup() {
        let set = SlideSet::new(["https://cdn/a.png", "https://cdn/b.png"]);
        assert_eq!(set.get(1), Some("https://cdn/b.png"));
        assert_eq!(set.get(2), None);
        assert_eq!(set.iter().count(), 2);
    }
}
