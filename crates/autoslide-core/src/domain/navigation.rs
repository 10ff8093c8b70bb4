//! Active-tab derivation for route-driven tab strips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One tab and the route prefix that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRoute {
    pub id: String,
    pub route_prefix: String,
}

impl TabRoute {
    pub fn new(id: impl Into<String>, route_prefix: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route_prefix: route_prefix.into(),
        }
    }

    /// Whether this tab's prefix selects `path`.
    ///
    /// Matches on whole path segments: `/store` selects `/store` and
    /// `/store/42`, never `/stores`. An empty prefix selects nothing.
    pub fn matches(&self, path: &str) -> bool {
        let prefix = self.route_prefix.as_str();
        if prefix.is_empty() {
            return false;
        }
        if path == prefix {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => prefix.ends_with('/') || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for TabRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.route_prefix)
    }
}

impl FromStr for TabRoute {
    type Err = DomainError;

    /// Parse `ID=/route/prefix`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidTabRoute {
            input: s.to_owned(),
            reason: reason.to_owned(),
        };
        let (id, prefix) = s.split_once('=').ok_or_else(|| invalid("expected ID=PREFIX"))?;
        let (id, prefix) = (id.trim(), prefix.trim());
        if id.is_empty() {
            return Err(invalid("tab id is empty"));
        }
        if prefix.is_empty() {
            return Err(invalid("route prefix is empty"));
        }
        Ok(Self::new(id, prefix))
    }
}

/// First tab whose prefix selects `path`, in declaration order.
pub fn active_tab<'a>(tabs: &'a [TabRoute], path: &str) -> Option<&'a str> {
    tabs.iter()
        .find(|tab| tab.matches(path))
        .map(|tab| tab.id.as_str())
}

/// [`active_tab`] memoized on the navigation path.
///
/// Screens re-render many times per second while scrolling; the scan only
/// re-runs when the path actually changes.
#[derive(Debug, Clone)]
pub struct ActiveTabMemo {
    tabs: Vec<TabRoute>,
    last_path: Option<String>,
    cached: Option<usize>,
    computations: usize,
}

impl ActiveTabMemo {
    pub fn new(tabs: Vec<TabRoute>) -> Self {
        Self {
            tabs,
            last_path: None,
            cached: None,
            computations: 0,
        }
    }

    pub fn resolve(&mut self, path: &str) -> Option<&str> {
        if self.last_path.as_deref() != Some(path) {
            self.cached = self.tabs.iter().position(|tab| tab.matches(path));
            self.last_path = Some(path.to_owned());
            self.computations += 1;
        }
        self.cached.map(|i| self.tabs[i].id.as_str())
    }

    /// How many times the tab list has actually been scanned.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn tabs(&self) -> &[TabRoute] {
        &self.tabs
    }
}
