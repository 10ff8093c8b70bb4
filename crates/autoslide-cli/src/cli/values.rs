//! Value parsers for scripted simulation flags.
//!
//! Times use humantime syntax (`12s`, `1500ms`, `1m 5s`).
//!
//! | Flag          | Form                    | Example          |
//! |---------------|-------------------------|------------------|
//! | `--drag`      | `START[..END][@INDEX]`  | `12s..13s@0`     |
//! | `--reset-at`  | `TIME=slide,slide,...`  | `7s=x,y`         |
//! | `--layout-at` | `TIME=WIDTH`            | `2s=320`         |

use std::{str::FromStr, time::Duration};

/// Parse a humantime duration; a bare number is read as milliseconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    humantime::parse_duration(raw).map_err(|e| format!("invalid duration '{raw}': {e}"))
}

/// `TIME=VALUE` split shared by the keyed flags.
fn split_timed<'a>(raw: &'a str, what: &str) -> Result<(Duration, &'a str), String> {
    let (at, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TIME={what}, got '{raw}'"))?;
    Ok((parse_duration(at)?, value.trim()))
}

/// One user drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSpec {
    pub start: Duration,
    pub end: Duration,
    pub to_index: Option<usize>,
}

impl FromStr for DragSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (window, to_index) = match raw.split_once('@') {
            Some((window, index)) => {
                let index = index
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| format!("invalid landing index '{index}': {e}"))?;
                (window, Some(index))
            }
            None => (raw, None),
        };

        let (start, end) = match window.split_once("..") {
            Some((start, end)) => (parse_duration(start)?, parse_duration(end)?),
            None => {
                let at = parse_duration(window)?;
                (at, at)
            }
        };

        if end < start {
            return Err(format!("drag '{raw}' ends before it starts"));
        }
        Ok(Self {
            start,
            end,
            to_index,
        })
    }
}

/// Host replaces the slide list at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetSpec {
    pub at: Duration,
    pub slides: Vec<String>,
}

impl FromStr for ResetSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (at, list) = split_timed(raw, "slide,slide,...")?;
        let slides = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Ok(Self { at, slides })
    }
}

/// Layout reports a (new) slide width at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub at: Duration,
    pub slide_width: f64,
}

impl FromStr for LayoutSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (at, width) = split_timed(raw, "WIDTH")?;
        let slide_width = width
            .parse::<f64>()
            .map_err(|e| format!("invalid width '{width}': {e}"))?;
        if !slide_width.is_finite() || slide_width < 0.0 {
            return Err(format!("width must be finite and non-negative, got {width}"));
        }
        Ok(Self { at, slide_width })
    }
}
