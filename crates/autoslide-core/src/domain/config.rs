//! Per-controller timing configuration.
//!
//! The product defaults are a 5 s advance period, a 10 s pause after the
//! user lets go, and a 100 ms settle window before the offset fallback.

use std::time::Duration;

use crate::domain::error::DomainError;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Timing for one carousel controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    tick_interval: Duration,
    cooldown: Duration,
    settle_delay: Duration,
}

impl CarouselConfig {
    pub fn builder() -> CarouselConfigBuilder {
        CarouselConfigBuilder::default()
    }

    /// Period of the repeating advance timer.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Suppression window after a drag ends.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Delay before an index-scroll failure is retried as an offset scroll.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tick_interval.is_zero() {
            return Err(DomainError::InvalidConfig {
                field: "tick_interval",
                reason: "must be greater than zero".into(),
            });
        }
        if self.settle_delay >= self.tick_interval {
            return Err(DomainError::InvalidConfig {
                field: "settle_delay",
                reason: format!(
                    "({:?}) must be shorter than tick_interval ({:?})",
                    self.settle_delay, self.tick_interval
                ),
            });
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            cooldown: DEFAULT_COOLDOWN,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Builder for [`CarouselConfig`]; unset fields keep the product defaults.
#[derive(Debug, Clone, Default)]
pub struct CarouselConfigBuilder {
    tick_interval: Option<Duration>,
    cooldown: Option<Duration>,
    settle_delay: Option<Duration>,
}

impl CarouselConfigBuilder {
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    pub fn build(self) -> Result<CarouselConfig, DomainError> {
        let config = CarouselConfig {
            tick_interval: self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL),
            cooldown: self.cooldown.unwrap_or(DEFAULT_COOLDOWN),
            settle_delay: self.settle_delay.unwrap_or(DEFAULT_SETTLE_DELAY),
        };
        config.validate()?;
        Ok(config)
    }
}
