use std::str::FromStr;
use std::time::Duration;

use crate::error::SimError;

pub const DEFAULT_TRAINS: usize = 100;
pub const DEFAULT_CAPACITY: u32 = 500;
pub const DEFAULT_WORKERS: usize = 20;
pub const DEFAULT_GATE_LIMIT: usize = 5;
pub const DEFAULT_BOOK_MIN: u32 = 5;
pub const DEFAULT_BOOK_MAX: u32 = 10;
pub const DEFAULT_THINK_MAX_MS: u64 = 500;
pub const DEFAULT_DURATION_SECS: u64 = 60;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 10;
pub const DEFAULT_FEED_CAPACITY: usize = 1024;

/// Fixed inputs of a simulation run. Nothing here changes once workers start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub trains: usize,
    /// Seats per train.
    pub capacity: u32,
    pub workers: usize,
    /// Most workers allowed past the admission gate at once.
    pub gate_limit: usize,
    /// How long each worker keeps issuing requests, measured from its own start.
    pub worker_lifetime: Duration,
    pub think_min: Duration,
    pub think_max: Duration,
    /// Inclusive range a booking quantity is drawn from.
    pub book_min: u32,
    pub book_max: u32,
    /// Seeds every worker's RNG with `seed + worker id` when set.
    pub seed: Option<u64>,
    pub sample_interval: Duration,
    pub feed_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trains: DEFAULT_TRAINS,
            capacity: DEFAULT_CAPACITY,
            workers: DEFAULT_WORKERS,
            gate_limit: DEFAULT_GATE_LIMIT,
            worker_lifetime: Duration::from_secs(DEFAULT_DURATION_SECS),
            think_min: Duration::ZERO,
            think_max: Duration::from_millis(DEFAULT_THINK_MAX_MS),
            book_min: DEFAULT_BOOK_MIN,
            book_max: DEFAULT_BOOK_MAX,
            seed: None,
            sample_interval: Duration::from_millis(DEFAULT_SAMPLE_INTERVAL_MS),
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

fn var_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl SimConfig {
    /// Defaults overlaid with any `SEATGATE_*` variables that parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SimConfig::from_env`], reading values through `lookup`.
    /// Unset or unparsable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let lifetime_secs = var_or(&lookup, "SEATGATE_DURATION_SECS", DEFAULT_DURATION_SECS);
        let think_min_ms = var_or(&lookup, "SEATGATE_THINK_MIN_MS", 0);
        let think_max_ms = var_or(&lookup, "SEATGATE_THINK_MAX_MS", DEFAULT_THINK_MAX_MS);
        Self {
            trains: var_or(&lookup, "SEATGATE_TRAINS", d.trains),
            capacity: var_or(&lookup, "SEATGATE_CAPACITY", d.capacity),
            workers: var_or(&lookup, "SEATGATE_WORKERS", d.workers),
            gate_limit: var_or(&lookup, "SEATGATE_GATE_LIMIT", d.gate_limit),
            worker_lifetime: Duration::from_secs(lifetime_secs),
            think_min: Duration::from_millis(think_min_ms),
            think_max: Duration::from_millis(think_max_ms),
            book_min: var_or(&lookup, "SEATGATE_BOOK_MIN", d.book_min),
            book_max: var_or(&lookup, "SEATGATE_BOOK_MAX", d.book_max),
            seed: lookup("SEATGATE_SEED").and_then(|s| s.parse().ok()),
            sample_interval: d.sample_interval,
            feed_capacity: d.feed_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.trains == 0 {
            return Err(SimError::InvalidConfig("at least one train is required"));
        }
        if self.capacity == 0 {
            return Err(SimError::InvalidConfig("train capacity must be positive"));
        }
        if self.workers == 0 {
            return Err(SimError::InvalidConfig("at least one worker is required"));
        }
        if self.gate_limit == 0 {
            return Err(SimError::InvalidConfig("gate limit must be positive"));
        }
        if self.book_min == 0 || self.book_min > self.book_max {
            return Err(SimError::InvalidConfig(
                "booking range must be non-empty and start above zero",
            ));
        }
        if self.think_min > self.think_max {
            return Err(SimError::InvalidConfig("think time range is inverted"));
        }
        if self.sample_interval.is_zero() {
            return Err(SimError::InvalidConfig("sample interval must be positive"));
        }
        if self.feed_capacity == 0 {
            return Err(SimError::InvalidConfig("feed capacity must be positive"));
        }
        Ok(())
    }
}
