//! Time and Randomness Sources
//!
//! The only ambient inputs the core reads: the current instant (for
//! timestamps and time/date replies) and random draws (for fallback selection
//! and reply jitter). Both are traits so tests can pin them down.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// The current point in time
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock, either in the system's local zone or a pinned UTC offset
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Clock in the system's local time zone
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// Clock pinned to a fixed UTC offset (e.g. IST, +05:30)
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => {
                let now = Local::now();
                now.with_timezone(&now.offset().fix())
            }
        }
    }
}

/// A clock that always reports the same instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Source of uniform random draws
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`; `len` must be non-zero
    fn pick(&self, len: usize) -> usize;

    /// Uniform duration in `[0, max]` at millisecond resolution
    fn jitter(&self, max: Duration) -> Duration;
}

/// Random source backed by a `StdRng`
///
/// When created with a seed, the draw sequence is deterministic, which makes
/// fallback choices and reply delays reproducible.
#[derive(Debug)]
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded with a fixed value
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn pick(&self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty range");
        self.rng.lock().gen_range(0..len.max(1))
    }

    fn jitter(&self, max: Duration) -> Duration {
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.lock().gen_range(0..=max_ms))
    }
}
