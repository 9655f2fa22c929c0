//! Platform time in 100-nanosecond ticks

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Ticks per millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Ticks between 1601-01-01 and 1970-01-01
pub const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

/// Point in time counted in 100-ns ticks since 1601-01-01 UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileTime(i64);

impl FileTime {
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// Convert a wall-clock time. Times before 1970 saturate at the Unix epoch.
    pub fn from_system_time(time: SystemTime) -> Self {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        let ticks = i64::try_from(since_epoch.as_nanos() / 100).unwrap_or(i64::MAX);
        Self(UNIX_EPOCH_TICKS.saturating_add(ticks))
    }

    /// This time shifted by a millisecond offset
    pub const fn add_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis.saturating_mul(TICKS_PER_MILLISECOND)))
    }

    /// A zero timestamp means "no expiration" to the platform
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
