//! System clock adapter

use std::time::SystemTime;

use crate::application::ports::Clock;
use crate::domain::toast::FileTime;

/// Wall clock converted to platform ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> FileTime {
        FileTime::from_system_time(SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::toast::UNIX_EPOCH_TICKS;

    #[test]
    fn now_is_after_unix_epoch() {
        assert!(SystemClock::new().now().ticks() > UNIX_EPOCH_TICKS);
    }
}
