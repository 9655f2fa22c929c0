//! Clock port interface

use crate::domain::toast::FileTime;

/// Port for the platform's notion of "now"
pub trait Clock: Send + Sync {
    /// Current time in 100-ns ticks since 1601-01-01 UTC
    fn now(&self) -> FileTime;
}
