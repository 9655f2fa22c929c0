//! Toast identifiers

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque handle to a shown toast, valid until it is hidden or cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(i64);

impl ToastId {
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(&self) -> i64 {
        self.0
    }

    /// Draw a fresh, non-negative id from a random UUID's top 63 bits
    pub fn generate() -> Self {
        let bits = Uuid::new_v4().as_u128() >> 65;
        Self(bits as i64)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToastId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<ToastId> for i64 {
    fn from(id: ToastId) -> Self {
        id.0
    }
}
