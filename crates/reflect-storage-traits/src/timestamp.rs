//! Millisecond timestamps

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the Unix epoch
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Current time. A clock set before the Unix epoch yields `0`.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self(millis)
    }

    /// Milliseconds since the Unix epoch
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Seconds since the Unix epoch
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1000
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_units() {
        let ts = Timestamp::from_millis(1_700_000_123_456);
        assert_eq!(ts.as_millis(), 1_700_000_123_456);
        assert_eq!(ts.as_secs(), 1_700_000_123);
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(Timestamp::now() > Timestamp::from_millis(1_577_836_800_000));
    }
}
