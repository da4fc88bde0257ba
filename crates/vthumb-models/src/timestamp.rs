//! Seek timestamps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative offset from the start of a video, in whole seconds.
///
/// Rendered as `HH:MM:SS` when handed to the frame-extraction process.
/// Hours are zero-padded to two digits but not capped, so offsets past
/// 99 hours still render unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_secs(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, remainder) = (self.0 / 3600, self.0 % 3600);
        let (minutes, seconds) = (remainder / 60, remainder % 60);
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_rendering() {
        assert_eq!(Timestamp::from_secs(0).to_string(), "00:00:00");
        assert_eq!(Timestamp::from_secs(63).to_string(), "00:01:03");
        assert_eq!(Timestamp::from_secs(3600).to_string(), "01:00:00");
        assert_eq!(Timestamp::from_secs(3665).to_string(), "01:01:05");
    }

    #[test]
    fn test_timestamp_past_day_boundary() {
        assert_eq!(Timestamp::from_secs(360_000).to_string(), "100:00:00");
    }
}
