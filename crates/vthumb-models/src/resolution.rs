//! Output resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a resolution string is not `WIDTHxHEIGHT`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid resolution: {0:?} (expected WIDTHxHEIGHT)")]
pub struct ResolutionParseError(pub String);

/// Thumbnail output resolution, rendered as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResolutionParseError(s.to_string());
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl TryFrom<String> for Resolution {
    type Error = ResolutionParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> Self {
        r.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let r: Resolution = "320x240".parse().unwrap();
        assert_eq!(r, Resolution::new(320, 240));
        assert_eq!(r.to_string(), "320x240");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("320".parse::<Resolution>().is_err());
        assert!("320x".parse::<Resolution>().is_err());
        assert!("x240".parse::<Resolution>().is_err());
        assert!("0x240".parse::<Resolution>().is_err());
        assert!("320x-240".parse::<Resolution>().is_err());
        assert!("wxh".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let r: Resolution = serde_json::from_str("\"1280x720\"").unwrap();
        assert_eq!(r, Resolution::new(1280, 720));
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"1280x720\"");
    }
}
