use serde::{Deserialize, Serialize};

use crate::errors::DiscussItError;

/// Capability version a caller opts into. Older versions hide newer sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const LATEST: ApiVersion = ApiVersion::new(0, 3);

    /// First version that includes Slashdot results.
    pub const SLASHDOT_MIN: ApiVersion = ApiVersion::new(0, 3);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn includes_slashdot(&self) -> bool {
        *self >= Self::SLASHDOT_MIN
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

/// Accepts `"0.3"`, `"v0.3"`, or a bare API number such as `"3"` (read as `0.3`).
impl std::str::FromStr for ApiVersion {
    type Err = DiscussItError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        let invalid = || DiscussItError::InvalidInput(format!("Invalid API version: {}", s));

        match digits.split_once('.') {
            Some((major, minor)) => Ok(Self::new(
                major.parse().map_err(|_| invalid())?,
                minor.parse().map_err(|_| invalid())?,
            )),
            None => Ok(Self::new(0, digits.parse().map_err(|_| invalid())?)),
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
