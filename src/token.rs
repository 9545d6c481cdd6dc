use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// A validated, non-negative token ID.
///
/// IDs are capped at `i64::MAX` so every ID is also a valid selector seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TokenId(u64);

impl TokenId {
    pub const MAX: u64 = i64::MAX as u64;

    pub fn new(id: u64) -> Result<Self, GenerateError> {
        if id > Self::MAX {
            return Err(GenerateError::InvalidTokenId {
                input: id.to_string(),
                reason: "exceeds the largest supported id",
            });
        }
        Ok(Self(id))
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Seed fed to the selector. Equal to the ID.
    pub const fn seed(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for TokenId {
    type Error = GenerateError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<i64> for TokenId {
    type Error = GenerateError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u64::try_from(id)
            .map_err(|_| GenerateError::InvalidTokenId {
                input: id.to_string(),
                reason: "must be non-negative",
            })
            .and_then(Self::new)
    }
}

impl From<TokenId> for u64 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl FromStr for TokenId {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = |reason| GenerateError::InvalidTokenId {
            input: s.to_owned(),
            reason,
        };
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if trimmed.starts_with('-') {
            return Err(invalid("must be non-negative"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("not an integer"));
        }
        let id: u64 = trimmed
            .parse()
            .map_err(|_| invalid("exceeds the largest supported id"))?;
        Self::new(id).map_err(|_| invalid("exceeds the largest supported id"))
    }
}
