use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TrackerError};

/// Length of a collector visitor id, eg. "33c31e01394bdc63".
pub const VISITOR_ID_LENGTH: usize = 16;

/// Visitor id forced onto a tracking hit (`cid`).
///
/// Only the length is enforced. Collectors issue 16 hex characters but the
/// protocol does not require it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VisitorId(String);

impl VisitorId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let length = id.chars().count();
        if length != VISITOR_ID_LENGTH {
            return Err(TrackerError::InvalidVisitorId { length });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VisitorId {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<VisitorId> for String {
    fn from(id: VisitorId) -> Self {
        id.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
