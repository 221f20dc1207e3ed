//! Instant definitions - points on the time axis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::InstantId;

/// Absolute position on the single linear time axis.
pub type Timestamp = DateTime<Utc>;

/// A point reference on the time axis.
///
/// An instant without a timestamp is valid: it means the position is not known,
/// not that the data is broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instant {
    pub id: InstantId,

    /// Bound timestamp, if any.
    pub timestamp: Option<Timestamp>,
}

impl Instant {
    /// Create an instant with no bound timestamp.
    pub fn new(id: InstantId) -> Self {
        Self {
            id,
            timestamp: None,
        }
    }

    /// Create an instant bound to the given timestamp.
    pub fn at(id: InstantId, timestamp: Timestamp) -> Self {
        Self {
            id,
            timestamp: Some(timestamp),
        }
    }

    /// Create an instant from an RFC 3339 string, normalized to UTC.
    pub fn parse_at(id: InstantId, rfc3339: &str) -> Result<Self, chrono::ParseError> {
        let timestamp = DateTime::parse_from_rfc3339(rfc3339)?.with_timezone(&Utc);
        Ok(Self::at(id, timestamp))
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}
