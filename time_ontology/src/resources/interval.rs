//! Interval definitions - ordered pairs of instants.

use serde::{Deserialize, Serialize};

use super::{Instant, InstantId, IntervalId, Timestamp};

/// A time interval delimited by a beginning and an end instant.
///
/// `beginning <= end` is expected of well-formed data but never enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub id: IntervalId,
    pub beginning: Instant,
    pub end: Instant,
}

impl Interval {
    pub fn new(id: IntervalId, beginning: Instant, end: Instant) -> Self {
        Self {
            id,
            beginning,
            end,
        }
    }

    /// Create an interval whose instants are anonymous and bound to the given timestamps.
    pub fn between(id: IntervalId, beginning: Timestamp, end: Timestamp) -> Self {
        Self::new(
            id,
            Instant::at(InstantId::new(), beginning),
            Instant::at(InstantId::new(), end),
        )
    }

    /// `Some(beginning <= end)` when both timestamps are bound, `None` otherwise.
    pub fn is_well_formed(&self) -> Option<bool> {
        match (self.beginning.timestamp, self.end.timestamp) {
            (Some(beginning), Some(end)) => Some(beginning <= end),
            _ => None,
        }
    }
}
