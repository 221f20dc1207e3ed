//! Interval fact resolution - from an interval identifier to its endpoint timestamps.

use serde::{Deserialize, Serialize};
use time_ontology::{IntervalId, TemporalStore, Timestamp};

use crate::error::{RelationError, RelationResult};

/// Endpoint timestamps of an interval as currently known.
///
/// Computed fresh for every evaluation and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedInterval {
    pub beginning: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl ResolvedInterval {
    pub fn new(beginning: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { beginning, end }
    }

    /// Both endpoints known.
    pub fn known(beginning: Timestamp, end: Timestamp) -> Self {
        Self::new(Some(beginning), Some(end))
    }

    /// Nothing known about either endpoint.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.beginning.is_some() && self.end.is_some()
    }
}

/// Resolve the endpoint timestamps of an interval.
///
/// Fails only for the nil identifier. An undeclared interval resolves to two
/// unknown endpoints, as does one whose instants carry no timestamp.
pub fn resolve<S>(store: &S, interval: &IntervalId) -> RelationResult<ResolvedInterval>
where
    S: TemporalStore + ?Sized,
{
    if interval.is_nil() {
        return Err(RelationError::Reference {
            argument: "interval",
        });
    }
    Ok(resolve_declared(store, interval))
}

/// Lookup half of [`resolve`], for callers that already checked the identifier.
pub(crate) fn resolve_declared<S>(store: &S, interval: &IntervalId) -> ResolvedInterval
where
    S: TemporalStore + ?Sized,
{
    let Some((beginning, end)) = store.lookup_interval(interval) else {
        tracing::trace!(interval = %interval, "interval not declared, endpoints unknown");
        return ResolvedInterval::unknown();
    };
    ResolvedInterval {
        beginning: store.lookup_instant(beginning),
        end: store.lookup_instant(end),
    }
}
