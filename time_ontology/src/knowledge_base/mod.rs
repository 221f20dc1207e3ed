//! Time knowledge base - the fact store holding declared instants and intervals.
//!
//! The knowledge base consists of:
//! - **Instant store**: instant identifier -> optional timestamp
//! - **Interval store**: interval identifier -> (beginning instant, end instant)
//! - **Feature index**: which features the intervals and instants describe
//! - **Relation assertions**: user-declared relations between intervals
//!
//! Declarations are idempotent: declaring something that already exists is a no-op
//! and the first declaration wins.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::resources::{FeatureId, Instant, InstantId, Interval, IntervalId, Timestamp};
use crate::vocabulary::IntervalRelation;

/// Read access to declared temporal facts.
///
/// Implementations must be side-effect free; the relation engine calls them
/// concurrently from many threads.
pub trait TemporalStore {
    /// Beginning and end instants of a declared interval, `None` if undeclared.
    fn lookup_interval(&self, id: &IntervalId) -> Option<(&InstantId, &InstantId)>;

    /// Timestamp of an instant, `None` if undeclared or not bound.
    fn lookup_instant(&self, id: &InstantId) -> Option<Timestamp>;
}

impl<T: TemporalStore + ?Sized> TemporalStore for &T {
    fn lookup_interval(&self, id: &IntervalId) -> Option<(&InstantId, &InstantId)> {
        (**self).lookup_interval(id)
    }

    fn lookup_instant(&self, id: &InstantId) -> Option<Timestamp> {
        (**self).lookup_instant(id)
    }
}

impl<T: TemporalStore + ?Sized> TemporalStore for Arc<T> {
    fn lookup_interval(&self, id: &IntervalId) -> Option<(&InstantId, &InstantId)> {
        (**self).lookup_interval(id)
    }

    fn lookup_instant(&self, id: &InstantId) -> Option<Timestamp> {
        (**self).lookup_instant(id)
    }
}

/// Interval store entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalBounds {
    pub beginning: InstantId,
    pub end: InstantId,
}

/// A relation declared to hold between two intervals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationAssertion {
    pub left: IntervalId,
    pub relation: IntervalRelation,
    pub right: IntervalId,
}

/// The main temporal fact store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimeKnowledgeBase {
    /// Instant store.
    instants: HashMap<InstantId, Option<Timestamp>>,

    /// Interval store.
    intervals: HashMap<IntervalId, IntervalBounds>,

    /// Index: Feature -> intervals describing it.
    feature_intervals: HashMap<FeatureId, BTreeSet<IntervalId>>,

    /// Index: Feature -> instants describing it.
    feature_instants: HashMap<FeatureId, BTreeSet<InstantId>>,

    /// Declared relations, in declaration order.
    assertions: Vec<RelationAssertion>,
}

impl TimeKnowledgeBase {
    /// Create a new empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an instant. Returns `false` if it was already declared.
    pub fn declare_instant(&mut self, instant: Instant) -> bool {
        if self.instants.contains_key(&instant.id) {
            return false;
        }
        self.instants.insert(instant.id, instant.timestamp);
        true
    }

    /// Declare an instant as the temporal extent of a feature.
    pub fn declare_feature_instant(&mut self, feature: FeatureId, instant: Instant) -> InstantId {
        let id = instant.id.clone();
        self.declare_instant(instant);
        self.feature_instants
            .entry(feature)
            .or_default()
            .insert(id.clone());
        id
    }

    /// Declare an interval together with its two instants.
    ///
    /// Returns `false` if the interval was already declared; its instants are
    /// still declared if they were not known before.
    pub fn declare_interval(&mut self, interval: Interval) -> bool {
        let Interval {
            id,
            beginning,
            end,
        } = interval;

        let bounds = IntervalBounds {
            beginning: beginning.id.clone(),
            end: end.id.clone(),
        };
        self.declare_instant(beginning);
        self.declare_instant(end);

        if self.intervals.contains_key(&id) {
            return false;
        }
        self.intervals.insert(id, bounds);
        true
    }

    /// Declare an interval as the temporal extent of a feature.
    pub fn declare_feature_interval(
        &mut self,
        feature: FeatureId,
        interval: Interval,
    ) -> IntervalId {
        let id = interval.id.clone();
        self.declare_interval(interval);
        self.feature_intervals
            .entry(feature)
            .or_default()
            .insert(id.clone());
        id
    }

    /// Declare that a relation holds between two intervals.
    ///
    /// The intervals don't need to be declared yet. Returns `false` for duplicates.
    pub fn assert_relation(
        &mut self,
        left: IntervalId,
        relation: IntervalRelation,
        right: IntervalId,
    ) -> bool {
        let assertion = RelationAssertion {
            left,
            relation,
            right,
        };
        if self.assertions.contains(&assertion) {
            return false;
        }
        self.assertions.push(assertion);
        true
    }

    /// Rebuild the full interval declaration.
    pub fn get_interval(&self, id: &IntervalId) -> Option<Interval> {
        self.intervals.get(id).map(|bounds| {
            Interval::new(
                id.clone(),
                self.get_instant(&bounds.beginning),
                self.get_instant(&bounds.end),
            )
        })
    }

    /// Instant with whatever timestamp is known for it.
    pub fn get_instant(&self, id: &InstantId) -> Instant {
        Instant {
            id: id.clone(),
            timestamp: self.instants.get(id).copied().flatten(),
        }
    }

    pub fn has_interval(&self, id: &IntervalId) -> bool {
        self.intervals.contains_key(id)
    }

    pub fn has_instant(&self, id: &InstantId) -> bool {
        self.instants.contains_key(id)
    }

    /// All declared interval identifiers.
    pub fn intervals(&self) -> impl Iterator<Item = &IntervalId> {
        self.intervals.keys()
    }

    /// Intervals declared for a feature.
    pub fn intervals_of(&self, feature: &FeatureId) -> Vec<&IntervalId> {
        self.feature_intervals
            .get(feature)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// Instants declared for a feature.
    pub fn instants_of(&self, feature: &FeatureId) -> Vec<&InstantId> {
        self.feature_instants
            .get(feature)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// All features with declared temporal extent.
    pub fn features(&self) -> impl Iterator<Item = &FeatureId> {
        let instant_only = self
            .feature_instants
            .keys()
            .filter(|feature| !self.feature_intervals.contains_key(*feature));
        self.feature_intervals.keys().chain(instant_only)
    }

    pub fn asserted_relations(&self) -> &[RelationAssertion] {
        &self.assertions
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn instant_count(&self) -> usize {
        self.instants.len()
    }

    /// Serialize a snapshot of the knowledge base as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a knowledge base from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl TemporalStore for TimeKnowledgeBase {
    fn lookup_interval(&self, id: &IntervalId) -> Option<(&InstantId, &InstantId)> {
        self.intervals
            .get(id)
            .map(|bounds| (&bounds.beginning, &bounds.end))
    }

    fn lookup_instant(&self, id: &InstantId) -> Option<Timestamp> {
        self.instants.get(id).copied().flatten()
    }
}
