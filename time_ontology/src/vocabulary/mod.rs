//! Interval relation vocabulary: the names of Allen's relations plus disjointness.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Qualitative relations between two intervals on one time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntervalRelation {
    // Separated
    After,
    Before,

    // Touching
    Meets,
    MetBy,

    // Crossing
    Overlaps,
    OverlappedBy,

    // Shared beginning
    Starts,
    StartedBy,

    // Shared end
    Finishes,
    FinishedBy,

    // Nesting
    Contains,
    During,
    /// Same algorithm as `During`, under the other vocabulary name.
    In,

    Equals,

    /// Derived: either interval ends strictly before the other begins.
    Disjoint,
}

/// Error returned when a relation name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interval relation: {0}")]
pub struct UnknownRelation(pub String);

impl IntervalRelation {
    /// Every relation name, including the `In` alias and `Disjoint`.
    pub const ALL: [IntervalRelation; 15] = [
        IntervalRelation::After,
        IntervalRelation::Before,
        IntervalRelation::Meets,
        IntervalRelation::MetBy,
        IntervalRelation::Overlaps,
        IntervalRelation::OverlappedBy,
        IntervalRelation::Starts,
        IntervalRelation::StartedBy,
        IntervalRelation::Finishes,
        IntervalRelation::FinishedBy,
        IntervalRelation::Contains,
        IntervalRelation::During,
        IntervalRelation::In,
        IntervalRelation::Equals,
        IntervalRelation::Disjoint,
    ];

    /// The thirteen mutually exclusive base relations of Allen's algebra.
    pub const BASE: [IntervalRelation; 13] = [
        IntervalRelation::Before,
        IntervalRelation::Meets,
        IntervalRelation::Overlaps,
        IntervalRelation::Starts,
        IntervalRelation::During,
        IntervalRelation::Finishes,
        IntervalRelation::Equals,
        IntervalRelation::FinishedBy,
        IntervalRelation::Contains,
        IntervalRelation::StartedBy,
        IntervalRelation::OverlappedBy,
        IntervalRelation::MetBy,
        IntervalRelation::After,
    ];

    /// The relation that holds for (B, A) whenever this one holds for (A, B).
    pub fn inverse(&self) -> IntervalRelation {
        match self {
            IntervalRelation::After => IntervalRelation::Before,
            IntervalRelation::Before => IntervalRelation::After,
            IntervalRelation::Meets => IntervalRelation::MetBy,
            IntervalRelation::MetBy => IntervalRelation::Meets,
            IntervalRelation::Overlaps => IntervalRelation::OverlappedBy,
            IntervalRelation::OverlappedBy => IntervalRelation::Overlaps,
            IntervalRelation::Starts => IntervalRelation::StartedBy,
            IntervalRelation::StartedBy => IntervalRelation::Starts,
            IntervalRelation::Finishes => IntervalRelation::FinishedBy,
            IntervalRelation::FinishedBy => IntervalRelation::Finishes,
            IntervalRelation::Contains => IntervalRelation::During,
            IntervalRelation::During | IntervalRelation::In => IntervalRelation::Contains,
            IntervalRelation::Equals => IntervalRelation::Equals,
            IntervalRelation::Disjoint => IntervalRelation::Disjoint,
        }
    }

    /// Vocabulary name of the relation (e.g. `intervalBefore`).
    pub fn name(&self) -> &'static str {
        match self {
            IntervalRelation::After => "intervalAfter",
            IntervalRelation::Before => "intervalBefore",
            IntervalRelation::Meets => "intervalMeets",
            IntervalRelation::MetBy => "intervalMetBy",
            IntervalRelation::Overlaps => "intervalOverlaps",
            IntervalRelation::OverlappedBy => "intervalOverlappedBy",
            IntervalRelation::Starts => "intervalStarts",
            IntervalRelation::StartedBy => "intervalStartedBy",
            IntervalRelation::Finishes => "intervalFinishes",
            IntervalRelation::FinishedBy => "intervalFinishedBy",
            IntervalRelation::Contains => "intervalContains",
            IntervalRelation::During => "intervalDuring",
            IntervalRelation::In => "intervalIn",
            IntervalRelation::Equals => "intervalEquals",
            IntervalRelation::Disjoint => "intervalDisjoint",
        }
    }
}

impl std::fmt::Display for IntervalRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

const NAME_PREFIX: &str = "interval";

impl FromStr for IntervalRelation {
    type Err = UnknownRelation;

    /// Accepts the vocabulary name with or without the `interval` prefix,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = match s.get(..NAME_PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(NAME_PREFIX) => &s[NAME_PREFIX.len()..],
            _ => s,
        };
        IntervalRelation::ALL
            .iter()
            .copied()
            .find(|relation| relation.name()[NAME_PREFIX.len()..].eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownRelation(s.to_string()))
    }
}
