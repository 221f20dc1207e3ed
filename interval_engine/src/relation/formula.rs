//! Relation formulas over resolved endpoint timestamps.
//!
//! Every comparison needs both of its timestamps; an unknown timestamp makes the
//! comparison false, so a relation never holds on missing information. `Disjoint`
//! is the one relation with two independent clauses, either of which suffices.

use time_ontology::{IntervalRelation, Timestamp};

use super::ResolvedInterval;

/// `a < b`, with both known.
fn precedes(a: Option<Timestamp>, b: Option<Timestamp>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// `a = b`, with both known.
fn coincides(a: Option<Timestamp>, b: Option<Timestamp>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Evaluate `relation(left, right)`.
pub fn evaluate(
    relation: IntervalRelation,
    left: &ResolvedInterval,
    right: &ResolvedInterval,
) -> bool {
    let (ab, ae) = (left.beginning, left.end);
    let (bb, be) = (right.beginning, right.end);

    match relation {
        IntervalRelation::After => precedes(be, ab),
        IntervalRelation::Before => precedes(ae, bb),
        IntervalRelation::Meets => coincides(ae, bb),
        IntervalRelation::MetBy => coincides(ab, be),
        IntervalRelation::Overlaps => precedes(ab, bb) && precedes(bb, ae) && precedes(ae, be),
        IntervalRelation::OverlappedBy => precedes(bb, ab) && precedes(ab, be) && precedes(be, ae),
        IntervalRelation::Starts => coincides(ab, bb) && precedes(ae, be),
        IntervalRelation::StartedBy => coincides(ab, bb) && precedes(be, ae),
        IntervalRelation::Finishes => coincides(ae, be) && precedes(bb, ab),
        IntervalRelation::FinishedBy => coincides(ae, be) && precedes(ab, bb),
        IntervalRelation::Contains => precedes(ab, bb) && precedes(be, ae),
        IntervalRelation::During | IntervalRelation::In => precedes(bb, ab) && precedes(ae, be),
        IntervalRelation::Equals => coincides(ab, bb) && coincides(ae, be),
        IntervalRelation::Disjoint => precedes(ae, bb) || precedes(be, ab),
    }
}
