//! Relation checks between declared intervals.
//!
//! Each check resolves both intervals against the store and evaluates one formula:
//! 1. **Guard**: a nil identifier on either side is a `RelationError::Reference`,
//!    raised before any lookup (left side first)
//! 2. **Resolution**: at most four lookups, two per interval
//! 3. **Evaluation**: strict ordering and exact equality on the resolved timestamps
//!
//! Anything short of full information for a formula gives `Ok(false)`.
//! The checks hold no state and can run concurrently against a shared store.

mod formula;
mod resolver;

pub use formula::*;
pub use resolver::*;

use time_ontology::{IntervalId, IntervalRelation, TemporalStore};

use crate::error::{RelationError, RelationResult};

/// Resolve both sides of a relation check, rejecting nil identifiers first.
pub(crate) fn resolve_pair<S>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<(ResolvedInterval, ResolvedInterval)>
where
    S: TemporalStore + ?Sized,
{
    if left.is_nil() {
        return Err(RelationError::Reference { argument: "left" });
    }
    if right.is_nil() {
        return Err(RelationError::Reference { argument: "right" });
    }
    Ok((resolve_declared(store, left), resolve_declared(store, right)))
}

/// Check whether `relation(left, right)` holds in the store.
pub fn check<S>(
    relation: IntervalRelation,
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool>
where
    S: TemporalStore + ?Sized,
{
    let (left, right) = resolve_pair(store, left, right)?;
    Ok(evaluate(relation, &left, &right))
}

/// Every relation that holds from `left` to `right`.
///
/// For fully known, well-formed intervals this is exactly one base relation,
/// plus `In` next to `During` and `Disjoint` next to `Before`/`After`.
pub fn relations_between<S>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<Vec<IntervalRelation>>
where
    S: TemporalStore + ?Sized,
{
    let (left, right) = resolve_pair(store, left, right)?;
    Ok(IntervalRelation::ALL
        .into_iter()
        .filter(|relation| evaluate(*relation, &left, &right))
        .collect())
}

/// `left` begins strictly after `right` ends.
pub fn check_after<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::After, store, left, right)
}

/// `left` ends strictly before `right` begins.
pub fn check_before<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Before, store, left, right)
}

/// `left` ends exactly when `right` begins.
pub fn check_meets<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Meets, store, left, right)
}

/// `left` begins exactly when `right` ends.
pub fn check_met_by<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::MetBy, store, left, right)
}

pub fn check_overlaps<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Overlaps, store, left, right)
}

pub fn check_overlapped_by<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::OverlappedBy, store, left, right)
}

/// Same beginning, `left` ends first.
pub fn check_starts<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Starts, store, left, right)
}

/// Same beginning, `left` ends last.
pub fn check_started_by<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::StartedBy, store, left, right)
}

/// Same end, `left` begins last.
pub fn check_finishes<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Finishes, store, left, right)
}

/// Same end, `left` begins first.
pub fn check_finished_by<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::FinishedBy, store, left, right)
}

/// `right` lies strictly inside `left`.
pub fn check_contains<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Contains, store, left, right)
}

/// `left` lies strictly inside `right`.
pub fn check_during<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::During, store, left, right)
}

/// Alias of [`check_during`].
pub fn check_in<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::In, store, left, right)
}

pub fn check_equals<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Equals, store, left, right)
}

/// One interval ends strictly before the other begins. Touching intervals are not disjoint.
pub fn check_disjoint<S: TemporalStore + ?Sized>(
    store: &S,
    left: &IntervalId,
    right: &IntervalId,
) -> RelationResult<bool> {
    check(IntervalRelation::Disjoint, store, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use time_ontology::{FeatureId, Instant, InstantId, Interval, TimeKnowledgeBase};

    type Check = fn(&TimeKnowledgeBase, &IntervalId, &IntervalId) -> RelationResult<bool>;

    const CHECKS: [(IntervalRelation, Check); 15] = [
        (IntervalRelation::After, check_after),
        (IntervalRelation::Before, check_before),
        (IntervalRelation::Meets, check_meets),
        (IntervalRelation::MetBy, check_met_by),
        (IntervalRelation::Overlaps, check_overlaps),
        (IntervalRelation::OverlappedBy, check_overlapped_by),
        (IntervalRelation::Starts, check_starts),
        (IntervalRelation::StartedBy, check_started_by),
        (IntervalRelation::Finishes, check_finishes),
        (IntervalRelation::FinishedBy, check_finished_by),
        (IntervalRelation::Contains, check_contains),
        (IntervalRelation::During, check_during),
        (IntervalRelation::In, check_in),
        (IntervalRelation::Equals, check_equals),
        (IntervalRelation::Disjoint, check_disjoint),
    ];

    fn id(name: &str) -> IntervalId {
        IntervalId::named(name)
    }

    /// Declare `ex:timeIntv{name}` with optional RFC 3339 endpoints.
    fn declare(kb: &mut TimeKnowledgeBase, name: &str, beginning: Option<&str>, end: Option<&str>) {
        let instant = |suffix: &str, at: Option<&str>| {
            let instant_id = InstantId::named(format!("ex:timeIntv{suffix}{name}"));
            match at {
                Some(at) => Instant::parse_at(instant_id, at).unwrap(),
                None => Instant::new(instant_id),
            }
        };
        kb.declare_feature_interval(
            FeatureId::named(format!("ex:ft{name}")),
            Interval::new(
                id(&format!("ex:timeIntv{name}")),
                instant("Beginning", beginning),
                instant("End", end),
            ),
        );
    }

    #[test]
    fn test_after_scenario() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-05-05T20:47:15Z"), Some("2023-05-08T20:47:15Z"));
        declare(&mut kb, "B", Some("2023-05-02T20:47:15Z"), Some("2023-05-02T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-02T20:47:15Z"));

        let (a, b, c) = (id("ex:timeIntvA"), id("ex:timeIntvB"), id("ex:timeIntvC"));
        assert!(check_after(&kb, &a, &c).unwrap());
        assert!(!check_before(&kb, &a, &c).unwrap());
        assert!(!check_after(&kb, &b, &c).unwrap());
        assert!(!check_after(&kb, &c, &c).unwrap());
    }

    #[test]
    fn test_contains_requires_strictly_later_end() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-28T20:47:15Z"), Some("2023-05-02T20:47:15Z"));
        declare(&mut kb, "E", Some("2023-04-30T20:47:15Z"), Some("2023-05-02T20:47:15Z"));
        declare(&mut kb, "F", Some("2023-04-30T20:47:15Z"), Some("2023-04-29T20:47:15Z"));

        let a = id("ex:timeIntvA");
        assert!(!check_contains(&kb, &a, &id("ex:timeIntvE")).unwrap());
        assert!(check_finished_by(&kb, &a, &id("ex:timeIntvE")).unwrap());
        assert!(check_contains(&kb, &a, &id("ex:timeIntvF")).unwrap());
    }

    #[test]
    fn test_starts_and_started_by_scenario() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-30T20:47:15Z"), Some("2023-05-01T20:47:15Z"));
        declare(&mut kb, "B", Some("2023-05-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));

        let (a, b, c) = (id("ex:timeIntvA"), id("ex:timeIntvB"), id("ex:timeIntvC"));
        assert!(check_starts(&kb, &a, &c).unwrap());
        assert!(check_started_by(&kb, &c, &a).unwrap());
        assert!(!check_starts(&kb, &b, &c).unwrap());
        assert!(!check_started_by(&kb, &b, &c).unwrap());
    }

    #[test]
    fn test_unknown_beginning_defeats_every_relation_needing_it() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", None, Some("2023-05-01T23:59:59Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));

        let (a, c) = (id("ex:timeIntvA"), id("ex:timeIntvC"));
        let needs_left_beginning = [
            IntervalRelation::After,
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
        ];
        for relation in needs_left_beginning {
            assert!(!check(relation, &kb, &a, &c).unwrap(), "{relation} should not hold");
        }
        // Before only needs A's end, which is known but falls inside C.
        assert!(!check_before(&kb, &a, &c).unwrap());
    }

    #[test]
    fn test_missing_endpoint_on_either_side() {
        let full = [
            ("A", "2023-04-23T20:47:15Z", "2023-05-01T20:47:15Z"),
            ("C", "2023-04-30T20:47:15Z", "2023-05-04T20:47:15Z"),
        ];
        // Overlaps(A, C) holds with full knowledge; removing any endpoint defeats it.
        let hidden = [("A", true), ("A", false), ("C", true), ("C", false)];
        for (hidden_interval, hide_beginning) in hidden {
            let mut kb = TimeKnowledgeBase::new();
            for (name, beginning, end) in full {
                let hide = name == hidden_interval;
                declare(
                    &mut kb,
                    name,
                    (!(hide && hide_beginning)).then_some(beginning),
                    (!(hide && !hide_beginning)).then_some(end),
                );
            }
            assert!(!check_overlaps(&kb, &id("ex:timeIntvA"), &id("ex:timeIntvC")).unwrap());
            assert!(!check_overlapped_by(&kb, &id("ex:timeIntvC"), &id("ex:timeIntvA")).unwrap());
        }

        let mut kb = TimeKnowledgeBase::new();
        for (name, beginning, end) in full {
            declare(&mut kb, name, Some(beginning), Some(end));
        }
        assert!(check_overlaps(&kb, &id("ex:timeIntvA"), &id("ex:timeIntvC")).unwrap());
        assert!(check_overlapped_by(&kb, &id("ex:timeIntvC"), &id("ex:timeIntvA")).unwrap());
    }

    #[test]
    fn test_meets_and_met_by() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-23T20:47:15Z"), Some("2023-04-30T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));
        declare(&mut kb, "D", Some("2023-04-23T20:47:15Z"), None);

        let (a, c, d) = (id("ex:timeIntvA"), id("ex:timeIntvC"), id("ex:timeIntvD"));
        assert!(check_meets(&kb, &a, &c).unwrap());
        assert!(check_met_by(&kb, &c, &a).unwrap());
        assert!(!check_meets(&kb, &d, &c).unwrap());
        assert!(!check_disjoint(&kb, &a, &c).unwrap());
    }

    #[test]
    fn test_during_and_in_agree() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-05-01T20:47:15Z"), Some("2023-05-02T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));

        let (a, c) = (id("ex:timeIntvA"), id("ex:timeIntvC"));
        assert!(check_during(&kb, &a, &c).unwrap());
        assert!(check_in(&kb, &a, &c).unwrap());
        assert!(check_contains(&kb, &c, &a).unwrap());
        assert!(!check_in(&kb, &c, &a).unwrap());
    }

    #[test]
    fn test_equals() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));
        declare(&mut kb, "B", Some("2023-04-30T22:47:15+02:00"), Some("2023-05-04T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:16Z"));

        let a = id("ex:timeIntvA");
        assert!(check_equals(&kb, &a, &id("ex:timeIntvB")).unwrap());
        assert!(!check_equals(&kb, &a, &id("ex:timeIntvC")).unwrap());
    }

    #[test]
    fn test_disjoint_scenario() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2020-01-01T00:00:00Z"), Some("2020-12-31T23:59:59Z"));
        declare(&mut kb, "B", Some("2025-01-01T00:00:00Z"), Some("2025-12-31T23:59:59Z"));
        declare(&mut kb, "C", Some("2023-12-31T23:59:59Z"), Some("2024-12-31T23:59:59Z"));
        declare(&mut kb, "D", Some("2020-01-01T00:00:00Z"), Some("2023-01-01T00:00:00Z"));
        declare(&mut kb, "E", Some("2023-01-01T00:00:00Z"), Some("2023-12-31T23:59:59Z"));

        let e = id("ex:timeIntvE");
        assert!(check_disjoint(&kb, &id("ex:timeIntvA"), &id("ex:timeIntvB")).unwrap());
        assert!(check_disjoint(&kb, &id("ex:timeIntvA"), &e).unwrap());
        assert!(check_disjoint(&kb, &id("ex:timeIntvB"), &e).unwrap());
        assert!(!check_disjoint(&kb, &id("ex:timeIntvC"), &e).unwrap());
        assert!(!check_disjoint(&kb, &id("ex:timeIntvD"), &e).unwrap());
    }

    #[test]
    fn test_disjoint_with_one_clause_known() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", None, Some("2020-12-31T23:59:59Z"));
        declare(&mut kb, "B", Some("2025-01-01T00:00:00Z"), None);

        assert!(check_disjoint(&kb, &id("ex:timeIntvA"), &id("ex:timeIntvB")).unwrap());
        assert!(check_disjoint(&kb, &id("ex:timeIntvB"), &id("ex:timeIntvA")).unwrap());
    }

    #[test]
    fn test_nil_arguments_are_reference_errors() {
        let kb = TimeKnowledgeBase::new();
        let anonymous = IntervalId::new();

        for (relation, check_fn) in CHECKS {
            assert_eq!(
                check_fn(&kb, &IntervalId::nil(), &anonymous),
                Err(RelationError::Reference { argument: "left" }),
                "{relation}"
            );
            assert_eq!(
                check_fn(&kb, &anonymous, &IntervalId::nil()),
                Err(RelationError::Reference { argument: "right" }),
                "{relation}"
            );
        }
        assert!(relations_between(&kb, &IntervalId::nil(), &IntervalId::nil()).is_err());
    }

    #[test]
    fn test_undeclared_intervals_are_false_not_errors() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2020-01-01T00:00:00Z"), Some("2020-12-31T23:59:59Z"));

        let ghost = id("ex:timeIntvGhost");
        for (relation, check_fn) in CHECKS {
            assert_eq!(check_fn(&kb, &id("ex:timeIntvA"), &ghost), Ok(false), "{relation}");
            assert_eq!(check_fn(&kb, &ghost, &ghost), Ok(false), "{relation}");
        }
    }

    #[test]
    fn test_named_checks_match_generic_check() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-23T20:47:15Z"), Some("2023-05-01T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));

        let (a, c) = (id("ex:timeIntvA"), id("ex:timeIntvC"));
        for (relation, check_fn) in CHECKS {
            assert_eq!(check_fn(&kb, &a, &c), check(relation, &kb, &a, &c));
            assert_eq!(check_fn(&kb, &c, &a), check(relation, &kb, &c, &a));
        }
    }

    #[test]
    fn test_relations_between() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-05-01T20:47:15Z"), Some("2023-05-02T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));

        let (a, c) = (id("ex:timeIntvA"), id("ex:timeIntvC"));
        assert_eq!(
            relations_between(&kb, &a, &c).unwrap(),
            vec![IntervalRelation::During, IntervalRelation::In]
        );
        assert_eq!(
            relations_between(&kb, &c, &a).unwrap(),
            vec![IntervalRelation::Contains]
        );
        assert!(relations_between(&kb, &a, &id("ex:timeIntvGhost")).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_checks_on_shared_store() {
        let mut kb = TimeKnowledgeBase::new();
        declare(&mut kb, "A", Some("2023-04-23T20:47:15Z"), Some("2023-05-01T20:47:15Z"));
        declare(&mut kb, "C", Some("2023-04-30T20:47:15Z"), Some("2023-05-04T20:47:15Z"));
        let kb = Arc::new(kb);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let kb = Arc::clone(&kb);
                std::thread::spawn(move || {
                    let (a, c) = (id("ex:timeIntvA"), id("ex:timeIntvC"));
                    (0..100)
                        .map(|_| relations_between(&kb, &a, &c).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for relations in handle.join().unwrap() {
                assert_eq!(relations, vec![IntervalRelation::Overlaps]);
            }
        }
    }
}
