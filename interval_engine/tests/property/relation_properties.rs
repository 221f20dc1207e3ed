use chrono::{TimeZone, Utc};
use interval_engine::{check, evaluate, relations_between, ResolvedInterval};
use proptest::prelude::*;
use time_ontology::{
    Instant, InstantId, Interval, IntervalId, IntervalRelation, TimeKnowledgeBase, Timestamp,
};

fn at(seconds: i64) -> Timestamp {
    Utc.timestamp_opt(1_680_000_000 + seconds, 0).unwrap()
}

/// Well-formed interval (beginning strictly before end) on a small grid so that
/// shared endpoints come up often.
fn known_interval() -> impl Strategy<Value = ResolvedInterval> {
    (0i64..40, 1i64..20).prop_map(|(beginning, length)| {
        ResolvedInterval::known(at(beginning), at(beginning + length))
    })
}

/// Any interval, possibly malformed, possibly with unknown endpoints.
fn any_interval() -> impl Strategy<Value = ResolvedInterval> {
    (proptest::option::of(0i64..40), proptest::option::of(0i64..40))
        .prop_map(|(beginning, end)| ResolvedInterval::new(beginning.map(at), end.map(at)))
}

fn kb_with(left: ResolvedInterval, right: ResolvedInterval) -> TimeKnowledgeBase {
    let mut kb = TimeKnowledgeBase::new();
    for (name, resolved) in [("ex:left", left), ("ex:right", right)] {
        let instant = |suffix: &str, timestamp: Option<Timestamp>| Instant {
            id: InstantId::named(format!("{name}{suffix}")),
            timestamp,
        };
        kb.declare_interval(Interval::new(
            IntervalId::named(name),
            instant("Beginning", resolved.beginning),
            instant("End", resolved.end),
        ));
    }
    kb
}

/// Copies of `interval` with one endpoint forgotten.
fn with_one_unknown(interval: ResolvedInterval) -> [ResolvedInterval; 2] {
    [
        ResolvedInterval::new(None, interval.end),
        ResolvedInterval::new(interval.beginning, None),
    ]
}

/// Endpoints a relation reads: left beginning, left end, right beginning, right end.
fn needed_endpoints(relation: IntervalRelation) -> [bool; 4] {
    match relation {
        IntervalRelation::After | IntervalRelation::MetBy => [true, false, false, true],
        IntervalRelation::Before | IntervalRelation::Meets => [false, true, true, false],
        _ => [true; 4],
    }
}

proptest! {
    #[test]
    fn exactly_one_base_relation_holds(a in known_interval(), b in known_interval()) {
        let holding: Vec<_> = IntervalRelation::BASE
            .into_iter()
            .filter(|relation| evaluate(*relation, &a, &b))
            .collect();
        prop_assert_eq!(holding.len(), 1, "a={:?} b={:?} holding={:?}", a, b, holding);
    }

    #[test]
    fn disjoint_is_strict_separation(a in any_interval(), b in any_interval()) {
        let separated = matches!((a.end, b.beginning), (Some(ae), Some(bb)) if ae < bb)
            || matches!((b.end, a.beginning), (Some(be), Some(ab)) if be < ab);
        prop_assert_eq!(evaluate(IntervalRelation::Disjoint, &a, &b), separated);
    }

    #[test]
    fn touching_intervals_are_not_disjoint(a in known_interval(), length in 1i64..20) {
        let end = a.end.unwrap();
        let b = ResolvedInterval::known(end, end + chrono::Duration::seconds(length));
        prop_assert!(evaluate(IntervalRelation::Meets, &a, &b));
        prop_assert!(evaluate(IntervalRelation::MetBy, &b, &a));
        prop_assert!(!evaluate(IntervalRelation::Disjoint, &a, &b));
    }

    #[test]
    fn relations_are_dual(a in any_interval(), b in any_interval()) {
        for relation in IntervalRelation::ALL {
            prop_assert_eq!(
                evaluate(relation, &a, &b),
                evaluate(relation.inverse(), &b, &a),
                "{} vs {}", relation, relation.inverse()
            );
        }
    }

    #[test]
    fn during_and_in_agree(a in any_interval(), b in any_interval()) {
        prop_assert_eq!(
            evaluate(IntervalRelation::During, &a, &b),
            evaluate(IntervalRelation::In, &a, &b)
        );
    }

    #[test]
    fn forgetting_a_needed_timestamp_defeats_the_relation(
        a in known_interval(),
        b in known_interval(),
    ) {
        let [a_no_beginning, a_no_end] = with_one_unknown(a);
        let [b_no_beginning, b_no_end] = with_one_unknown(b);
        let variants = [(a_no_beginning, b), (a_no_end, b), (a, b_no_beginning), (a, b_no_end)];

        for relation in IntervalRelation::BASE {
            if !evaluate(relation, &a, &b) {
                continue;
            }
            for (needed, (left, right)) in needed_endpoints(relation).into_iter().zip(variants) {
                if needed {
                    prop_assert!(!evaluate(relation, &left, &right), "{} survived", relation);
                }
            }
        }
    }

    #[test]
    fn unknown_information_never_creates_a_relation(a in known_interval(), b in known_interval()) {
        for relation in IntervalRelation::ALL {
            for partial in with_one_unknown(a) {
                if evaluate(relation, &partial, &b) {
                    prop_assert!(evaluate(relation, &a, &b), "{} appeared from nothing", relation);
                }
            }
        }
    }

    #[test]
    fn knowledge_base_checks_match_formulas(a in any_interval(), b in any_interval()) {
        let kb = kb_with(a, b);
        let (left, right) = (IntervalId::named("ex:left"), IntervalId::named("ex:right"));
        for relation in IntervalRelation::ALL {
            prop_assert_eq!(check(relation, &kb, &left, &right), Ok(evaluate(relation, &a, &b)));
        }
    }

    #[test]
    fn repeated_checks_are_identical(a in any_interval(), b in any_interval()) {
        let kb = kb_with(a, b);
        let (left, right) = (IntervalId::named("ex:left"), IntervalId::named("ex:right"));
        let first = relations_between(&kb, &left, &right);
        let second = relations_between(&kb, &left, &right);
        prop_assert_eq!(first, second);
    }
}
