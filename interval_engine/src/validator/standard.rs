//! Built-in validator rules over temporal facts.

use time_ontology::{IntervalId, StandardRule, TimeKnowledgeBase};

use super::{Evidence, ValidatorReport};
use crate::relation::{evaluate, resolve_pair};

/// Run one standard rule against the knowledge base.
pub(crate) fn run(rule: StandardRule, kb: &TimeKnowledgeBase) -> ValidatorReport {
    match rule {
        StandardRule::IntervalWellFormedness => interval_well_formedness(kb),
        StandardRule::IntervalCompleteness => interval_completeness(kb),
        StandardRule::AssertedRelations => asserted_relations(kb),
    }
}

fn sorted_intervals(kb: &TimeKnowledgeBase) -> Vec<&IntervalId> {
    let mut ids: Vec<_> = kb.intervals().collect();
    ids.sort();
    ids
}

fn interval_well_formedness(kb: &TimeKnowledgeBase) -> ValidatorReport {
    let rule = StandardRule::IntervalWellFormedness.name();
    let mut report = ValidatorReport::new();

    for id in sorted_intervals(kb) {
        let Some(interval) = kb.get_interval(id) else {
            continue;
        };
        if interval.is_well_formed() == Some(false) {
            report.add_evidence(Evidence::error(
                rule,
                id.as_str(),
                format!(
                    "beginning instant {} is later than end instant {}",
                    interval.beginning.id, interval.end.id
                ),
            ));
        }
    }

    report
}

fn interval_completeness(kb: &TimeKnowledgeBase) -> ValidatorReport {
    let rule = StandardRule::IntervalCompleteness.name();
    let mut report = ValidatorReport::new();

    for id in sorted_intervals(kb) {
        let Some(interval) = kb.get_interval(id) else {
            continue;
        };
        if !interval.beginning.has_timestamp() {
            report.add_evidence(Evidence::warning(
                rule,
                id.as_str(),
                format!("beginning instant {} has no timestamp", interval.beginning.id),
            ));
        }
        if !interval.end.has_timestamp() {
            report.add_evidence(Evidence::warning(
                rule,
                id.as_str(),
                format!("end instant {} has no timestamp", interval.end.id),
            ));
        }
    }

    report
}

/// Asserted relations are only contradicted when both intervals are fully known.
fn asserted_relations(kb: &TimeKnowledgeBase) -> ValidatorReport {
    let rule = StandardRule::AssertedRelations.name();
    let mut report = ValidatorReport::new();

    for assertion in kb.asserted_relations() {
        let subject = format!("{} {} {}", assertion.left, assertion.relation, assertion.right);

        let (left, right) = match resolve_pair(kb, &assertion.left, &assertion.right) {
            Ok(pair) => pair,
            Err(e) => {
                report.add_evidence(Evidence::error(rule, subject, e.to_string()));
                continue;
            }
        };

        if !(left.is_complete() && right.is_complete()) {
            tracing::debug!(assertion = %subject, "skipping assertion with unknown endpoints");
            continue;
        }
        if !evaluate(assertion.relation, &left, &right) {
            report.add_evidence(Evidence::error(
                rule,
                subject,
                format!("declared timestamps contradict {}", assertion.relation),
            ));
        }
    }

    report
}
