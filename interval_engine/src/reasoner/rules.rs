//! Built-in reasoner rules. Every rule looks at one pair of intervals at a time.

use std::collections::HashSet;
use time_ontology::{IntervalId, RelationAssertion, TimeKnowledgeBase};

use super::{ReasonerEvidence, ReasonerReport, ReasonerRule};
use crate::relation::relations_between;

/// Run one reasoner rule against the knowledge base.
pub(crate) fn run(rule: ReasonerRule, kb: &TimeKnowledgeBase) -> ReasonerReport {
    match rule {
        ReasonerRule::RelationMaterialization => relation_materialization(kb),
        ReasonerRule::InverseRelations => inverse_relations(kb),
    }
}

fn asserted(kb: &TimeKnowledgeBase) -> HashSet<&RelationAssertion> {
    kb.asserted_relations().iter().collect()
}

/// Assert every relation the declared timestamps already imply.
fn relation_materialization(kb: &TimeKnowledgeBase) -> ReasonerReport {
    let rule = ReasonerRule::RelationMaterialization.name();
    let known = asserted(kb);
    let mut report = ReasonerReport::new();

    let mut ids: Vec<&IntervalId> = kb.intervals().collect();
    ids.sort();

    for left in &ids {
        for right in &ids {
            if left == right {
                continue;
            }
            let relations = match relations_between(kb, left, right) {
                Ok(relations) => relations,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping interval pair");
                    continue;
                }
            };
            for relation in relations {
                let assertion = RelationAssertion {
                    left: (*left).clone(),
                    relation,
                    right: (*right).clone(),
                };
                if !known.contains(&assertion) {
                    report.add_evidence(ReasonerEvidence::new(rule, assertion));
                }
            }
        }
    }

    report
}

/// Assert the inverse of every asserted relation between declared intervals.
fn inverse_relations(kb: &TimeKnowledgeBase) -> ReasonerReport {
    let rule = ReasonerRule::InverseRelations.name();
    let known = asserted(kb);
    let mut report = ReasonerReport::new();

    for assertion in kb.asserted_relations() {
        if !(kb.has_interval(&assertion.left) && kb.has_interval(&assertion.right)) {
            tracing::debug!(
                left = %assertion.left,
                right = %assertion.right,
                "skipping assertion about an undeclared interval"
            );
            continue;
        }
        let inverse = RelationAssertion {
            left: assertion.right.clone(),
            relation: assertion.relation.inverse(),
            right: assertion.left.clone(),
        };
        if !known.contains(&inverse) {
            report.add_evidence(ReasonerEvidence::new(rule, inverse));
        }
    }

    report
}
