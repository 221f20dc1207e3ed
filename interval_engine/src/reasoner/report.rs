//! Reasoner report - deduplicated relation assertions inferred by reasoner rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time_ontology::{RelationAssertion, TimeKnowledgeBase};

/// A relation assertion inferred by a reasoner rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonerEvidence {
    /// Name of the rule that produced the inference.
    pub rule: String,

    pub assertion: RelationAssertion,
}

impl ReasonerEvidence {
    pub fn new(rule: impl Into<String>, assertion: RelationAssertion) -> Self {
        Self {
            rule: rule.into(),
            assertion,
        }
    }
}

/// Inferences collected by a reasoning run, in insertion order and free of duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReasonerReport {
    evidences: Vec<ReasonerEvidence>,

    #[serde(skip)]
    seen: HashSet<RelationAssertion>,
}

impl ReasonerReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add evidence unless the same assertion was already inferred, by any rule.
    ///
    /// Returns whether the evidence was added.
    pub fn add_evidence(&mut self, evidence: ReasonerEvidence) -> bool {
        if !self.seen.insert(evidence.assertion.clone()) {
            return false;
        }
        self.evidences.push(evidence);
        true
    }

    /// Merge the evidence of another report into this one.
    pub fn merge(&mut self, other: ReasonerReport) -> &mut Self {
        for evidence in other.evidences {
            self.add_evidence(evidence);
        }
        self
    }

    pub fn evidences_count(&self) -> usize {
        self.evidences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evidences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReasonerEvidence> {
        self.evidences.iter()
    }

    /// Evidence produced by the named rule.
    pub fn by_rule(&self, rule: &str) -> Vec<&ReasonerEvidence> {
        self.evidences.iter().filter(|e| e.rule == rule).collect()
    }

    /// Write every inferred assertion into the knowledge base.
    ///
    /// Returns how many assertions were new to it.
    pub fn join_evidences(&self, kb: &mut TimeKnowledgeBase) -> usize {
        let mut joined = 0;
        for evidence in &self.evidences {
            let RelationAssertion {
                left,
                relation,
                right,
            } = evidence.assertion.clone();
            if kb.assert_relation(left, relation, right) {
                joined += 1;
            }
        }
        tracing::info!(
            evidences = self.evidences.len(),
            joined,
            "reasoner evidences joined into the knowledge base"
        );
        joined
    }

    /// Export the evidence as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.evidences)
    }
}

impl<'a> IntoIterator for &'a ReasonerReport {
    type Item = &'a ReasonerEvidence;
    type IntoIter = std::slice::Iter<'a, ReasonerEvidence>;

    fn into_iter(self) -> Self::IntoIter {
        self.evidences.iter()
    }
}

impl Extend<ReasonerEvidence> for ReasonerReport {
    fn extend<I: IntoIterator<Item = ReasonerEvidence>>(&mut self, iter: I) {
        for evidence in iter {
            self.add_evidence(evidence);
        }
    }
}
