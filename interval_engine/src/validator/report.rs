//! Validator report - deduplicated evidence collected from validator rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Severity of a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceCategory {
    /// The data may be inconsistent.
    Warning,
    /// The data is inconsistent.
    Error,
}

/// A single finding produced by a validator rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub category: EvidenceCategory,

    /// Name of the rule that produced the evidence.
    pub rule: String,

    /// Resource the evidence is about (usually an interval identifier).
    pub subject: String,

    pub message: String,
}

impl Evidence {
    pub fn warning(
        rule: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: EvidenceCategory::Warning,
            rule: rule.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn error(
        rule: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: EvidenceCategory::Error,
            ..Self::warning(rule, subject, message)
        }
    }

    /// Identity used for deduplication: category plus content.
    fn key(&self) -> (EvidenceCategory, String, String) {
        (self.category, self.subject.clone(), self.message.clone())
    }
}

/// Evidence collected by a validation run, in insertion order and free of duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidatorReport {
    evidences: Vec<Evidence>,

    #[serde(skip)]
    seen: HashSet<(EvidenceCategory, String, String)>,
}

impl ValidatorReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add evidence unless an identical one (same category and content) is present.
    ///
    /// Returns whether the evidence was added.
    pub fn add_evidence(&mut self, evidence: Evidence) -> bool {
        if !self.seen.insert(evidence.key()) {
            return false;
        }
        self.evidences.push(evidence);
        true
    }

    /// Merge the evidence of another report into this one.
    pub fn merge(&mut self, other: ValidatorReport) -> &mut Self {
        for evidence in other.evidences {
            self.add_evidence(evidence);
        }
        self
    }

    /// Turn every error into a warning, collapsing any duplicates this creates.
    pub fn downgraded(self) -> Self {
        let mut report = ValidatorReport::new();
        for mut evidence in self.evidences {
            evidence.category = EvidenceCategory::Warning;
            report.add_evidence(evidence);
        }
        report
    }

    pub fn evidences_count(&self) -> usize {
        self.evidences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evidences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Evidence> {
        self.evidences.iter()
    }

    pub fn warnings(&self) -> Vec<&Evidence> {
        self.select(EvidenceCategory::Warning)
    }

    pub fn errors(&self) -> Vec<&Evidence> {
        self.select(EvidenceCategory::Error)
    }

    /// Evidence produced by the named rule.
    pub fn by_rule(&self, rule: &str) -> Vec<&Evidence> {
        self.evidences.iter().filter(|e| e.rule == rule).collect()
    }

    fn select(&self, category: EvidenceCategory) -> Vec<&Evidence> {
        self.evidences
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Export the evidence as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.evidences)
    }
}

impl<'a> IntoIterator for &'a ValidatorReport {
    type Item = &'a Evidence;
    type IntoIter = std::slice::Iter<'a, Evidence>;

    fn into_iter(self) -> Self::IntoIter {
        self.evidences.iter()
    }
}

impl Extend<Evidence> for ValidatorReport {
    fn extend<I: IntoIterator<Item = Evidence>>(&mut self, iter: I) {
        for evidence in iter {
            self.add_evidence(evidence);
        }
    }
}
