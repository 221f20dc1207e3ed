//! Reasoner - infers relation assertions from a time knowledge base.
//!
//! A reasoning run works as follows:
//! 1. **Fan-out**: one task per enabled rule, all reading the same knowledge base
//! 2. **Inference**: each rule proposes assertions the knowledge base does not hold yet
//! 3. **Fan-in**: rule reports are merged in rule order, dropping repeated assertions
//!
//! Rules only ever combine two intervals; nothing is chained across a third.
//! The report is written back with [`ReasonerReport::join_evidences`], after
//! which another run over the same knowledge base infers nothing new.

mod report;
mod rules;

pub use report::*;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use time_ontology::TimeKnowledgeBase;

/// Built-in reasoner rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonerRule {
    /// Every relation implied by the declared timestamps of two intervals.
    RelationMaterialization,
    /// The inverse of every asserted relation.
    InverseRelations,
}

impl ReasonerRule {
    pub const ALL: [ReasonerRule; 2] = [
        ReasonerRule::RelationMaterialization,
        ReasonerRule::InverseRelations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReasonerRule::RelationMaterialization => "relation_materialization",
            ReasonerRule::InverseRelations => "inverse_relations",
        }
    }
}

impl std::fmt::Display for ReasonerRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rule-based reasoner over temporal facts.
#[derive(Debug, Clone, Default)]
pub struct Reasoner {
    rules: Vec<ReasonerRule>,
}

impl Reasoner {
    /// Create a reasoner with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reasoner with every built-in rule.
    pub fn with_standard_rules() -> Self {
        let mut reasoner = Self::new();
        for rule in ReasonerRule::ALL {
            reasoner.add_rule(rule);
        }
        reasoner
    }

    /// Enable a rule. No-op if already enabled.
    pub fn add_rule(&mut self, rule: ReasonerRule) -> &mut Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn rules(&self) -> &[ReasonerRule] {
        &self.rules
    }

    /// Apply every enabled rule to the knowledge base.
    pub fn apply(&self, kb: &TimeKnowledgeBase) -> ReasonerReport {
        tracing::info!(
            rules = self.rules.len(),
            intervals = kb.interval_count(),
            "reasoner is going to be applied on the knowledge base"
        );

        let rule_reports: Vec<ReasonerReport> = self
            .rules
            .par_iter()
            .map(|rule| {
                tracing::info!(rule = rule.name(), "launching rule");
                let report = rules::run(*rule, kb);
                tracing::info!(
                    rule = rule.name(),
                    evidences = report.evidences_count(),
                    "completed rule"
                );
                report
            })
            .collect();

        let mut report = ReasonerReport::new();
        for rule_report in rule_reports {
            report.merge(rule_report);
        }

        tracing::info!(
            evidences = report.evidences_count(),
            "reasoner has been applied on the knowledge base"
        );
        report
    }
}
