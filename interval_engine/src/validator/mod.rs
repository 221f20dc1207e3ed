//! Validator - runs rules over a time knowledge base and collects evidence.
//!
//! A validation run works as follows:
//! 1. **Fan-out**: one task per enabled rule, all reading the same knowledge base
//! 2. **Execution**: each rule builds its own report, calling relation checks as needed
//! 3. **Fan-in**: rule reports are merged in rule order, dropping duplicate evidence
//! 4. **Policy**: under `ValidationPolicy::WarningOnly` errors become warnings
//!
//! The knowledge base is only read, so rules need no locking.

mod report;
mod standard;

pub use report::*;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use time_ontology::{StandardRule, TimeKnowledgeBase, ValidationPolicy, ValidatorConfig};

type RuleFn = dyn Fn(&TimeKnowledgeBase) -> ValidatorReport + Send + Sync;

/// A user-supplied validator rule.
#[derive(Clone)]
pub struct ValidatorRule {
    name: String,
    execute: Arc<RuleFn>,
}

impl ValidatorRule {
    pub fn new<F>(name: impl Into<String>, execute: F) -> Self
    where
        F: Fn(&TimeKnowledgeBase) -> ValidatorReport + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            execute: Arc::new(execute),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execute(&self, kb: &TimeKnowledgeBase) -> ValidatorReport {
        (self.execute)(kb)
    }
}

impl std::fmt::Debug for ValidatorRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

enum RuleTask<'a> {
    Standard(StandardRule),
    Custom(&'a ValidatorRule),
}

impl RuleTask<'_> {
    fn name(&self) -> &str {
        match self {
            RuleTask::Standard(rule) => rule.name(),
            RuleTask::Custom(rule) => rule.name(),
        }
    }

    fn run(&self, kb: &TimeKnowledgeBase) -> ValidatorReport {
        tracing::info!(rule = self.name(), "launching rule");
        let report = match self {
            RuleTask::Standard(rule) => standard::run(*rule, kb),
            RuleTask::Custom(rule) => rule.execute(kb),
        };
        tracing::info!(
            rule = self.name(),
            evidences = report.evidences_count(),
            "completed rule"
        );
        report
    }
}

/// Rule-based validator for temporal facts.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    custom_rules: Vec<ValidatorRule>,

    /// Dedicated pool when `config.threads > 0`, built once and shared by clones.
    pool: Option<Arc<ThreadPool>>,
}

fn build_pool(threads: usize) -> Option<Arc<ThreadPool>> {
    if threads == 0 {
        return None;
    }
    match ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                threads,
                "failed to build validator pool, using global pool"
            );
            None
        }
    }
}

impl Validator {
    /// Create a validator with the given configuration.
    pub fn new(mut config: ValidatorConfig) -> Self {
        let standard_rules = std::mem::take(&mut config.standard_rules);
        let pool = build_pool(config.threads);
        let mut validator = Self {
            config,
            custom_rules: Vec::new(),
            pool,
        };
        for rule in standard_rules {
            validator.add_standard_rule(rule);
        }
        validator
    }

    /// Create a validator with default configuration (strict, no rules).
    pub fn with_defaults() -> Self {
        Self::new(ValidatorConfig::default())
    }

    /// Enable a standard rule. No-op if already enabled.
    pub fn add_standard_rule(&mut self, rule: StandardRule) -> &mut Self {
        if !self.config.standard_rules.contains(&rule) {
            self.config.standard_rules.push(rule);
        }
        self
    }

    /// Add a custom rule. No-op if a rule with the same name exists.
    pub fn add_custom_rule(&mut self, rule: ValidatorRule) -> &mut Self {
        if !self.custom_rules.iter().any(|r| r.name == rule.name) {
            self.custom_rules.push(rule);
        }
        self
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.config.policy
    }

    pub fn standard_rules(&self) -> &[StandardRule] {
        &self.config.standard_rules
    }

    pub fn custom_rules(&self) -> &[ValidatorRule] {
        &self.custom_rules
    }

    /// Apply every enabled rule to the knowledge base.
    pub fn validate(&self, kb: &TimeKnowledgeBase) -> ValidatorReport {
        let tasks: Vec<RuleTask<'_>> = self
            .config
            .standard_rules
            .iter()
            .copied()
            .map(RuleTask::Standard)
            .chain(self.custom_rules.iter().map(RuleTask::Custom))
            .collect();

        tracing::info!(
            rules = tasks.len(),
            intervals = kb.interval_count(),
            "validator is going to be applied on the knowledge base"
        );

        let fan_out = || -> Vec<ValidatorReport> {
            tasks.par_iter().map(|task| task.run(kb)).collect()
        };
        let rule_reports = match &self.pool {
            Some(pool) => pool.install(fan_out),
            None => fan_out(),
        };

        let mut report = ValidatorReport::new();
        for rule_report in rule_reports {
            report.merge(rule_report);
        }

        if self.config.policy == ValidationPolicy::WarningOnly {
            report = report.downgraded();
        }

        tracing::info!(
            evidences = report.evidences_count(),
            errors = report.errors().len(),
            "validator has been applied on the knowledge base"
        );
        report
    }
}
