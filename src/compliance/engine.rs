// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Compliance engine: rule selection, evaluation loop and report assembly
//!
//! The engine owns the base registry. Every run evaluates clones of the
//! registered rules, with jurisdiction amendments applied to the clones
//! only, so a single engine can serve runs under different jurisdictions
//! indefinitely without cross-contamination.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use anyhow::{ensure, Result};
use log::{debug, info, warn};

use crate::types::PlacedPlan;
use crate::utils::{fround2, uuid_from_obj};

use super::context::ComplianceContext;
use super::jurisdictions::amendments_for;
use super::report::{ComplianceReport, ComplianceSummary};
use super::rule::{CheckOutcome, Rule, RuleCategory, RuleResult, Severity, Violation};
use super::registry::RuleRegistry;
use super::rules::base_library;
use super::RULESET_VERSION;

/// Run options: rule filtering and evaluation behavior
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Evaluate only these rule ids (empty means all)
    pub include_rules: Vec<String>,
    /// Never evaluate these rule ids
    pub exclude_rules: Vec<String>,
    /// Evaluate only these categories (empty means all)
    pub include_categories: Vec<RuleCategory>,
    /// Never evaluate these categories
    pub exclude_categories: Vec<RuleCategory>,
    /// Stop after the first rule that produces an error-severity violation
    pub stop_on_critical: bool,
    /// Soft per-rule time budget (ms); exceeding it only logs a warning
    pub max_execution_time_ms: Option<f32>,
    /// Carry rule metadata bags into the report
    pub include_metadata: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            include_rules: Vec::new(),
            exclude_rules: Vec::new(),
            include_categories: Vec::new(),
            exclude_categories: Vec::new(),
            stop_on_critical: false,
            max_execution_time_ms: None,
            include_metadata: true,
        }
    }
}

/// The compliance engine
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    /// Base rule table; written only at construction time
    pub registry: RuleRegistry,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceEngine {
    /// Engine seeded with the base rule library
    pub fn new() -> Self {
        let mut registry = RuleRegistry::new();
        for rule in base_library() {
            registry.register(rule);
        }
        info!("Compliance engine ready: {} rules registered", registry.len());
        ComplianceEngine { registry }
    }

    /// Evaluate a plan under the given context
    ///
    /// Fails only on structurally invalid input (no rooms or no doors); rule
    /// failures are values inside the report.
    pub fn check(
        &self,
        plan: &PlacedPlan,
        context: &ComplianceContext,
        options: &CheckOptions,
    ) -> Result<ComplianceReport> {
        ensure!(!plan.rooms.is_empty(), "invalid plan {}: no rooms", plan.id);
        ensure!(!plan.doors.is_empty(), "invalid plan {}: no doors", plan.id);

        let run_start = Instant::now();
        let rules = self.effective_rules(context, options);
        debug!(
            "Evaluating {} rules under {}",
            rules.len(),
            context.jurisdiction
        );

        let mut results: Vec<RuleResult> = Vec::with_capacity(rules.len());
        let mut skipped = 0u32;
        let mut stopped = false;

        for (i, rule) in rules.iter().enumerate() {
            if stopped {
                skipped = (rules.len() - i) as u32;
                break;
            }

            let start = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(|| (rule.check)(rule, plan, context)))
                .unwrap_or_else(|_| execution_error_outcome(rule));
            let elapsed = start.elapsed().as_secs_f32() * 1000.0;

            if let Some(budget) = options.max_execution_time_ms {
                if elapsed > budget {
                    warn!(
                        "Rule {} took {:.1} ms, over the {:.1} ms budget",
                        rule.id, elapsed, budget
                    );
                }
            }

            let critical = outcome
                .violations
                .iter()
                .any(|v| v.severity == Severity::Error);
            results.push(RuleResult {
                rule_id: rule.id.clone(),
                passed: !critical,
                violations: outcome.violations,
                recommendations: outcome.recommendations,
                execution_time_ms: fround2(elapsed),
                metadata: if options.include_metadata {
                    outcome.metadata
                } else {
                    Default::default()
                },
            });

            if critical && options.stop_on_critical {
                warn!("Stopping on critical violation in {}", rule.id);
                stopped = true;
            }
        }

        let summary = ComplianceSummary::tally(&results, skipped);
        let overall_compliant = summary.failed == 0;
        let total_time_ms = fround2(run_start.elapsed().as_secs_f32() * 1000.0);

        info!(
            "Compliance under {}: {}/{} passed ({:.1} %), {} critical, {} warnings{}",
            context.jurisdiction,
            summary.passed,
            summary.total,
            summary.compliance_pct,
            summary.critical,
            summary.warnings,
            if overall_compliant { "" } else { " [NON-COMPLIANT]" },
        );

        Ok(ComplianceReport {
            id: uuid_from_obj(&(&plan.id, &context.jurisdiction, RULESET_VERSION)),
            plan_id: plan.id.clone(),
            jurisdiction: context.jurisdiction.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            overall_compliant,
            results,
            summary,
            context: context.clone(),
            engine_version: crate::VERSION.to_string(),
            ruleset_version: RULESET_VERSION.to_string(),
            total_time_ms,
        })
    }

    /// The rules one run evaluates: enabled, jurisdiction-applicable clones
    /// with the jurisdiction's amendments applied, then filtered by the run
    /// options. The registry itself is never touched.
    fn effective_rules(&self, context: &ComplianceContext, options: &CheckOptions) -> Vec<Rule> {
        let amendments = amendments_for(&context.jurisdiction);

        self.registry
            .iter()
            .filter(|r| r.enabled && r.applies_to(&context.jurisdiction))
            .map(|r| {
                // clone before write: amendments only ever touch the copy
                let mut rule = r.clone();
                if let Some(amendment) = amendments.iter().find(|a| a.rule_id == rule.id) {
                    debug!(
                        "Amending {} for {} ({})",
                        rule.id, context.jurisdiction, amendment.version
                    );
                    rule.check = amendment.check;
                    rule.version = amendment.version.to_string();
                }
                rule
            })
            .filter(|r| {
                (options.include_rules.is_empty()
                    || options.include_rules.iter().any(|id| *id == r.id))
                    && !options.exclude_rules.iter().any(|id| *id == r.id)
                    && (options.include_categories.is_empty()
                        || options.include_categories.contains(&r.category))
                    && !options.exclude_categories.contains(&r.category)
            })
            .collect()
    }
}

/// Synthetic outcome for a rule whose check panicked
fn execution_error_outcome(rule: &Rule) -> CheckOutcome {
    warn!("Rule {} panicked during evaluation", rule.id);
    CheckOutcome::with_violations(vec![Violation::new(
        format!("{}-execution-error", rule.id),
        format!("Rule {} failed to execute and was treated as a violation", rule.id),
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_remediation("Review the rule implementation or disable the rule")])
}

/// One-shot convenience wrapper: fresh engine, default options
pub fn run_compliance_check(
    plan: &PlacedPlan,
    jurisdiction: &str,
    options: Option<CheckOptions>,
) -> Result<ComplianceReport> {
    let engine = ComplianceEngine::new();
    let context = ComplianceContext::for_jurisdiction(jurisdiction);
    engine.check(plan, &context, &options.unwrap_or_default())
}
