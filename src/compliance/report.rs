// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Compliance report and summary counters

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::utils::fround2;

use super::context::ComplianceContext;
use super::rule::{RuleResult, Severity};

/// Summary counters over all evaluated rules
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Rules selected for the run, skipped ones included
    pub total: u32,
    /// Rules with no error-severity violation
    pub passed: u32,
    /// Rules with at least one error-severity violation
    pub failed: u32,
    /// Warning-severity violations across all results
    pub warnings: u32,
    /// Info-severity violations across all results
    pub info: u32,
    /// Error-severity violations across all results
    pub critical: u32,
    /// Rules skipped by a stop-on-critical short circuit
    pub skipped: u32,
    /// passed / total × 100
    pub compliance_pct: f32,
}

impl ComplianceSummary {
    /// Tally the counters over the evaluated results
    pub fn tally(results: &[RuleResult], skipped: u32) -> Self {
        let mut summary = ComplianceSummary {
            total: results.len() as u32 + skipped,
            skipped,
            ..Default::default()
        };
        for result in results.iter() {
            if result.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            for violation in result.violations.iter() {
                match violation.severity {
                    Severity::Error => summary.critical += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => summary.info += 1,
                }
            }
        }
        if summary.total > 0 {
            summary.compliance_pct =
                fround2(summary.passed as f32 / summary.total as f32 * 100.0);
        }
        summary
    }
}

/// Full output of one compliance run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Report identifier
    pub id: String,
    /// Plan the run evaluated
    pub plan_id: String,
    /// Jurisdiction the run evaluated under
    pub jurisdiction: String,
    /// RFC 3339 timestamp of the run; metadata only
    pub timestamp: String,
    /// True when no rule failed
    pub overall_compliant: bool,
    /// Per-rule results, in evaluation order
    pub results: Vec<RuleResult>,
    /// Summary counters
    pub summary: ComplianceSummary,
    /// Echo of the evaluation context
    pub context: ComplianceContext,
    /// Engine version
    pub engine_version: String,
    /// Base ruleset version
    pub ruleset_version: String,
    /// Total run time (ms); metadata only
    pub total_time_ms: f32,
}

impl ComplianceReport {
    /// Result of a given rule, if it was evaluated
    pub fn result_for(&self, rule_id: &str) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule_id == rule_id)
    }

    /// Serialize the report to JSON
    pub fn as_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize compliance report")
    }
}
