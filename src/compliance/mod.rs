// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Rule-based code compliance engine
//!
//! Independent consumer of a placed plan: an extensible rule registry with
//! jurisdiction overrides, evaluated into a report of per-rule results and
//! summary counters. Rule failures are values; only a structurally invalid
//! plan is an error.

mod context;
mod engine;
mod jurisdictions;
mod registry;
mod report;
mod rule;
mod rules;

pub use context::{ComplianceContext, BASE_JURISDICTION, JURISDICTIONS};
pub use engine::{run_compliance_check, CheckOptions, ComplianceEngine};
pub use jurisdictions::{amendments_for, Amendment};
pub use registry::RuleRegistry;
pub use report::{ComplianceReport, ComplianceSummary};
pub use rule::{CheckFn, CheckOutcome, Rule, RuleCategory, RuleResult, Severity, Violation};
pub use rules::base_library;

/// Version tag of the base rule library
pub const RULESET_VERSION: &str = "irc-2021.1";
