// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Rule model of the compliance engine: Rule, CheckOutcome, Violation,
//! Severity, RuleCategory, RuleResult
//!
//! A rule is a plain value carrying a function pointer; cloning one is cheap
//! and never shares mutable state, which is what makes the jurisdiction
//! override contract (clone, never mutate) trivial to honor.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Id, PlacedPlan};

use super::context::ComplianceContext;

/// Severity of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", printable)
    }
}

/// Rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    RoomMinimums,
    Egress,
    Bathrooms,
    Kitchens,
    Hallways,
    Accessibility,
    Structural,
    Energy,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 8] = [
        RuleCategory::RoomMinimums,
        RuleCategory::Egress,
        RuleCategory::Bathrooms,
        RuleCategory::Kitchens,
        RuleCategory::Hallways,
        RuleCategory::Accessibility,
        RuleCategory::Structural,
        RuleCategory::Energy,
    ];
}

impl Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            RuleCategory::RoomMinimums => "room-minimums",
            RuleCategory::Egress => "egress",
            RuleCategory::Bathrooms => "bathrooms",
            RuleCategory::Kitchens => "kitchens",
            RuleCategory::Hallways => "hallways",
            RuleCategory::Accessibility => "accessibility",
            RuleCategory::Structural => "structural",
            RuleCategory::Energy => "energy",
        };
        write!(f, "{}", printable)
    }
}

/// A single rule finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier, unique within the rule result
    pub id: String,
    /// What is wrong
    pub description: String,
    /// Severity
    pub severity: Severity,
    /// Code section backing the finding
    pub code_section: String,
    /// Offending room or element, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<Id>,
    /// Measured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f32>,
    /// Value the code requires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_value: Option<f32>,
    /// Unit of the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Ordered remediation suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediation: Vec<String>,
}

impl Violation {
    pub fn new<T: Into<String>, D: Into<String>, S: Into<String>>(
        id: T,
        description: D,
        severity: Severity,
        code_section: S,
    ) -> Self {
        Violation {
            id: id.into(),
            description: description.into(),
            severity,
            code_section: code_section.into(),
            element_id: None,
            current_value: None,
            required_value: None,
            unit: None,
            remediation: Vec::new(),
        }
    }

    pub fn for_element<T: Into<Id>>(mut self, element_id: T) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn with_values<U: Into<String>>(mut self, current: f32, required: f32, unit: U) -> Self {
        self.current_value = Some(current);
        self.required_value = Some(required);
        self.unit = Some(unit.into());
        self
    }

    pub fn with_remediation<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.remediation.push(suggestion.into());
        self
    }
}

/// What a rule check produced, before the engine wraps it into a result
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub violations: Vec<Violation>,
    pub recommendations: Vec<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl CheckOutcome {
    /// A clean pass
    pub fn pass() -> Self {
        CheckOutcome::default()
    }

    pub fn with_violations(violations: Vec<Violation>) -> Self {
        CheckOutcome {
            violations,
            ..Default::default()
        }
    }

    pub fn with_recommendation<T: Into<String>>(mut self, rec: T) -> Self {
        self.recommendations.push(rec.into());
        self
    }

    pub fn with_note<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Check function signature; receives its own rule value for configuration
pub type CheckFn = fn(&Rule, &PlacedPlan, &ComplianceContext) -> CheckOutcome;

/// A compliance rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier
    pub id: String,
    /// Code section the rule enforces
    pub code_section: String,
    /// Category
    pub category: RuleCategory,
    /// What the rule enforces
    pub description: String,
    /// Disabled rules are never evaluated
    pub enabled: bool,
    /// Jurisdictions the rule applies to; empty applies everywhere
    pub jurisdictions: Vec<String>,
    /// Ruleset version tag; amendments carry their own
    pub version: String,
    /// Free-form configuration bag
    pub config: BTreeMap<String, Value>,
    /// Rules whose data this one builds on (informational)
    pub depends_on: Vec<String>,
    /// The check function
    pub check: CheckFn,
}

impl Rule {
    pub fn new<I: Into<String>, S: Into<String>, D: Into<String>>(
        id: I,
        code_section: S,
        category: RuleCategory,
        description: D,
        check: CheckFn,
    ) -> Self {
        Rule {
            id: id.into(),
            code_section: code_section.into(),
            category,
            description: description.into(),
            enabled: true,
            jurisdictions: Vec::new(),
            version: "irc-2021".to_string(),
            config: BTreeMap::new(),
            depends_on: Vec::new(),
            check,
        }
    }

    /// Restrict the rule to the given jurisdictions
    pub fn for_jurisdictions(mut self, jurisdictions: &[&str]) -> Self {
        self.jurisdictions = jurisdictions.iter().map(|j| j.to_string()).collect();
        self
    }

    pub fn with_version<T: Into<String>>(mut self, version: T) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_config<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_dependency<T: Into<String>>(mut self, rule_id: T) -> Self {
        self.depends_on.push(rule_id.into());
        self
    }

    /// Whether the rule applies under the given jurisdiction
    pub fn applies_to(&self, jurisdiction: &str) -> bool {
        self.jurisdictions.is_empty() || self.jurisdictions.iter().any(|j| j == jurisdiction)
    }

    /// Numeric configuration value with a default
    pub fn config_f32(&self, key: &str, default: f32) -> f32 {
        self.config
            .get(key)
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(default)
    }
}

/// Outcome of evaluating one rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    /// Rule that produced the result
    pub rule_id: String,
    /// False when any violation carries error severity
    pub passed: bool,
    /// Findings
    pub violations: Vec<Violation>,
    /// Non-normative suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// Wall-clock evaluation time (ms); metadata only
    pub execution_time_ms: f32,
    /// Extra data the rule chose to expose
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}
