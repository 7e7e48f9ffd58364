// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! In-process rule table of the compliance engine
//!
//! An insertion-ordered map, so evaluation order is registration order and
//! stays stable across runs. The registry is only written at engine
//! construction time; jurisdiction overrides never touch it.

use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use super::rule::{Rule, RuleCategory};

/// Rule table keyed by rule id, insertion ordered
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Register a rule; an existing rule with the same id is replaced
    pub fn register(&mut self, rule: Rule) {
        if self.rules.contains_key(&rule.id) {
            warn!("Rule {} already registered; replacing", rule.id);
        }
        self.rules.insert(rule.id.clone(), rule);
    }

    /// Replace an existing rule; false when the id is unknown
    pub fn replace(&mut self, rule: Rule) -> bool {
        match self.rules.get_mut(&rule.id) {
            Some(slot) => {
                *slot = rule;
                true
            }
            None => false,
        }
    }

    /// Look up a rule by id
    pub fn get_rule(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Rules of a category, in registration order
    pub fn get_rules_by_category(&self, category: RuleCategory) -> Vec<&Rule> {
        self.rules
            .values()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Enabled rules, in registration order
    pub fn get_enabled_rules(&self) -> Vec<&Rule> {
        self.rules.values().filter(|r| r.enabled).collect()
    }

    /// Enable or disable a rule; false when the id is unknown
    pub fn set_rule_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.get_mut(id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Merge a configuration value into a rule; false when the id is unknown
    pub fn update_rule_config(&mut self, id: &str, key: &str, value: Value) -> bool {
        match self.rules.get_mut(id) {
            Some(rule) => {
                rule.config.insert(key.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// All rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::rule::{CheckOutcome, Severity, Violation};
    use crate::compliance::ComplianceContext;
    use crate::types::PlacedPlan;

    fn noop(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
        CheckOutcome::pass()
    }

    fn failing(rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
        CheckOutcome::with_violations(vec![Violation::new(
            format!("{}-fail", rule.id),
            "always fails",
            Severity::Error,
            rule.code_section.clone(),
        )])
    }

    #[test]
    fn register_replace_and_lookup() {
        let mut registry = RuleRegistry::new();
        registry.register(Rule::new(
            "test-rule",
            "R000",
            RuleCategory::RoomMinimums,
            "test",
            noop,
        ));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_rule("test-rule").is_some());

        // replace swaps the check function in place
        let replaced = registry.replace(
            Rule::new("test-rule", "R000", RuleCategory::RoomMinimums, "test", failing)
                .with_version("v2"),
        );
        assert!(replaced);
        assert_eq!(registry.get_rule("test-rule").unwrap().version, "v2");
        assert!(!registry.replace(Rule::new(
            "unknown",
            "R000",
            RuleCategory::RoomMinimums,
            "test",
            noop
        )));
    }

    #[test]
    fn enable_disable_and_config() {
        let mut registry = RuleRegistry::new();
        registry.register(Rule::new(
            "test-rule",
            "R000",
            RuleCategory::Egress,
            "test",
            noop,
        ));
        assert!(registry.set_rule_enabled("test-rule", false));
        assert!(registry.get_enabled_rules().is_empty());
        assert!(registry.update_rule_config("test-rule", "threshold", 42.into()));
        assert_eq!(
            registry.get_rule("test-rule").unwrap().config_f32("threshold", 0.0),
            42.0
        );
        assert!(!registry.set_rule_enabled("unknown", true));
    }
}
