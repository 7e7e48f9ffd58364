// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Egress rules (IRC R310, R311)
//!
//! The R310.2 clear-opening rules are registered but always pass: the window
//! model does not carry clear-opening data yet, and the gap is kept visible
//! through their metadata instead of silently dropping the rules.

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::{DoorType, PlacedPlan, RoomType};

use super::{bedrooms, inches, reachable_from_entry};

const CAT: RuleCategory = RuleCategory::Egress;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "bedroom-egress-window",
            "R310.1",
            CAT,
            "Every sleeping room has an emergency escape opening",
            check_bedroom_egress_window,
        ),
        Rule::new(
            "egress-clear-area",
            "R310.2.1",
            CAT,
            "Escape openings provide 5.7 sq ft of clear area (5.0 at grade)",
            check_clear_opening_stub,
        )
        .with_dependency("bedroom-egress-window"),
        Rule::new(
            "egress-clear-width",
            "R310.2.1",
            CAT,
            "Escape openings provide 20 in of clear width",
            check_clear_opening_stub,
        )
        .with_dependency("bedroom-egress-window"),
        Rule::new(
            "egress-clear-height",
            "R310.2.1",
            CAT,
            "Escape openings provide 24 in of clear height",
            check_clear_opening_stub,
        )
        .with_dependency("bedroom-egress-window"),
        Rule::new(
            "egress-sill-height",
            "R310.2.2",
            CAT,
            "Escape opening sills sit no higher than 44 in above the floor",
            check_sill_height,
        )
        .with_config("max_sill_in", 44.0),
        Rule::new(
            "egress-door-required",
            "R311.2",
            CAT,
            "One side-hinged exterior door of sufficient width serves the dwelling",
            check_egress_door,
        )
        .with_config("min_clear_width_in", 32.0),
        Rule::new(
            "entry-landing",
            "R311.3",
            CAT,
            "A landing or porch serves the required egress door",
            check_entry_landing,
        ),
        Rule::new(
            "stairway-width",
            "R311.7.1",
            CAT,
            "Stairways are at least 36 in wide",
            check_stairway_width,
        )
        .with_config("min_width_in", 36.0),
        Rule::new(
            "bedroom-egress-path",
            "R310.1",
            CAT,
            "Every sleeping room is reachable from the dwelling entry",
            check_bedroom_egress_path,
        ),
    ]
}

fn check_bedroom_egress_window(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let violations = bedrooms(plan)
        .filter(|r| plan.windows_of(&r.id).next().is_none())
        .map(|r| {
            Violation::new(
                format!("bedroom-egress-window-{}", r.id),
                format!("Sleeping room {} has no emergency escape opening", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation(format!("Give {} an exterior wall with an egress window", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

/// R310.2 stub: always passes until windows carry clear-opening data
fn check_clear_opening_stub(
    _rule: &Rule,
    _plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    CheckOutcome::pass().with_note("status", "requires-window-clear-opening-data")
}

fn check_sill_height(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let max_sill = rule.config_f32("max_sill_in", 44.0);
    let mut violations = Vec::new();
    for room in bedrooms(plan) {
        for window in plan.windows_of(&room.id) {
            let sill = inches(window.sill_height);
            if sill > max_sill {
                violations.push(
                    Violation::new(
                        format!("egress-sill-height-{}", window.id),
                        format!("Escape opening {} sits too high above the floor", window.id),
                        Severity::Error,
                        rule.code_section.clone(),
                    )
                    .for_element(window.id.clone())
                    .with_values(sill, max_sill, "in")
                    .with_remediation("Lower the window sill to 44 in or less"),
                );
            }
        }
    }
    CheckOutcome::with_violations(violations)
}

fn check_egress_door(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_width = rule.config_f32("min_clear_width_in", 32.0);
    let exterior: Vec<_> = plan
        .doors
        .iter()
        .filter(|d| d.door_type == DoorType::Exterior)
        .collect();

    let mut violations = Vec::new();
    if exterior.is_empty() {
        violations.push(
            Violation::new(
                "egress-door-missing",
                "The dwelling has no exterior egress door",
                Severity::Error,
                rule.code_section.clone(),
            )
            .with_remediation("Add an exterior door at the entry room"),
        );
    }
    for door in exterior.iter() {
        let width = inches(door.width);
        if width < min_width {
            violations.push(
                Violation::new(
                    format!("egress-door-width-{}", door.id),
                    format!("Egress door {} is narrower than the code allows", door.id),
                    Severity::Error,
                    rule.code_section.clone(),
                )
                .for_element(door.id.clone())
                .with_values(width, min_width, "in")
                .with_remediation("Use a 36 in exterior door leaf"),
            );
        }
    }
    if exterior.len() > 1 {
        violations.push(
            Violation::new(
                "egress-door-count",
                "More than one exterior door found; expected exactly one",
                Severity::Warning,
                rule.code_section.clone(),
            )
            .with_values(exterior.len() as f32, 1.0, "doors"),
        );
    }
    CheckOutcome::with_violations(violations)
}

fn check_entry_landing(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let entry = plan
        .circulation
        .as_ref()
        .and_then(|c| plan.room(&c.entry_room_id));
    let entry = match entry {
        Some(e) => e,
        None => return CheckOutcome::pass(),
    };
    let has_landing = entry.room_type == RoomType::Foyer
        || entry.neighbors.iter().any(|n| {
            plan.room(n)
                .map(|r| r.room_type == RoomType::Porch)
                .unwrap_or(false)
        });
    if has_landing {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "entry-landing-missing",
        "No landing, porch or foyer serves the egress door",
        Severity::Info,
        rule.code_section.clone(),
    )
    .for_element(entry.id.clone())
    .with_remediation("Add a porch or landing outside the entry")])
}

fn check_stairway_width(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_width = rule.config_f32("min_width_in", 36.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Stairs)
        .filter(|r| inches(r.rect().min_dim()) < min_width)
        .map(|r| {
            Violation::new(
                format!("stairway-width-{}", r.id),
                format!("Stairway {} is narrower than the code allows", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_width, "in")
            .with_remediation("Widen the stair shaft to 36 in clear")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_bedroom_egress_path(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let reachable = reachable_from_entry(plan);
    let violations = bedrooms(plan)
        .filter(|r| !reachable.contains(r.id.as_str()))
        .map(|r| {
            Violation::new(
                format!("bedroom-egress-path-{}", r.id),
                format!("Sleeping room {} is unreachable from the dwelling entry", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation(format!("Connect {} to the circulation network", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
