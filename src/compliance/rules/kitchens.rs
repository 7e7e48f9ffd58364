// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Kitchen rules (IRC R306, R303; IPC P2701)

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::tables::is_open_concept;
use crate::types::{PlacedPlan, RoomType};

use super::inches;

const CAT: RuleCategory = RuleCategory::Kitchens;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "kitchen-plumbing",
            "P2701.1",
            CAT,
            "Kitchens carry supply and drain plumbing for a sink",
            check_kitchen_plumbing,
        ),
        Rule::new(
            "kitchen-clearance",
            "R306.2",
            CAT,
            "Kitchens keep a usable work aisle",
            check_kitchen_clearance,
        )
        .with_config("min_dimension_in", 60.0),
        Rule::new(
            "kitchen-natural-light",
            "R303.1",
            CAT,
            "Kitchens borrow or own natural light",
            check_kitchen_light,
        ),
        Rule::new(
            "kitchen-dining-access",
            "R306.2",
            CAT,
            "Kitchens open to a dining space",
            check_kitchen_dining,
        ),
    ]
}

fn kitchens(plan: &PlacedPlan) -> impl Iterator<Item = &crate::types::PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type == RoomType::Kitchen)
}

fn check_kitchen_plumbing(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = kitchens(plan)
        .filter(|r| !r.needs_plumbing)
        .map(|r| {
            Violation::new(
                format!("kitchen-plumbing-{}", r.id),
                format!("Kitchen {} carries no plumbing", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Route supply and drain lines to the kitchen sink location")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_kitchen_clearance(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_in", 60.0);
    let violations = kitchens(plan)
        .filter(|r| inches(r.rect().min_dim()) < min_dim)
        .map(|r| {
            Violation::new(
                format!("kitchen-clearance-{}", r.id),
                format!("Kitchen {} cannot hold counters and a work aisle", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_dim, "in")
            .with_remediation("Allow 24 in of counter plus a 36 in aisle")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_kitchen_light(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = kitchens(plan)
        .filter(|r| {
            let own_window = plan.windows_of(&r.id).next().is_some();
            let borrowed = r.neighbors.iter().any(|n| {
                plan.room(n)
                    .map(|o| {
                        is_open_concept(r.room_type, o.room_type)
                            && plan.windows_of(&o.id).next().is_some()
                    })
                    .unwrap_or(false)
            });
            !own_window && !borrowed
        })
        .map(|r| {
            Violation::new(
                format!("kitchen-natural-light-{}", r.id),
                format!("Kitchen {} gets no natural light, own or borrowed", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Give the kitchen an exterior wall with a window")
            .with_remediation("Or open it to an adjoining lit space")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_kitchen_dining(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = kitchens(plan)
        .filter(|r| {
            !r.neighbors.iter().any(|n| {
                plan.room(n)
                    .map(|o| {
                        matches!(
                            o.room_type,
                            RoomType::Dining | RoomType::BreakfastNook | RoomType::GreatRoom
                        )
                    })
                    .unwrap_or(false)
            })
        })
        .map(|r| {
            Violation::new(
                format!("kitchen-dining-access-{}", r.id),
                format!("Kitchen {} does not adjoin a dining space", r.id),
                Severity::Info,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Place the dining room or a breakfast nook against the kitchen")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
