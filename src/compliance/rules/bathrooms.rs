// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Bathroom rules (IRC R307, R303; IPC P2708, P2801)
//!
//! Fixture positions are not modeled, so the clearance checks assume the
//! water closet sits centered on the short axis with its tank against the
//! long wall, which is the worst placement the layout still allows.

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::PlacedPlan;

use super::{baths, full_baths, inches};

const CAT: RuleCategory = RuleCategory::Bathrooms;

/// Depth a water closet and tank take from the wall (in)
const WC_DEPTH_IN: f32 = 30.0;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "toilet-side-clearance",
            "R307.1",
            CAT,
            "15 in from the water closet center to any side wall",
            check_toilet_side_clearance,
        )
        .with_config("min_side_in", 15.0),
        Rule::new(
            "toilet-front-clearance",
            "R307.1",
            CAT,
            "21 in of clear space in front of the water closet",
            check_toilet_front_clearance,
        )
        .with_config("min_front_in", 21.0),
        Rule::new(
            "shower-compartment-size",
            "P2708.1",
            CAT,
            "Full baths fit a 30x30 in shower compartment with access",
            check_shower_size,
        )
        .with_config("min_dimension_in", 60.0),
        Rule::new(
            "bathroom-ventilation",
            "R303.3",
            CAT,
            "Bathrooms have an openable window or mechanical ventilation",
            check_ventilation,
        ),
        Rule::new(
            "isolated-plumbing",
            "P2801.1",
            CAT,
            "Plumbing rooms share a wall with other plumbing rooms",
            check_isolated_plumbing,
        ),
        Rule::new(
            "bathroom-door",
            "R307.1",
            CAT,
            "Every bathroom is served by a door",
            check_bathroom_door,
        ),
    ]
}

fn check_toilet_side_clearance(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_side = rule.config_f32("min_side_in", 15.0);
    let violations = baths(plan)
        .filter(|r| inches(r.rect().min_dim()) / 2.0 < min_side)
        .map(|r| {
            Violation::new(
                format!("toilet-side-clearance-{}", r.id),
                format!("Bathroom {} cannot center a water closet clear of the side walls", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()) / 2.0, min_side, "in")
            .with_remediation(format!("Widen {} to at least 30 in across the fixture", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_toilet_front_clearance(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_front = rule.config_f32("min_front_in", 21.0);
    let violations = baths(plan)
        .filter(|r| inches(r.rect().max_dim()) - WC_DEPTH_IN < min_front)
        .map(|r| {
            Violation::new(
                format!("toilet-front-clearance-{}", r.id),
                format!("Bathroom {} leaves too little space in front of the water closet", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().max_dim()) - WC_DEPTH_IN, min_front, "in")
            .with_remediation(format!("Deepen {} so the fixture keeps 21 in clear", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_shower_size(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_in", 60.0);
    let violations = full_baths(plan)
        .filter(|r| inches(r.rect().min_dim()) < min_dim)
        .map(|r| {
            Violation::new(
                format!("shower-compartment-size-{}", r.id),
                format!("Bathroom {} cannot fit a 30x30 in shower with access", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_dim, "in")
            .with_remediation(format!("Bring {} to at least 5 ft on its short side", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_ventilation(rule: &Rule, plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    if ctx.param_bool("mechanical_ventilation") {
        return CheckOutcome::pass().with_note("ventilation", "mechanical");
    }
    let violations = baths(plan)
        .filter(|r| plan.windows_of(&r.id).next().is_none())
        .map(|r| {
            Violation::new(
                format!("bathroom-ventilation-{}", r.id),
                format!("Bathroom {} has neither a window nor mechanical ventilation", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Add an exhaust fan vented to the outside")
            .with_remediation("Or give the bathroom an openable window")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_isolated_plumbing(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let plumbing_count = plan.rooms.iter().filter(|r| r.needs_plumbing).count();
    if plumbing_count <= 1 {
        return CheckOutcome::pass();
    }
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.needs_plumbing)
        .filter(|r| {
            !r.neighbors.iter().any(|n| {
                plan.room(n).map(|o| o.needs_plumbing).unwrap_or(false)
            })
        })
        .map(|r| {
            Violation::new(
                format!("isolated-plumbing-{}", r.id),
                format!("{} shares no wall with another plumbing room", r.id),
                Severity::Info,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Group wet rooms to share supply and drain stacks")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_bathroom_door(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = baths(plan)
        .filter(|r| {
            !plan
                .doors
                .iter()
                .any(|d| d.connects.iter().any(|id| *id == r.id))
        })
        .map(|r| {
            Violation::new(
                format!("bathroom-door-{}", r.id),
                format!("Bathroom {} has no door", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation(format!("Add a door between {} and the circulation space", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
