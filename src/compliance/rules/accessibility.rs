// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Accessibility rules (ICC A117.1, advisory for one- and two-family
//! dwellings)
//!
//! None of these are IRC mandates for detached single-family construction,
//! so the severities stay at warning and info.

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::{DoorType, PlacedPlan, RoomType};

use super::{full_baths, inches};

const CAT: RuleCategory = RuleCategory::Accessibility;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "ada-hallway-width",
            "A117.1-403",
            CAT,
            "Accessible routes prefer 42 in hallways",
            check_hallway_width,
        )
        .with_config("min_width_in", 42.0),
        Rule::new(
            "ada-door-width",
            "A117.1-404",
            CAT,
            "Doors offer 32 in of clear passage",
            check_door_width,
        )
        .with_config("min_width_in", 32.0),
        Rule::new(
            "ada-bathroom-turning-space",
            "A117.1-603",
            CAT,
            "At least one bathroom allows a 60 in turning circle",
            check_bathroom_turning_space,
        )
        .with_config("min_dimension_in", 60.0),
        Rule::new(
            "ada-zero-step-entry",
            "A117.1-404",
            CAT,
            "A zero-step entry is reachable from outside",
            check_zero_step_entry,
        ),
        Rule::new(
            "ada-ground-floor-bedroom",
            "A117.1-1002",
            CAT,
            "A bedroom exists on the entry floor",
            check_ground_floor_bedroom,
        ),
        Rule::new(
            "ada-ground-floor-bathroom",
            "A117.1-1002",
            CAT,
            "A full bathroom exists on the entry floor",
            check_ground_floor_bathroom,
        ),
        Rule::new(
            "ada-kitchen-approach",
            "A117.1-804",
            CAT,
            "Kitchens allow a wheelchair approach",
            check_kitchen_approach,
        )
        .with_config("min_dimension_in", 72.0),
        Rule::new(
            "ada-route-width",
            "A117.1-403",
            CAT,
            "Rooms on the main path keep a 36 in route",
            check_route_width,
        )
        .with_config("min_dimension_in", 36.0),
        Rule::new(
            "ada-primary-suite-ground-floor",
            "A117.1-1002",
            CAT,
            "The primary suite sits on the entry floor for aging in place",
            check_primary_suite_ground_floor,
        ),
        Rule::new(
            "ada-laundry-ground-floor",
            "A117.1-1002",
            CAT,
            "Laundry sits on the entry floor",
            check_laundry_ground_floor,
        ),
    ]
}

fn check_hallway_width(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_width = rule.config_f32("min_width_in", 42.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Hallway)
        .filter(|r| inches(r.rect().min_dim()) < min_width)
        .map(|r| {
            Violation::new(
                format!("ada-hallway-width-{}", r.id),
                format!("Hallway {} is narrower than an accessible route prefers", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_width, "in")
            .with_remediation("Widen the hallway to 42 in for wheelchair passage")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_door_width(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_width = rule.config_f32("min_width_in", 32.0);
    let violations = plan
        .doors
        .iter()
        .filter(|d| d.door_type != DoorType::Exterior && inches(d.width) < min_width)
        .map(|d| {
            Violation::new(
                format!("ada-door-width-{}", d.id),
                format!("Door {} offers less than 32 in of clear passage", d.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(d.id.clone())
            .with_values(inches(d.width), min_width, "in")
            .with_remediation("Use 2-10 or wider door leaves on accessible routes")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_bathroom_turning_space(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_in", 60.0);
    let any_turnable = full_baths(plan).any(|r| inches(r.rect().min_dim()) >= min_dim);
    if any_turnable || full_baths(plan).next().is_none() {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ada-bathroom-turning-space-none",
        "No bathroom allows a 60 in wheelchair turning circle",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Bring one full bath to at least 5x5 ft of clear floor")])
}

fn check_zero_step_entry(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let entry = plan
        .circulation
        .as_ref()
        .and_then(|c| plan.room(&c.entry_room_id));
    let served = entry
        .map(|e| {
            e.floor == 1
                && e.neighbors.iter().any(|n| {
                    plan.room(n)
                        .map(|r| r.room_type == RoomType::Porch)
                        .unwrap_or(false)
                })
        })
        .unwrap_or(false);
    if served {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ada-zero-step-entry-missing",
        "No porch or level landing serves the entry for a zero-step approach",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_remediation("Grade a level path to the entry door or add a porch")])
}

fn check_ground_floor_bedroom(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    if super::bedrooms(plan).next().is_none()
        || super::bedrooms(plan).any(|r| r.floor == 1)
    {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ada-ground-floor-bedroom-missing",
        "Every bedroom sits above the entry floor",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Keep one bedroom on the entry floor")])
}

fn check_ground_floor_bathroom(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    if full_baths(plan).next().is_none() || full_baths(plan).any(|r| r.floor == 1) {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ada-ground-floor-bathroom-missing",
        "No full bathroom on the entry floor",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Place a full bath on the entry floor")])
}

fn check_kitchen_approach(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_in", 72.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Kitchen)
        .filter(|r| inches(r.rect().min_dim()) < min_dim)
        .map(|r| {
            Violation::new(
                format!("ada-kitchen-approach-{}", r.id),
                format!("Kitchen {} is tight for a wheelchair approach", r.id),
                Severity::Info,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_dim, "in")
            .with_remediation("Keep 60 in between opposing counters where possible")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_route_width(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_in", 36.0);
    let path = match plan.circulation.as_ref() {
        Some(c) => &c.main_path,
        None => return CheckOutcome::pass(),
    };
    let violations = path
        .iter()
        .filter_map(|id| plan.room(id))
        .filter(|r| inches(r.rect().min_dim()) < min_dim)
        .map(|r| {
            Violation::new(
                format!("ada-route-width-{}", r.id),
                format!("Main path room {} pinches the accessible route", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_dim, "in")
            .with_remediation("Keep the main route at least 36 in clear")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_primary_suite_ground_floor(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let bed = plan.rooms.iter().find(|r| r.room_type == RoomType::PrimaryBed);
    let bath = plan.rooms.iter().find(|r| r.room_type == RoomType::PrimaryBath);
    match (bed, bath) {
        (Some(bed), Some(bath)) if bed.floor != 1 || bath.floor != 1 => {
            CheckOutcome::with_violations(vec![Violation::new(
                "ada-primary-suite-upstairs",
                "The primary suite sits above the entry floor",
                Severity::Info,
                rule.code_section.clone(),
            )
            .with_remediation("Consider a ground-floor primary suite for aging in place")])
        }
        _ => CheckOutcome::pass(),
    }
}

fn check_laundry_ground_floor(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let laundry: Vec<_> = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Laundry)
        .collect();
    if laundry.is_empty() || laundry.iter().any(|r| r.floor == 1) {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ada-laundry-upstairs",
        "Laundry sits above the entry floor",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_remediation("Keep laundry reachable without stairs")])
}
