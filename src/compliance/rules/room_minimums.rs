// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Room minimum rules (IRC R304, R306, R309)

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::{PlacedPlan, RoomType};

use super::ceiling_height;

const CAT: RuleCategory = RuleCategory::RoomMinimums;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "habitable-room-area",
            "R304.1",
            CAT,
            "At least one habitable room of 120 sq ft or more",
            check_habitable_room_area,
        )
        .with_config("min_area", 120.0),
        Rule::new(
            "bedroom-min-area",
            "R304.1",
            CAT,
            "Every bedroom offers at least 70 sq ft",
            check_bedroom_min_area,
        )
        .with_config("min_area", 70.0),
        Rule::new(
            "habitable-min-dimension",
            "R304.2",
            CAT,
            "Habitable rooms are at least 7 ft in any horizontal dimension",
            check_habitable_min_dimension,
        )
        .with_config("min_dimension_ft", 7.0),
        Rule::new(
            "kitchen-min-area",
            "R304.1",
            CAT,
            "Kitchens offer at least 50 sq ft",
            check_kitchen_min_area,
        )
        .with_config("min_area", 50.0),
        Rule::new(
            "ceiling-height",
            "R304.3",
            CAT,
            "Habitable spaces reach the minimum ceiling height",
            check_ceiling_height,
        )
        .with_config("min_height_ft", 7.0)
        .with_config("default_ceiling_height_ft", 9.0),
        Rule::new(
            "bathroom-required",
            "R306.1",
            CAT,
            "The dwelling has at least one bathroom with a water closet",
            check_bathroom_required,
        ),
        Rule::new(
            "kitchen-required",
            "R306.2",
            CAT,
            "The dwelling has a kitchen area",
            check_kitchen_required,
        ),
        Rule::new(
            "garage-min-area",
            "R309.1",
            CAT,
            "Garages offer at least one usable parking bay",
            check_garage_min_area,
        )
        .with_config("min_area", 200.0),
    ]
}

fn check_habitable_room_area(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_area = rule.config_f32("min_area", 120.0);
    let largest = plan
        .rooms
        .iter()
        .filter(|r| r.room_type.is_habitable())
        .map(|r| r.sqft)
        .fold(0.0, f32::max);
    if largest >= min_area {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "habitable-room-area-short",
        "No habitable room reaches the minimum gross floor area",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_values(largest, min_area, "sq ft")
    .with_remediation("Enlarge the main living space to at least 120 sq ft")])
}

fn check_bedroom_min_area(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_area = rule.config_f32("min_area", 70.0);
    let violations = super::bedrooms(plan)
        .filter(|r| r.sqft < min_area)
        .map(|r| {
            Violation::new(
                format!("bedroom-min-area-{}", r.id),
                format!("Bedroom {} is below the minimum floor area", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.sqft, min_area, "sq ft")
            .with_remediation(format!("Enlarge {} to at least 70 sq ft", r.id))
            .with_remediation("Or reclassify the room as a den or office")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_habitable_min_dimension(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_dim = rule.config_f32("min_dimension_ft", 7.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type.is_habitable() && r.rect().min_dim() < min_dim)
        .map(|r| {
            Violation::new(
                format!("habitable-min-dimension-{}", r.id),
                format!("Habitable room {} is narrower than the code allows", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.rect().min_dim(), min_dim, "ft")
            .with_remediation(format!("Widen {} to at least 7 ft", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_kitchen_min_area(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_area = rule.config_f32("min_area", 50.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Kitchen && r.sqft < min_area)
        .map(|r| {
            Violation::new(
                format!("kitchen-min-area-{}", r.id),
                format!("Kitchen {} is below the minimum floor area", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.sqft, min_area, "sq ft")
            .with_remediation("Enlarge the kitchen or merge it with the dining area")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_ceiling_height(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let min_height = rule.config_f32("min_height_ft", 7.0);
    let height = ceiling_height(rule, ctx);
    if height >= min_height {
        return CheckOutcome::pass().with_note("assumed_ceiling_height_ft", height as f64);
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ceiling-height-low",
        "Habitable spaces fall short of the minimum ceiling height",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_values(height, min_height, "ft")
    .with_remediation("Raise the plate height of habitable floors")])
}

fn check_bathroom_required(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    if super::baths(plan).next().is_some() {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "bathroom-required-missing",
        "The dwelling has no bathroom",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_remediation("Add at least one bathroom with a water closet and lavatory")])
}

fn check_kitchen_required(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    if plan.rooms.iter().any(|r| r.room_type == RoomType::Kitchen) {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "kitchen-required-missing",
        "The dwelling has no kitchen area",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_remediation("Add a kitchen with a sink and food preparation area")])
}

fn check_garage_min_area(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_area = rule.config_f32("min_area", 200.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Garage && r.sqft < min_area)
        .map(|r| {
            Violation::new(
                format!("garage-min-area-{}", r.id),
                format!("Garage {} is too small for a parking bay", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.sqft, min_area, "sq ft")
            .with_remediation("Enlarge the garage to at least 10x20 ft per bay")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
