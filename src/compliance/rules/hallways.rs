// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Hallway rules (IRC R311.6)

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::{PlacedPlan, PlacedRoom, RoomType};

use super::inches;

const CAT: RuleCategory = RuleCategory::Hallways;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "hallway-min-width",
            "R311.6.1",
            CAT,
            "Hallways are at least 36 in wide",
            check_hallway_min_width,
        )
        .with_config("min_width_in", 36.0),
        Rule::new(
            "hallway-dead-end",
            "R311.6",
            CAT,
            "Hallways lead somewhere",
            check_hallway_dead_end,
        ),
        Rule::new(
            "hallway-area-ratio",
            "R311.6",
            CAT,
            "Circulation area stays proportionate",
            check_hallway_area_ratio,
        )
        .with_config("max_percent", 18.0),
        Rule::new(
            "hallway-service",
            "R311.6",
            CAT,
            "Hallways serve at least two rooms through doors",
            check_hallway_service,
        ),
    ]
}

fn hallways(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type == RoomType::Hallway)
}

fn check_hallway_min_width(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let min_width = rule.config_f32("min_width_in", 36.0);
    let violations = hallways(plan)
        .filter(|r| inches(r.rect().min_dim()) < min_width)
        .map(|r| {
            Violation::new(
                format!("hallway-min-width-{}", r.id),
                format!("Hallway {} is narrower than the code allows", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(inches(r.rect().min_dim()), min_width, "in")
            .with_remediation(format!("Widen {} to at least 36 in", r.id))
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_hallway_dead_end(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = hallways(plan)
        .filter(|r| r.neighbors.len() <= 1)
        .map(|r| {
            Violation::new(
                format!("hallway-dead-end-{}", r.id),
                format!("Hallway {} dead-ends against a single room", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Extend the hallway to serve more rooms or absorb it")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_hallway_area_ratio(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let max_percent = rule.config_f32("max_percent", 18.0);
    let percent = match plan.circulation.as_ref() {
        Some(c) => c.hallway_percent,
        None => return CheckOutcome::pass(),
    };
    if percent <= max_percent {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "hallway-area-ratio-high",
        "Hallways take an outsized share of the floor area",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_values(percent, max_percent, "%")
    .with_remediation("Shorten corridors or open rooms onto each other")])
}

fn check_hallway_service(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let violations = hallways(plan)
        .filter(|r| {
            let doors = plan
                .doors
                .iter()
                .filter(|d| d.connects.iter().any(|id| *id == r.id))
                .count();
            doors < 2
        })
        .map(|r| {
            Violation::new(
                format!("hallway-service-{}", r.id),
                format!("Hallway {} serves fewer than two rooms", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_remediation("Reroute doors so the hallway earns its floor area")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
