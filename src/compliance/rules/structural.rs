// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Structural rules (IRC R301, R502, R602) and modular transport limits
//!
//! The modular checks flag geometry that forces a marriage wall or a
//! multi-module split when the house ships from a factory.

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::PlacedPlan;

const CAT: RuleCategory = RuleCategory::Structural;

/// Transportable module width (ft)
const MODULE_WIDTH_FT: f32 = 16.0;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "max-clear-span",
            "R502.3",
            CAT,
            "Rooms stay within conventional joist spans",
            check_max_clear_span,
        )
        .with_config("max_span_ft", 20.0),
        Rule::new(
            "modular-unit-width",
            "HUD-3280.305",
            CAT,
            "Rooms fit a single transportable module",
            check_modular_unit_width,
        ),
        Rule::new(
            "modular-grid-crossing",
            "HUD-3280.305",
            CAT,
            "Rooms avoid straddling module joints",
            check_modular_grid_crossing,
        ),
        Rule::new(
            "seismic-design",
            "R301.2.2",
            CAT,
            "High seismic categories need engineered two-story designs",
            check_seismic_design,
        ),
        Rule::new(
            "wind-design",
            "R301.2.1",
            CAT,
            "High design wind speeds need engineered wind bracing",
            check_wind_design,
        )
        .with_config("max_prescriptive_mph", 130.0),
        Rule::new(
            "snow-load",
            "R301.2.3",
            CAT,
            "Heavy ground snow loads need roof verification",
            check_snow_load,
        )
        .with_config("max_prescriptive_psf", 30.0),
        Rule::new(
            "stacked-bearing-walls",
            "R602.10",
            CAT,
            "Upper floor rooms bear on the floor below",
            check_stacked_bearing,
        ),
    ]
}

fn check_max_clear_span(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let max_span = rule.config_f32("max_span_ft", 20.0);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.rect().max_dim() > max_span)
        .map(|r| {
            Violation::new(
                format!("max-clear-span-{}", r.id),
                format!("Room {} spans beyond conventional joists; a beam is needed", r.id),
                Severity::Error,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.rect().max_dim(), max_span, "ft")
            .with_remediation("Add a dropped or flush beam at mid-span")
            .with_remediation("Or shorten the room below 20 ft")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_modular_unit_width(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.rect().min_dim() > MODULE_WIDTH_FT)
        .map(|r| {
            Violation::new(
                format!("modular-unit-width-{}", r.id),
                format!("Room {} exceeds a single module width; a marriage wall is required", r.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(r.id.clone())
            .with_values(r.rect().min_dim(), MODULE_WIDTH_FT, "ft")
            .with_remediation("Split the room over two modules with a marriage wall")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_modular_grid_crossing(
    rule: &Rule,
    plan: &PlacedPlan,
    _ctx: &ComplianceContext,
) -> CheckOutcome {
    let footprint = plan.envelope.footprint;
    let mut violations = Vec::new();
    for room in plan.rooms.iter() {
        let mut joint = footprint.x + MODULE_WIDTH_FT;
        while joint < footprint.right() {
            if room.x < joint && room.rect().right() > joint {
                violations.push(
                    Violation::new(
                        format!("modular-grid-crossing-{}", room.id),
                        format!("Room {} straddles the module joint at {:.0} ft", room.id, joint),
                        Severity::Warning,
                        rule.code_section.clone(),
                    )
                    .for_element(room.id.clone())
                    .with_values(joint - room.x, 0.0, "ft")
                    .with_remediation("Align the room edge with the module joint"),
                );
                break;
            }
            joint += MODULE_WIDTH_FT;
        }
    }
    CheckOutcome::with_violations(violations)
}

fn check_seismic_design(rule: &Rule, plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let category = match ctx.seismic_design_category.as_deref() {
        Some(c) => c,
        None => return CheckOutcome::pass(),
    };
    let high = matches!(category, "D0" | "D1" | "D2" | "E");
    if high && plan.envelope.stories == 2 {
        return CheckOutcome::with_violations(vec![Violation::new(
            "seismic-design-engineered",
            format!("Two-story dwelling in seismic design category {}", category),
            Severity::Warning,
            rule.code_section.clone(),
        )
        .with_remediation("Provide engineered shear wall design per R301.2.2")]);
    }
    CheckOutcome::pass()
}

fn check_wind_design(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let max_mph = rule.config_f32("max_prescriptive_mph", 130.0);
    let wind = match ctx.wind_speed_mph {
        Some(w) => w,
        None => return CheckOutcome::pass(),
    };
    if wind <= max_mph {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "wind-design-engineered",
        "Design wind speed exceeds the prescriptive path",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_values(wind, max_mph, "mph")
    .with_remediation("Provide wind design per AWC WFCM or engineered analysis")])
}

fn check_snow_load(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let max_psf = rule.config_f32("max_prescriptive_psf", 30.0);
    let snow = match ctx.ground_snow_load_psf {
        Some(s) => s,
        None => return CheckOutcome::pass(),
    };
    if snow <= max_psf {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "snow-load-verification",
        "Ground snow load exceeds the prescriptive tables",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_values(snow, max_psf, "psf")
    .with_remediation("Verify roof framing for the site snow load")])
}

fn check_stacked_bearing(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    if plan.envelope.stories < 2 {
        return CheckOutcome::pass();
    }
    let violations = plan
        .rooms_on_floor(2)
        .filter(|upper| {
            !plan
                .rooms_on_floor(1)
                .any(|lower| upper.rect().overlaps(&lower.rect()))
        })
        .map(|upper| {
            Violation::new(
                format!("stacked-bearing-{}", upper.id),
                format!("Upper room {} has no bearing structure below", upper.id),
                Severity::Warning,
                rule.code_section.clone(),
            )
            .for_element(upper.id.clone())
            .with_remediation("Stack upper rooms over lower walls or add beams")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}
