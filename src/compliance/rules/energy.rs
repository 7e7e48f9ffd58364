// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Energy rules (IECC / IRC chapter 11)

use std::collections::BTreeMap;

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::{Direction, PlacedPlan};

use super::{ceiling_height, exterior_wall_area, total_window_area};

const CAT: RuleCategory = RuleCategory::Energy;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "window-wall-ratio",
            "N1102.1",
            CAT,
            "Glazing stays within the prescriptive window-to-wall ratio",
            check_window_wall_ratio,
        )
        .with_config("max_ratio", 0.25)
        .with_config("default_ceiling_height_ft", 9.0),
        Rule::new(
            "fenestration-u-factor",
            "N1102.1.1",
            CAT,
            "Fenestration meets the climate zone U-factor",
            check_u_factor_stub,
        ),
        Rule::new(
            "air-sealing",
            "N1102.4.1",
            CAT,
            "The thermal envelope is sealed and tested",
            check_air_sealing,
        ),
        Rule::new(
            "glazing-orientation-balance",
            "N1102.1",
            CAT,
            "Glazing is not lopsided onto one orientation",
            check_glazing_balance,
        )
        .with_config("max_share", 0.6),
        Rule::new(
            "habitable-glazing-area",
            "R303.1",
            CAT,
            "Habitable rooms get glazing worth 8 % of their floor area",
            check_habitable_glazing,
        )
        .with_config("min_ratio", 0.08),
        Rule::new(
            "envelope-compactness",
            "N1102",
            CAT,
            "The envelope stays reasonably compact",
            check_compactness,
        )
        .with_config("max_ratio", 0.45),
        Rule::new(
            "wui-ember-resistance",
            "IWUIC-504",
            CAT,
            "WUI sites use ember-resistant venting and glazing",
            check_wui,
        ),
    ]
}

/// Window area over gross exterior wall area
pub(crate) fn window_wall_ratio(rule: &Rule, plan: &PlacedPlan, ctx: &ComplianceContext) -> f32 {
    let wall_area = exterior_wall_area(plan, ceiling_height(rule, ctx));
    if wall_area <= 0.0 {
        return 0.0;
    }
    total_window_area(plan) / wall_area
}

fn check_window_wall_ratio(rule: &Rule, plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let max_ratio = rule.config_f32("max_ratio", 0.25);
    let ratio = window_wall_ratio(rule, plan, ctx);
    if ratio <= max_ratio {
        return CheckOutcome::pass().with_note("window_wall_ratio", f64::from(ratio));
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "window-wall-ratio-high",
        "Glazing exceeds the prescriptive share of the exterior walls",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_values(ratio * 100.0, max_ratio * 100.0, "%")
    .with_remediation("Reduce window count or area, or pursue performance compliance")])
}

fn check_u_factor_stub(_rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    CheckOutcome::pass()
        .with_note("status", "requires-glazing-performance-data")
        .with_note(
            "climate_zone",
            ctx.params
                .get("climate_zone")
                .cloned()
                .unwrap_or_else(|| "unknown".into()),
        )
}

fn check_air_sealing(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    CheckOutcome::pass()
        .with_recommendation("Blower-door test at or under 4 ACH50 before drywall close-in")
}

fn check_glazing_balance(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let max_share = rule.config_f32("max_share", 0.6);
    let total = total_window_area(plan);
    if total <= 0.0 {
        return CheckOutcome::pass();
    }
    let mut by_dir: BTreeMap<Direction, f32> = BTreeMap::new();
    for w in plan.windows.iter() {
        *by_dir.entry(w.direction).or_insert(0.0) += w.area();
    }
    let violations = by_dir
        .into_iter()
        .filter(|(_, area)| area / total > max_share)
        .map(|(dir, area)| {
            Violation::new(
                format!("glazing-orientation-balance-{}", dir),
                format!("{:.0} % of the glazing faces {}", area / total * 100.0, dir),
                Severity::Info,
                rule.code_section.clone(),
            )
            .with_values(area / total * 100.0, max_share * 100.0, "%")
            .with_remediation("Distribute glazing across orientations for solar balance")
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_habitable_glazing(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let min_ratio = rule.config_f32("min_ratio", 0.08);
    let violations = plan
        .rooms
        .iter()
        .filter(|r| r.room_type.is_habitable())
        .filter_map(|r| {
            let glazed: f32 = plan.windows_of(&r.id).map(|w| w.area()).sum();
            if r.sqft > 0.0 && glazed / r.sqft < min_ratio {
                Some(
                    Violation::new(
                        format!("habitable-glazing-area-{}", r.id),
                        format!("Room {} gets less daylight glazing than R303.1 asks", r.id),
                        Severity::Warning,
                        rule.code_section.clone(),
                    )
                    .for_element(r.id.clone())
                    .with_values(glazed / r.sqft * 100.0, min_ratio * 100.0, "%")
                    .with_remediation("Enlarge the room's windows toward 8 % of floor area"),
                )
            } else {
                None
            }
        })
        .collect();
    CheckOutcome::with_violations(violations)
}

fn check_compactness(rule: &Rule, plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    let max_ratio = rule.config_f32("max_ratio", 0.45);
    let used = plan.used_sqft();
    if used <= 0.0 {
        return CheckOutcome::pass();
    }
    let exterior_length: f32 = plan
        .rooms
        .iter()
        .flat_map(|r| r.exterior_walls.iter().map(move |d| r.wall_length(*d)))
        .sum();
    let ratio = exterior_length / used;
    if ratio <= max_ratio {
        return CheckOutcome::pass().with_note("wall_to_floor_ratio", f64::from(ratio));
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "envelope-compactness-low",
        "The envelope is spread thin relative to the floor area",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_values(ratio, max_ratio, "ft/ft²")
    .with_remediation("Compact the footprint to cut envelope losses")])
}

fn check_wui(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    if !ctx.wui_zone {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "wui-ember-resistance-required",
        "The site sits in a wildland-urban interface zone",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Use ember-resistant vents and tempered glazing")
    .with_remediation("Maintain defensible space per the local WUI code")])
}
