// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Jurisdiction amendments and additions
//!
//! An amendment swaps the check function and version of an existing rule for
//! one run; the engine applies it to a clone, never to the registry entry.
//! Jurisdiction-specific rules are ordinary registry entries restricted to
//! their jurisdiction through the rule's `jurisdictions` list.

use crate::compliance::context::ComplianceContext;
use crate::compliance::rule::{CheckFn, CheckOutcome, Rule, RuleCategory, Severity, Violation};
use crate::types::PlacedPlan;

use super::rules::{ceiling_height, window_wall_ratio};

/// A jurisdiction's replacement for one base rule
#[derive(Debug, Clone, Copy)]
pub struct Amendment {
    /// Rule the amendment replaces
    pub rule_id: &'static str,
    /// Version tag of the amended rule
    pub version: &'static str,
    /// Replacement check function
    pub check: CheckFn,
}

/// Amendments contributed by a jurisdiction
pub fn amendments_for(jurisdiction: &str) -> &'static [Amendment] {
    match jurisdiction {
        "colorado" => &[Amendment {
            rule_id: "ceiling-height",
            version: "colorado-2025",
            check: colorado_ceiling_height,
        }],
        "california" => &[Amendment {
            rule_id: "window-wall-ratio",
            version: "ca-title24-2022",
            check: california_window_wall_ratio,
        }],
        "texas" => &[Amendment {
            rule_id: "wind-design",
            version: "tx-twia-2023",
            check: texas_wind_design,
        }],
        "florida" => &[Amendment {
            rule_id: "wind-design",
            version: "fbc-2023",
            check: florida_wind_design,
        }],
        _ => &[],
    }
}

/// Jurisdiction-restricted additions registered alongside the base library
pub fn extra_rules() -> Vec<Rule> {
    vec![
        // Colorado
        Rule::new(
            "co-wui-defensible-space",
            "CO-WUI-2023",
            RuleCategory::Structural,
            "Colorado WUI sites maintain defensible space",
            co_wui_defensible_space,
        )
        .for_jurisdictions(&["colorado"])
        .with_version("colorado-2025"),
        Rule::new(
            "co-high-altitude",
            "CO-IRC-AMD",
            RuleCategory::Energy,
            "High-altitude sites derate combustion equipment",
            co_high_altitude,
        )
        .for_jurisdictions(&["colorado"])
        .with_version("colorado-2025")
        .with_config("altitude_threshold_ft", 6000.0),
        Rule::new(
            "co-prop123-affordability",
            "CO-PROP-123",
            RuleCategory::RoomMinimums,
            "Proposition 123 affordability programs may apply",
            co_prop123,
        )
        .for_jurisdictions(&["colorado"])
        .with_version("colorado-2025"),
        Rule::new(
            "co-sb25-002-factory-built",
            "CO-SB25-002",
            RuleCategory::Structural,
            "SB 25-002 streamlines factory-built housing approval",
            co_sb25_002,
        )
        .for_jurisdictions(&["colorado"])
        .with_version("colorado-2025"),
        // California
        Rule::new(
            "ca-title24-solar-ready",
            "CA-T24-110.10",
            RuleCategory::Energy,
            "Title 24 expects a solar-ready roof zone",
            ca_solar_ready,
        )
        .for_jurisdictions(&["california"])
        .with_version("ca-title24-2022"),
        Rule::new(
            "ca-wildfire-7a",
            "CBC-7A",
            RuleCategory::Structural,
            "Chapter 7A hardening in fire hazard severity zones",
            ca_wildfire_7a,
        )
        .for_jurisdictions(&["california"])
        .with_version("ca-title24-2022"),
        // Texas
        Rule::new(
            "tx-windstorm-certification",
            "TX-TDI-W1",
            RuleCategory::Structural,
            "Coastal counties need TDI windstorm certification",
            tx_windstorm,
        )
        .for_jurisdictions(&["texas"])
        .with_version("tx-twia-2023"),
        // Florida
        Rule::new(
            "fl-impact-glazing",
            "FBC-R301.2.1.2",
            RuleCategory::Structural,
            "Windborne debris regions need impact-rated glazing",
            fl_impact_glazing,
        )
        .for_jurisdictions(&["florida"])
        .with_version("fbc-2023"),
        Rule::new(
            "fl-flood-vents",
            "FBC-R322",
            RuleCategory::Structural,
            "Flood zones need flood openings and elevation",
            fl_flood_vents,
        )
        .for_jurisdictions(&["florida"])
        .with_version("fbc-2023"),
    ]
}

// Amendment checks -----------------------------------------------

/// Colorado ceiling amendment: 7 ft 6 in hard floor, 8 ft preferred
fn colorado_ceiling_height(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let height = ceiling_height(rule, ctx);
    if height < 7.5 {
        return CheckOutcome::with_violations(vec![Violation::new(
            "ceiling-height-co-low",
            "Habitable ceiling below the Colorado amended minimum",
            Severity::Error,
            rule.code_section.clone(),
        )
        .with_values(height, 7.5, "ft")
        .with_remediation("Raise habitable ceilings to 7 ft 6 in or more")]);
    }
    if height < 8.0 {
        return CheckOutcome::with_violations(vec![Violation::new(
            "ceiling-height-co-short",
            "Habitable ceiling below the preferred 8 ft",
            Severity::Warning,
            rule.code_section.clone(),
        )
        .with_values(height, 8.0, "ft")
        .with_remediation("Consider 8 ft plates for resale and comfort")]);
    }
    CheckOutcome::pass().with_note("assumed_ceiling_height_ft", f64::from(height))
}

/// California tightens the prescriptive glazing share to 20 %
fn california_window_wall_ratio(
    rule: &Rule,
    plan: &PlacedPlan,
    ctx: &ComplianceContext,
) -> CheckOutcome {
    let max_ratio = 0.20;
    let ratio = window_wall_ratio(rule, plan, ctx);
    if ratio <= max_ratio {
        return CheckOutcome::pass().with_note("window_wall_ratio", f64::from(ratio));
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "window-wall-ratio-high",
        "Glazing exceeds the Title 24 prescriptive share",
        Severity::Error,
        rule.code_section.clone(),
    )
    .with_values(ratio * 100.0, max_ratio * 100.0, "%")
    .with_remediation("Reduce glazing or run a performance compliance model")])
}

/// Texas coastal amendment: prescriptive path ends at 140 mph
fn texas_wind_design(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let wind = match ctx.wind_speed_mph {
        Some(w) => w,
        None => return CheckOutcome::pass(),
    };
    if wind <= 140.0 {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "wind-design-tx-coastal",
        "Design wind speed requires TDI-approved windstorm construction",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_values(wind, 140.0, "mph")
    .with_remediation("Use TDI product approvals and schedule windstorm inspections")])
}

/// Florida amendment: HVHZ threshold with impact protection
fn florida_wind_design(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let wind = match ctx.wind_speed_mph {
        Some(w) => w,
        None => return CheckOutcome::pass(),
    };
    if wind >= 175.0 {
        return CheckOutcome::with_violations(vec![Violation::new(
            "wind-design-fl-hvhz",
            "High-velocity hurricane zone: full impact protection required",
            Severity::Error,
            rule.code_section.clone(),
        )
        .with_values(wind, 175.0, "mph")
        .with_remediation("Use Miami-Dade approved assemblies throughout")]);
    }
    if wind > 140.0 {
        return CheckOutcome::with_violations(vec![Violation::new(
            "wind-design-fl-wbdr",
            "Windborne debris region: opening protection required",
            Severity::Warning,
            rule.code_section.clone(),
        )
        .with_values(wind, 140.0, "mph")
        .with_remediation("Provide shutters or impact-rated glazing")]);
    }
    CheckOutcome::pass()
}

// Jurisdiction-specific checks -----------------------------------------------

fn co_wui_defensible_space(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    if !ctx.wui_zone {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "co-wui-defensible-space-required",
        "Colorado WUI code applies to this site",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Document defensible space zones 1 and 2")
    .with_remediation("Use class A roofing and ember-resistant vents")])
}

fn co_high_altitude(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let threshold = rule.config_f32("altitude_threshold_ft", 6000.0);
    let altitude = match ctx.param_f32("altitude_ft") {
        Some(a) => a,
        None => return CheckOutcome::pass(),
    };
    if altitude <= threshold {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "co-high-altitude-derate",
        "High-altitude site: combustion appliances need derating",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_values(altitude, threshold, "ft")
    .with_remediation("Specify high-altitude kits for gas appliances")])
}

fn co_prop123(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    CheckOutcome::pass().with_recommendation(
        "Check Proposition 123 affordability funding eligibility with the local authority",
    )
}

fn co_sb25_002(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    CheckOutcome::pass().with_recommendation(
        "SB 25-002 allows state-level approval for factory-built structures",
    )
}

fn ca_solar_ready(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
    CheckOutcome::pass()
        .with_recommendation("Reserve a 250 sq ft south-facing solar-ready roof zone")
}

fn ca_wildfire_7a(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    if !ctx.wui_zone {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "ca-wildfire-7a-required",
        "Fire hazard severity zone: Chapter 7A materials required",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_remediation("Use ignition-resistant exterior materials per Chapter 7A")])
}

fn tx_windstorm(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let wind = ctx.wind_speed_mph.unwrap_or(0.0);
    if wind < 140.0 {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "tx-windstorm-certification-needed",
        "Site falls in a TDI designated catastrophe area",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_remediation("Engage a TDI appointed qualified inspector early")])
}

fn fl_impact_glazing(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    let wind = ctx.wind_speed_mph.unwrap_or(0.0);
    if wind < 140.0 {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "fl-impact-glazing-required",
        "Windborne debris region: glazing needs impact rating",
        Severity::Warning,
        rule.code_section.clone(),
    )
    .with_values(wind, 140.0, "mph")
    .with_remediation("Specify impact-rated windows or approved shutters")])
}

fn fl_flood_vents(rule: &Rule, _plan: &PlacedPlan, ctx: &ComplianceContext) -> CheckOutcome {
    if ctx.params.get("flood_zone").is_none() {
        return CheckOutcome::pass();
    }
    CheckOutcome::with_violations(vec![Violation::new(
        "fl-flood-vents-required",
        "Mapped flood zone: elevation and flood openings apply",
        Severity::Info,
        rule.code_section.clone(),
    )
    .with_remediation("Elevate to the design flood elevation and add flood vents")])
}
