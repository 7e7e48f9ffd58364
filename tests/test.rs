// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

use planmodel::compliance::{
    CheckOptions, CheckOutcome, ComplianceContext, ComplianceEngine, Rule, RuleCategory,
    Severity, run_compliance_check,
};
use planmodel::{
    compute_envelope, generate_plans, generate_variations, normalize, CirculationResult,
    DesignBrief, Direction, Door, DoorType, NormalizedBrief, PlacedPlan, PlacedRoom,
    RoomRequirement, RoomType, StrategyMeta, WarningLevel, WindowPlacement, WindowType, Zone,
};

extern crate env_logger;

// Test helpers ------------------

macro_rules! assert_almost_eq {
    ($a:expr, $b:expr) => {
        assert_almost_eq!($a, $b, 0.001)
    };
    ($a:expr, $b:expr, $c:expr) => {
        if ($a - $b).abs() > $c {
            panic!(
                "assertion failed: `abs(left - right) < {}`, (left: `{}`, right: `{}`)",
                $c, $a, $b
            );
        }
    };
}

// Logger only activates under test and prints diagnostics when a test fails.
// Call at the start of every test.
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn prd_brief() -> DesignBrief {
    DesignBrief::from_json(include_str!("./data/brief_prd.json")).unwrap()
}

fn room_count(brief: &NormalizedBrief, room_type: RoomType) -> usize {
    brief
        .rooms
        .iter()
        .filter(|r| r.room_type == room_type)
        .count()
}

/// Hand-built plan with known defects: a 50 ft² bedroom and a 30 in hallway
fn defective_plan() -> PlacedPlan {
    let brief = normalize(&DesignBrief {
        target_sqft: 800.0,
        stories: 1,
        style: Default::default(),
        rooms: vec![
            RoomRequirement::with_target(RoomType::Living, 275.0),
            RoomRequirement::with_target(RoomType::Bedroom, 100.0),
        ],
        lot: None,
    });
    let envelope = compute_envelope(&brief);
    let fp = envelope.footprint;

    let room = |id: &str,
                room_type: RoomType,
                zone: Zone,
                x: f32,
                y: f32,
                width: f32,
                depth: f32,
                exterior: Vec<Direction>,
                neighbors: Vec<&str>| {
        PlacedRoom {
            id: id.to_string(),
            room_type,
            label: room_type.to_string(),
            zone,
            floor: 1,
            x,
            y,
            width,
            depth,
            sqft: width * depth,
            rotated: false,
            target_sqft: width * depth,
            priority: 50,
            needs_exterior: room_type == RoomType::Bedroom,
            needs_plumbing: false,
            exterior_walls: exterior,
            adjacent_to: vec![],
            away_from: vec![],
            neighbors: neighbors.into_iter().map(String::from).collect(),
        }
    };

    let rooms = vec![
        room(
            "bedroom-1",
            RoomType::Bedroom,
            Zone::Private,
            fp.x,
            fp.y,
            5.0,
            10.0,
            vec![Direction::South, Direction::West],
            vec!["hallway-1"],
        ),
        room(
            "hallway-1",
            RoomType::Hallway,
            Zone::Circulation,
            fp.x + 5.0,
            fp.y,
            2.5,
            10.0,
            vec![Direction::South],
            vec!["bedroom-1", "living-1"],
        ),
        room(
            "living-1",
            RoomType::Living,
            Zone::Social,
            fp.x + 7.5,
            fp.y,
            12.0,
            12.0,
            vec![Direction::South],
            vec!["hallway-1"],
        ),
    ];

    let doors = vec![
        Door {
            id: "door-entry".to_string(),
            wall_id: "living-1-wall-south".to_string(),
            position: 6.0,
            width: 3.0,
            door_type: DoorType::Exterior,
            connects: ["living-1".to_string(), "living-1".to_string()],
        },
        Door {
            id: "door-1".to_string(),
            wall_id: "sw-living-1-hallway-1".to_string(),
            position: fp.y + 5.0,
            width: 3.0,
            door_type: DoorType::Standard,
            connects: ["living-1".to_string(), "hallway-1".to_string()],
        },
        Door {
            id: "door-2".to_string(),
            wall_id: "sw-hallway-1-bedroom-1".to_string(),
            position: fp.y + 5.0,
            width: 3.0,
            door_type: DoorType::Standard,
            connects: ["hallway-1".to_string(), "bedroom-1".to_string()],
        },
    ];

    let windows = vec![WindowPlacement {
        id: "bedroom-1-win-1".to_string(),
        wall_id: "bedroom-1-wall-west".to_string(),
        room_id: "bedroom-1".to_string(),
        position: 5.0,
        width: 3.0,
        height: 4.0,
        sill_height: 3.0,
        window_type: WindowType::Standard,
        floor: 1,
        direction: Direction::West,
    }];

    PlacedPlan {
        id: "test-plan-defective".to_string(),
        brief,
        envelope,
        rooms,
        doors,
        windows,
        circulation: Some(CirculationResult {
            entry_room_id: "living-1".to_string(),
            is_fully_connected: true,
            main_path: vec![
                "living-1".to_string(),
                "hallway-1".to_string(),
                "bedroom-1".to_string(),
            ],
            dead_ends: vec!["bedroom-1".to_string()],
            hallway_percent: 10.0,
            inserted_hallways: 0,
        }),
        unplaced_room_ids: vec![],
        meta: StrategyMeta::named("hand-built"),
    }
}

// Scenario 1: the PRD example brief ------------------

#[test]
fn prd_normalization_injects_implicit_rooms() {
    init();

    let nb = normalize(&prd_brief());
    assert_eq!(room_count(&nb, RoomType::Foyer), 1);
    assert_eq!(room_count(&nb, RoomType::Hallway), 1);
    assert_eq!(room_count(&nb, RoomType::WalkInCloset), 1);
    assert_eq!(room_count(&nb, RoomType::Stairs), 0);

    // scaled program lands on the brief target within one room's minimum
    let total: f32 = nb.rooms.iter().map(|r| r.target_sqft).sum();
    let max_min = nb.rooms.iter().map(|r| r.min_sqft).fold(0.0, f32::max);
    assert!((total - 1800.0).abs() <= max_min);
}

#[test]
fn prd_envelope_applies_setbacks_and_centers() {
    init();

    let nb = normalize(&prd_brief());
    let env = compute_envelope(&nb);
    assert_almost_eq!(env.buildable.x, 8.0);
    assert_almost_eq!(env.buildable.y, 20.0);
    assert_almost_eq!(env.buildable.width, 94.0);
    assert_almost_eq!(env.buildable.depth, 95.0);
    assert!(env.buildable.contains(&env.footprint));

    // centered on whole feet
    let left = env.footprint.x - env.buildable.x;
    let right = env.buildable.right() - env.footprint.right();
    assert!((left - right).abs() <= 1.0);
}

#[test]
fn prd_pipeline_places_and_connects_everything() {
    init();

    let result = generate_plans(&prd_brief());
    assert!(result.plans.len() >= 4);

    let best = result.best().expect("at least one plan");
    assert!(
        best.plan.unplaced_room_ids.is_empty(),
        "unplaced: {:?}",
        best.plan.unplaced_room_ids
    );
    let circ = best.plan.circulation.as_ref().unwrap();
    assert!(circ.is_fully_connected);

    for scored in result.plans.iter() {
        for s in scored.score.sub_scores().iter() {
            assert!(s.is_finite() && *s >= 0.0 && *s <= 100.0, "score {} out of range", s);
        }
        let mean = scored.score.sub_scores().iter().sum::<f32>() / 8.0;
        assert_almost_eq!(scored.score.overall, mean, 0.01);

        // structural invariants hold for every variation
        for warning in scored.plan.check() {
            assert!(
                warning.level != WarningLevel::DANGER,
                "plan {}: {}",
                scored.plan.meta.strategy,
                warning.msg
            );
        }
    }
}

#[test]
fn prd_pipeline_is_deterministic() {
    init();

    let a = generate_plans(&prd_brief());
    let b = generate_plans(&prd_brief());
    let names = |r: &planmodel::DesignResult| -> Vec<String> {
        r.plans.iter().map(|p| p.plan.meta.strategy.clone()).collect()
    };
    assert_eq!(names(&a), names(&b));
    for (pa, pb) in a.plans.iter().zip(b.plans.iter()) {
        assert_eq!(
            pa.plan.as_json().unwrap(),
            pb.plan.as_json().unwrap(),
            "plan {} not reproducible",
            pa.plan.meta.strategy
        );
    }
}

// Scenario 2: disconnected two-floor program ------------------

#[test]
fn cross_floor_program_stays_disconnected_with_one_warning() {
    init();

    let mut living = RoomRequirement::with_target(RoomType::Living, 275.0);
    living.floor = Some(1);
    let mut office = RoomRequirement::with_target(RoomType::Office, 120.0);
    office.floor = Some(2);

    let brief = DesignBrief {
        target_sqft: 900.0,
        stories: 2,
        style: Default::default(),
        rooms: vec![living, office],
        lot: None,
    };
    let nb = normalize(&brief);
    let env = compute_envelope(&nb);
    let plans = generate_variations(&nb, &env);
    let plan = &plans[0];

    let circ = plan.circulation.as_ref().unwrap();
    assert!(!circ.is_fully_connected);

    let floor_warnings: Vec<_> = plan
        .meta
        .warnings
        .iter()
        .filter(|w| w.msg.contains("floor"))
        .collect();
    assert_eq!(floor_warnings.len(), 1, "warnings: {:?}", plan.meta.warnings);

    let walls = planmodel::analyze_walls(plan);
    let score = planmodel::score_plan(plan, &walls);
    assert!(score.circulation_quality <= 50.0);
}

// Scenario 3: violating bedroom ------------------

#[test]
fn undersized_bedroom_fails_r304() {
    init();

    let plan = defective_plan();
    let report = run_compliance_check(&plan, "irc-base", None).unwrap();

    let result = report.result_for("bedroom-min-area").expect("rule ran");
    assert!(!result.passed);
    let violation = &result.violations[0];
    assert_eq!(violation.severity, Severity::Error);
    assert_eq!(violation.code_section, "R304.1");
    assert_almost_eq!(violation.current_value.unwrap(), 50.0);
    assert_almost_eq!(violation.required_value.unwrap(), 70.0);
    assert_eq!(violation.unit.as_deref(), Some("sq ft"));
    assert!(!violation.remediation.is_empty());
}

// Scenario 4: narrow hallway ------------------

#[test]
fn narrow_hallway_fails_width_rules() {
    init();

    let plan = defective_plan();
    let report = run_compliance_check(&plan, "irc-base", None).unwrap();

    let result = report.result_for("hallway-min-width").expect("rule ran");
    assert!(!result.passed);
    let violation = &result.violations[0];
    assert_eq!(violation.severity, Severity::Error);
    assert_almost_eq!(violation.current_value.unwrap(), 30.0);
    assert_almost_eq!(violation.required_value.unwrap(), 36.0);

    let ada = report.result_for("ada-hallway-width").expect("rule ran");
    assert!(ada.passed, "advisory rules stay passing");
    assert_eq!(ada.violations[0].severity, Severity::Warning);
    assert_almost_eq!(ada.violations[0].required_value.unwrap(), 42.0);
}

// Scenario 5: jurisdiction override isolation ------------------

#[test]
fn jurisdiction_overrides_never_leak() {
    init();

    let plan = defective_plan();
    let engine = ComplianceEngine::new();
    let options = CheckOptions::default();

    // a 7.8 ft ceiling passes the base rule but trips the Colorado amendment
    let mut colorado = ComplianceContext::for_jurisdiction("colorado");
    colorado
        .params
        .insert("ceiling_height_ft".to_string(), 7.8.into());
    let mut irc = ComplianceContext::for_jurisdiction("irc-base");
    irc.params
        .insert("ceiling_height_ft".to_string(), 7.8.into());

    let co_report = engine.check(&plan, &colorado, &options).unwrap();
    let co_result = co_report.result_for("ceiling-height").unwrap();
    assert_eq!(co_result.violations.len(), 1);
    assert_eq!(co_result.violations[0].severity, Severity::Warning);

    // same engine, back to base: no Colorado text may leak
    let irc_report = engine.check(&plan, &irc, &options).unwrap();
    let fresh_report = ComplianceEngine::new().check(&plan, &irc, &options).unwrap();

    let essence = |report: &planmodel::compliance::ComplianceReport| {
        let r = report.result_for("ceiling-height").unwrap();
        serde_json::to_string(&(&r.passed, &r.violations, &r.recommendations)).unwrap()
    };
    assert_eq!(essence(&irc_report), essence(&fresh_report));
    assert!(irc_report.result_for("ceiling-height").unwrap().passed);

    // and the colorado-only rules never run under the base jurisdiction
    assert!(irc_report.result_for("co-prop123-affordability").is_none());
    assert!(co_report.result_for("co-prop123-affordability").is_some());
}

// Scenario 6: variation ranking ------------------

#[test]
fn variation_ranking_is_stable_and_top_plan_uses_space() {
    init();

    let a = generate_plans(&prd_brief());
    let b = generate_plans(&prd_brief());

    let ranking = |r: &planmodel::DesignResult| -> Vec<String> {
        r.plans.iter().map(|p| p.plan.meta.strategy.clone()).collect()
    };
    assert_eq!(ranking(&a), ranking(&b));

    let best = a.best().unwrap();
    assert!(best.score.space_utilization > 50.0, "{}", best.score.space_utilization);
}

// Engine behavior ------------------

#[test]
fn invalid_plans_are_rejected() {
    init();

    let mut plan = defective_plan();
    plan.doors.clear();
    let engine = ComplianceEngine::new();
    let err = engine
        .check(&plan, &ComplianceContext::default(), &CheckOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("no doors"));

    let mut plan = defective_plan();
    plan.rooms.clear();
    let err = engine
        .check(&plan, &ComplianceContext::default(), &CheckOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("no rooms"));
}

#[test]
fn panicking_rules_become_synthetic_violations() {
    init();

    fn panicking(_rule: &Rule, _plan: &PlacedPlan, _ctx: &ComplianceContext) -> CheckOutcome {
        panic!("rule blew up");
    }

    let mut engine = ComplianceEngine::new();
    engine.registry.register(Rule::new(
        "test-panic",
        "T000",
        RuleCategory::Structural,
        "always panics",
        panicking,
    ));

    let report = engine
        .check(
            &defective_plan(),
            &ComplianceContext::default(),
            &CheckOptions::default(),
        )
        .unwrap();
    let result = report.result_for("test-panic").unwrap();
    assert!(!result.passed);
    assert_eq!(result.violations[0].id, "test-panic-execution-error");
    assert_eq!(result.violations[0].severity, Severity::Error);
}

#[test]
fn rule_filters_shape_the_run() {
    init();

    let plan = defective_plan();
    let engine = ComplianceEngine::new();

    let only_hallways = CheckOptions {
        include_categories: vec![RuleCategory::Hallways],
        ..Default::default()
    };
    let report = engine
        .check(&plan, &ComplianceContext::default(), &only_hallways)
        .unwrap();
    assert!(report
        .results
        .iter()
        .all(|r| r.rule_id.starts_with("hallway")));

    let without_one = CheckOptions {
        exclude_rules: vec!["hallway-min-width".to_string()],
        ..Default::default()
    };
    let report = engine
        .check(&plan, &ComplianceContext::default(), &without_one)
        .unwrap();
    assert!(report.result_for("hallway-min-width").is_none());

    let stop_early = CheckOptions {
        stop_on_critical: true,
        ..Default::default()
    };
    let report = engine
        .check(&plan, &ComplianceContext::default(), &stop_early)
        .unwrap();
    assert!(report.summary.skipped > 0);
    assert_eq!(
        report.summary.total,
        report.results.len() as u32 + report.summary.skipped
    );
}

#[test]
fn reports_carry_consistent_summaries() {
    init();

    let plan = defective_plan();
    let report = run_compliance_check(&plan, "irc-base", None).unwrap();

    assert_eq!(report.jurisdiction, "irc-base");
    assert_eq!(report.plan_id, plan.id);
    assert_eq!(
        report.summary.total,
        report.results.len() as u32 + report.summary.skipped
    );
    assert_eq!(
        report.summary.passed + report.summary.failed,
        report.results.len() as u32
    );
    assert!(!report.overall_compliant, "the defective plan must fail");
    let pct = report.summary.passed as f32 / report.summary.total as f32 * 100.0;
    assert_almost_eq!(report.summary.compliance_pct, pct, 0.01);

    // running twice yields the same rule outcomes
    let again = run_compliance_check(&plan, "irc-base", None).unwrap();
    for (a, b) in report.results.iter().zip(again.results.iter()) {
        assert_eq!(a.rule_id, b.rule_id);
        assert_eq!(a.passed, b.passed);
        assert_eq!(
            serde_json::to_string(&a.violations).unwrap(),
            serde_json::to_string(&b.violations).unwrap()
        );
    }
}

// Boundary behaviors ------------------

#[test]
fn tiny_brief_clamps_and_still_places() {
    init();

    let brief = DesignBrief {
        target_sqft: 800.0,
        stories: 1,
        style: Default::default(),
        rooms: vec![
            RoomRequirement::with_target(RoomType::Living, 275.0),
            RoomRequirement::with_target(RoomType::Kitchen, 185.0),
            RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
            RoomRequirement::with_target(RoomType::Bathroom, 55.0),
            RoomRequirement::with_target(RoomType::Garage, 450.0),
        ],
        lot: None,
    };
    let result = generate_plans(&brief);
    assert!(
        result
            .brief
            .warnings
            .iter()
            .any(|w| w.msg.contains("minimum")),
        "expected a clamp warning, got {:?}",
        result.brief.warnings
    );
    let best = result.best().unwrap();
    assert!(
        best.plan.unplaced_room_ids.is_empty(),
        "unplaced: {:?}",
        best.plan.unplaced_room_ids
    );
}

#[test]
fn two_story_floor_assignment() {
    init();

    let brief = DesignBrief {
        target_sqft: 2400.0,
        stories: 2,
        style: Default::default(),
        rooms: vec![
            RoomRequirement::with_target(RoomType::Living, 275.0),
            RoomRequirement::with_target(RoomType::Kitchen, 185.0),
            RoomRequirement::with_target(RoomType::Garage, 420.0),
            RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
            RoomRequirement::with_target(RoomType::PrimaryBath, 95.0),
            RoomRequirement::with_target(RoomType::Bedroom, 140.0),
            RoomRequirement::with_target(RoomType::Laundry, 50.0),
        ],
        lot: None,
    };
    let result = generate_plans(&brief);
    let plan = &result.plans[0].plan;

    for room in plan.rooms.iter() {
        match room.zone {
            Zone::Private => assert_eq!(room.floor, 2, "{}", room.id),
            _ if room.room_type == RoomType::Stairs => assert_eq!(room.floor, 1),
            Zone::Social | Zone::Service | Zone::Garage => {
                assert_eq!(room.floor, 1, "{}", room.id)
            }
            _ => {}
        }
    }
}

#[test]
fn plan_without_plumbing_scores_perfect_plumbing() {
    init();

    let brief = DesignBrief {
        target_sqft: 800.0,
        stories: 1,
        style: Default::default(),
        rooms: vec![
            RoomRequirement::with_target(RoomType::Living, 275.0),
            RoomRequirement::with_target(RoomType::Bedroom, 140.0),
        ],
        lot: None,
    };
    let result = generate_plans(&brief);
    let best = result.best().unwrap();
    assert_almost_eq!(best.score.plumbing_efficiency, 100.0);
}

// Round trips ------------------

#[test]
fn plan_json_round_trip() {
    init();

    let result = generate_plans(&prd_brief());
    let plan = &result.best().unwrap().plan;
    let json = plan.as_json().unwrap();
    let back = PlacedPlan::from_json(&json).unwrap();
    assert_eq!(json, back.as_json().unwrap());
}
