// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Pipeline orchestrator: brief in, ranked scored layouts out

use log::info;
use serde::{Deserialize, Serialize};

use crate::envelope::compute_envelope;
use crate::normalize::normalize;
use crate::score::{score_plan, PlanScore};
use crate::types::{BuildingEnvelope, DesignBrief, NormalizedBrief, PlacedPlan, WallAnalysis};
use crate::variations::generate_variations;
use crate::walls::analyze_walls;

/// One generated layout with its wall takeoff and quality scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPlan {
    pub plan: PlacedPlan,
    pub walls: WallAnalysis,
    pub score: PlanScore,
}

/// Full pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResult {
    /// The normalized brief all plans were generated from
    pub brief: NormalizedBrief,
    /// The shared building envelope
    pub envelope: BuildingEnvelope,
    /// Scored candidate layouts, best overall score first
    pub plans: Vec<ScoredPlan>,
}

impl DesignResult {
    /// The top-ranked plan
    pub fn best(&self) -> Option<&ScoredPlan> {
        self.plans.first()
    }
}

/// Run the whole pipeline: normalize, envelope, variations, walls and scores
///
/// Plans come back sorted by overall score, descending and stable, so equal
/// scores keep the variation order.
pub fn generate_plans(brief: &DesignBrief) -> DesignResult {
    let normalized = normalize(brief);
    let envelope = compute_envelope(&normalized);

    let mut plans: Vec<ScoredPlan> = generate_variations(&normalized, &envelope)
        .into_iter()
        .map(|plan| {
            let walls = analyze_walls(&plan);
            let score = score_plan(&plan, &walls);
            ScoredPlan { plan, walls, score }
        })
        .collect();

    plans.sort_by(|a, b| b.score.overall.partial_cmp(&a.score.overall).unwrap());

    info!(
        "Generated {} plans; best {} at {:.2}",
        plans.len(),
        plans.first().map(|p| p.plan.meta.strategy.as_str()).unwrap_or("-"),
        plans.first().map(|p| p.score.overall).unwrap_or(0.0)
    );

    DesignResult {
        brief: normalized,
        envelope,
        plans,
    }
}
