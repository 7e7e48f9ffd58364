// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Plan quality scoring
//!
//! Eight normalized sub-scores in [0, 100] plus their unweighted mean and an
//! auxiliary square-footage accuracy figure. All values are rounded to two
//! decimals at the boundary.

mod adjacency;
mod circulation;
mod light;
mod plumbing;
mod utilization;

use log::info;
use serde::{Deserialize, Serialize};

use crate::types::{PlacedPlan, WallAnalysis};
use crate::utils::{clamp_score, fround2};

pub use adjacency::{adjacency_satisfaction, zone_cohesion};
pub use circulation::{circulation_quality, privacy_gradient};
pub use light::natural_light;
pub use plumbing::plumbing_efficiency;
pub use utilization::{overall_buildability, space_utilization, sqft_accuracy};

/// Quality scores of a placed plan
///
/// `overall` is the unweighted mean of the eight sub-scores; `sqft_accuracy`
/// is auxiliary and not part of the mean.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlanScore {
    pub adjacency_satisfaction: f32,
    pub zone_cohesion: f32,
    pub natural_light: f32,
    pub plumbing_efficiency: f32,
    pub circulation_quality: f32,
    pub space_utilization: f32,
    pub privacy_gradient: f32,
    pub overall_buildability: f32,
    /// Mean of the eight sub-scores
    pub overall: f32,
    /// How close the built area is to the brief target
    pub sqft_accuracy: f32,
}

impl PlanScore {
    /// The eight sub-scores in their canonical order
    pub fn sub_scores(&self) -> [f32; 8] {
        [
            self.adjacency_satisfaction,
            self.zone_cohesion,
            self.natural_light,
            self.plumbing_efficiency,
            self.circulation_quality,
            self.space_utilization,
            self.privacy_gradient,
            self.overall_buildability,
        ]
    }
}

/// Score a placed plan against its wall analysis
pub fn score_plan(plan: &PlacedPlan, walls: &WallAnalysis) -> PlanScore {
    let diagonal = plan.envelope.footprint.diagonal();

    let mut score = PlanScore {
        adjacency_satisfaction: clamp_score(adjacency_satisfaction(plan)),
        zone_cohesion: clamp_score(zone_cohesion(plan, diagonal)),
        natural_light: clamp_score(natural_light(plan)),
        plumbing_efficiency: clamp_score(plumbing_efficiency(plan, walls, diagonal)),
        circulation_quality: clamp_score(circulation_quality(plan)),
        space_utilization: clamp_score(space_utilization(plan)),
        privacy_gradient: clamp_score(privacy_gradient(plan, diagonal)),
        overall_buildability: clamp_score(overall_buildability(plan, walls)),
        overall: 0.0,
        sqft_accuracy: clamp_score(sqft_accuracy(plan)),
    };
    score.overall = fround2(score.sub_scores().iter().sum::<f32>() / 8.0);

    info!(
        "Scores for {} ({}): overall={:.2} adj={:.2} cohesion={:.2} light={:.2} plumbing={:.2} circulation={:.2} utilization={:.2} privacy={:.2} buildability={:.2} sqft={:.2}",
        plan.id,
        plan.meta.strategy,
        score.overall,
        score.adjacency_satisfaction,
        score.zone_cohesion,
        score.natural_light,
        score.plumbing_efficiency,
        score.circulation_quality,
        score.space_utilization,
        score.privacy_gradient,
        score.overall_buildability,
        score.sqft_accuracy,
    );
    score
}

impl From<(&PlacedPlan, &WallAnalysis)> for PlanScore {
    fn from((plan, walls): (&PlacedPlan, &WallAnalysis)) -> Self {
        score_plan(plan, walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circulation::ensure_circulation;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::placement::place_rooms;
    use crate::types::{
        DesignBrief, PlacementOptions, RoomRequirement, RoomType, ZoningOptions,
    };
    use crate::walls::analyze_walls;
    use crate::windows::assign_windows;
    use crate::zoning::assign_zones;

    fn scored() -> PlanScore {
        let nb = normalize(&DesignBrief {
            target_sqft: 1800.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::Dining, 145.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::PrimaryBath, 95.0),
                RoomRequirement::with_target(RoomType::Bedroom, 140.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
                RoomRequirement::with_target(RoomType::Laundry, 50.0),
            ],
            lot: None,
        });
        let env = compute_envelope(&nb);
        let zoned = assign_zones(&nb, &env, &ZoningOptions::default());
        let plan = assign_windows(ensure_circulation(place_rooms(
            &zoned,
            &env,
            &PlacementOptions::default(),
        )));
        let walls = analyze_walls(&plan);
        score_plan(&plan, &walls)
    }

    #[test]
    fn sub_scores_stay_in_range() {
        let score = scored();
        for (i, s) in score.sub_scores().iter().enumerate() {
            assert!(s.is_finite() && *s >= 0.0 && *s <= 100.0, "sub-score {} = {}", i, s);
        }
        assert!(score.sqft_accuracy >= 0.0 && score.sqft_accuracy <= 100.0);
    }

    #[test]
    fn overall_is_the_mean() {
        let score = scored();
        let mean = score.sub_scores().iter().sum::<f32>() / 8.0;
        assert!((score.overall - mean).abs() < 0.01);
    }
}
