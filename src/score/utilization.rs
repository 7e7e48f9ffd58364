// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Space utilization, buildability and square-footage accuracy metrics

use crate::types::{PlacedPlan, WallAnalysis};

/// Ideal ratio of placed area to available footprint area
const IDEAL_UTILIZATION: f32 = 0.82;
/// Debit slope around the ideal ratio
const UTILIZATION_SLOPE: f32 = 220.0;

/// How close the placed area comes to the ideal footprint occupancy
pub fn space_utilization(plan: &PlacedPlan) -> f32 {
    let available = plan.envelope.available_sqft();
    if available <= 0.0 {
        return 0.0;
    }
    let ratio = plan.used_sqft() / available;
    100.0 - UTILIZATION_SLOPE * (ratio - IDEAL_UTILIZATION).abs()
}

/// Aspect ratio above which a room stops framing cheaply
const MAX_EASY_ASPECT: f32 = 2.5;
/// Wall-count complexity debit cap and slope
const COMPLEXITY_CAP: f32 = 35.0;
const COMPLEXITY_SLOPE: f32 = 0.7;
/// Debit per unplaced room
const UNPLACED_DEBIT: f32 = 12.0;
/// Connectivity swing
const CONNECTED_SWING: f32 = 12.0;

/// Constructability of the layout: squarish rooms, modest wall counts, no
/// unplaced rooms and a connected circulation graph
pub fn overall_buildability(plan: &PlacedPlan, walls: &WallAnalysis) -> f32 {
    let total = plan.rooms.len().max(1) as f32;
    let squarish = plan
        .rooms
        .iter()
        .filter(|r| r.aspect_ratio() <= MAX_EASY_ASPECT)
        .count() as f32;

    let complexity = COMPLEXITY_SLOPE
        * (walls.shared_walls.len() as f32 + walls.walls.len() as f32 / 4.0);

    let connected = plan
        .circulation
        .as_ref()
        .map(|c| c.is_fully_connected)
        .unwrap_or(false);

    squarish / total * 80.0 + 20.0 - complexity.min(COMPLEXITY_CAP)
        - UNPLACED_DEBIT * plan.unplaced_room_ids.len() as f32
        + if connected {
            CONNECTED_SWING
        } else {
            -CONNECTED_SWING
        }
}

/// Accuracy debit slope of the built area against the brief target
const SQFT_SLOPE: f32 = 180.0;

/// How close the built area is to the brief target
pub fn sqft_accuracy(plan: &PlacedPlan) -> f32 {
    let target = plan.brief.target_sqft;
    if target <= 0.0 {
        return 0.0;
    }
    100.0 - SQFT_SLOPE * (plan.used_sqft() - target).abs() / target
}
