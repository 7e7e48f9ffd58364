// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Plumbing efficiency metric

use crate::geometry::manhattan;
use crate::types::{PlacedPlan, WallAnalysis};

/// Expected wet wall footage per plumbing room (ft)
const WET_WALL_TARGET_PER_ROOM: f32 = 6.0;

/// Plumbing stack efficiency: proximity of plumbing rooms (65 %) and wet
/// wall coverage (35 %)
///
/// Returns 100 when the plan has at most one plumbing room.
pub fn plumbing_efficiency(plan: &PlacedPlan, walls: &WallAnalysis, diagonal: f32) -> f32 {
    let plumbing: Vec<_> = plan.rooms.iter().filter(|r| r.needs_plumbing).collect();
    if plumbing.len() <= 1 {
        return 100.0;
    }

    let mut dist_sum = 0.0;
    let mut pairs = 0u32;
    for (i, a) in plumbing.iter().enumerate() {
        for b in plumbing.iter().skip(i + 1) {
            dist_sum += manhattan(a.rect().center(), b.rect().center());
            pairs += 1;
        }
    }
    let proximity = 100.0 - (dist_sum / pairs as f32) / diagonal.max(1.0) * 100.0;

    let wet_target = plumbing.len() as f32 * WET_WALL_TARGET_PER_ROOM;
    let wet = (walls.wet_wall_length() / wet_target * 100.0).min(100.0);

    0.65 * proximity.max(0.0) + 0.35 * wet
}
