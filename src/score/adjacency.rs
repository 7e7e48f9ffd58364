// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Adjacency satisfaction and zone cohesion metrics

use std::collections::BTreeMap;

use crate::geometry::manhattan;
use crate::tables::{ANTI_ADJACENCY, HARD_ADJACENCY, SOFT_ADJACENCY};
use crate::types::{PlacedPlan, RoomType, Zone};

/// Weighted satisfaction of the hard, soft and anti adjacency tables
///
/// A pair is applicable when the plan holds rooms of both types, and
/// satisfied when any room of one type is an edge neighbor of any room of
/// the other. Hard pairs weigh 50 %, soft 30 %, anti avoidance 20 %.
pub fn adjacency_satisfaction(plan: &PlacedPlan) -> f32 {
    let hard = {
        let mut applicable = 0u32;
        let mut satisfied = 0u32;
        for &(a, b) in HARD_ADJACENCY.iter() {
            if !pair_applicable(plan, a, b) {
                continue;
            }
            applicable += 1;
            if pair_touching(plan, a, b) {
                satisfied += 1;
            }
        }
        ratio_score(satisfied as f32, applicable as f32)
    };

    let soft = {
        let mut total = 0.0;
        let mut earned = 0.0;
        for &(a, b, w) in SOFT_ADJACENCY.iter() {
            if !pair_applicable(plan, a, b) {
                continue;
            }
            total += w;
            if pair_touching(plan, a, b) {
                earned += w;
            }
        }
        ratio_score(earned, total)
    };

    let anti = {
        let mut total = 0.0;
        let mut incurred = 0.0;
        for &(a, b, w) in ANTI_ADJACENCY.iter() {
            if !pair_applicable(plan, a, b) {
                continue;
            }
            total += w.abs();
            if pair_touching(plan, a, b) {
                incurred += w.abs();
            }
        }
        if total > 0.0 {
            100.0 - incurred / total * 100.0
        } else {
            100.0
        }
    };

    0.5 * hard + 0.3 * soft + 0.2 * anti
}

fn ratio_score(num: f32, den: f32) -> f32 {
    if den > 0.0 {
        num / den * 100.0
    } else {
        100.0
    }
}

fn pair_applicable(plan: &PlacedPlan, a: RoomType, b: RoomType) -> bool {
    plan.rooms.iter().any(|r| r.room_type == a) && plan.rooms.iter().any(|r| r.room_type == b)
}

/// Any room of type `a` edge-neighboring any room of type `b`
fn pair_touching(plan: &PlacedPlan, a: RoomType, b: RoomType) -> bool {
    plan.rooms
        .iter()
        .filter(|r| r.room_type == a)
        .any(|r| {
            r.neighbors.iter().any(|n| {
                plan.room(n)
                    .map(|other| other.room_type == b)
                    .unwrap_or(false)
            })
        })
}

/// Area-weighted compactness of each zone with at least two rooms
///
/// A zone scores 100 minus its average pairwise centroid distance relative
/// to the footprint diagonal.
pub fn zone_cohesion(plan: &PlacedPlan, diagonal: f32) -> f32 {
    let mut zones: BTreeMap<Zone, Vec<usize>> = BTreeMap::new();
    for (i, room) in plan.rooms.iter().enumerate() {
        zones.entry(room.zone).or_insert_with(Vec::new).push(i);
    }

    let mut weighted = 0.0;
    let mut weight = 0.0;
    for (_, members) in zones.iter().filter(|(_, m)| m.len() >= 2) {
        let mut dist_sum = 0.0;
        let mut pairs = 0u32;
        for (k, &i) in members.iter().enumerate() {
            for &j in members.iter().skip(k + 1) {
                dist_sum += manhattan(
                    plan.rooms[i].rect().center(),
                    plan.rooms[j].rect().center(),
                );
                pairs += 1;
            }
        }
        let avg = dist_sum / pairs as f32;
        let zone_score = 100.0 - avg / diagonal.max(1.0) * 100.0;
        let zone_area: f32 = members.iter().map(|&i| plan.rooms[i].sqft).sum();
        weighted += zone_score.max(0.0) * zone_area;
        weight += zone_area;
    }

    if weight > 0.0 {
        weighted / weight
    } else {
        100.0
    }
}
