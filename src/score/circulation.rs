// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Circulation quality and privacy gradient metrics

use crate::geometry::manhattan;
use crate::types::{PlacedPlan, RoomType, Zone};

/// Base when a BFS from the entry reaches every room
const CONNECTED_BASE: f32 = 82.0;
/// Base otherwise
const DISCONNECTED_BASE: f32 = 35.0;
/// Debit per dead-end room
const DEAD_END_DEBIT: f32 = 4.0;
/// Debit per percent point away from the ideal hallway share
const HALLWAY_SHARE_DEBIT: f32 = 1.8;
/// Ideal hallway share of the placed area (%)
const IDEAL_HALLWAY_PERCENT: f32 = 12.0;
/// Credit for a main path at least this long
const LONG_PATH_ROOMS: usize = 4;
const LONG_PATH_CREDIT: f32 = 8.0;

/// Connectivity quality of the plan
pub fn circulation_quality(plan: &PlacedPlan) -> f32 {
    let circ = match plan.circulation.as_ref() {
        Some(c) => c,
        None => return DISCONNECTED_BASE,
    };
    let mut score = if circ.is_fully_connected {
        CONNECTED_BASE
    } else {
        DISCONNECTED_BASE
    };
    score -= DEAD_END_DEBIT * circ.dead_ends.len() as f32;
    score -= HALLWAY_SHARE_DEBIT * (circ.hallway_percent - IDEAL_HALLWAY_PERCENT).abs();
    if circ.main_path.len() >= LONG_PATH_ROOMS {
        score += LONG_PATH_CREDIT;
    }
    score
}

/// Neighbor kinds that cost a private room its quiet
const NOISY_NEIGHBORS: [RoomType; 4] = [
    RoomType::Garage,
    RoomType::Kitchen,
    RoomType::Family,
    RoomType::Living,
];

/// How much deeper private rooms sit than social rooms, measured from the
/// entry, with a debit for private rooms touching noisy neighbors
///
/// Returns 70 when the plan has no social or no private rooms.
pub fn privacy_gradient(plan: &PlacedPlan, diagonal: f32) -> f32 {
    let entry_center = plan
        .circulation
        .as_ref()
        .and_then(|c| plan.room(&c.entry_room_id))
        .map(|r| r.rect().center());
    let entry_center = match entry_center {
        Some(c) => c,
        None => return 70.0,
    };

    let avg_dist = |zone: Zone| -> Option<f32> {
        let dists: Vec<f32> = plan
            .rooms
            .iter()
            .filter(|r| r.zone == zone)
            .map(|r| manhattan(r.rect().center(), entry_center))
            .collect();
        if dists.is_empty() {
            None
        } else {
            Some(dists.iter().sum::<f32>() / dists.len() as f32)
        }
    };

    let (social, private) = match (avg_dist(Zone::Social), avg_dist(Zone::Private)) {
        (Some(s), Some(p)) => (s, p),
        _ => return 70.0,
    };

    let mut score = 65.0 + 60.0 * ((private - social) / diagonal.max(1.0));

    for room in plan.rooms.iter().filter(|r| r.zone == Zone::Private) {
        for neighbor_id in room.neighbors.iter() {
            if let Some(neighbor) = plan.room(neighbor_id) {
                if neighbor.zone != Zone::Private
                    && NOISY_NEIGHBORS.contains(&neighbor.room_type)
                {
                    score -= 6.0;
                }
            }
        }
    }
    score
}
