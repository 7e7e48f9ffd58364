// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Natural light metric

use crate::types::{PlacedPlan, RoomType, Zone};

/// Base daylight credit every considered room starts from
const BASE: f32 = 40.0;
/// Credit for touching any floor edge
const EXTERIOR_WALL_CREDIT: f32 = 25.0;
/// Credit per window, capped
const WINDOW_CREDIT: f32 = 12.0;
const WINDOW_CREDIT_CAP: f32 = 35.0;
/// Debits for starved rooms that wanted exterior access
const NO_EXTERIOR_DEBIT: f32 = 45.0;
const NO_WINDOW_DEBIT: f32 = 30.0;

/// Mean daylight score over rooms that can reasonably expect glazing
/// (exterior-zone rooms, garages and hallways are not considered)
pub fn natural_light(plan: &PlacedPlan) -> f32 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for room in plan.rooms.iter() {
        if room.zone == Zone::Exterior
            || room.room_type == RoomType::Garage
            || room.room_type == RoomType::Hallway
        {
            continue;
        }
        let windows = plan.windows_of(&room.id).count();
        let mut value = BASE;
        if room.has_exterior_wall() {
            value += EXTERIOR_WALL_CREDIT;
        }
        value += (WINDOW_CREDIT * windows as f32).min(WINDOW_CREDIT_CAP);
        if room.needs_exterior && !room.has_exterior_wall() {
            value -= NO_EXTERIOR_DEBIT;
        }
        if room.needs_exterior && windows == 0 {
            value -= NO_WINDOW_DEBIT;
        }
        sum += value;
        count += 1;
    }
    if count > 0 {
        sum / count as f32
    } else {
        50.0
    }
}
