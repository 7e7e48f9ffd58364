// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Window assignment: derive window placements from exterior walls and room
//! kind
//!
//! Rooms with a prescribed window config use it; the rest get a count from
//! area buckets. Windows are spread across the room's exterior walls, longest
//! wall first. The stage replaces the window list wholesale.

use log::{info, warn};

use crate::tables::{defaults_for, WindowConfig};
use crate::types::{
    Direction, PlacedPlan, PlacedRoom, RoomType, Warning, WarningLevel, WindowPlacement,
    WindowType, Zone,
};

/// Area buckets for the inferred window count (ft²)
const AREA_BUCKETS: (f32, f32) = (140.0, 260.0);
/// Social glazing unit (width × height, sill) (ft)
const SOCIAL_UNIT: (f32, f32, f32) = (4.0, 5.0, 2.5);
/// Private glazing unit (width × height, sill) (ft)
const PRIVATE_UNIT: (f32, f32, f32) = (3.0, 4.0, 3.0);
/// Window width bounds on a wall of length L: [1.5, L − 2] (ft)
const MIN_WINDOW_WIDTH: f32 = 1.5;
const WALL_END_CLEARANCE: f32 = 2.0;
/// Area thresholds for picture and bay units in social rooms (ft²)
const PICTURE_AREA: f32 = 220.0;
const BAY_AREA: f32 = 160.0;

/// Assign windows to every room of the plan
pub fn assign_windows(mut plan: PlacedPlan) -> PlacedPlan {
    let mut windows: Vec<WindowPlacement> = Vec::new();
    let mut warnings: Vec<Warning> = Vec::new();

    for room in plan.rooms.iter() {
        if room.zone == Zone::Exterior
            || room.room_type == RoomType::Garage
            || room.room_type == RoomType::Hallway
        {
            continue;
        }

        let config = match window_config(room) {
            Some(cfg) if cfg.count > 0 => cfg,
            Some(_) => continue,
            None => continue,
        };

        if room.exterior_walls.is_empty() {
            if room.needs_exterior {
                warn!("{} requires exterior access but has no exterior walls", room.id);
                warnings.push(Warning::new(
                    WarningLevel::WARNING,
                    Some(room.id.clone()),
                    format!(
                        "{} requires exterior access but has no exterior walls; no window assigned",
                        room.id
                    ),
                ));
            }
            continue;
        }

        windows.extend(room_windows(room, &config));
    }

    info!("Assigned {} windows", windows.len());

    for w in warnings {
        if !plan.meta.warnings.iter().any(|p| p.msg == w.msg) {
            plan.meta.warnings.push(w);
        }
    }
    plan.windows = windows;
    plan
}

/// Window prescription of a room: the per-type table or the area inference
fn window_config(room: &PlacedRoom) -> Option<WindowConfig> {
    if let Some(cfg) = defaults_for(room.room_type).windows {
        return Some(cfg);
    }
    let social = room.zone == Zone::Social;
    let base = if room.sqft < AREA_BUCKETS.0 {
        1
    } else if room.sqft < AREA_BUCKETS.1 {
        2
    } else {
        3
    };
    let count = base + if social { 1 } else { 0 };
    let (width, height, sill) = if social { SOCIAL_UNIT } else { PRIVATE_UNIT };
    Some(WindowConfig {
        count,
        width,
        height,
        sill,
    })
}

/// Spread the prescribed windows over the room's exterior walls, longest
/// first, and position them evenly along each wall
fn room_windows(room: &PlacedRoom, config: &WindowConfig) -> Vec<WindowPlacement> {
    let mut walls: Vec<Direction> = room.exterior_walls.clone();
    walls.sort_by(|a, b| {
        room.wall_length(*b)
            .partial_cmp(&room.wall_length(*a))
            .unwrap()
            .then(a.cmp(b))
    });

    // cycle the units across the walls
    let mut per_wall: Vec<(Direction, u8)> = walls.iter().map(|d| (*d, 0u8)).collect();
    for i in 0..config.count {
        let slot = (i as usize) % per_wall.len();
        per_wall[slot].1 += 1;
    }

    let window_type = window_type_for(room);
    let mut out = Vec::new();
    let mut ordinal = 0u8;
    for (dir, n) in per_wall.into_iter().filter(|(_, n)| *n > 0) {
        let wall_len = room.wall_length(dir);
        let width = config
            .width
            .min((wall_len - WALL_END_CLEARANCE).max(MIN_WINDOW_WIDTH))
            .max(MIN_WINDOW_WIDTH);
        for i in 0..n {
            ordinal += 1;
            out.push(WindowPlacement {
                id: format!("{}-win-{}", room.id, ordinal),
                wall_id: format!("{}-wall-{}", room.id, dir),
                room_id: room.id.clone(),
                position: wall_len / f32::from(n + 1) * f32::from(i + 1),
                width,
                height: config.height,
                sill_height: config.sill,
                window_type,
                floor: room.floor,
                direction: dir,
            });
        }
    }
    out
}

/// Glazing type by room kind and size
fn window_type_for(room: &PlacedRoom) -> WindowType {
    if room.room_type.is_bath() {
        WindowType::Clerestory
    } else if room.zone == Zone::Social && room.sqft >= PICTURE_AREA {
        WindowType::Picture
    } else if room.zone == Zone::Social && room.sqft >= BAY_AREA {
        WindowType::Bay
    } else {
        WindowType::Standard
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
        DesignBrief, PlacementOptions, RoomRequirement, ZoningOptions,
    };
    use crate::zoning::assign_zones;

    fn plan_with_windows() -> PlacedPlan {
        let nb = normalize(&DesignBrief {
            target_sqft: 1500.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
                RoomRequirement::with_target(RoomType::Garage, 420.0),
            ],
            lot: None,
        });
        let env = compute_envelope(&nb);
        let zoned = assign_zones(&nb, &env, &ZoningOptions::default());
        assign_windows(ensure_circulation(place_rooms(
            &zoned,
            &env,
            &PlacementOptions::default(),
        )))
    }

    #[test]
    fn windows_sit_on_exterior_walls() {
        let plan = plan_with_windows();
        assert!(!plan.windows.is_empty());
        for w in plan.windows.iter() {
            let room = plan.room(&w.room_id).expect("owner exists");
            assert!(
                room.exterior_walls.contains(&w.direction),
                "window {} on a non-exterior wall",
                w.id
            );
            let wall_len = room.wall_length(w.direction);
            assert!(w.position > 0.0 && w.position < wall_len);
        }
    }

    #[test]
    fn garages_and_hallways_get_no_windows() {
        let plan = plan_with_windows();
        for w in plan.windows.iter() {
            let room = plan.room(&w.room_id).unwrap();
            assert!(room.room_type != RoomType::Garage);
            assert!(room.room_type != RoomType::Hallway);
        }
    }

    #[test]
    fn bathroom_windows_are_clerestory() {
        let plan = plan_with_windows();
        for w in plan.windows.iter() {
            let room = plan.room(&w.room_id).unwrap();
            if room.room_type.is_bath() {
                assert_eq!(w.window_type, WindowType::Clerestory);
            }
        }
    }

    #[test]
    fn reassignment_is_not_cumulative() {
        let plan = plan_with_windows();
        let count = plan.windows.len();
        let ids: Vec<String> = plan.windows.iter().map(|w| w.id.clone()).collect();
        let again = assign_windows(plan);
        assert_eq!(again.windows.len(), count);
        let ids_again: Vec<String> = again.windows.iter().map(|w| w.id.clone()).collect();
        assert_eq!(ids, ids_again);
    }
}
