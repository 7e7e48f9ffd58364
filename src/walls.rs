// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Wall analysis: per-room edge walls, shared segments, wet walls and
//! plumbing groupings

use std::collections::{HashSet, VecDeque};

use log::info;

use crate::types::{
    Direction, Id, PlacedPlan, SharedWall, Wall, WallAnalysis, EXTERIOR_WALL_THICKNESS,
    INTERIOR_WALL_THICKNESS,
};

/// Derive the complete wall takeoff of a placed plan
pub fn analyze_walls(plan: &PlacedPlan) -> WallAnalysis {
    let mut walls = Vec::with_capacity(plan.rooms.len() * 4);
    for room in plan.rooms.iter() {
        for &dir in Direction::ALL.iter() {
            let is_exterior = room.exterior_walls.contains(&dir);
            walls.push(Wall {
                id: format!("{}-wall-{}", room.id, dir),
                room_id: room.id.clone(),
                direction: dir,
                length: room.wall_length(dir),
                thickness: if is_exterior {
                    EXTERIOR_WALL_THICKNESS
                } else {
                    INTERIOR_WALL_THICKNESS
                },
                is_exterior,
                load_bearing: is_exterior,
                floor: room.floor,
            });
        }
    }

    let mut shared_walls = Vec::new();
    for (i, a) in plan.rooms.iter().enumerate() {
        for b in plan.rooms.iter().skip(i + 1) {
            if a.floor != b.floor {
                continue;
            }
            if let Some(edge) = a.rect().shares_edge(&b.rect()) {
                shared_walls.push(SharedWall {
                    rooms: [a.id.clone(), b.id.clone()],
                    overlap: edge.overlap,
                    orientation: edge.orientation,
                    floor: a.floor,
                    is_wet: a.needs_plumbing && b.needs_plumbing,
                });
            }
        }
    }

    let wet_walls: Vec<SharedWall> = shared_walls.iter().filter(|w| w.is_wet).cloned().collect();

    let exterior_length: f32 = walls.iter().filter(|w| w.is_exterior).map(|w| w.length).sum();
    let interior_length: f32 = shared_walls.iter().map(|w| w.overlap).sum();

    let plumbing_groups = plumbing_groups(plan, &wet_walls);

    info!(
        "Walls: {:.0} ft exterior, {:.0} ft shared interior, {} wet segments, {} plumbing groups",
        exterior_length,
        interior_length,
        wet_walls.len(),
        plumbing_groups.len()
    );

    WallAnalysis {
        walls,
        shared_walls,
        wet_walls,
        exterior_length,
        interior_length,
        plumbing_groups,
    }
}

/// Connected components of the plumbing-room graph induced by wet walls;
/// isolated plumbing rooms are singleton groups
fn plumbing_groups(plan: &PlacedPlan, wet_walls: &[SharedWall]) -> Vec<Vec<Id>> {
    let plumbing: Vec<&str> = plan
        .rooms
        .iter()
        .filter(|r| r.needs_plumbing)
        .map(|r| r.id.as_str())
        .collect();
    let plumbing_set: HashSet<&str> = plumbing.iter().copied().collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();
    for &start in plumbing.iter() {
        if seen.contains(start) {
            continue;
        }
        let mut group = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);
        while let Some(id) = queue.pop_front() {
            group.push(id.to_string());
            for wall in wet_walls.iter() {
                let other = if wall.rooms[0] == id {
                    wall.rooms[1].as_str()
                } else if wall.rooms[1] == id {
                    wall.rooms[0].as_str()
                } else {
                    continue;
                };
                if plumbing_set.contains(other) && seen.insert(other) {
                    queue.push_back(other);
                }
            }
        }
        group.sort();
        groups.push(group);
    }
    groups
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
    use crate::zoning::assign_zones;

    fn analyzed() -> (PlacedPlan, WallAnalysis) {
        let nb = normalize(&DesignBrief {
            target_sqft: 1500.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::PrimaryBath, 95.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
                RoomRequirement::with_target(RoomType::Laundry, 50.0),
            ],
            lot: None,
        });
        let env = compute_envelope(&nb);
        let zoned = assign_zones(&nb, &env, &ZoningOptions::default());
        let plan = ensure_circulation(place_rooms(&zoned, &env, &PlacementOptions::default()));
        let analysis = analyze_walls(&plan);
        (plan, analysis)
    }

    #[test]
    fn four_walls_per_room() {
        let (plan, analysis) = analyzed();
        assert_eq!(analysis.walls.len(), plan.rooms.len() * 4);
        for wall in analysis.walls.iter() {
            assert_eq!(wall.load_bearing, wall.is_exterior);
            assert!(wall.length > 0.0);
        }
    }

    #[test]
    fn wet_walls_need_plumbing_on_both_sides() {
        let (plan, analysis) = analyzed();
        for wet in analysis.wet_walls.iter() {
            for id in wet.rooms.iter() {
                assert!(plan.room(id).unwrap().needs_plumbing, "{} not a plumbing room", id);
            }
        }
    }

    #[test]
    fn every_plumbing_room_is_grouped_once() {
        let (plan, analysis) = analyzed();
        let plumbing_count = plan.rooms.iter().filter(|r| r.needs_plumbing).count();
        let grouped: usize = analysis.plumbing_groups.iter().map(|g| g.len()).sum();
        assert_eq!(plumbing_count, grouped);
    }
}
