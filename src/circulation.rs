// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Circulation repair: make every room reachable from the entry
//!
//! Builds the adjacency graph over placed rooms, bridges disconnected
//! components with thin hallway rooms on free grid cells, and derives the
//! door set from the final breadth-first spanning tree. Cross-floor
//! connectivity exists only through stairwell continuity (stairs rooms on
//! consecutive floors); the repair loop never bridges floors.

use std::collections::{HashSet, VecDeque};

use log::{debug, info, warn};

use crate::geometry::{manhattan, Rect};
use crate::placement::{exterior_dirs, link_neighbors, OccupancyGrid};
use crate::tables::{defaults_for, is_open_concept};
use crate::types::{
    CirculationResult, Direction, Door, DoorType, PlacedPlan, PlacedRoom, RoomType, Warning,
    WarningLevel, Zone,
};

/// Repair iteration budget
const MAX_REPAIR_ITERATIONS: usize = 8;
/// Corridor width (ft)
const CORRIDOR_WIDTH: f32 = 3.0;
/// Shortest corridor inserted (ft)
const CORRIDOR_MIN_LENGTH: f32 = 6.0;
/// Standard interior door clear width (ft)
const DOOR_WIDTH: f32 = 3.0;
/// Pocket door clear width for small private rooms (ft)
const POCKET_DOOR_WIDTH: f32 = 2.5;

/// Verify reachability from the entry and insert hallways until connected
///
/// Replaces the plan's door list wholesale, so running the stage twice is
/// structurally idempotent.
pub fn ensure_circulation(mut plan: PlacedPlan) -> PlacedPlan {
    if plan.rooms.is_empty() {
        return plan;
    }

    let entry_idx = pick_entry(&plan.rooms);
    let entry_id = plan.rooms[entry_idx].id.clone();
    let mut inserted = 0u32;

    for iteration in 0..MAX_REPAIR_ITERATIONS {
        let graph = adjacency_graph(&plan.rooms);
        let entry_component = component_of(&graph, index_of(&plan.rooms, &entry_id));
        if entry_component.len() == plan.rooms.len() {
            break;
        }

        let outside: Vec<usize> = (0..plan.rooms.len())
            .filter(|i| !entry_component.contains(i))
            .collect();

        match closest_same_floor_pair(&plan.rooms, &entry_component, &outside) {
            Some((a, b)) => {
                debug!(
                    "Repair {}: bridging {} and {}",
                    iteration, plan.rooms[a].id, plan.rooms[b].id
                );
                if !insert_corridor(&mut plan, a, b) {
                    push_warning(
                        &mut plan.meta.warnings,
                        "No free cells for a connecting hallway; plan left disconnected",
                    );
                    break;
                }
                inserted += 1;
            }
            None => {
                // the disconnected rooms live on another floor with no
                // stairwell continuity: nothing a hallway can fix
                push_warning(
                    &mut plan.meta.warnings,
                    "Disconnected rooms on different floors (floor mismatch); a hallway cannot bridge floors",
                );
                break;
            }
        }
    }

    if inserted as usize >= MAX_REPAIR_ITERATIONS {
        let graph = adjacency_graph(&plan.rooms);
        let entry_component = component_of(&graph, index_of(&plan.rooms, &entry_id));
        if entry_component.len() < plan.rooms.len() {
            push_warning(
                &mut plan.meta.warnings,
                "Circulation repair budget exhausted; plan left disconnected",
            );
        }
    }

    finish(&mut plan, &entry_id, inserted);
    plan
}

/// Entry room: first foyer, else first living room, else first social room,
/// else the first room
fn pick_entry(rooms: &[PlacedRoom]) -> usize {
    rooms
        .iter()
        .position(|r| r.room_type == RoomType::Foyer)
        .or_else(|| rooms.iter().position(|r| r.room_type == RoomType::Living))
        .or_else(|| rooms.iter().position(|r| r.zone == Zone::Social))
        .unwrap_or(0)
}

fn index_of(rooms: &[PlacedRoom], id: &str) -> usize {
    rooms.iter().position(|r| r.id == id).unwrap_or(0)
}

/// Adjacency graph over room indices: same-floor edge sharing plus stairwell
/// continuity between stairs rooms on consecutive floors
fn adjacency_graph(rooms: &[PlacedRoom]) -> Vec<Vec<usize>> {
    let n = rooms.len();
    let mut graph = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            let connected = if rooms[i].floor == rooms[j].floor {
                rooms[i].rect().shares_edge(&rooms[j].rect()).is_some()
            } else {
                rooms[i].room_type == RoomType::Stairs
                    && rooms[j].room_type == RoomType::Stairs
                    && (i16::from(rooms[i].floor) - i16::from(rooms[j].floor)).abs() == 1
            };
            if connected {
                graph[i].push(j);
                graph[j].push(i);
            }
        }
    }
    graph
}

/// Connected component containing `start`
fn component_of(graph: &[Vec<usize>], start: usize) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(i) = queue.pop_front() {
        for &j in graph[i].iter() {
            if seen.insert(j) {
                queue.push_back(j);
            }
        }
    }
    seen
}

/// The (inside, outside) pair on the same floor with the smallest
/// centroid-to-centroid Manhattan distance
fn closest_same_floor_pair(
    rooms: &[PlacedRoom],
    inside: &HashSet<usize>,
    outside: &[usize],
) -> Option<(usize, usize)> {
    // scan in index order so distance ties break deterministically
    let mut inside: Vec<usize> = inside.iter().copied().collect();
    inside.sort_unstable();

    let mut best: Option<(usize, usize, f32)> = None;
    for &a in inside.iter() {
        for &b in outside.iter() {
            if rooms[a].floor != rooms[b].floor {
                continue;
            }
            let dist = manhattan(rooms[a].rect().center(), rooms[b].rect().center());
            match best {
                Some((_, _, d)) if d <= dist => {}
                _ => best = Some((a, b, dist)),
            }
        }
    }
    // deterministic tie-breaking: the scan order is index order
    best.map(|(a, b, _)| (a, b))
}

/// Insert a thin hallway room between rooms `a` and `b` on free grid cells
///
/// Returns false when no free thin rectangle exists near the midpoint, which
/// keeps the room-disjointness invariant intact at the cost of leaving the
/// plan disconnected.
fn insert_corridor(plan: &mut PlacedPlan, a: usize, b: usize) -> bool {
    let floor = plan.rooms[a].floor;
    let floor_rect = plan.envelope.floor_rect(floor);
    let grid = OccupancyGrid::from_rooms(&floor_rect, &plan.rooms, floor);

    let ac = plan.rooms[a].rect().center();
    let bc = plan.rooms[b].rect().center();
    let dx = bc.x - ac.x;
    let dy = bc.y - ac.y;

    // orient along the longer axis of the connecting vector
    let horizontal = dx.abs() >= dy.abs();
    let span = if horizontal { dx.abs() } else { dy.abs() };
    let full = span.round().max(CORRIDOR_MIN_LENGTH);
    let lengths = [full, (full * 0.75).round().max(CORRIDOR_MIN_LENGTH), CORRIDOR_MIN_LENGTH];

    for &len in lengths.iter() {
        let (w, d) = if horizontal {
            (len, CORRIDOR_WIDTH)
        } else {
            (CORRIDOR_WIDTH, len)
        };
        let desired_x = clampf(
            if horizontal { ac.x.min(bc.x) } else { (ac.x + bc.x) / 2.0 - w / 2.0 }.round(),
            floor_rect.x,
            floor_rect.right() - w,
        );
        let desired_y = clampf(
            if horizontal { (ac.y + bc.y) / 2.0 - d / 2.0 } else { ac.y.min(bc.y) }.round(),
            floor_rect.y,
            floor_rect.top() - d,
        );

        if let Some(rect) = nearest_free_rect(&grid, &floor_rect, w, d, desired_x, desired_y) {
            let ordinal = plan
                .rooms
                .iter()
                .filter(|r| r.room_type == RoomType::Hallway)
                .count()
                + 1;
            let id = format!("hallway-{}", ordinal);
            debug!(
                "Inserted {} at ({:.0}, {:.0}) {:.0}x{:.0}",
                id, rect.x, rect.y, rect.width, rect.depth
            );
            let defaults = defaults_for(RoomType::Hallway);
            plan.rooms.push(PlacedRoom {
                id,
                room_type: RoomType::Hallway,
                label: "hallway".to_string(),
                zone: Zone::Circulation,
                floor,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                depth: rect.depth,
                sqft: rect.area(),
                rotated: false,
                target_sqft: rect.area(),
                priority: defaults.base_priority,
                needs_exterior: false,
                needs_plumbing: false,
                exterior_walls: exterior_dirs(&rect, &floor_rect),
                adjacent_to: Vec::new(),
                away_from: Vec::new(),
                neighbors: Vec::new(),
            });
            return true;
        }
    }
    false
}

/// Free w×d rectangle closest to the desired position, if any
fn nearest_free_rect(
    grid: &OccupancyGrid,
    floor_rect: &Rect,
    w: f32,
    d: f32,
    desired_x: f32,
    desired_y: f32,
) -> Option<Rect> {
    let (gw, gd) = (w as usize, d as usize);
    if gw > grid.width || gd > grid.depth {
        return None;
    }
    let des_gx = (desired_x - floor_rect.x).max(0.0) as usize;
    let des_gy = (desired_y - floor_rect.y).max(0.0) as usize;

    let mut best: Option<(usize, usize, usize)> = None;
    for gy in 0..=(grid.depth - gd) {
        for gx in 0..=(grid.width - gw) {
            if !grid.fits(gx, gy, gw, gd) {
                continue;
            }
            let dist = gx.max(des_gx) - gx.min(des_gx) + gy.max(des_gy) - gy.min(des_gy);
            match best {
                Some((_, _, b)) if b <= dist => {}
                _ => best = Some((gx, gy, dist)),
            }
        }
    }
    best.map(|(gx, gy, _)| {
        Rect::new(
            floor_rect.x + gx as f32,
            floor_rect.y + gy as f32,
            w,
            d,
        )
    })
}

#[inline]
fn clampf(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi.max(lo))
}

/// Final pass: refresh neighbors, run the BFS analysis and regenerate doors
fn finish(plan: &mut PlacedPlan, entry_id: &str, inserted: u32) {
    link_neighbors(&mut plan.rooms);
    attach_stair_links(&mut plan.rooms);

    let graph = adjacency_graph(&plan.rooms);
    let entry = index_of(&plan.rooms, entry_id);
    let (parents, order, depths) = bfs_tree(&graph, entry);

    let visited = order.len();
    let is_fully_connected = visited == plan.rooms.len();

    // longest root-to-leaf path via parent traversal from the deepest node
    let main_path = deepest_path(&plan.rooms, &parents, &depths, entry);

    let dead_ends: Vec<String> = plan
        .rooms
        .iter()
        .enumerate()
        .filter(|(i, r)| graph[*i].len() <= 1 && r.room_type != RoomType::Porch)
        .map(|(_, r)| r.id.clone())
        .collect();

    let total_area: f32 = plan.rooms.iter().map(|r| r.sqft).sum();
    let hallway_area: f32 = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Hallway)
        .map(|r| r.sqft)
        .sum();
    let hallway_percent = if total_area > 0.0 {
        hallway_area / total_area * 100.0
    } else {
        0.0
    };

    plan.doors = generate_doors(&plan.rooms, entry, &parents, &order);

    if !is_fully_connected {
        warn!(
            "Plan {} disconnected: {}/{} rooms reachable from {}",
            plan.id,
            visited,
            plan.rooms.len(),
            entry_id
        );
    }
    info!(
        "Circulation: connected={}, {} doors, {} inserted hallways, {:.1}% hallway area, {} dead ends",
        is_fully_connected,
        plan.doors.len(),
        inserted,
        hallway_percent,
        dead_ends.len()
    );

    plan.circulation = Some(CirculationResult {
        entry_room_id: entry_id.to_string(),
        is_fully_connected,
        main_path,
        dead_ends,
        hallway_percent,
        inserted_hallways: inserted,
    });
}

/// Merge stairwell continuity into the per-room neighbor lists
fn attach_stair_links(rooms: &mut [PlacedRoom]) {
    let stairs: Vec<(usize, u8, String)> = rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.room_type == RoomType::Stairs)
        .map(|(i, r)| (i, r.floor, r.id.clone()))
        .collect();
    for (i, floor, _) in stairs.iter() {
        for (j, other_floor, other_id) in stairs.iter() {
            if i != j && (i16::from(*floor) - i16::from(*other_floor)).abs() == 1 {
                if !rooms[*i].neighbors.contains(other_id) {
                    rooms[*i].neighbors.push(other_id.clone());
                    rooms[*i].neighbors.sort();
                }
            }
        }
    }
}

/// Breadth-first tree from the entry: parents, visit order and depths
fn bfs_tree(graph: &[Vec<usize>], entry: usize) -> (Vec<Option<usize>>, Vec<usize>, Vec<usize>) {
    let n = graph.len();
    let mut parents: Vec<Option<usize>> = vec![None; n];
    let mut depths = vec![0usize; n];
    let mut seen = vec![false; n];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    seen[entry] = true;
    queue.push_back(entry);
    while let Some(i) = queue.pop_front() {
        order.push(i);
        let mut neighbors = graph[i].clone();
        neighbors.sort_unstable();
        for j in neighbors {
            if !seen[j] {
                seen[j] = true;
                parents[j] = Some(i);
                depths[j] = depths[i] + 1;
                queue.push_back(j);
            }
        }
    }
    (parents, order, depths)
}

fn deepest_path(
    rooms: &[PlacedRoom],
    parents: &[Option<usize>],
    depths: &[usize],
    entry: usize,
) -> Vec<String> {
    let deepest = depths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i == entry || parents[*i].is_some())
        .max_by_key(|(i, d)| (**d, std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
        .unwrap_or(entry);
    let mut path = vec![deepest];
    let mut cursor = deepest;
    while let Some(p) = parents[cursor] {
        path.push(p);
        cursor = p;
    }
    path.reverse();
    path.into_iter().map(|i| rooms[i].id.clone()).collect()
}

/// Derive the full door set from the spanning tree: one interior door per
/// tree edge (open-concept pairs connect without one) plus the single
/// exterior door at the entry
fn generate_doors(
    rooms: &[PlacedRoom],
    entry: usize,
    parents: &[Option<usize>],
    order: &[usize],
) -> Vec<Door> {
    let mut doors = Vec::new();

    doors.push(exterior_door(&rooms[entry]));

    let mut n = 0usize;
    for &i in order.iter() {
        let parent = match parents[i] {
            Some(p) => p,
            None => continue,
        };
        let (a, b) = (&rooms[parent], &rooms[i]);
        if a.floor != b.floor {
            // stairwell continuity needs no door
            continue;
        }
        if is_open_concept(a.room_type, b.room_type) {
            continue;
        }
        let edge = match a.rect().shares_edge(&b.rect()) {
            Some(e) => e,
            None => continue,
        };
        n += 1;
        let (door_type, width) = door_style(b.room_type);
        let width = width.min((edge.overlap - 0.5).max(1.5));
        doors.push(Door {
            id: format!("door-{}", n),
            wall_id: format!("sw-{}-{}", a.id, b.id),
            position: edge.start + edge.overlap / 2.0,
            width,
            door_type,
            connects: [a.id.clone(), b.id.clone()],
        });
    }
    doors
}

/// Door leaf and width by destination room kind
fn door_style(room_type: RoomType) -> (DoorType, f32) {
    match room_type {
        RoomType::Closet | RoomType::WalkInCloset | RoomType::Pantry | RoomType::HalfBath => {
            (DoorType::Pocket, POCKET_DOOR_WIDTH)
        }
        RoomType::Porch => (DoorType::Sliding, DOOR_WIDTH),
        _ => (DoorType::Standard, DOOR_WIDTH),
    }
}

/// The one exterior door, on an exterior wall of the entry room
fn exterior_door(entry: &PlacedRoom) -> Door {
    let dir = entry
        .exterior_walls
        .iter()
        .copied()
        .find(|d| *d == Direction::South)
        .or_else(|| entry.exterior_walls.first().copied())
        .unwrap_or(Direction::South);
    Door {
        id: "door-entry".to_string(),
        wall_id: format!("{}-wall-{}", entry.id, dir),
        position: entry.wall_length(dir) / 2.0,
        width: DOOR_WIDTH,
        door_type: DoorType::Exterior,
        connects: [entry.id.clone(), entry.id.clone()],
    }
}

fn push_warning(warnings: &mut Vec<Warning>, msg: &str) {
    if !warnings.iter().any(|w| w.msg == msg) {
        warnings.push(Warning::new(WarningLevel::WARNING, None, msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::placement::place_rooms;
    use crate::types::{
        DesignBrief, PlacementOptions, RoomRequirement, ZoningOptions,
    };
    use crate::zoning::assign_zones;

    fn run_pipeline(brief: &DesignBrief) -> PlacedPlan {
        let nb = normalize(brief);
        let env = compute_envelope(&nb);
        let zoned = assign_zones(&nb, &env, &ZoningOptions::default());
        ensure_circulation(place_rooms(&zoned, &env, &PlacementOptions::default()))
    }

    fn simple_brief() -> DesignBrief {
        DesignBrief {
            target_sqft: 1400.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::Dining, 145.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
            ],
            lot: None,
        }
    }

    #[test]
    fn bfs_reaches_every_room_when_connected() {
        let plan = run_pipeline(&simple_brief());
        let circ = plan.circulation.as_ref().unwrap();
        if circ.is_fully_connected {
            let graph = adjacency_graph(&plan.rooms);
            let entry = index_of(&plan.rooms, &circ.entry_room_id);
            assert_eq!(component_of(&graph, entry).len(), plan.rooms.len());
        }
    }

    #[test]
    fn exactly_one_exterior_door() {
        let plan = run_pipeline(&simple_brief());
        let exterior = plan
            .doors
            .iter()
            .filter(|d| d.door_type == DoorType::Exterior)
            .count();
        assert_eq!(exterior, 1);
    }

    #[test]
    fn interior_doors_connect_adjacent_rooms() {
        let plan = run_pipeline(&simple_brief());
        for door in plan.doors.iter() {
            if door.door_type == DoorType::Exterior {
                continue;
            }
            let [a, b] = &door.connects;
            assert!(plan.are_neighbors(a, b), "door {} spans non-neighbors", door.id);
        }
    }

    #[test]
    fn idempotent_repair() {
        let plan = run_pipeline(&simple_brief());
        let rooms_before = plan.rooms.len();
        let doors_before: Vec<String> = plan.doors.iter().map(|d| d.id.clone()).collect();
        let again = ensure_circulation(plan);
        assert_eq!(again.rooms.len(), rooms_before);
        let doors_after: Vec<String> = again.doors.iter().map(|d| d.id.clone()).collect();
        assert_eq!(doors_before, doors_after);
    }
}
