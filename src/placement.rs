// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Greedy grid placement: assign axis-aligned rectangles to rooms
//!
//! One boolean occupancy grid per floor at 1 ft resolution. Rooms are placed
//! one by one in the configured order; each candidate rectangle and position
//! is scored against the zone anchors, the floor edges and the already placed
//! rooms, and the best scoring fit wins. Rooms that fit nowhere are reported
//! in `unplaced_room_ids`, never fatal.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::geometry::{manhattan, Point2, Rect};
use crate::types::{
    BuildingEnvelope, Direction, NormalizedRoom, PlacedPlan, PlacedRoom, PlacementOptions,
    PlacementOrder, StrategyMeta, Warning, WarningLevel,
};
use crate::utils::uuid_from_obj;
use crate::zoning::ZonedPlan;

/// Candidate area scales tried for every room, largest first
const AREA_SCALES: [f32; 6] = [1.0, 0.95, 0.90, 0.85, 0.80, 0.75];

/// Zone anchor affinity: base score and per-foot falloff
const ANCHOR_BASE: f32 = 220.0;
const ANCHOR_FALLOFF: f32 = 8.0;
/// Exterior wall satisfaction / starvation
const EXTERIOR_BONUS: f32 = 260.0;
const EXTERIOR_PENALTY: f32 = -400.0;
const EDGE_TOUCH_BONUS: f32 = 8.0;
/// Adjacency terms
const ADJACENT_TOUCH_BONUS: f32 = 140.0;
const UNREQUESTED_TOUCH_BONUS: f32 = 12.0;
const ANTI_TOUCH_PENALTY: f32 = 180.0;
const SAME_ZONE_BASE: f32 = 30.0;
/// Area deviation penalty weight
const AREA_DEVIATION_WEIGHT: f32 = 60.0;

/// Boolean occupancy grid of one floor, row major
pub(crate) struct OccupancyGrid {
    pub(crate) width: usize,
    pub(crate) depth: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub(crate) fn new(rect: &Rect) -> Self {
        let width = rect.width.round().max(1.0) as usize;
        let depth = rect.depth.round().max(1.0) as usize;
        OccupancyGrid {
            width,
            depth,
            cells: vec![false; width * depth],
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Grid already loaded with the footprints of the given rooms
    pub(crate) fn from_rooms(rect: &Rect, rooms: &[PlacedRoom], floor: u8) -> Self {
        let mut grid = Self::new(rect);
        for room in rooms.iter().filter(|r| r.floor == floor) {
            let gx = (room.x - rect.x).max(0.0) as usize;
            let gy = (room.y - rect.y).max(0.0) as usize;
            let w = (room.width as usize).min(grid.width.saturating_sub(gx));
            let d = (room.depth as usize).min(grid.depth.saturating_sub(gy));
            grid.occupy(gx, gy, w, d);
        }
        grid
    }

    /// Whether a w×d rectangle at (x, y) is entirely on free cells
    pub(crate) fn fits(&self, x: usize, y: usize, w: usize, d: usize) -> bool {
        if x + w > self.width || y + d > self.depth {
            return false;
        }
        for yy in y..y + d {
            let row = yy * self.width;
            for xx in x..x + w {
                if self.cells[row + xx] {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn occupy(&mut self, x: usize, y: usize, w: usize, d: usize) {
        for yy in y..y + d {
            let row = yy * self.width;
            for xx in x..x + w {
                self.cells[row + xx] = true;
            }
        }
    }
}

/// Candidate room rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    width: f32,
    depth: f32,
    rotated: bool,
}

/// Place every room of the zoned plan onto the floor grids
pub fn place_rooms(
    zoned: &ZonedPlan,
    envelope: &BuildingEnvelope,
    options: &PlacementOptions,
) -> PlacedPlan {
    let mut grids: BTreeMap<u8, OccupancyGrid> = envelope
        .floor_rects
        .iter()
        .map(|(&floor, rect)| (floor, OccupancyGrid::new(rect)))
        .collect();

    let ordered = ordered_rooms(&zoned.brief.rooms, options.order);

    let mut placed: Vec<PlacedRoom> = Vec::with_capacity(ordered.len());
    let mut unplaced: Vec<String> = Vec::new();
    let mut warnings: Vec<Warning> = Vec::new();

    for room in ordered {
        let floor_rect = envelope.floor_rect(room.floor);
        let anchor = zoned.anchor(room.floor, room.zone, envelope);
        let grid = grids.get_mut(&room.floor).expect("floor grid");

        match best_placement(room, &floor_rect, anchor, grid, &placed, options.width_bias) {
            Some((gx, gy, cand, score)) => {
                grid.occupy(
                    gx,
                    gy,
                    cand.width as usize,
                    cand.depth as usize,
                );
                let rect = Rect::new(
                    floor_rect.x + gx as f32,
                    floor_rect.y + gy as f32,
                    cand.width,
                    cand.depth,
                );
                debug!(
                    "Placed {} at ({:.0}, {:.0}) {:.0}x{:.0}, score {:.0}",
                    room.id, rect.x, rect.y, rect.width, rect.depth, score
                );
                placed.push(to_placed_room(room, &rect, &floor_rect, cand.rotated));
            }
            None => {
                warn!("No position found for {}", room.id);
                warnings.push(Warning::new(
                    WarningLevel::WARNING,
                    Some(room.id.clone()),
                    format!("Could not place {} ({:.0} ft² target)", room.id, room.target_sqft),
                ));
                unplaced.push(room.id.clone());
            }
        }
    }

    link_neighbors(&mut placed);

    info!(
        "Placement ({} order, bias {:+.0}): {} placed, {} unplaced",
        options.order,
        options.width_bias,
        placed.len(),
        unplaced.len()
    );

    let id = uuid_from_obj(&(&zoned.brief.target_sqft, &zoned.options, options, placed.len()));
    PlacedPlan {
        id,
        brief: zoned.brief.clone(),
        envelope: envelope.clone(),
        rooms: placed,
        doors: Vec::new(),
        windows: Vec::new(),
        circulation: None,
        unplaced_room_ids: unplaced,
        meta: StrategyMeta {
            strategy: "base-greedy".to_string(),
            zoning: zoned.options,
            placement: *options,
            mirror_x: false,
            mirror_y: false,
            warnings,
        },
    }
}

/// Rooms in the order the greedy placer consumes them
fn ordered_rooms(rooms: &[NormalizedRoom], order: PlacementOrder) -> Vec<&NormalizedRoom> {
    let mut out: Vec<&NormalizedRoom> = rooms.iter().collect();
    match order {
        PlacementOrder::Default => {
            out.sort_by(|a, b| b.target_sqft.partial_cmp(&a.target_sqft).unwrap());
        }
        PlacementOrder::Zone => {
            out.sort_by(|a, b| {
                a.zone
                    .placement_rank()
                    .cmp(&b.zone.placement_rank())
                    .then(b.target_sqft.partial_cmp(&a.target_sqft).unwrap())
            });
        }
        PlacementOrder::Priority => {
            out.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
        PlacementOrder::Reverse => {
            out.sort_by(|a, b| b.target_sqft.partial_cmp(&a.target_sqft).unwrap());
            out.reverse();
        }
    }
    out
}

/// Candidate dimensions for a room: the scale ladder, a width bias, the 90°
/// swaps and a minimum-size fallback
fn candidate_dims(room: &NormalizedRoom, width_bias: f32, grid: &OccupancyGrid) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::new();
    let mut push = |width: f32, depth: f32, rotated: bool| {
        if width < 1.0 || depth < 1.0 {
            return;
        }
        if width as usize > grid.width || depth as usize > grid.depth {
            return;
        }
        let cand = Candidate {
            width,
            depth,
            rotated,
        };
        if !out.contains(&cand) {
            out.push(cand);
        }
    };

    for &scale in AREA_SCALES.iter() {
        let area = (room.target_sqft * scale).round();
        if area < room.min_sqft {
            continue;
        }
        let width = ((room.width + width_bias) * scale).round().max(room.min_width);
        let depth = (area / width).ceil().max(1.0);
        push(width, depth, false);
        push(depth, width, true);
    }

    // last resort: the minimum rectangle the type accepts
    let min_w = room.min_width.max(1.0);
    let min_d = (room.min_sqft / min_w).ceil().max(room.min_depth).max(1.0);
    push(min_w, min_d, false);
    push(min_d, min_w, true);

    out
}

/// Exhaustive scan for the best scoring free position over all candidates
fn best_placement(
    room: &NormalizedRoom,
    floor_rect: &Rect,
    anchor: Point2,
    grid: &OccupancyGrid,
    placed: &[PlacedRoom],
    width_bias: f32,
) -> Option<(usize, usize, Candidate, f32)> {
    let same_floor: Vec<&PlacedRoom> = placed.iter().filter(|p| p.floor == room.floor).collect();
    let mut best: Option<(usize, usize, Candidate, f32)> = None;

    for cand in candidate_dims(room, width_bias, grid) {
        let w = cand.width as usize;
        let d = cand.depth as usize;
        for gy in 0..=(grid.depth.saturating_sub(d)) {
            for gx in 0..=(grid.width.saturating_sub(w)) {
                if grid.at(gx, gy) || !grid.fits(gx, gy, w, d) {
                    continue;
                }
                let rect = Rect::new(
                    floor_rect.x + gx as f32,
                    floor_rect.y + gy as f32,
                    cand.width,
                    cand.depth,
                );
                let score = placement_score(room, &rect, floor_rect, anchor, &same_floor);
                match best {
                    Some((_, _, _, s)) if s >= score => {}
                    _ => best = Some((gx, gy, cand, score)),
                }
            }
        }
    }
    best
}

/// Score one candidate rectangle at one position
fn placement_score(
    room: &NormalizedRoom,
    rect: &Rect,
    floor_rect: &Rect,
    anchor: Point2,
    placed: &[&PlacedRoom],
) -> f32 {
    let center = rect.center();
    let mut score = (ANCHOR_BASE - manhattan(center, anchor) * ANCHOR_FALLOFF).max(0.0);

    let edges = exterior_dirs(rect, floor_rect);
    if room.needs_exterior {
        score += if edges.is_empty() {
            EXTERIOR_PENALTY
        } else {
            EXTERIOR_BONUS
        };
    } else {
        score += EDGE_TOUCH_BONUS * edges.len() as f32;
    }

    for p in placed {
        let p_rect = p.rect();
        let dist = manhattan(center, p_rect.center());
        let touching = rect.shares_edge(&p_rect).is_some();

        if room.adjacent_to.contains(&p.room_type) {
            score += if touching {
                ADJACENT_TOUCH_BONUS
            } else {
                (40.0 - dist * 3.0).max(0.0)
            };
        } else if touching {
            score += UNREQUESTED_TOUCH_BONUS;
        }

        if room.away_from.contains(&p.room_type) {
            score -= if touching {
                ANTI_TOUCH_PENALTY
            } else {
                (50.0 - dist * 4.0).max(0.0)
            };
        }

        if p.zone == room.zone {
            score += (SAME_ZONE_BASE - dist * 2.0).max(0.0);
        }
    }

    let area = rect.area();
    score -= AREA_DEVIATION_WEIGHT * (area - room.target_sqft).abs() / room.target_sqft;
    score
}

/// Floor edges a rectangle touches
pub(crate) fn exterior_dirs(rect: &Rect, floor_rect: &Rect) -> Vec<Direction> {
    let mut dirs = Vec::new();
    if rect.top() == floor_rect.top() {
        dirs.push(Direction::North);
    }
    if rect.y == floor_rect.y {
        dirs.push(Direction::South);
    }
    if rect.right() == floor_rect.right() {
        dirs.push(Direction::East);
    }
    if rect.x == floor_rect.x {
        dirs.push(Direction::West);
    }
    dirs
}

fn to_placed_room(
    room: &NormalizedRoom,
    rect: &Rect,
    floor_rect: &Rect,
    rotated: bool,
) -> PlacedRoom {
    PlacedRoom {
        id: room.id.clone(),
        room_type: room.room_type,
        label: room.label.clone(),
        zone: room.zone,
        floor: room.floor,
        x: rect.x,
        y: rect.y,
        width: rect.width,
        depth: rect.depth,
        sqft: rect.area(),
        rotated,
        target_sqft: room.target_sqft,
        priority: room.priority,
        needs_exterior: room.needs_exterior,
        needs_plumbing: room.needs_plumbing,
        exterior_walls: exterior_dirs(rect, floor_rect),
        adjacent_to: room.adjacent_to.clone(),
        away_from: room.away_from.clone(),
        neighbors: Vec::new(),
    }
}

/// Rebuild every room's neighbor list from pairwise edge sharing per floor
pub(crate) fn link_neighbors(rooms: &mut [PlacedRoom]) {
    let n = rooms.len();
    let mut adjacency: Vec<Vec<String>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if rooms[i].floor == rooms[j].floor
                && rooms[i].rect().shares_edge(&rooms[j].rect()).is_some()
            {
                adjacency[i].push(rooms[j].id.clone());
                adjacency[j].push(rooms[i].id.clone());
            }
        }
    }
    for (room, mut neighbors) in rooms.iter_mut().zip(adjacency.into_iter()) {
        neighbors.sort();
        room.neighbors = neighbors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::types::{DesignBrief, RoomRequirement, RoomType, ZoningOptions};
    use crate::zoning::assign_zones;

    fn placed_sample() -> PlacedPlan {
        let brief = normalize(&DesignBrief {
            target_sqft: 1600.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::Dining, 145.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Bedroom, 140.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
                RoomRequirement::with_target(RoomType::Laundry, 50.0),
            ],
            lot: None,
        });
        let env = compute_envelope(&brief);
        let zoned = assign_zones(&brief, &env, &ZoningOptions::default());
        place_rooms(&zoned, &env, &PlacementOptions::default())
    }

    #[test]
    fn rooms_stay_inside_and_disjoint() {
        let plan = placed_sample();
        for room in plan.rooms.iter() {
            let fr = plan.envelope.floor_rect(room.floor);
            assert!(fr.contains(&room.rect()), "{} escapes its floor", room.id);
        }
        for (i, a) in plan.rooms.iter().enumerate() {
            for b in plan.rooms.iter().skip(i + 1) {
                if a.floor == b.floor {
                    assert!(
                        !a.rect().overlaps(&b.rect()),
                        "{} overlaps {}",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn exterior_needs_are_honored() {
        let plan = placed_sample();
        // living rooms demand an exterior wall; with a fresh grid the placer
        // must be able to honor it
        let living = plan.room("living-1").expect("living placed");
        assert!(living.has_exterior_wall());
    }

    #[test]
    fn neighbor_links_are_mutual() {
        let plan = placed_sample();
        for room in plan.rooms.iter() {
            for n in room.neighbors.iter() {
                let other = plan.room(n).expect("neighbor exists");
                assert!(
                    other.neighbors.contains(&room.id),
                    "{} -> {} not mutual",
                    room.id,
                    n
                );
            }
        }
    }

    #[test]
    fn deterministic_output() {
        let a = placed_sample();
        let b = placed_sample();
        assert_eq!(a.as_json().unwrap(), b.as_json().unwrap());
    }
}
