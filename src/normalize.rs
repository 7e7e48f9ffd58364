// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Brief normalization: expand a design brief into a canonical room program
//!
//! Resolves defaults, injects the implicit rooms every dwelling needs (foyer,
//! hallway, closets, stairs), merges adjacency preferences and scales room
//! targets to the requested total. Never fails; impossible programs shrink to
//! their minimums and leave a warning behind.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::tables::{defaults_for, ANTI_ADJACENCY, HARD_ADJACENCY};
use crate::types::{
    DesignBrief, LotConstraints, NormalizedBrief, NormalizedRoom, RoomType, Warning, WarningLevel,
};

/// Smallest lot side accepted (ft)
const MIN_LOT_SIDE: f32 = 20.0;
/// Brief target area bounds (ft²)
const TARGET_SQFT_RANGE: (f32, f32) = (800.0, 5000.0);
/// Priority bump for injected entry rooms
const FOYER_PRIORITY_BOOST: i32 = 25;

/// Normalize a design brief into a canonical room program
pub fn normalize(brief: &DesignBrief) -> NormalizedBrief {
    let mut warnings = Vec::new();

    let lot = resolve_lot(brief, &mut warnings);
    let stories = resolve_stories(brief, &mut warnings);
    let target_sqft = resolve_target(brief, &mut warnings);

    // Per-type ordinals; injected rooms continue the numbering
    let mut ordinals: HashMap<RoomType, u32> = HashMap::new();
    let mut rooms: Vec<NormalizedRoom> = brief
        .rooms
        .iter()
        .map(|req| {
            let d = defaults_for(req.room_type);
            let min_sqft = req.min_sqft.unwrap_or(d.min_sqft).max(4.0);
            let target = req.target_sqft.unwrap_or(d.target_sqft).max(min_sqft);
            let (width, depth) = resolve_dims(target, d.min_width, d.min_depth);
            let ord = next_ordinal(&mut ordinals, req.room_type);
            NormalizedRoom {
                id: format!("{}-{}", req.room_type, ord),
                room_type: req.room_type,
                label: if req.label.is_empty() {
                    req.room_type.to_string()
                } else {
                    req.label.clone()
                },
                zone: d.zone,
                floor: req.floor.unwrap_or(1).max(1).min(stories),
                floor_pinned: req.floor.is_some(),
                min_sqft,
                target_sqft: target,
                width,
                depth,
                min_width: d.min_width.min(width),
                min_depth: d.min_depth.min(depth),
                priority: priority_of(d.base_priority, req.must_have, target),
                must_have: req.must_have,
                needs_exterior: req.needs_exterior.unwrap_or(d.needs_exterior),
                needs_plumbing: req.needs_plumbing.unwrap_or(d.needs_plumbing),
                adjacent_to: req.adjacent_to.clone(),
                away_from: req.away_from.clone(),
            }
        })
        .collect();

    merge_adjacency_tables(&mut rooms);
    inject_implicit_rooms(&mut rooms, &mut ordinals, stories);
    symmetrize_adjacency(&mut rooms);

    if stories == 1 {
        for room in rooms.iter_mut() {
            room.floor = 1;
        }
    }

    scale_to_target(&mut rooms, target_sqft, &mut warnings);

    info!(
        "Normalized brief: {} rooms ({} requested), target {:.0} ft², {} stories",
        rooms.len(),
        brief.rooms.len(),
        target_sqft,
        stories
    );

    NormalizedBrief {
        target_sqft,
        stories,
        style: brief.style,
        entry_facing: lot.entry_facing,
        lot,
        rooms,
        warnings,
    }
}

fn resolve_lot(brief: &DesignBrief, warnings: &mut Vec<Warning>) -> LotConstraints {
    let mut lot = brief.lot.unwrap_or_default();
    if lot.lot_width < MIN_LOT_SIDE || lot.lot_depth < MIN_LOT_SIDE {
        warnings.push(Warning::new(
            WarningLevel::WARNING,
            None,
            format!(
                "Lot {}x{} ft below the {} ft minimum side; clamped",
                lot.lot_width, lot.lot_depth, MIN_LOT_SIDE
            ),
        ));
    }
    lot.lot_width = lot.lot_width.max(MIN_LOT_SIDE).round();
    lot.lot_depth = lot.lot_depth.max(MIN_LOT_SIDE).round();
    lot.setback_front = lot.setback_front.max(0.0).round();
    lot.setback_side = lot.setback_side.max(0.0).round();
    lot.setback_rear = lot.setback_rear.max(0.0).round();
    lot
}

fn resolve_stories(brief: &DesignBrief, warnings: &mut Vec<Warning>) -> u8 {
    match brief.stories {
        1 | 2 => brief.stories,
        n => {
            warnings.push(Warning::new(
                WarningLevel::WARNING,
                None,
                format!("Story count {} unsupported; using 1", n),
            ));
            1
        }
    }
}

fn resolve_target(brief: &DesignBrief, warnings: &mut Vec<Warning>) -> f32 {
    let (lo, hi) = TARGET_SQFT_RANGE;
    if brief.target_sqft < lo || brief.target_sqft > hi {
        warnings.push(Warning::new(
            WarningLevel::WARNING,
            None,
            format!(
                "Target area {:.0} ft² outside [{:.0}, {:.0}]; clamped",
                brief.target_sqft, lo, hi
            ),
        ));
    }
    brief.target_sqft.max(lo).min(hi).round()
}

/// Resolve (width, depth) from a target area: width ≈ √area clamped to the
/// type minimum, depth covers the remainder
///
/// When the caller forces an area below what the type minimums can hold the
/// minimums yield, so tiny overrides still produce an honest rectangle.
fn resolve_dims(target_sqft: f32, min_width: f32, min_depth: f32) -> (f32, f32) {
    let side = target_sqft.sqrt();
    if min_width * min_depth > target_sqft {
        // a forced area below the type minimum rectangle: the minimums yield
        let width = side.floor().max(2.0);
        return (width, (target_sqft / width).ceil().max(2.0));
    }
    if min_depth > side {
        // deep room kinds (stairs): honor the depth minimum, derive the width
        let width = (target_sqft / min_depth).round().max(min_width).max(2.0);
        return (width, min_depth);
    }
    let width = side.round().max(min_width);
    let depth = (target_sqft / width).ceil().max(min_depth).max(2.0);
    (width, depth)
}

fn priority_of(base: i32, must_have: bool, target_sqft: f32) -> i32 {
    base + if must_have { 20 } else { 0 } + (target_sqft / 50.0).round() as i32
}

fn next_ordinal(ordinals: &mut HashMap<RoomType, u32>, room_type: RoomType) -> u32 {
    let n = ordinals.entry(room_type).or_insert(0);
    *n += 1;
    *n
}

/// Union the constant hard/anti tables into each room's preferences and drop
/// self references and adjacent/away intersections (away wins)
fn merge_adjacency_tables(rooms: &mut [NormalizedRoom]) {
    for room in rooms.iter_mut() {
        for &(a, b) in HARD_ADJACENCY.iter() {
            if a == room.room_type && !room.adjacent_to.contains(&b) {
                room.adjacent_to.push(b);
            }
            if b == room.room_type && !room.adjacent_to.contains(&a) {
                room.adjacent_to.push(a);
            }
        }
        for &(a, b, _) in ANTI_ADJACENCY.iter() {
            if a == room.room_type && !room.away_from.contains(&b) {
                room.away_from.push(b);
            }
            if b == room.room_type && !room.away_from.contains(&a) {
                room.away_from.push(a);
            }
        }
        let own_type = room.room_type;
        room.adjacent_to.retain(|t| *t != own_type);
        room.away_from.retain(|t| *t != own_type);
        let away = room.away_from.clone();
        room.adjacent_to.retain(|t| !away.contains(t));
        room.adjacent_to.sort();
        room.adjacent_to.dedup();
        room.away_from.sort();
        room.away_from.dedup();
    }
}

/// Inject the implicit rooms a complete dwelling needs when the brief omits
/// them: foyer, hallway, one walk-in closet per primary bedroom, stairs
fn inject_implicit_rooms(
    rooms: &mut Vec<NormalizedRoom>,
    ordinals: &mut HashMap<RoomType, u32>,
    stories: u8,
) {
    if !rooms.iter().any(|r| r.room_type == RoomType::Foyer) {
        debug!("Injecting implicit foyer");
        let mut foyer = implicit_room(RoomType::Foyer, ordinals);
        foyer.priority += FOYER_PRIORITY_BOOST;
        foyer.adjacent_to = vec![RoomType::Living, RoomType::Family, RoomType::GreatRoom];
        rooms.push(foyer);
    }

    if !rooms.iter().any(|r| r.room_type == RoomType::Hallway) {
        debug!("Injecting implicit hallway");
        let mut hallway = implicit_room(RoomType::Hallway, ordinals);
        hallway.adjacent_to = vec![RoomType::Foyer];
        rooms.push(hallway);
    }

    let primaries: Vec<(u8, bool)> = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::PrimaryBed)
        .map(|r| (r.floor, r.floor_pinned))
        .collect();
    let closets = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::WalkInCloset)
        .count();
    for &(floor, pinned) in primaries.iter().skip(closets) {
        debug!("Injecting walk-in closet for primary bedroom on floor {}", floor);
        let mut wic = implicit_room(RoomType::WalkInCloset, ordinals);
        wic.floor = floor;
        wic.floor_pinned = pinned;
        rooms.push(wic);
    }

    if stories == 2 && !rooms.iter().any(|r| r.room_type == RoomType::Stairs) {
        debug!("Injecting stairs for two-story program");
        let mut stairs = implicit_room(RoomType::Stairs, ordinals);
        stairs.floor = 1;
        stairs.floor_pinned = true;
        rooms.push(stairs);
    }
}

fn implicit_room(room_type: RoomType, ordinals: &mut HashMap<RoomType, u32>) -> NormalizedRoom {
    let d = defaults_for(room_type);
    let (width, depth) = resolve_dims(d.target_sqft, d.min_width, d.min_depth);
    let ord = next_ordinal(ordinals, room_type);
    NormalizedRoom {
        id: format!("{}-{}", room_type, ord),
        room_type,
        label: room_type.to_string(),
        zone: d.zone,
        floor: 1,
        floor_pinned: false,
        min_sqft: d.min_sqft,
        target_sqft: d.target_sqft,
        width,
        depth,
        min_width: d.min_width,
        min_depth: d.min_depth,
        priority: priority_of(d.base_priority, false, d.target_sqft),
        must_have: false,
        needs_exterior: d.needs_exterior,
        needs_plumbing: d.needs_plumbing,
        adjacent_to: Vec::new(),
        away_from: Vec::new(),
    }
}

/// Make adjacency preferences mutual: if any room of type A wants B, rooms of
/// type B want A back (and stop keeping away from A)
fn symmetrize_adjacency(rooms: &mut [NormalizedRoom]) {
    let wanted: Vec<(RoomType, RoomType)> = rooms
        .iter()
        .flat_map(|r| r.adjacent_to.iter().map(move |t| (r.room_type, *t)))
        .collect();
    for room in rooms.iter_mut() {
        for &(wanter, wanted_type) in wanted.iter() {
            if wanted_type == room.room_type && wanter != room.room_type {
                room.away_from.retain(|t| *t != wanter);
                if !room.adjacent_to.contains(&wanter) {
                    room.adjacent_to.push(wanter);
                }
            }
        }
        room.adjacent_to.sort();
        room.adjacent_to.dedup();
    }
}

/// Scale room targets so their sum matches the brief target, then refresh
/// dimensions and priorities
fn scale_to_target(rooms: &mut [NormalizedRoom], target_sqft: f32, warnings: &mut Vec<Warning>) {
    let sum_min: f32 = rooms.iter().map(|r| r.min_sqft).sum();
    let sum_target: f32 = rooms.iter().map(|r| r.target_sqft).sum();
    if sum_target <= 0.0 {
        return;
    }

    if sum_min > target_sqft {
        warn!(
            "Program minimums ({:.0} ft²) exceed the target area ({:.0} ft²); rooms clamped to minimum size",
            sum_min, target_sqft
        );
        warnings.push(Warning::new(
            WarningLevel::WARNING,
            None,
            format!(
                "Room minimums total {:.0} ft² but the target area is {:.0} ft²; all rooms kept at minimum size",
                sum_min, target_sqft
            ),
        ));
        for room in rooms.iter_mut() {
            room.target_sqft = room.min_sqft;
        }
    } else {
        let factor = target_sqft / sum_target;
        debug!("Scaling room targets by {:.3}", factor);
        for room in rooms.iter_mut() {
            room.target_sqft = (room.target_sqft * factor).round().max(room.min_sqft);
        }
    }

    for room in rooms.iter_mut() {
        let d = defaults_for(room.room_type);
        let (width, depth) = resolve_dims(room.target_sqft, d.min_width, d.min_depth);
        room.width = width;
        room.depth = depth;
        room.priority = priority_of(d.base_priority, room.must_have, room.target_sqft)
            + if room.room_type == RoomType::Foyer {
                FOYER_PRIORITY_BOOST
            } else {
                0
            };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomRequirement;

    fn brief_with(rooms: Vec<RoomRequirement>, stories: u8) -> DesignBrief {
        DesignBrief {
            target_sqft: 1800.0,
            stories,
            style: Default::default(),
            rooms,
            lot: None,
        }
    }

    #[test]
    fn injects_implicit_rooms() {
        let brief = brief_with(
            vec![
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
            ],
            2,
        );
        let nb = normalize(&brief);
        let count_of = |t: RoomType| nb.rooms.iter().filter(|r| r.room_type == t).count();
        assert_eq!(count_of(RoomType::Foyer), 1);
        assert_eq!(count_of(RoomType::Hallway), 1);
        assert_eq!(count_of(RoomType::WalkInCloset), 1);
        assert_eq!(count_of(RoomType::Stairs), 1);
        // no stairs on single-story programs
        let nb1 = normalize(&brief_with(
            vec![RoomRequirement::with_target(RoomType::Living, 275.0)],
            1,
        ));
        assert_eq!(
            nb1.rooms.iter().filter(|r| r.room_type == RoomType::Stairs).count(),
            0
        );
    }

    #[test]
    fn scales_targets_to_brief_total() {
        let brief = brief_with(
            vec![
                RoomRequirement::with_target(RoomType::Living, 400.0),
                RoomRequirement::with_target(RoomType::Kitchen, 200.0),
                RoomRequirement::with_target(RoomType::Bedroom, 200.0),
            ],
            1,
        );
        let nb = normalize(&brief);
        let total = nb.total_room_target();
        let max_min = nb.rooms.iter().map(|r| r.min_sqft).fold(0.0, f32::max);
        assert!(
            (total - nb.target_sqft).abs() <= max_min,
            "total {} vs target {}",
            total,
            nb.target_sqft
        );
    }

    #[test]
    fn impossible_program_clamps_to_minimums() {
        let mut brief = brief_with(
            (0..12)
                .map(|_| RoomRequirement::with_target(RoomType::Garage, 450.0))
                .collect(),
            1,
        );
        brief.target_sqft = 800.0;
        let nb = normalize(&brief);
        assert!(!nb.warnings.is_empty());
        assert!(nb.rooms.iter().all(|r| r.target_sqft >= r.min_sqft));
    }

    #[test]
    fn merges_and_symmetrizes_adjacency() {
        let mut dining = RoomRequirement::with_target(RoomType::Dining, 145.0);
        dining.away_from = vec![RoomType::Kitchen]; // fights the hard table
        let brief = brief_with(
            vec![
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                dining,
            ],
            1,
        );
        let nb = normalize(&brief);
        let kitchen = nb.rooms.iter().find(|r| r.room_type == RoomType::Kitchen).unwrap();
        let dining = nb.rooms.iter().find(|r| r.room_type == RoomType::Dining).unwrap();
        assert!(kitchen.adjacent_to.contains(&RoomType::Dining));
        // symmetrization wins over the user's anti hint
        assert!(dining.adjacent_to.contains(&RoomType::Kitchen));
        assert!(!dining.away_from.contains(&RoomType::Kitchen));
    }

    #[test]
    fn forced_tiny_area_keeps_honest_dims() {
        let mut bedroom = RoomRequirement::with_target(RoomType::Bedroom, 50.0);
        bedroom.min_sqft = Some(50.0);
        // program totals exactly 900 ft² with the implicit rooms, so the
        // scaling pass leaves the forced bedroom untouched
        let mut brief = brief_with(
            vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                bedroom,
            ],
            1,
        );
        brief.target_sqft = 900.0;
        let nb = normalize(&brief);
        let room = nb.rooms.iter().find(|r| r.room_type == RoomType::Bedroom).unwrap();
        assert!(room.width * room.depth >= 50.0);
        assert!(room.width * room.depth < 70.0, "dims should follow the forced area");
    }
}
