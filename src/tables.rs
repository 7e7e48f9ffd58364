// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Process-wide constant tables: per-type room defaults and the adjacency
//! preference tables
//!
//! The defaults table is a dense array indexed by the `RoomType` discriminant.
//! Adjacency tables list unordered type pairs; lookups check both orders.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::types::{RoomType, Zone};

/// Per-type sizing, service needs and zone membership
#[derive(Debug, Clone, Copy)]
pub struct RoomDefaults {
    pub room_type: RoomType,
    /// Smallest acceptable area (ft²)
    pub min_sqft: f32,
    /// Area aimed for when the brief gives none (ft²)
    pub target_sqft: f32,
    /// Smallest acceptable width (ft)
    pub min_width: f32,
    /// Smallest acceptable depth (ft)
    pub min_depth: f32,
    /// Must touch a floor edge
    pub needs_exterior: bool,
    /// Carries supply/drain plumbing
    pub needs_plumbing: bool,
    /// Canonical zone
    pub zone: Zone,
    /// Base placement priority
    pub base_priority: i32,
    /// Window prescription; None lets the window assigner infer one
    pub windows: Option<WindowConfig>,
}

/// Prescribed glazing of a room type
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Number of windows; 0 suppresses glazing entirely
    pub count: u8,
    /// Unit width (ft)
    pub width: f32,
    /// Unit height (ft)
    pub height: f32,
    /// Sill height above the floor (ft)
    pub sill: f32,
}

const NO_WINDOWS: Option<WindowConfig> = Some(WindowConfig {
    count: 0,
    width: 0.0,
    height: 0.0,
    sill: 0.0,
});

macro_rules! room_defaults {
    ($rt:ident, $min:expr, $target:expr, $minw:expr, $mind:expr, $ext:expr, $plumb:expr, $zone:ident, $prio:expr, $win:expr) => {
        RoomDefaults {
            room_type: RoomType::$rt,
            min_sqft: $min,
            target_sqft: $target,
            min_width: $minw,
            min_depth: $mind,
            needs_exterior: $ext,
            needs_plumbing: $plumb,
            zone: Zone::$zone,
            base_priority: $prio,
            windows: $win,
        }
    };
}

/// Defaults table, indexed by `RoomType::idx()`
pub static ROOM_DEFAULTS: [RoomDefaults; 25] = [
    room_defaults!(Living, 180.0, 275.0, 12.0, 12.0, true, false, Social, 90, None),
    room_defaults!(Family, 160.0, 240.0, 12.0, 12.0, true, false, Social, 80, None),
    room_defaults!(GreatRoom, 220.0, 320.0, 14.0, 14.0, true, false, Social, 85, None),
    room_defaults!(Dining, 100.0, 145.0, 9.0, 10.0, false, false, Social, 72, None),
    room_defaults!(
        Kitchen, 120.0, 185.0, 10.0, 10.0, false, true, Social, 88,
        Some(WindowConfig { count: 2, width: 3.0, height: 3.5, sill: 3.5 })
    ),
    room_defaults!(
        BreakfastNook, 60.0, 90.0, 7.0, 7.0, true, false, Social, 55,
        Some(WindowConfig { count: 1, width: 4.0, height: 4.0, sill: 2.5 })
    ),
    room_defaults!(Pantry, 20.0, 35.0, 4.0, 4.0, false, false, Service, 40, NO_WINDOWS),
    room_defaults!(
        PrimaryBed, 140.0, 240.0, 11.0, 12.0, true, false, Private, 85,
        Some(WindowConfig { count: 2, width: 4.0, height: 4.0, sill: 2.5 })
    ),
    room_defaults!(Bedroom, 100.0, 140.0, 10.0, 10.0, true, false, Private, 75, None),
    room_defaults!(GuestBed, 100.0, 130.0, 10.0, 10.0, true, false, Private, 70, None),
    room_defaults!(
        PrimaryBath, 60.0, 95.0, 7.0, 8.0, false, true, Private, 68,
        Some(WindowConfig { count: 1, width: 2.5, height: 1.5, sill: 4.5 })
    ),
    room_defaults!(
        Bathroom, 40.0, 55.0, 5.0, 7.0, false, true, Private, 66,
        Some(WindowConfig { count: 1, width: 2.0, height: 1.5, sill: 4.5 })
    ),
    room_defaults!(HalfBath, 18.0, 25.0, 4.0, 4.0, false, true, Private, 50, NO_WINDOWS),
    room_defaults!(WalkInCloset, 25.0, 45.0, 4.0, 5.0, false, false, Private, 45, NO_WINDOWS),
    room_defaults!(Closet, 8.0, 15.0, 2.0, 3.0, false, false, Private, 30, NO_WINDOWS),
    room_defaults!(
        Laundry, 35.0, 50.0, 5.0, 6.0, false, true, Service, 58,
        Some(WindowConfig { count: 1, width: 2.5, height: 2.5, sill: 3.5 })
    ),
    room_defaults!(Mudroom, 30.0, 50.0, 5.0, 5.0, false, false, Service, 52, NO_WINDOWS),
    room_defaults!(Utility, 25.0, 40.0, 4.0, 5.0, false, false, Service, 42, NO_WINDOWS),
    room_defaults!(Office, 90.0, 120.0, 9.0, 9.0, true, false, Private, 62, None),
    room_defaults!(Media, 120.0, 180.0, 10.0, 11.0, false, false, Social, 54, NO_WINDOWS),
    room_defaults!(Foyer, 40.0, 60.0, 5.0, 6.0, false, false, Circulation, 60, NO_WINDOWS),
    room_defaults!(Hallway, 30.0, 45.0, 3.0, 3.0, false, false, Circulation, 35, NO_WINDOWS),
    room_defaults!(Stairs, 35.0, 40.0, 3.0, 10.0, false, false, Circulation, 48, NO_WINDOWS),
    room_defaults!(Garage, 380.0, 450.0, 19.0, 20.0, true, false, Garage, 65, NO_WINDOWS),
    room_defaults!(Porch, 40.0, 80.0, 5.0, 6.0, true, false, Exterior, 38, NO_WINDOWS),
];

/// Defaults of a room type
#[inline]
pub fn defaults_for(room_type: RoomType) -> &'static RoomDefaults {
    &ROOM_DEFAULTS[room_type.idx()]
}

/// Pairs that must share an edge (IRC-style program requirements)
pub static HARD_ADJACENCY: &[(RoomType, RoomType)] = &[
    (RoomType::Kitchen, RoomType::Dining),
    (RoomType::Kitchen, RoomType::Pantry),
    (RoomType::PrimaryBed, RoomType::PrimaryBath),
    (RoomType::PrimaryBed, RoomType::WalkInCloset),
    (RoomType::Garage, RoomType::Mudroom),
];

/// Pairs that prefer to share an edge, with preference weight
pub static SOFT_ADJACENCY: &[(RoomType, RoomType, f32)] = &[
    (RoomType::Kitchen, RoomType::BreakfastNook, 8.0),
    (RoomType::Kitchen, RoomType::Family, 6.0),
    (RoomType::Kitchen, RoomType::Garage, 5.0),
    (RoomType::Kitchen, RoomType::Laundry, 4.0),
    (RoomType::Living, RoomType::Dining, 6.0),
    (RoomType::Living, RoomType::Foyer, 6.0),
    (RoomType::Living, RoomType::Porch, 4.0),
    (RoomType::GreatRoom, RoomType::Dining, 5.0),
    (RoomType::Foyer, RoomType::Stairs, 6.0),
    (RoomType::Hallway, RoomType::Bedroom, 5.0),
    (RoomType::Hallway, RoomType::Bathroom, 4.0),
    (RoomType::PrimaryBath, RoomType::WalkInCloset, 5.0),
    (RoomType::Bedroom, RoomType::Bathroom, 7.0),
    (RoomType::Mudroom, RoomType::Garage, 7.0),
    (RoomType::Laundry, RoomType::Mudroom, 4.0),
    (RoomType::Office, RoomType::Foyer, 3.0),
];

/// Pairs that should not share an edge, with (negative) penalty weight
pub static ANTI_ADJACENCY: &[(RoomType, RoomType, f32)] = &[
    (RoomType::PrimaryBed, RoomType::Garage, -8.0),
    (RoomType::Bedroom, RoomType::Garage, -6.0),
    (RoomType::GuestBed, RoomType::Garage, -5.0),
    (RoomType::PrimaryBed, RoomType::Kitchen, -5.0),
    (RoomType::Bedroom, RoomType::Kitchen, -5.0),
    (RoomType::PrimaryBed, RoomType::Living, -4.0),
    (RoomType::Bedroom, RoomType::Media, -4.0),
    (RoomType::Dining, RoomType::Bathroom, -5.0),
    (RoomType::Kitchen, RoomType::Bathroom, -4.0),
    (RoomType::Bedroom, RoomType::Utility, -3.0),
];

/// Pairs that flow into each other without an interior wall or door
pub static OPEN_CONCEPT: &[(RoomType, RoomType)] = &[
    (RoomType::Kitchen, RoomType::Dining),
    (RoomType::Kitchen, RoomType::BreakfastNook),
    (RoomType::Living, RoomType::Dining),
    (RoomType::Living, RoomType::Foyer),
    (RoomType::GreatRoom, RoomType::Kitchen),
    (RoomType::GreatRoom, RoomType::Dining),
    (RoomType::GreatRoom, RoomType::Foyer),
    (RoomType::Family, RoomType::BreakfastNook),
];

static OPEN_CONCEPT_SET: Lazy<HashSet<(RoomType, RoomType)>> = Lazy::new(|| {
    OPEN_CONCEPT
        .iter()
        .flat_map(|&(a, b)| vec![(a, b), (b, a)])
        .collect()
});

static HARD_ADJACENCY_SET: Lazy<HashSet<(RoomType, RoomType)>> = Lazy::new(|| {
    HARD_ADJACENCY
        .iter()
        .flat_map(|&(a, b)| vec![(a, b), (b, a)])
        .collect()
});

/// Whether the pair connects without an interior wall (order independent)
#[inline]
pub fn is_open_concept(a: RoomType, b: RoomType) -> bool {
    OPEN_CONCEPT_SET.contains(&(a, b))
}

/// Whether the pair must touch (order independent)
#[inline]
pub fn is_hard_adjacent(a: RoomType, b: RoomType) -> bool {
    HARD_ADJACENCY_SET.contains(&(a, b))
}

/// Soft preference weight of the pair, if listed (order independent)
pub fn soft_weight(a: RoomType, b: RoomType) -> Option<f32> {
    SOFT_ADJACENCY
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, w)| w)
}

/// Anti-adjacency weight of the pair (negative), if listed (order independent)
pub fn anti_weight(a: RoomType, b: RoomType) -> Option<f32> {
    ANTI_ADJACENCY
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, w)| w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_table_is_aligned() {
        // the dense table must be indexable by discriminant
        for rt in RoomType::ALL.iter() {
            assert_eq!(defaults_for(*rt).room_type, *rt);
        }
    }

    #[test]
    fn pair_lookups_are_symmetric() {
        assert!(is_hard_adjacent(RoomType::Dining, RoomType::Kitchen));
        assert!(is_open_concept(RoomType::Dining, RoomType::Kitchen));
        assert_eq!(
            soft_weight(RoomType::BreakfastNook, RoomType::Kitchen),
            Some(8.0)
        );
        assert_eq!(anti_weight(RoomType::Garage, RoomType::PrimaryBed), Some(-8.0));
        assert_eq!(anti_weight(RoomType::Garage, RoomType::Porch), None);
    }

    #[test]
    fn sizing_is_consistent() {
        for d in ROOM_DEFAULTS.iter() {
            assert!(d.min_sqft <= d.target_sqft, "{}", d.room_type);
            assert!(d.min_width * d.min_depth <= d.target_sqft, "{}", d.room_type);
        }
    }
}
