// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Types shared across the plan model: Id, Direction, Zone, Style, RoomType
//!
//! The string forms of these enums are part of the interchange contract and
//! must stay stable across versions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Element identifier
///
/// Rooms use readable slugs (`<type>-<ordinal>`); plans and reports use
/// md5-derived UUID strings.
pub type Id = String;

/// Cardinal direction in plan view
///
/// `y` grows north and `x` grows east, so `South` is the low-`y` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Direction rotated 180°
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Mirror across a north-south axis (east ↔ west)
    pub fn mirrored_x(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            d => d,
        }
    }

    /// Mirror across an east-west axis (north ↔ south)
    pub fn mirrored_y(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            d => d,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::South
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", printable)
    }
}

/// Semantic region of the footprint grouping rooms by social role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Social,
    Private,
    Service,
    Garage,
    Circulation,
    Exterior,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Social,
        Zone::Private,
        Zone::Service,
        Zone::Garage,
        Zone::Circulation,
        Zone::Exterior,
    ];

    /// Placement precedence used by the zone ordering strategy
    /// (garage → social → private → service → circulation → exterior)
    pub fn placement_rank(self) -> u8 {
        match self {
            Zone::Garage => 0,
            Zone::Social => 1,
            Zone::Private => 2,
            Zone::Service => 3,
            Zone::Circulation => 4,
            Zone::Exterior => 5,
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            Zone::Social => "social",
            Zone::Private => "private",
            Zone::Service => "service",
            Zone::Garage => "garage",
            Zone::Circulation => "circulation",
            Zone::Exterior => "exterior",
        };
        write!(f, "{}", printable)
    }
}

/// Architectural style tag of the brief
///
/// Only carried through to metadata; the solver is style agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Ranch,
    Modern,
    Traditional,
    Craftsman,
    Farmhouse,
    Contemporary,
}

impl Default for Style {
    fn default() -> Self {
        Style::Ranch
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            Style::Ranch => "ranch",
            Style::Modern => "modern",
            Style::Traditional => "traditional",
            Style::Craftsman => "craftsman",
            Style::Farmhouse => "farmhouse",
            Style::Contemporary => "contemporary",
        };
        write!(f, "{}", printable)
    }
}

/// Room kind
///
/// The serialized snake_case identifiers are stable interchange values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Living,
    Family,
    GreatRoom,
    Dining,
    Kitchen,
    BreakfastNook,
    Pantry,
    PrimaryBed,
    Bedroom,
    GuestBed,
    PrimaryBath,
    Bathroom,
    HalfBath,
    WalkInCloset,
    Closet,
    Laundry,
    Mudroom,
    Utility,
    Office,
    Media,
    Foyer,
    Hallway,
    Stairs,
    Garage,
    Porch,
}

impl RoomType {
    pub const ALL: [RoomType; 25] = [
        RoomType::Living,
        RoomType::Family,
        RoomType::GreatRoom,
        RoomType::Dining,
        RoomType::Kitchen,
        RoomType::BreakfastNook,
        RoomType::Pantry,
        RoomType::PrimaryBed,
        RoomType::Bedroom,
        RoomType::GuestBed,
        RoomType::PrimaryBath,
        RoomType::Bathroom,
        RoomType::HalfBath,
        RoomType::WalkInCloset,
        RoomType::Closet,
        RoomType::Laundry,
        RoomType::Mudroom,
        RoomType::Utility,
        RoomType::Office,
        RoomType::Media,
        RoomType::Foyer,
        RoomType::Hallway,
        RoomType::Stairs,
        RoomType::Garage,
        RoomType::Porch,
    ];

    /// Index into the dense per-type defaults table
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// Stable snake_case identifier (matches the serde form)
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Living => "living",
            RoomType::Family => "family",
            RoomType::GreatRoom => "great_room",
            RoomType::Dining => "dining",
            RoomType::Kitchen => "kitchen",
            RoomType::BreakfastNook => "breakfast_nook",
            RoomType::Pantry => "pantry",
            RoomType::PrimaryBed => "primary_bed",
            RoomType::Bedroom => "bedroom",
            RoomType::GuestBed => "guest_bed",
            RoomType::PrimaryBath => "primary_bath",
            RoomType::Bathroom => "bathroom",
            RoomType::HalfBath => "half_bath",
            RoomType::WalkInCloset => "walk_in_closet",
            RoomType::Closet => "closet",
            RoomType::Laundry => "laundry",
            RoomType::Mudroom => "mudroom",
            RoomType::Utility => "utility",
            RoomType::Office => "office",
            RoomType::Media => "media",
            RoomType::Foyer => "foyer",
            RoomType::Hallway => "hallway",
            RoomType::Stairs => "stairs",
            RoomType::Garage => "garage",
            RoomType::Porch => "porch",
        }
    }

    /// Sleeping rooms subject to bedroom code sections
    pub fn is_bedroom(self) -> bool {
        matches!(
            self,
            RoomType::PrimaryBed | RoomType::Bedroom | RoomType::GuestBed
        )
    }

    /// Rooms with sanitary fixtures
    pub fn is_bath(self) -> bool {
        matches!(
            self,
            RoomType::PrimaryBath | RoomType::Bathroom | RoomType::HalfBath
        )
    }

    /// Habitable rooms in the IRC sense (living, eating, sleeping, working;
    /// not baths, storage, circulation or vehicle space)
    pub fn is_habitable(self) -> bool {
        matches!(
            self,
            RoomType::Living
                | RoomType::Family
                | RoomType::GreatRoom
                | RoomType::Dining
                | RoomType::Kitchen
                | RoomType::BreakfastNook
                | RoomType::PrimaryBed
                | RoomType::Bedroom
                | RoomType::GuestBed
                | RoomType::Office
                | RoomType::Media
        )
    }
}

impl Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
