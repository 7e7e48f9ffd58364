// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Rooms through the pipeline: NormalizedRoom, PlacedRoom

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

use super::{Direction, Id, RoomType, Zone};

/// Room requirement after normalization
///
/// Carries resolved dimensions, zone, priority and the merged adjacency
/// preferences (hard pairs unioned with user hints, anti pairs subtracted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRoom {
    /// Identifier, `<type>-<ordinal>`
    pub id: Id,
    /// Room kind
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Display label
    pub label: String,
    /// Canonical zone of the room kind
    pub zone: Zone,
    /// Floor (1-based)
    pub floor: u8,
    /// Whether the floor was pinned by the brief
    #[serde(default)]
    pub floor_pinned: bool,
    /// Minimum acceptable area (ft²)
    pub min_sqft: f32,
    /// Target area after scaling (ft²)
    pub target_sqft: f32,
    /// Resolved target width (ft)
    pub width: f32,
    /// Resolved target depth (ft)
    pub depth: f32,
    /// Minimum width (ft)
    pub min_width: f32,
    /// Minimum depth (ft)
    pub min_depth: f32,
    /// Placement priority; higher places earlier under the priority ordering
    pub priority: i32,
    /// Whether the brief demanded this room
    pub must_have: bool,
    /// Exterior wall requirement
    pub needs_exterior: bool,
    /// Plumbing requirement
    pub needs_plumbing: bool,
    /// Merged adjacency preferences
    pub adjacent_to: Vec<RoomType>,
    /// Merged anti-adjacency preferences
    pub away_from: Vec<RoomType>,
}

/// Room fixed on the layout grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedRoom {
    /// Identifier, `<type>-<ordinal>`
    pub id: Id,
    /// Room kind
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Display label
    pub label: String,
    /// Canonical zone
    pub zone: Zone,
    /// Floor (1-based)
    pub floor: u8,
    /// West edge (ft, lot coordinates)
    pub x: f32,
    /// South edge (ft, lot coordinates)
    pub y: f32,
    /// Placed east-west extent (ft)
    pub width: f32,
    /// Placed north-south extent (ft)
    pub depth: f32,
    /// Built area, width × depth (ft²)
    pub sqft: f32,
    /// Whether the candidate was the 90°-swapped variant
    pub rotated: bool,
    /// Target area the placement aimed for (ft²)
    pub target_sqft: f32,
    /// Placement priority
    pub priority: i32,
    /// Exterior wall requirement
    pub needs_exterior: bool,
    /// Plumbing requirement
    pub needs_plumbing: bool,
    /// Floor edges this room touches
    pub exterior_walls: Vec<Direction>,
    /// Merged adjacency preferences
    pub adjacent_to: Vec<RoomType>,
    /// Merged anti-adjacency preferences
    pub away_from: Vec<RoomType>,
    /// Adjacent rooms in the circulation graph, sorted: edge sharing on the
    /// same floor, plus stairwell continuity between stairs rooms on
    /// consecutive floors
    pub neighbors: Vec<Id>,
}

impl PlacedRoom {
    /// Footprint rectangle of the room
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.depth)
    }

    /// Whether the room touches any floor edge
    #[inline]
    pub fn has_exterior_wall(&self) -> bool {
        !self.exterior_walls.is_empty()
    }

    /// Length of the wall on the given side (ft)
    pub fn wall_length(&self, dir: Direction) -> f32 {
        match dir {
            Direction::North | Direction::South => self.width,
            Direction::East | Direction::West => self.depth,
        }
    }

    /// Aspect ratio of the placed rectangle (≥1)
    pub fn aspect_ratio(&self) -> f32 {
        let rect = self.rect();
        if rect.min_dim() > 0.0 {
            rect.max_dim() / rect.min_dim()
        } else {
            f32::INFINITY
        }
    }
}
