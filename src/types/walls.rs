// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Wall takeoff of a placed plan: Wall, SharedWall, WallAnalysis

use serde::{Deserialize, Serialize};

use crate::geometry::WallOrientation;

use super::{Direction, Id};

/// Exterior wall thickness, 6 in (ft)
pub const EXTERIOR_WALL_THICKNESS: f32 = 0.5;
/// Interior partition thickness, 4 in (ft)
pub const INTERIOR_WALL_THICKNESS: f32 = 4.0 / 12.0;

/// One edge wall of a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    /// Identifier, `<room>-wall-<dir>`
    pub id: Id,
    /// Owning room
    pub room_id: Id,
    /// Side of the room
    pub direction: Direction,
    /// Length (ft)
    pub length: f32,
    /// Thickness (ft)
    pub thickness: f32,
    /// Whether the wall lies on the floor boundary
    pub is_exterior: bool,
    /// Exterior walls carry the roof/floor loads
    pub load_bearing: bool,
    /// Floor of the owning room
    pub floor: u8,
}

/// Wall segment shared by two rooms on the same floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedWall {
    /// The two rooms, in plan order
    pub rooms: [Id; 2],
    /// Overlap length (ft)
    pub overlap: f32,
    /// Run direction of the segment
    pub orientation: WallOrientation,
    /// Floor
    pub floor: u8,
    /// Whether both rooms carry plumbing (wet wall)
    pub is_wet: bool,
}

/// Complete wall takeoff of a placed plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallAnalysis {
    /// All room edge walls
    pub walls: Vec<Wall>,
    /// Shared segments between room pairs
    pub shared_walls: Vec<SharedWall>,
    /// Shared segments between two plumbing rooms
    pub wet_walls: Vec<SharedWall>,
    /// Total exterior wall length (ft)
    pub exterior_length: f32,
    /// Total interior shared wall length (ft)
    pub interior_length: f32,
    /// Connected components of the plumbing-room graph induced by wet walls;
    /// isolated plumbing rooms form singleton groups
    pub plumbing_groups: Vec<Vec<Id>>,
}

impl WallAnalysis {
    /// Total wet wall length (ft)
    pub fn wet_wall_length(&self) -> f32 {
        self.wet_walls.iter().map(|w| w.overlap).sum()
    }

    /// Gross exterior wall area for a given wall height (ft²)
    pub fn exterior_area(&self, wall_height: f32) -> f32 {
        self.exterior_length * wall_height
    }
}
