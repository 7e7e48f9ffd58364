// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Plan aggregates: NormalizedBrief, PlacedPlan, CirculationResult and the
//! per-variation option and metadata records

use std::fmt::Display;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{
    BuildingEnvelope, Direction, Door, Id, LotConstraints, NormalizedRoom, PlacedRoom, Style,
    Warning, WindowPlacement,
};

/// Brief after normalization: canonical room program plus resolved lot data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedBrief {
    /// Requested total area (ft²)
    pub target_sqft: f32,
    /// Story count (1 or 2)
    pub stories: u8,
    /// Style tag
    pub style: Style,
    /// Resolved lot constraints (defaults and clamps applied)
    pub lot: LotConstraints,
    /// Which way the entry faces
    pub entry_facing: Direction,
    /// Canonical room program (requested rooms plus injected implicit rooms)
    pub rooms: Vec<NormalizedRoom>,
    /// Diagnostics emitted during normalization
    pub warnings: Vec<Warning>,
}

impl NormalizedBrief {
    /// Sum of room target areas (ft²)
    pub fn total_room_target(&self) -> f32 {
        self.rooms.iter().map(|r| r.target_sqft).sum()
    }
}

/// Zoning toggles of a variation
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct ZoningOptions {
    /// Swap the social and private strips
    #[serde(default)]
    pub swap_social_private: bool,
    /// Rotate the entry side 180°
    #[serde(default)]
    pub rotate_entry: bool,
}

/// Order in which rooms are fed to the greedy placer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementOrder {
    /// Largest target area first
    Default,
    /// Zone precedence: garage, social, private, service, circulation, exterior
    Zone,
    /// Descending priority
    Priority,
    /// Reverse of Default
    Reverse,
}

impl Default for PlacementOrder {
    fn default() -> Self {
        PlacementOrder::Default
    }
}

impl Display for PlacementOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            PlacementOrder::Default => "default",
            PlacementOrder::Zone => "zone",
            PlacementOrder::Priority => "priority",
            PlacementOrder::Reverse => "reverse",
        };
        write!(f, "{}", printable)
    }
}

/// Placement tuning of a variation
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// Room ordering strategy
    #[serde(default)]
    pub order: PlacementOrder,
    /// Added to every candidate width (ft); widens or narrows rooms
    #[serde(default)]
    pub width_bias: f32,
}

/// Connectivity analysis of a placed plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CirculationResult {
    /// Room the traversal starts from
    pub entry_room_id: Id,
    /// Whether a BFS from the entry reaches every room
    pub is_fully_connected: bool,
    /// Longest root-to-leaf path of the BFS tree, entry first
    pub main_path: Vec<Id>,
    /// Rooms with at most one neighbor (porches excluded)
    pub dead_ends: Vec<Id>,
    /// Hallway area share of the total placed area (%)
    pub hallway_percent: f32,
    /// Hallway rooms inserted by the repair loop
    pub inserted_hallways: u32,
}

/// Variation descriptor and accumulated stage diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMeta {
    /// Variation name (`base-greedy`, `mirror-x`, ...)
    pub strategy: String,
    /// Zoning toggles used
    pub zoning: ZoningOptions,
    /// Placement tuning used
    pub placement: PlacementOptions,
    /// Mirrored about the north-south midline
    pub mirror_x: bool,
    /// Mirrored about the east-west midline
    pub mirror_y: bool,
    /// Diagnostics from placement, circulation and window assignment
    pub warnings: Vec<Warning>,
}

impl StrategyMeta {
    pub fn named(strategy: &str) -> Self {
        StrategyMeta {
            strategy: strategy.to_string(),
            zoning: ZoningOptions::default(),
            placement: PlacementOptions::default(),
            mirror_x: false,
            mirror_y: false,
            warnings: Vec::new(),
        }
    }
}

/// A complete candidate layout
///
/// Immutable once produced by the pipeline; every stage past placement
/// returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedPlan {
    /// Stable identifier (md5 of brief + strategy)
    pub id: Id,
    /// The normalized brief the plan was generated from
    pub brief: NormalizedBrief,
    /// Envelope the rooms were placed into
    pub envelope: BuildingEnvelope,
    /// Placed rooms
    pub rooms: Vec<PlacedRoom>,
    /// Door openings (populated by circulation repair)
    pub doors: Vec<Door>,
    /// Window openings (populated by window assignment)
    pub windows: Vec<WindowPlacement>,
    /// Connectivity analysis (populated by circulation repair)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circulation: Option<CirculationResult>,
    /// Rooms the placer could not fit
    pub unplaced_room_ids: Vec<Id>,
    /// Variation descriptor and diagnostics
    pub meta: StrategyMeta,
}

impl PlacedPlan {
    /// Look up a placed room by id
    pub fn room(&self, id: &str) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Placed rooms on a given floor
    pub fn rooms_on_floor(&self, floor: u8) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(move |r| r.floor == floor)
    }

    /// Total built area over all rooms (ft²)
    pub fn used_sqft(&self) -> f32 {
        self.rooms.iter().map(|r| r.sqft).sum()
    }

    /// Windows of a given room
    pub fn windows_of<'a>(
        &'a self,
        room_id: &'a str,
    ) -> impl Iterator<Item = &'a WindowPlacement> + 'a {
        self.windows.iter().filter(move |w| w.room_id == room_id)
    }

    /// Whether the final adjacency graph connects the two rooms
    pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
        self.room(a)
            .map(|r| r.neighbors.iter().any(|n| n == b))
            .unwrap_or(false)
    }

    /// Read a plan from its JSON form
    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        serde_json::from_str(data).context("Failed to parse placed plan JSON")
    }

    /// Serialize the plan to JSON
    pub fn as_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize placed plan")
    }
}
