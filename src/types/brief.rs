// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! User design intent: DesignBrief, RoomRequirement, LotConstraints

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{Direction, RoomType, Style};

/// High level design brief for a dwelling
///
/// This is the sole input of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignBrief {
    /// Requested total conditioned area (ft², 800-5000)
    pub target_sqft: f32,
    /// Story count (1 or 2)
    pub stories: u8,
    /// Style tag
    #[serde(default)]
    pub style: Style,
    /// Requested rooms, in the user's order
    pub rooms: Vec<RoomRequirement>,
    /// Lot constraints; defaults applied when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot: Option<LotConstraints>,
}

impl DesignBrief {
    /// Read a brief from its JSON form
    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        serde_json::from_str(data).context("Failed to parse design brief JSON")
    }

    /// Serialize the brief to JSON
    pub fn as_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize design brief")
    }
}

/// A single requested room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRequirement {
    /// Room kind
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Display label ("Primary Suite", "Kids Bedroom", ...)
    #[serde(default)]
    pub label: String,
    /// Minimum acceptable area (ft²); per-type default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sqft: Option<f32>,
    /// Target area (ft²); per-type default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_sqft: Option<f32>,
    /// Whether the room must survive normalization untouched
    #[serde(default = "default_true")]
    pub must_have: bool,
    /// Room types this room prefers to touch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjacent_to: Vec<RoomType>,
    /// Room types this room prefers to keep away from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub away_from: Vec<RoomType>,
    /// Exterior wall requirement override; per-type default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_exterior: Option<bool>,
    /// Plumbing requirement override; per-type default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_plumbing: Option<bool>,
    /// Pin to a floor (1-based); assigned by zoning when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<u8>,
}

impl RoomRequirement {
    /// Bare requirement of a given kind, everything else defaulted
    pub fn of_type(room_type: RoomType) -> Self {
        RoomRequirement {
            room_type,
            label: String::new(),
            min_sqft: None,
            target_sqft: None,
            must_have: true,
            adjacent_to: Vec::new(),
            away_from: Vec::new(),
            needs_exterior: None,
            needs_plumbing: None,
            floor: None,
        }
    }

    /// Requirement with an explicit target area
    pub fn with_target(room_type: RoomType, target_sqft: f32) -> Self {
        RoomRequirement {
            target_sqft: Some(target_sqft),
            ..Self::of_type(room_type)
        }
    }
}

fn default_true() -> bool {
    true
}

/// Lot geometry and siting constraints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LotConstraints {
    /// Lot east-west extent (ft)
    pub lot_width: f32,
    /// Lot north-south extent (ft)
    pub lot_depth: f32,
    /// Setback on the entry-facing side (ft)
    pub setback_front: f32,
    /// Setback on each side (ft)
    pub setback_side: f32,
    /// Setback opposite the entry (ft)
    pub setback_rear: f32,
    /// Which way the entry faces
    #[serde(default)]
    pub entry_facing: Direction,
    /// Requested garage placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage_position: Option<GaragePosition>,
}

impl Default for LotConstraints {
    fn default() -> Self {
        LotConstraints {
            lot_width: 100.0,
            lot_depth: 110.0,
            setback_front: 20.0,
            setback_side: 10.0,
            setback_rear: 20.0,
            entry_facing: Direction::South,
            garage_position: None,
        }
    }
}

/// Requested garage placement relative to the entry facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaragePosition {
    Left,
    Right,
    Front,
    Rear,
}
