// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Data model of the floor plan pipeline
//!
//! Rooms use readable slug identifiers (`<type>-<ordinal>`); plans and
//! compliance reports use md5-derived UUID strings. The serialized string
//! forms of the enums in `common` are stable interchange values.

mod brief;
mod common;
mod door;
mod envelope;
mod plan;
mod reporting;
mod room;
mod walls;
mod window;

pub use brief::{DesignBrief, GaragePosition, LotConstraints, RoomRequirement};
pub use common::{Direction, Id, RoomType, Style, Zone};
pub use door::{Door, DoorType};
pub use envelope::BuildingEnvelope;
pub use plan::{
    CirculationResult, NormalizedBrief, PlacedPlan, PlacementOptions, PlacementOrder,
    StrategyMeta, ZoningOptions,
};
pub use reporting::{Warning, WarningLevel};
pub use room::{NormalizedRoom, PlacedRoom};
pub use walls::{
    SharedWall, Wall, WallAnalysis, EXTERIOR_WALL_THICKNESS, INTERIOR_WALL_THICKNESS,
};
pub use window::{WindowPlacement, WindowType};
