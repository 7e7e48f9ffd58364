// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Door openings between rooms: Door, DoorType

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Id;

/// Leaf type of a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorType {
    Standard,
    Double,
    Sliding,
    Pocket,
    Exterior,
}

impl Display for DoorType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            DoorType::Standard => "standard",
            DoorType::Double => "double",
            DoorType::Sliding => "sliding",
            DoorType::Pocket => "pocket",
            DoorType::Exterior => "exterior",
        };
        write!(f, "{}", printable)
    }
}

/// Door opening
///
/// Interior doors connect two rooms; the single exterior door connects the
/// entry room to the outside and repeats its id in `connects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    /// Identifier
    pub id: Id,
    /// Wall the opening sits in
    pub wall_id: String,
    /// Position of the opening center along the wall run (ft, absolute for
    /// shared walls, from the wall origin for room edge walls)
    pub position: f32,
    /// Clear width (ft)
    pub width: f32,
    /// Leaf type
    #[serde(rename = "type")]
    pub door_type: DoorType,
    /// The two rooms the door connects
    pub connects: [Id; 2],
}

impl Door {
    /// Whether the door connects the given pair, in either order
    pub fn connects_pair(&self, a: &str, b: &str) -> bool {
        (self.connects[0] == a && self.connects[1] == b)
            || (self.connects[0] == b && self.connects[1] == a)
    }
}
