// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Window openings on exterior walls: WindowPlacement, WindowType

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Direction, Id};

/// Glazing unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    Standard,
    Picture,
    Bay,
    Clerestory,
}

impl Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            WindowType::Standard => "standard",
            WindowType::Picture => "picture",
            WindowType::Bay => "bay",
            WindowType::Clerestory => "clerestory",
        };
        write!(f, "{}", printable)
    }
}

/// Window on an exterior wall of a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowPlacement {
    /// Identifier, `<room>-win-<n>`
    pub id: Id,
    /// Wall the window sits in, `<room>-wall-<dir>`
    pub wall_id: String,
    /// Owning room
    pub room_id: Id,
    /// Distance of the window center from the wall origin (ft)
    ///
    /// The wall origin is its west end for north/south walls and its south
    /// end for east/west walls.
    pub position: f32,
    /// Width (ft)
    pub width: f32,
    /// Height (ft)
    pub height: f32,
    /// Sill height above the floor (ft)
    pub sill_height: f32,
    /// Glazing type
    #[serde(rename = "type")]
    pub window_type: WindowType,
    /// Floor of the owning room
    pub floor: u8,
    /// Side of the room the wall is on
    pub direction: Direction,
}

impl WindowPlacement {
    /// Glazed area (ft²)
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}
