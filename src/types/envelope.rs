// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Building envelope: the buildable rectangle and per-floor footprints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Buildable area derived from the lot and the per-floor footprint placed
/// inside it
///
/// All rectangles are in lot coordinates and whole feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingEnvelope {
    /// Lot rectangle minus setbacks
    pub buildable: Rect,
    /// Footprint rectangle, centered inside the buildable rect
    pub footprint: Rect,
    /// Footprint per floor (1-based); all floors share the same rectangle
    pub floor_rects: BTreeMap<u8, Rect>,
    /// Area each floor must offer, circulation inflation included (ft²)
    pub per_floor_target_sqft: f32,
    /// Total target area of the program (ft²)
    pub total_target_sqft: f32,
    /// Story count
    pub stories: u8,
    /// Grid resolution (ft); always 1
    pub grid_resolution: f32,
}

impl BuildingEnvelope {
    /// Footprint of the given floor
    pub fn floor_rect(&self, floor: u8) -> Rect {
        self.floor_rects
            .get(&floor)
            .copied()
            .unwrap_or(self.footprint)
    }

    /// Gross area available over all floors (ft²)
    pub fn available_sqft(&self) -> f32 {
        self.footprint.area() * f32::from(self.stories)
    }
}
