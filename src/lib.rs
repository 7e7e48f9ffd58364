// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Floor plan generation and building code compliance model for residential
//! buildings
//!
//! A pure computational pipeline: a design brief goes in, scored candidate
//! layouts and a code compliance report come out. The stages are pure
//! functions over immutable inputs and run in a fixed order:
//!
//! 1. [`normalize`]: expand the brief into a canonical room program
//! 2. [`compute_envelope`]: buildable rectangle and per-floor footprint
//! 3. [`assign_zones`]: partition the footprint into semantic regions
//! 4. [`place_rooms`]: greedy scored placement on the 1 ft grid
//! 5. [`ensure_circulation`]: reachability repair and door synthesis
//! 6. [`assign_windows`]: window placements from exterior walls
//! 7. [`analyze_walls`]: wall takeoff, shared and wet walls
//! 8. [`score_plan`]: eight normalized quality metrics
//! 9. [`generate_variations`]: six parameter variations, re-scored
//!
//! The [`compliance`] module consumes a placed plan independently through an
//! extensible rule registry with jurisdiction overrides.

pub mod compliance;
pub mod geometry;
pub mod score;
pub mod tables;
pub mod types;

mod circulation;
mod envelope;
mod normalize;
mod pipeline;
mod placement;
mod plan_check;
mod utils;
mod variations;
mod walls;
mod windows;
mod zoning;

pub use circulation::ensure_circulation;
pub use envelope::compute_envelope;
pub use normalize::normalize;
pub use pipeline::{generate_plans, DesignResult, ScoredPlan};
pub use placement::place_rooms;
pub use score::{score_plan, PlanScore};
pub use types::*;
pub use utils::{fround2, uuid_from_obj};
pub use variations::generate_variations;
pub use walls::analyze_walls;
pub use windows::assign_windows;
pub use zoning::{assign_zones, ZoneRegion, ZonedPlan};

/// Program version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
