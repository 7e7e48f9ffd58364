// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Envelope computation: buildable rectangle and per-floor footprint
//!
//! The footprint is sized to the program target plus a circulation allowance
//! and centered inside the setback rectangle on whole-foot offsets.

use log::{debug, info};

use crate::geometry::Rect;
use crate::types::{BuildingEnvelope, NormalizedBrief};

/// Smallest buildable side after setbacks (ft)
const MIN_BUILDABLE_SIDE: f32 = 10.0;
/// Smallest footprint side (ft)
const MIN_FOOTPRINT_SIDE: f32 = 12.0;
/// Circulation allowance for large programs (≥10 rooms)
const INFLATION_LARGE: f32 = 1.12;
/// Circulation allowance for small programs
const INFLATION_SMALL: f32 = 1.08;

/// Derive the building envelope from a normalized brief
pub fn compute_envelope(brief: &NormalizedBrief) -> BuildingEnvelope {
    let lot = &brief.lot;
    let buildable = Rect::new(
        lot.setback_side,
        lot.setback_front,
        (lot.lot_width - 2.0 * lot.setback_side).max(MIN_BUILDABLE_SIDE),
        (lot.lot_depth - lot.setback_front - lot.setback_rear).max(MIN_BUILDABLE_SIDE),
    );

    let stories = f32::from(brief.stories);
    let inflation = if brief.rooms.len() >= 10 {
        INFLATION_LARGE
    } else {
        INFLATION_SMALL
    };
    let per_floor_target = ((brief.target_sqft / stories)
        .max(brief.total_room_target() / stories)
        .max(100.0)
        * inflation)
        .round();

    let (width, depth) = footprint_dims(per_floor_target, &buildable);

    // center on whole-foot offsets
    let x = buildable.x + ((buildable.width - width) / 2.0).floor();
    let y = buildable.y + ((buildable.depth - depth) / 2.0).floor();
    let footprint = Rect::new(x, y, width, depth);

    let floor_rects = (1..=brief.stories).map(|f| (f, footprint)).collect();

    info!(
        "Envelope: buildable {:.0}x{:.0} at ({:.0}, {:.0}), footprint {:.0}x{:.0} at ({:.0}, {:.0}), {:.0} ft²/floor target",
        buildable.width, buildable.depth, buildable.x, buildable.y,
        width, depth, x, y, per_floor_target
    );

    BuildingEnvelope {
        buildable,
        footprint,
        floor_rects,
        per_floor_target_sqft: per_floor_target,
        total_target_sqft: brief.target_sqft,
        stories: brief.stories,
        grid_resolution: 1.0,
    }
}

/// Footprint proportioned like the buildable rect and grown until it covers
/// the per-floor target
fn footprint_dims(target_sqft: f32, buildable: &Rect) -> (f32, f32) {
    let ratio = buildable.width / buildable.depth;
    let mut width = (target_sqft * ratio)
        .sqrt()
        .round()
        .max(MIN_FOOTPRINT_SIDE)
        .min(buildable.width);
    let mut depth = (target_sqft / width)
        .ceil()
        .max(MIN_FOOTPRINT_SIDE)
        .min(buildable.depth);

    // grow the dimension with more slack first while short of the target
    while width * depth < target_sqft {
        let slack_w = buildable.width - width;
        let slack_d = buildable.depth - depth;
        if slack_w <= 0.0 && slack_d <= 0.0 {
            debug!(
                "Buildable area exhausted at {:.0}x{:.0} for a {:.0} ft² floor target",
                width, depth, target_sqft
            );
            break;
        }
        if slack_w >= slack_d {
            width += 1.0;
        } else {
            depth += 1.0;
        }
    }
    (width, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::types::{DesignBrief, LotConstraints, RoomRequirement, RoomType};

    #[test]
    fn setbacks_shape_the_buildable_rect() {
        let brief = DesignBrief {
            target_sqft: 1800.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![RoomRequirement::with_target(RoomType::Living, 275.0)],
            lot: Some(LotConstraints {
                lot_width: 110.0,
                lot_depth: 140.0,
                setback_front: 20.0,
                setback_side: 8.0,
                setback_rear: 25.0,
                ..Default::default()
            }),
        };
        let env = compute_envelope(&normalize(&brief));
        assert_eq!(env.buildable.x, 8.0);
        assert_eq!(env.buildable.y, 20.0);
        assert_eq!(env.buildable.width, 94.0);
        assert_eq!(env.buildable.depth, 95.0);
        assert!(env.buildable.contains(&env.footprint));
        assert!(env.footprint.area() >= env.per_floor_target_sqft.min(env.buildable.area()));
    }

    #[test]
    fn two_story_floors_share_the_footprint() {
        let brief = DesignBrief {
            target_sqft: 2400.0,
            stories: 2,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
            ],
            lot: None,
        };
        let env = compute_envelope(&normalize(&brief));
        assert_eq!(env.floor_rects.len(), 2);
        assert_eq!(env.floor_rect(1), env.floor_rect(2));
        // per-floor target halves the program before inflating
        assert!(env.per_floor_target_sqft < 2400.0);
    }
}
