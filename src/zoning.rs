// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Zoning: partition each floor footprint into semantic regions
//!
//! The regions are anchor generators for the placer, not exclusive claims;
//! they may overlap. The front strip follows the entry-facing side.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point2, Rect};
use crate::types::{
    BuildingEnvelope, Direction, NormalizedBrief, RoomType, Zone, ZoningOptions,
};

/// Fraction of the footprint depth given to the front (social) strip
const FRONT_STRIP_FRACTION: f32 = 0.46;
/// Fraction of the footprint width given to the service strip (east edge)
const SERVICE_STRIP_FRACTION: f32 = 0.24;
/// Garage block fractions (width × depth), NW corner
const GARAGE_BLOCK_FRACTION: (f32, f32) = (0.35, 0.42);
/// Fraction of the footprint width given to the circulation spine
const CIRCULATION_SPINE_FRACTION: f32 = 0.16;
/// Fraction of the footprint depth given to the exterior strip (entry face)
const EXTERIOR_STRIP_FRACTION: f32 = 0.12;

/// A zone region on one floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRegion {
    /// Zone the region anchors
    pub zone: Zone,
    /// Region rectangle (lot coordinates)
    pub rect: Rect,
    /// Anchor point, the region centroid
    pub anchor: Point2,
}

/// Brief with floors assigned and zone regions laid out per floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonedPlan {
    /// Brief with final floor assignments
    pub brief: NormalizedBrief,
    /// Zone regions per floor
    pub zones: BTreeMap<u8, Vec<ZoneRegion>>,
    /// Options the zoning ran under
    pub options: ZoningOptions,
    /// Entry side after the optional rotation
    pub entry_side: Direction,
}

impl ZonedPlan {
    /// Anchor of a zone on a floor; falls back to the footprint center
    pub fn anchor(&self, floor: u8, zone: Zone, envelope: &BuildingEnvelope) -> Point2 {
        self.zones
            .get(&floor)
            .and_then(|regions| regions.iter().find(|r| r.zone == zone))
            .map(|r| r.anchor)
            .unwrap_or_else(|| envelope.floor_rect(floor).center())
    }
}

/// Partition the footprint into zone regions and assign rooms to floors
pub fn assign_zones(
    brief: &NormalizedBrief,
    envelope: &BuildingEnvelope,
    options: &ZoningOptions,
) -> ZonedPlan {
    let entry_side = if options.rotate_entry {
        brief.entry_facing.opposite()
    } else {
        brief.entry_facing
    };

    let mut zones = BTreeMap::new();
    for (&floor, rect) in envelope.floor_rects.iter() {
        zones.insert(floor, floor_regions(rect, entry_side, options));
    }

    let mut brief = brief.clone();
    assign_floors(&mut brief);

    info!(
        "Zoned {} floors, entry side {} (swap={}, rotate={})",
        zones.len(),
        entry_side,
        options.swap_social_private,
        options.rotate_entry
    );

    ZonedPlan {
        brief,
        zones,
        options: *options,
        entry_side,
    }
}

/// Carve the zone regions of one floor
fn floor_regions(fp: &Rect, entry_side: Direction, options: &ZoningOptions) -> Vec<ZoneRegion> {
    let (front, back) = split_front_back(fp, entry_side, FRONT_STRIP_FRACTION);
    let (social, private) = if options.swap_social_private {
        (back, front)
    } else {
        (front, back)
    };

    let service_w = frac(fp.width, SERVICE_STRIP_FRACTION);
    let service = Rect::new(fp.right() - service_w, fp.y, service_w, fp.depth);

    let garage_w = frac(fp.width, GARAGE_BLOCK_FRACTION.0);
    let garage_d = frac(fp.depth, GARAGE_BLOCK_FRACTION.1);
    let garage = Rect::new(fp.x, fp.top() - garage_d, garage_w, garage_d);

    let spine_w = frac(fp.width, CIRCULATION_SPINE_FRACTION);
    let circulation = Rect::new(
        fp.x + ((fp.width - spine_w) / 2.0).floor(),
        fp.y,
        spine_w,
        fp.depth,
    );

    let exterior = edge_strip(fp, entry_side, EXTERIOR_STRIP_FRACTION);

    let regions = vec![
        (Zone::Social, social),
        (Zone::Private, private),
        (Zone::Service, service),
        (Zone::Garage, garage),
        (Zone::Circulation, circulation),
        (Zone::Exterior, exterior),
    ];
    regions
        .into_iter()
        .map(|(zone, rect)| {
            debug!(
                "Zone {} at ({:.0}, {:.0}) {:.0}x{:.0}",
                zone, rect.x, rect.y, rect.width, rect.depth
            );
            ZoneRegion {
                zone,
                rect,
                anchor: rect.center(),
            }
        })
        .collect()
}

/// Split the footprint into a front strip on the entry side and the back rest
fn split_front_back(fp: &Rect, entry_side: Direction, fraction: f32) -> (Rect, Rect) {
    match entry_side {
        Direction::South => {
            let d = frac(fp.depth, fraction);
            (
                Rect::new(fp.x, fp.y, fp.width, d),
                Rect::new(fp.x, fp.y + d, fp.width, fp.depth - d),
            )
        }
        Direction::North => {
            let d = frac(fp.depth, fraction);
            (
                Rect::new(fp.x, fp.top() - d, fp.width, d),
                Rect::new(fp.x, fp.y, fp.width, fp.depth - d),
            )
        }
        Direction::East => {
            let w = frac(fp.width, fraction);
            (
                Rect::new(fp.right() - w, fp.y, w, fp.depth),
                Rect::new(fp.x, fp.y, fp.width - w, fp.depth),
            )
        }
        Direction::West => {
            let w = frac(fp.width, fraction);
            (
                Rect::new(fp.x, fp.y, w, fp.depth),
                Rect::new(fp.x + w, fp.y, fp.width - w, fp.depth),
            )
        }
    }
}

/// Thin strip along the given footprint edge
fn edge_strip(fp: &Rect, side: Direction, fraction: f32) -> Rect {
    match side {
        Direction::South => Rect::new(fp.x, fp.y, fp.width, frac(fp.depth, fraction)),
        Direction::North => {
            let d = frac(fp.depth, fraction);
            Rect::new(fp.x, fp.top() - d, fp.width, d)
        }
        Direction::East => {
            let w = frac(fp.width, fraction);
            Rect::new(fp.right() - w, fp.y, w, fp.depth)
        }
        Direction::West => Rect::new(fp.x, fp.y, frac(fp.width, fraction), fp.depth),
    }
}

#[inline]
fn frac(extent: f32, fraction: f32) -> f32 {
    (extent * fraction).round().max(1.0)
}

/// Send unpinned private rooms upstairs on two-story programs; stairs stay on
/// the first floor
fn assign_floors(brief: &mut NormalizedBrief) {
    if brief.stories < 2 {
        for room in brief.rooms.iter_mut() {
            room.floor = 1;
        }
        return;
    }
    for room in brief.rooms.iter_mut() {
        if room.room_type == RoomType::Stairs {
            room.floor = 1;
        } else if !room.floor_pinned {
            room.floor = if room.zone == Zone::Private { 2 } else { 1 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::types::{DesignBrief, RoomRequirement};

    fn sample_brief(stories: u8) -> NormalizedBrief {
        normalize(&DesignBrief {
            target_sqft: 2000.0,
            stories,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Bedroom, 140.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
                RoomRequirement::with_target(RoomType::Garage, 450.0),
            ],
            lot: None,
        })
    }

    #[test]
    fn regions_stay_inside_the_footprint() {
        let brief = sample_brief(1);
        let env = compute_envelope(&brief);
        let zoned = assign_zones(&brief, &env, &ZoningOptions::default());
        for region in zoned.zones.get(&1).unwrap() {
            assert!(
                env.footprint.contains(&region.rect),
                "region {} escapes the footprint",
                region.zone
            );
        }
    }

    #[test]
    fn private_rooms_go_upstairs() {
        let brief = sample_brief(2);
        let env = compute_envelope(&brief);
        let zoned = assign_zones(&brief, &env, &ZoningOptions::default());
        for room in zoned.brief.rooms.iter() {
            match room.room_type {
                RoomType::Stairs => assert_eq!(room.floor, 1),
                _ if room.zone == Zone::Private => assert_eq!(room.floor, 2, "{}", room.id),
                _ => assert_eq!(room.floor, 1, "{}", room.id),
            }
        }
    }

    #[test]
    fn rotate_entry_flips_the_front_strip() {
        let brief = sample_brief(1);
        let env = compute_envelope(&brief);
        let base = assign_zones(&brief, &env, &ZoningOptions::default());
        let rotated = assign_zones(
            &brief,
            &env,
            &ZoningOptions {
                rotate_entry: true,
                ..Default::default()
            },
        );
        let social_y = |z: &ZonedPlan| {
            z.zones.get(&1).unwrap()[0].rect.y
        };
        assert!(social_y(&rotated) > social_y(&base));
    }
}
