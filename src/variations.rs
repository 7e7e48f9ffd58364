// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Variation generation: re-run zoning and placement under perturbed
//! parameters to produce a family of candidate layouts
//!
//! The six strategies and their names are fixed. Mirrored variations reflect
//! room positions about the floor-rect midline and re-derive the exterior
//! wall set from the mirrored rectangle before circulation and windows run
//! again.

use log::info;

use crate::circulation::ensure_circulation;
use crate::placement::{exterior_dirs, place_rooms};
use crate::types::{
    BuildingEnvelope, NormalizedBrief, PlacedPlan, PlacementOptions, PlacementOrder,
    ZoningOptions,
};
use crate::utils::uuid_from_obj;
use crate::windows::assign_windows;
use crate::zoning::assign_zones;

/// One entry of the variation table
struct VariationSpec {
    name: &'static str,
    mirror_x: bool,
    mirror_y: bool,
    zoning: ZoningOptions,
    placement: PlacementOptions,
}

/// The fixed variation table
fn variation_specs() -> Vec<VariationSpec> {
    vec![
        VariationSpec {
            name: "base-greedy",
            mirror_x: false,
            mirror_y: false,
            zoning: ZoningOptions::default(),
            placement: PlacementOptions::default(),
        },
        VariationSpec {
            name: "mirror-x",
            mirror_x: true,
            mirror_y: false,
            zoning: ZoningOptions::default(),
            placement: PlacementOptions::default(),
        },
        VariationSpec {
            name: "swap-zones",
            mirror_x: false,
            mirror_y: false,
            zoning: ZoningOptions {
                swap_social_private: true,
                rotate_entry: false,
            },
            placement: PlacementOptions {
                order: PlacementOrder::Zone,
                width_bias: 0.0,
            },
        },
        VariationSpec {
            name: "rotate-entry",
            mirror_x: false,
            mirror_y: false,
            zoning: ZoningOptions {
                swap_social_private: false,
                rotate_entry: true,
            },
            placement: PlacementOptions {
                order: PlacementOrder::Priority,
                width_bias: 0.0,
            },
        },
        VariationSpec {
            name: "proportion-wide",
            mirror_x: false,
            mirror_y: false,
            zoning: ZoningOptions::default(),
            placement: PlacementOptions {
                order: PlacementOrder::Default,
                width_bias: 2.0,
            },
        },
        VariationSpec {
            name: "reverse-order-mirror-y",
            mirror_x: false,
            mirror_y: true,
            zoning: ZoningOptions::default(),
            placement: PlacementOptions {
                order: PlacementOrder::Reverse,
                width_bias: -1.0,
            },
        },
    ]
}

/// Generate the six parameter variations of a normalized brief
pub fn generate_variations(
    brief: &NormalizedBrief,
    envelope: &BuildingEnvelope,
) -> Vec<PlacedPlan> {
    variation_specs()
        .into_iter()
        .map(|spec| {
            let zoned = assign_zones(brief, envelope, &spec.zoning);
            let mut plan = place_rooms(&zoned, envelope, &spec.placement);
            if spec.mirror_x || spec.mirror_y {
                mirror_plan(&mut plan, spec.mirror_x, spec.mirror_y);
            }
            plan.meta.strategy = spec.name.to_string();
            plan.meta.mirror_x = spec.mirror_x;
            plan.meta.mirror_y = spec.mirror_y;
            plan.id = uuid_from_obj(&(
                spec.name,
                &plan.brief.target_sqft,
                plan.rooms.len(),
                plan.unplaced_room_ids.len(),
            ));
            let plan = assign_windows(ensure_circulation(plan));
            info!(
                "Variation {}: {} rooms placed, {} unplaced, connected={}",
                spec.name,
                plan.rooms.len(),
                plan.unplaced_room_ids.len(),
                plan.circulation
                    .as_ref()
                    .map(|c| c.is_fully_connected)
                    .unwrap_or(false)
            );
            plan
        })
        .collect()
}

/// Reflect room positions about the floor-rect midlines and re-derive the
/// exterior wall sets from the mirrored rectangles
fn mirror_plan(plan: &mut PlacedPlan, mirror_x: bool, mirror_y: bool) {
    for room in plan.rooms.iter_mut() {
        let fr = plan.envelope.floor_rect(room.floor);
        if mirror_x {
            room.x = 2.0 * fr.x + fr.width - room.x - room.width;
        }
        if mirror_y {
            room.y = 2.0 * fr.y + fr.depth - room.y - room.depth;
        }
        room.exterior_walls = exterior_dirs(&room.rect(), &fr);
        room.neighbors.clear();
    }
    // doors and windows are stale after mirroring; the follow-up circulation
    // and window stages rebuild them
    plan.doors.clear();
    plan.windows.clear();
    plan.circulation = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::types::{DesignBrief, RoomRequirement, RoomType};

    fn sample() -> (NormalizedBrief, BuildingEnvelope) {
        let nb = normalize(&DesignBrief {
            target_sqft: 1600.0,
            stories: 1,
            style: Default::default(),
            rooms: vec![
                RoomRequirement::with_target(RoomType::Living, 275.0),
                RoomRequirement::with_target(RoomType::Kitchen, 185.0),
                RoomRequirement::with_target(RoomType::Dining, 145.0),
                RoomRequirement::with_target(RoomType::PrimaryBed, 240.0),
                RoomRequirement::with_target(RoomType::Bathroom, 55.0),
            ],
            lot: None,
        });
        let env = compute_envelope(&nb);
        (nb, env)
    }

    #[test]
    fn six_fixed_strategies() {
        let (nb, env) = sample();
        let plans = generate_variations(&nb, &env);
        let names: Vec<&str> = plans.iter().map(|p| p.meta.strategy.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "base-greedy",
                "mirror-x",
                "swap-zones",
                "rotate-entry",
                "proportion-wide",
                "reverse-order-mirror-y"
            ]
        );
    }

    #[test]
    fn mirrored_rooms_stay_inside_with_fresh_exterior_walls() {
        let (nb, env) = sample();
        let plans = generate_variations(&nb, &env);
        let mirrored = &plans[1];
        for room in mirrored.rooms.iter() {
            let fr = mirrored.envelope.floor_rect(room.floor);
            assert!(fr.contains(&room.rect()), "{} escaped after mirroring", room.id);
            assert_eq!(room.exterior_walls, exterior_dirs(&room.rect(), &fr));
        }
    }

    #[test]
    fn variations_are_deterministic() {
        let (nb, env) = sample();
        let a = generate_variations(&nb, &env);
        let b = generate_variations(&nb, &env);
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.as_json().unwrap(), pb.as_json().unwrap());
        }
    }
}
