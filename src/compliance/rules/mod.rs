// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Base rule library, grouped by category
//!
//! Every rule is a pure function of plan + context. The library seeds the
//! engine registry together with the jurisdiction-specific additions.

mod accessibility;
mod bathrooms;
mod egress;
mod energy;
mod hallways;
mod kitchens;
mod room_minimums;
mod structural;

use std::collections::HashSet;
use std::collections::VecDeque;

use crate::types::{PlacedPlan, PlacedRoom, RoomType};

use super::context::ComplianceContext;
use super::jurisdictions;
use super::rule::Rule;

pub(crate) use energy::window_wall_ratio;

/// The complete rule library the engine registers at construction:
/// the IRC base rules plus the jurisdiction-restricted additions
pub fn base_library() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(room_minimums::rules());
    rules.extend(egress::rules());
    rules.extend(bathrooms::rules());
    rules.extend(kitchens::rules());
    rules.extend(hallways::rules());
    rules.extend(accessibility::rules());
    rules.extend(structural::rules());
    rules.extend(energy::rules());
    rules.extend(jurisdictions::extra_rules());
    rules
}

// Shared helpers -----------------------------------------------

/// Feet to inches
#[inline]
pub(crate) fn inches(feet: f32) -> f32 {
    feet * 12.0
}

/// Sleeping rooms of the plan
pub(crate) fn bedrooms(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type.is_bedroom())
}

/// Bath rooms of the plan (full and half)
pub(crate) fn baths(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type.is_bath())
}

/// Full baths only
pub(crate) fn full_baths(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms
        .iter()
        .filter(|r| matches!(r.room_type, RoomType::Bathroom | RoomType::PrimaryBath))
}

/// Assumed ceiling height: the context parameter wins over the rule config
pub(crate) fn ceiling_height(rule: &Rule, ctx: &ComplianceContext) -> f32 {
    ctx.param_f32("ceiling_height_ft")
        .unwrap_or_else(|| rule.config_f32("default_ceiling_height_ft", 9.0))
}

/// Total glazed area of the plan (ft²)
pub(crate) fn total_window_area(plan: &PlacedPlan) -> f32 {
    plan.windows.iter().map(|w| w.area()).sum()
}

/// Gross exterior wall area at the assumed ceiling height (ft²)
pub(crate) fn exterior_wall_area(plan: &PlacedPlan, wall_height: f32) -> f32 {
    plan.rooms
        .iter()
        .flat_map(|r| r.exterior_walls.iter().map(move |d| r.wall_length(*d)))
        .sum::<f32>()
        * wall_height
}

/// Rooms reachable from the circulation entry over the neighbor graph
pub(crate) fn reachable_from_entry(plan: &PlacedPlan) -> HashSet<&str> {
    let entry = plan
        .circulation
        .as_ref()
        .map(|c| c.entry_room_id.as_str())
        .or_else(|| plan.rooms.first().map(|r| r.id.as_str()));
    let mut seen: HashSet<&str> = HashSet::new();
    let entry = match entry {
        Some(e) => e,
        None => return seen,
    };
    let mut queue = VecDeque::new();
    seen.insert(entry);
    queue.push_back(entry);
    while let Some(id) = queue.pop_front() {
        if let Some(room) = plan.room(id) {
            for n in room.neighbors.iter() {
                if seen.insert(n.as_str()) {
                    queue.push_back(n.as_str());
                }
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::rule::RuleCategory;

    #[test]
    fn library_category_counts() {
        let library = base_library();
        let count = |cat: RuleCategory| {
            library
                .iter()
                .filter(|r| r.category == cat && r.jurisdictions.is_empty())
                .count()
        };
        assert_eq!(count(RuleCategory::RoomMinimums), 8);
        assert_eq!(count(RuleCategory::Egress), 9);
        assert_eq!(count(RuleCategory::Bathrooms), 6);
        assert_eq!(count(RuleCategory::Kitchens), 4);
        assert_eq!(count(RuleCategory::Hallways), 4);
        assert_eq!(count(RuleCategory::Accessibility), 10);
        assert_eq!(count(RuleCategory::Structural), 7);
        assert_eq!(count(RuleCategory::Energy), 7);
    }

    #[test]
    fn rule_ids_are_unique() {
        let library = base_library();
        let mut seen = HashSet::new();
        for rule in library.iter() {
            assert!(seen.insert(rule.id.clone()), "duplicate rule id {}", rule.id);
        }
    }
}
