// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Structural consistency check of a finished plan

use std::collections::HashSet;

use crate::types::{DoorType, PlacedPlan, Warning, WarningLevel};

impl PlacedPlan {
    /// Check the plan for structural defects and return the findings
    ///
    /// 1. Geometry that breaks the placement invariants:
    ///     - rooms outside their floor footprint
    ///     - overlapping rooms on the same floor
    /// 2. Dangling references:
    ///     - windows on walls that are not exterior walls of their room
    ///     - doors naming rooms the plan does not contain
    ///     - duplicate room ids
    pub fn check(&self) -> Vec<Warning> {
        use WarningLevel::{DANGER, WARNING};

        let mut warnings = Vec::new();

        let mut ids: HashSet<&str> = HashSet::new();
        for room in self.rooms.iter() {
            if !ids.insert(room.id.as_str()) {
                warnings.push(Warning::new(
                    WARNING,
                    Some(room.id.clone()),
                    format!("Duplicate room id {}", room.id),
                ));
            }
            let fr = self.envelope.floor_rect(room.floor);
            if !fr.contains(&room.rect()) {
                warnings.push(Warning::new(
                    DANGER,
                    Some(room.id.clone()),
                    format!(
                        "Room {} ({:.0},{:.0} {:.0}x{:.0}) outside its floor footprint",
                        room.id, room.x, room.y, room.width, room.depth
                    ),
                ));
            }
        }

        for (i, a) in self.rooms.iter().enumerate() {
            for b in self.rooms.iter().skip(i + 1) {
                if a.floor == b.floor && a.rect().overlaps(&b.rect()) {
                    warnings.push(Warning::new(
                        DANGER,
                        Some(a.id.clone()),
                        format!("Room {} overlaps room {}", a.id, b.id),
                    ));
                }
            }
        }

        for window in self.windows.iter() {
            match self.room(&window.room_id) {
                Some(room) => {
                    if !room.exterior_walls.contains(&window.direction) {
                        warnings.push(Warning::new(
                            WARNING,
                            Some(window.id.clone()),
                            format!(
                                "Window {} sits on the {} wall of {}, which is not exterior",
                                window.id, window.direction, window.room_id
                            ),
                        ));
                    }
                }
                None => warnings.push(Warning::new(
                    WARNING,
                    Some(window.id.clone()),
                    format!("Window {} references missing room {}", window.id, window.room_id),
                )),
            }
        }

        for door in self.doors.iter() {
            for room_id in door.connects.iter() {
                if self.room(room_id).is_none() {
                    warnings.push(Warning::new(
                        WARNING,
                        Some(door.id.clone()),
                        format!("Door {} references missing room {}", door.id, room_id),
                    ));
                }
            }
            if door.door_type != DoorType::Exterior
                && door.connects[0] != door.connects[1]
                && !self.are_neighbors(&door.connects[0], &door.connects[1])
            {
                warnings.push(Warning::new(
                    WARNING,
                    Some(door.id.clone()),
                    format!(
                        "Door {} connects {} and {}, which are not adjacent",
                        door.id, door.connects[0], door.connects[1]
                    ),
                ));
            }
        }

        warnings
    }
}
