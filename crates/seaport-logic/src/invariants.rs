//! Structural checks over a loaded world.
//!
//! The loader maintains these by construction; `check_invariants` exists so
//! tests and front ends can confirm it on real data files.

use std::collections::HashMap;

use crate::entity::{EntityId, EntityKind};
use crate::world::World;

/// A structural rule broken by a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An entity is held by zero or several parent lists.
    Misplaced { id: EntityId, placements: usize },
    /// A ship must be either queued or moored, exactly once.
    ShipStatus {
        ship: EntityId,
        queued: usize,
        moored: usize,
    },
    /// A dock's moored ship is missing from its port's ship list.
    OrphanMooring { dock: EntityId, ship: EntityId },
    /// A queued ship is missing from the same port's ship list.
    QueuedElsewhere { port: EntityId, ship: EntityId },
    /// A list entry names an id that is not registered.
    DanglingId { holder: EntityId, id: EntityId },
    /// A list entry names an entity of the wrong kind.
    WrongKind {
        holder: EntityId,
        id: EntityId,
        found: EntityKind,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::Misplaced { id, placements } => {
                write!(f, "entity {} is held by {} parents", id, placements)
            }
            InvariantViolation::ShipStatus {
                ship,
                queued,
                moored,
            } => write!(
                f,
                "ship {} is queued {} times and moored {} times",
                ship, queued, moored
            ),
            InvariantViolation::OrphanMooring { dock, ship } => {
                write!(f, "dock {} holds ship {} outside its port", dock, ship)
            }
            InvariantViolation::QueuedElsewhere { port, ship } => {
                write!(f, "port {} queues ship {} it does not list", port, ship)
            }
            InvariantViolation::DanglingId { holder, id } => {
                write!(f, "{} references unknown id {}", holder, id)
            }
            InvariantViolation::WrongKind { holder, id, found } => {
                write!(f, "{} references {} which is a {}", holder, id, found.label())
            }
        }
    }
}

/// Check every structural rule, returning all violations found.
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut placements: HashMap<EntityId, usize> = HashMap::new();
    let mut queued: HashMap<EntityId, usize> = HashMap::new();
    let mut moored: HashMap<EntityId, usize> = HashMap::new();

    for port in world.ports() {
        *placements.entry(port.id).or_default() += 1;
        let Some(data) = port.as_port() else {
            continue;
        };
        for &dock in &data.docks {
            violations.extend(check_kind(world, port.id, dock, |k| k == EntityKind::Dock));
            *placements.entry(dock).or_default() += 1;
        }
        for &person in &data.people {
            violations.extend(check_kind(world, port.id, person, |k| k == EntityKind::Person));
            *placements.entry(person).or_default() += 1;
        }
        for &ship in &data.ships {
            violations.extend(check_kind(world, port.id, ship, EntityKind::is_ship));
            *placements.entry(ship).or_default() += 1;
        }
        for &ship in &data.queue {
            *queued.entry(ship).or_default() += 1;
            if !data.ships.contains(&ship) {
                violations.push(InvariantViolation::QueuedElsewhere {
                    port: port.id,
                    ship,
                });
            }
        }
        for dock in world.docks(port.id) {
            let Some(ship) = dock.as_dock().and_then(|d| d.ship) else {
                continue;
            };
            *moored.entry(ship).or_default() += 1;
            if !data.ships.contains(&ship) {
                violations.push(InvariantViolation::OrphanMooring {
                    dock: dock.id,
                    ship,
                });
            }
        }
        for ship in world.ships(port.id) {
            for &job in ship.as_ship().map(|s| s.jobs.as_slice()).unwrap_or(&[]) {
                violations.extend(check_kind(world, ship.id, job, |k| k == EntityKind::Job));
                *placements.entry(job).or_default() += 1;
            }
        }
    }

    for entity in world.all_entities() {
        let count = placements.get(&entity.id).copied().unwrap_or(0);
        if count != 1 {
            violations.push(InvariantViolation::Misplaced {
                id: entity.id,
                placements: count,
            });
        }
        if entity.kind().is_ship() {
            let q = queued.get(&entity.id).copied().unwrap_or(0);
            let m = moored.get(&entity.id).copied().unwrap_or(0);
            if q + m != 1 {
                violations.push(InvariantViolation::ShipStatus {
                    ship: entity.id,
                    queued: q,
                    moored: m,
                });
            }
        }
    }

    violations
}

fn check_kind(
    world: &World,
    holder: EntityId,
    id: EntityId,
    ok: fn(EntityKind) -> bool,
) -> Option<InvariantViolation> {
    match world.entity(id) {
        None => Some(InvariantViolation::DanglingId { holder, id }),
        Some(entity) if !ok(entity.kind()) => Some(InvariantViolation::WrongKind {
            holder,
            id,
            found: entity.kind(),
        }),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::world::{load_world, load_world_with};

    #[test]
    fn test_well_formed_world_has_no_violations() {
        let world = load_world(
            "port Boston 1 0\n\
             port Lanshan 2 0\n\
             dock Pier_10 10 1\n\
             dock Pier_12 12 2\n\
             person Sara 40 2 crane\n\
             cship Hauler 20 10\n\
             pship Ferry 21 2\n\
             pship Tender 22 12\n\
             job Unload 30 10 4.0 crane\n\
             job Board 31 21 1.0\n\
             job Refuel 32 22 3.0\n",
        )
        .unwrap();
        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "unexpected violations: {violations:?}");
    }

    #[test]
    fn test_lenient_world_keeps_invariants() {
        let world = load_world_with(
            "port Boston 1 0\n\
             dock Pier_10 10 1\n\
             cship Hauler 20 10\n\
             cship Crowder 21 10\n\
             job Ghost 30 21 1.0\n\
             job Unload 31 10 2.0\n",
            &LoadOptions::lenient(),
        )
        .unwrap();
        assert_eq!(world.skipped().len(), 2);
        assert!(check_invariants(&world).is_empty());
    }

    #[test]
    fn test_violation_messages() {
        let v = InvariantViolation::ShipStatus {
            ship: 20,
            queued: 1,
            moored: 1,
        };
        assert_eq!(v.to_string(), "ship 20 is queued 1 times and moored 1 times");
        let v = InvariantViolation::WrongKind {
            holder: 1,
            id: 40,
            found: EntityKind::Person,
        };
        assert_eq!(v.to_string(), "1 references 40 which is a Person");
    }
}
