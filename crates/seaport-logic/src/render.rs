//! Plain-text rendering of entities and the world tree.

use std::fmt;

use crate::entity::{Entity, EntityKind, ShipClass};
use crate::world::World;

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            EntityKind::Port => "SeaPort",
            EntityKind::Dock => "Dock",
            EntityKind::PassengerShip => "Passenger Ship",
            EntityKind::CargoShip => "Cargo Ship",
            EntityKind::Person => "Person",
            EntityKind::Job => "Job",
        };
        write!(f, "{}: {} {}", kind, self.name, self.id)
    }
}

/// Indented multi-line view of a whole world.
pub struct WorldTree<'a>(pub &'a World);

pub fn tree(world: &World) -> WorldTree<'_> {
    WorldTree(world)
}

impl fmt::Display for WorldTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let world = self.0;
        writeln!(f, ">>>>> The world:")?;
        for port in world.ports() {
            writeln!(f)?;
            writeln!(f, "{}", port)?;

            writeln!(f, "  Docks:")?;
            for dock in world.docks(port.id) {
                writeln!(f, "    {}", dock)?;
                if let Some(ship) = world.moored_ship(dock.id) {
                    writeln!(f, "      moored: {}", ship)?;
                }
            }

            writeln!(f, "  Ship Queue:")?;
            for ship in world.queue(port.id) {
                writeln!(f, "    {}", ship)?;
            }

            writeln!(f, "  All Ships:")?;
            for ship in world.ships(port.id) {
                writeln!(f, "    {}", ship)?;
                if let Some(data) = ship.as_ship() {
                    let specs = data.specs;
                    writeln!(
                        f,
                        "      weight {} length {} width {} draft {}",
                        specs.weight, specs.length, specs.width, specs.draft
                    )?;
                    match data.class {
                        ShipClass::Passenger {
                            passengers,
                            rooms,
                            occupied_rooms,
                        } => writeln!(
                            f,
                            "      passengers {} rooms {} occupied {}",
                            passengers, rooms, occupied_rooms
                        )?,
                        ShipClass::Cargo {
                            cargo_weight,
                            cargo_volume,
                            cargo_value,
                        } => writeln!(
                            f,
                            "      cargo weight {} volume {} value {}",
                            cargo_weight, cargo_volume, cargo_value
                        )?,
                    }
                }
                for job in world.jobs(ship.id) {
                    write!(f, "      {}", job)?;
                    if let Some(data) = job.as_job() {
                        write!(f, " ({}h", data.duration)?;
                        if !data.requirements.is_empty() {
                            write!(f, "; needs {}", data.requirements.join(", "))?;
                        }
                        write!(f, ")")?;
                    }
                    writeln!(f)?;
                }
            }

            writeln!(f, "  People:")?;
            for person in world.people(port.id) {
                let skill = person.as_person().map(|p| p.skill.as_str()).unwrap_or("");
                writeln!(f, "    {} ({})", person, skill)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world;

    #[test]
    fn test_entity_label() {
        let port = Entity::port("Boston", 1);
        assert_eq!(port.to_string(), "SeaPort: Boston 1");
    }

    #[test]
    fn test_tree_lists_moorings_queue_and_jobs() {
        let world = load_world(
            "port Boston 1 0\n\
             dock Pier_10 10 1\n\
             cship Hauler 20 10\n\
             pship Ferry 21 1\n\
             person Sara 40 1 crane\n\
             job Unload 30 10 4.5 crane\n",
        )
        .unwrap();
        let text = tree(&world).to_string();
        assert!(text.starts_with(">>>>> The world:\n"));
        assert!(text.contains("    Dock: Pier_10 10\n      moored: Cargo Ship: Hauler 20\n"));
        assert!(text.contains("  Ship Queue:\n    Passenger Ship: Ferry 21\n"));
        assert!(text.contains("      Job: Unload 30 (4.5h; needs crane)\n"));
        assert!(text.contains("    Person: Sara 40 (crane)\n"));
    }
}
