//! The loaded port world and the functions that build it.
//!
//! A [`World`] is produced in one pass by [`load_world`] and is read-only
//! afterwards. Loading a new file produces a new value; callers replace
//! their old world only when the load succeeds.
//!
//! ```
//! use seaport_logic::world::load_world;
//!
//! let world = load_world(
//!     "port Boston 1 0\n\
//!      dock Pier_10 10 1\n\
//!      cship Hauler 20 10 100 50 20 8 5000 200 9999.5\n\
//!      job Unload 30 10 4.5 crane\n",
//! )
//! .unwrap();
//!
//! assert_eq!(world.moored_ship(10).map(|ship| ship.id), Some(20));
//! assert_eq!(world.jobs(20).count(), 1);
//! assert_eq!(world.queue(1).count(), 0);
//! ```

use std::io::Read;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::config::LoadOptions;
use crate::entity::{Entity, EntityId, PortData};
use crate::error::LoadError;
use crate::parse::records;
use crate::registry::{PortList, Registry};
use crate::resolve::{Resolver, SkippedRecord};

/// A fully resolved port world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    registry: Registry,
    #[serde(skip)]
    skipped: Vec<SkippedRecord>,
}

impl World {
    /// Every entity in file order.
    pub fn all_entities(&self) -> &[Entity] {
        self.registry.entities()
    }

    /// Ports in file order.
    pub fn ports(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.members(self.registry.port_ids())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn port(&self, id: EntityId) -> Option<&PortData> {
        self.registry.find_port_by_id(id)
    }

    pub fn docks(&self, port: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        self.port_members(port, PortList::Docks)
    }

    /// All ships at a port, moored or waiting.
    pub fn ships(&self, port: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        self.port_members(port, PortList::Ships)
    }

    pub fn people(&self, port: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        self.port_members(port, PortList::People)
    }

    /// Unmoored ships at a port, in arrival order.
    pub fn queue(&self, port: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        self.port_members(port, PortList::Queue)
    }

    /// The ship held by a dock, if any.
    pub fn moored_ship(&self, dock: EntityId) -> Option<&Entity> {
        let ship = self.entity(dock)?.as_dock()?.ship?;
        self.entity(ship)
    }

    pub fn jobs(&self, ship: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        let ids = self
            .entity(ship)
            .and_then(Entity::as_ship)
            .map(|ship| ship.jobs.as_slice())
            .unwrap_or(&[]);
        self.members(ids)
    }

    /// Records dropped by a lenient load. Always empty under the default
    /// options.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn summary(&self) -> WorldSummary {
        let mut summary = WorldSummary {
            skipped: self.skipped.len(),
            ..WorldSummary::default()
        };
        for port in self.registry.port_ids() {
            let Some(data) = self.port(*port) else {
                continue;
            };
            summary.ports += 1;
            summary.docks += data.docks.len();
            summary.ships += data.ships.len();
            summary.queued += data.queue.len();
            summary.people += data.people.len();
            summary.moored += self
                .docks(*port)
                .filter(|dock| self.moored_ship(dock.id).is_some())
                .count();
            summary.jobs += self
                .ships(*port)
                .map(|ship| self.jobs(ship.id).count())
                .sum::<usize>();
        }
        summary
    }

    fn members<'a>(&'a self, ids: &'a [EntityId]) -> impl Iterator<Item = &'a Entity> + 'a {
        ids.iter().filter_map(move |id| self.registry.get(*id))
    }

    fn port_members(
        &self,
        port: EntityId,
        list: PortList,
    ) -> impl Iterator<Item = &Entity> + '_ {
        let ids = self.port(port).map(|data| list.of(data)).unwrap_or(&[]);
        self.members(ids)
    }
}

/// Entity counts for a loaded world.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub ports: usize,
    pub docks: usize,
    pub ships: usize,
    pub moored: usize,
    pub queued: usize,
    pub people: usize,
    pub jobs: usize,
    pub skipped: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ports, {} docks, {} ships ({} moored, {} queued), {} people, {} jobs",
            self.ports, self.docks, self.ships, self.moored, self.queued, self.people, self.jobs
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Build a world from the full text of a world file with default options.
pub fn load_world(text: &str) -> Result<World, LoadError> {
    load_world_with(text, &LoadOptions::default())
}

/// Build a world from the full text of a world file.
///
/// Returns [`LoadError::Empty`] when no entity survives parsing and
/// resolution. A failed load never yields a partial world.
pub fn load_world_with(text: &str, options: &LoadOptions) -> Result<World, LoadError> {
    let mut resolver = Resolver::new(options.clone());
    for record in records(text) {
        match record {
            Ok(record) => {
                resolver.feed(record)?;
            }
            Err(error) => resolver.feed_malformed(error)?,
        }
    }

    let (registry, skipped) = resolver.into_parts();
    if registry.is_empty() {
        return Err(LoadError::Empty);
    }
    let world = World { registry, skipped };
    info!("Loaded world: {}", world.summary());
    Ok(world)
}

pub fn load_world_from_reader<R: Read>(
    mut reader: R,
    options: &LoadOptions,
) -> Result<World, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    load_world_with(&text, options)
}

/// Read and load a world file. A missing file is reported as
/// [`LoadError::FileNotFound`] before any parsing happens.
pub fn load_world_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<World, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;
    info!("Reading world file {}", path.display());
    load_world_with(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARBOR: &str = "\
port Boston 1 0
dock Pier_10 10 1
dock Pier_11 11 1
person Sara 40 1 crane
pship Ferry 21 11 100 50 20 8 300 150 120
cship Hauler 20 1 200 80 30 10 50000 2000 999999.99
job Board 31 11 2.0 steward
job Unload 30 20 4.5 crane
";

    fn ids<'a>(entities: impl Iterator<Item = &'a Entity>) -> Vec<EntityId> {
        entities.map(|e| e.id).collect()
    }

    #[test]
    fn test_load_builds_structure() {
        let world = load_world(HARBOR).unwrap();
        assert_eq!(world.len(), 8);
        assert_eq!(ids(world.ports()), vec![1]);
        assert_eq!(ids(world.docks(1)), vec![10, 11]);
        assert_eq!(ids(world.ships(1)), vec![21, 20]);
        assert_eq!(ids(world.queue(1)), vec![20]);
        assert_eq!(ids(world.people(1)), vec![40]);
        assert_eq!(world.moored_ship(11).map(|e| e.id), Some(21));
        assert!(world.moored_ship(10).is_none());
        assert_eq!(ids(world.jobs(21)), vec![31]);
        assert_eq!(ids(world.jobs(20)), vec![30]);
    }

    #[test]
    fn test_all_entities_in_file_order() {
        let world = load_world(HARBOR).unwrap();
        assert_eq!(
            ids(world.all_entities().iter()),
            vec![1, 10, 11, 40, 21, 20, 31, 30]
        );
    }

    #[test]
    fn test_summary_counts() {
        let summary = load_world(HARBOR).unwrap().summary();
        assert_eq!(
            summary,
            WorldSummary {
                ports: 1,
                docks: 2,
                ships: 2,
                moored: 1,
                queued: 1,
                people: 1,
                jobs: 2,
                skipped: 0,
            }
        );
        assert_eq!(
            summary.to_string(),
            "1 ports, 2 docks, 2 ships (1 moored, 1 queued), 1 people, 2 jobs"
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(load_world(""), Err(LoadError::Empty)));
        assert!(matches!(load_world("  \n\t\n   "), Err(LoadError::Empty)));
        assert!(matches!(
            load_world("// only comments\nharbor X 1 0\n"),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_unresolved_record_rejects_whole_load() {
        let text = "port Boston 1 0\njob Orphan 30 99 1.0\n";
        match load_world(text) {
            Err(LoadError::Resolve { line, error }) => {
                assert_eq!(line, 2);
                assert_eq!(error.entity(), 30);
            }
            other => panic!("expected resolve error, got {other:?}"),
        }
    }

    #[test]
    fn test_lenient_load_skips_bad_records() {
        let text = "port Boston 1 0\njob Orphan 30 99 1.0\ndock Broken x 1\ndock Pier 10 1\n";
        let world = load_world_with(text, &LoadOptions::lenient()).unwrap();
        assert_eq!(world.len(), 2);
        let lines: Vec<_> = world.skipped().iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(world.summary().skipped, 2);
    }

    #[test]
    fn test_lenient_load_with_nothing_left_is_empty() {
        let text = "dock Pier 10 1\n";
        assert!(matches!(
            load_world_with(text, &LoadOptions::lenient()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_malformed_line_rejects_by_default() {
        let err = load_world("port Boston one 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(ref e) if e.line == 1));
    }

    #[test]
    fn test_reader_and_missing_path() {
        let world = load_world_from_reader(HARBOR.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(world, load_world(HARBOR).unwrap());

        let err = load_world_from_path("/definitely/not/here.txt", &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_port_lookups_are_empty() {
        let world = load_world(HARBOR).unwrap();
        assert_eq!(world.docks(99).count(), 0);
        assert_eq!(world.ships(10).count(), 0);
        assert_eq!(world.jobs(1).count(), 0);
        assert!(world.port(10).is_none());
    }
}
