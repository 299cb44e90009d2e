//! Parent resolution: attaches each record to its place in the port graph.
//!
//! Records name their parent only by id, and the kind of that parent is not
//! always fixed:
//!
//! | Record | Parent | Probe order |
//! |--------|--------|-------------|
//! | dock   | port   | ports |
//! | person | port   | ports |
//! | ship   | dock or port | every port's docks, then ports |
//! | job    | ship or dock | every port's ships, then every port's docks |
//!
//! A ship whose parent is a dock is moored there; otherwise it joins its
//! port's arrival queue. A job whose parent is a dock belongs to the ship
//! moored at that dock.
//!
//! Resolution is single pass. A parent must be registered before any record
//! that names it, so forward references fail as unknown parents.

use log::{debug, warn};
use serde::Serialize;

use crate::config::{LoadOptions, UnresolvedPolicy};
use crate::entity::{Entity, EntityId, EntityKind};
use crate::error::{LoadError, ParseError, ParseErrorKind, ResolveError};
use crate::parse::Record;
use crate::registry::{PortList, Registry};

/// Where a resolved record was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    /// A port; top level of the world.
    Port,
    /// Appended to a port's docks.
    Dock { port: EntityId },
    /// Appended to a port's people.
    Person { port: EntityId },
    /// Appended to the port's ships and held in the dock's slot.
    Moored { port: EntityId, dock: EntityId },
    /// Appended to the port's ships and its arrival queue.
    Queued { port: EntityId },
    /// Appended to a ship's jobs. `via_dock` is set when the record named the
    /// dock holding the ship rather than the ship itself.
    Job {
        ship: EntityId,
        via_dock: Option<EntityId>,
    },
}

/// Parent lookup strategy for one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentRule {
    /// No parent to resolve.
    Root,
    /// Parent is always a port; attach into the given list.
    Port(PortList),
    /// Dock first, then port.
    DockOrPort,
    /// Ship first, then the ship moored at a dock.
    ShipOrDock,
}

impl ParentRule {
    fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Port => ParentRule::Root,
            EntityKind::Dock => ParentRule::Port(PortList::Docks),
            EntityKind::Person => ParentRule::Port(PortList::People),
            EntityKind::PassengerShip | EntityKind::CargoShip => ParentRule::DockOrPort,
            EntityKind::Job => ParentRule::ShipOrDock,
        }
    }
}

/// Work out where `entity` belongs without modifying the registry.
pub fn resolve(registry: &Registry, entity: &Entity) -> Result<Placement, ResolveError> {
    let id = entity.id;
    let parent = || entity.parent.ok_or(ResolveError::MissingParent(id));

    match ParentRule::for_kind(entity.kind()) {
        ParentRule::Root => Ok(Placement::Port),
        ParentRule::Port(list) => {
            let parent = parent()?;
            if registry.find_port_by_id(parent).is_none() {
                return Err(ResolveError::UnknownPort { id, parent });
            }
            Ok(match list {
                PortList::People => Placement::Person { port: parent },
                _ => Placement::Dock { port: parent },
            })
        }
        ParentRule::DockOrPort => resolve_ship(registry, id, parent()?),
        ParentRule::ShipOrDock => resolve_job(registry, id, parent()?),
    }
}

fn resolve_ship(
    registry: &Registry,
    id: EntityId,
    parent: EntityId,
) -> Result<Placement, ResolveError> {
    // Docks and ports share one id space; the dock probe must run first.
    if let Some(port) = registry.find_in_ports(PortList::Docks, parent) {
        let moored = registry
            .get(parent)
            .and_then(Entity::as_dock)
            .and_then(|dock| dock.ship);
        if let Some(moored) = moored {
            return Err(ResolveError::DockOccupied {
                id,
                dock: parent,
                moored,
            });
        }
        return Ok(Placement::Moored { port, dock: parent });
    }

    if registry.find_port_by_id(parent).is_some() {
        return Ok(Placement::Queued { port: parent });
    }

    Err(ResolveError::UnknownShipParent { id, parent })
}

fn resolve_job(
    registry: &Registry,
    id: EntityId,
    parent: EntityId,
) -> Result<Placement, ResolveError> {
    if registry.find_in_ports(PortList::Ships, parent).is_some() {
        return Ok(Placement::Job {
            ship: parent,
            via_dock: None,
        });
    }

    if registry.find_in_ports(PortList::Docks, parent).is_some() {
        return registry
            .get(parent)
            .and_then(Entity::as_dock)
            .and_then(|dock| dock.ship)
            .map(|ship| Placement::Job {
                ship,
                via_dock: Some(parent),
            })
            .ok_or(ResolveError::NoMooredShip { id, dock: parent });
    }

    Err(ResolveError::UnknownJobParent { id, parent })
}

/// Resolve `entity`, register it, and link it into its parent's lists.
///
/// On error the registry is left exactly as it was.
pub fn attach(registry: &mut Registry, entity: Entity) -> Result<Placement, ResolveError> {
    if registry.contains(entity.id) {
        return Err(ResolveError::DuplicateId(entity.id));
    }
    let placement = resolve(registry, &entity)?;
    let id = registry.register(entity)?;
    link(registry, id, placement);
    Ok(placement)
}

fn link(registry: &mut Registry, id: EntityId, placement: Placement) {
    match placement {
        Placement::Port => {}
        Placement::Dock { port } => push(registry, port, PortList::Docks, id),
        Placement::Person { port } => push(registry, port, PortList::People, id),
        Placement::Queued { port } => {
            push(registry, port, PortList::Ships, id);
            push(registry, port, PortList::Queue, id);
        }
        Placement::Moored { port, dock } => {
            push(registry, port, PortList::Ships, id);
            if let Some(slot) = registry.get_mut(dock).and_then(Entity::as_dock_mut) {
                slot.ship = Some(id);
            }
        }
        Placement::Job { ship, .. } => {
            if let Some(ship) = registry.get_mut(ship).and_then(Entity::as_ship_mut) {
                ship.jobs.push(id);
            }
        }
    }
}

fn push(registry: &mut Registry, port: EntityId, list: PortList, id: EntityId) {
    if let Some(ids) = registry.port_list_mut(port, list) {
        ids.push(id);
    }
}

/// Why a record was left out of a world loaded with a lenient policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Malformed(ParseErrorKind),
    Unresolved(ResolveError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed(kind) => match kind {
                ParseErrorKind::MissingField(field) => write!(f, "missing field `{}`", field),
                ParseErrorKind::InvalidNumber { field, token } => {
                    write!(f, "field `{}` expects a number, found `{}`", field, token)
                }
            },
            SkipReason::Unresolved(e) => write!(f, "{}", e),
        }
    }
}

/// A record dropped during a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based source line.
    pub line: usize,
    pub reason: SkipReason,
}

/// Single-pass builder that feeds records into a fresh registry.
pub struct Resolver {
    registry: Registry,
    options: LoadOptions,
    skipped: Vec<SkippedRecord>,
}

impl Resolver {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            registry: Registry::new(),
            options,
            skipped: Vec::new(),
        }
    }

    /// Attach one parsed record.
    ///
    /// Duplicate ids always fail. Other resolution failures fail or are
    /// skipped according to [`LoadOptions::on_unresolved`].
    pub fn feed(&mut self, record: Record) -> Result<Option<Placement>, LoadError> {
        let Record { line, entity } = record;
        let (id, kind) = (entity.id, entity.kind());
        match attach(&mut self.registry, entity) {
            Ok(placement) => {
                debug!(
                    "line {}: {} {} -> {:?}",
                    line,
                    kind.label(),
                    id,
                    placement
                );
                Ok(Some(placement))
            }
            Err(error @ ResolveError::DuplicateId(_)) => Err(LoadError::Resolve { line, error }),
            Err(error) => match self.options.on_unresolved {
                UnresolvedPolicy::Reject => Err(LoadError::Resolve { line, error }),
                UnresolvedPolicy::Skip => {
                    warn!("line {}: skipping {}: {}", line, kind.label(), error);
                    self.skipped.push(SkippedRecord {
                        line,
                        reason: SkipReason::Unresolved(error),
                    });
                    Ok(None)
                }
            },
        }
    }

    /// Handle a line that failed to parse.
    pub fn feed_malformed(&mut self, error: ParseError) -> Result<(), LoadError> {
        match self.options.on_malformed {
            UnresolvedPolicy::Reject => Err(LoadError::Parse(error)),
            UnresolvedPolicy::Skip => {
                warn!("skipping malformed record: {}", error);
                self.skipped.push(SkippedRecord {
                    line: error.line,
                    reason: SkipReason::Malformed(error.kind),
                });
                Ok(())
            }
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_parts(self) -> (Registry, Vec<SkippedRecord>) {
        (self.registry, self.skipped)
    }
}
