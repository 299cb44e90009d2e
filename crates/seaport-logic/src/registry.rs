//! Id-indexed entity store.
//!
//! `Registry` owns every entity in file order and keeps an id → slot index
//! for O(1) lookup. Ports are additionally tracked in their own ordered list
//! so parent probes can walk "every port's X" without touching the rest of
//! the world.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, PortData};
use crate::error::ResolveError;

/// One of the per-port sub-collections a parent probe can search.
///
/// Each variant maps to a plain accessor on [`PortData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortList {
    Docks,
    Ships,
    People,
    Queue,
}

impl PortList {
    pub fn of(self, port: &PortData) -> &[EntityId] {
        match self {
            PortList::Docks => &port.docks,
            PortList::Ships => &port.ships,
            PortList::People => &port.people,
            PortList::Queue => &port.queue,
        }
    }

    pub(crate) fn of_mut(self, port: &mut PortData) -> &mut Vec<EntityId> {
        match self {
            PortList::Docks => &mut port.docks,
            PortList::Ships => &mut port.ships,
            PortList::People => &mut port.people,
            PortList::Queue => &mut port.queue,
        }
    }
}

/// Append-only store of all entities for one loaded world.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Registry {
    entities: Vec<Entity>,
    #[serde(skip)]
    index: HashMap<EntityId, usize>,
    ports: Vec<EntityId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. Ports also join the ports list.
    ///
    /// Rejects an id that is already registered.
    pub fn register(&mut self, entity: Entity) -> Result<EntityId, ResolveError> {
        let id = entity.id;
        if self.index.contains_key(&id) {
            return Err(ResolveError::DuplicateId(id));
        }
        if entity.as_port().is_some() {
            self.ports.push(id);
        }
        self.index.insert(id, self.entities.len());
        self.entities.push(entity);
        Ok(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// All entities in registration (file) order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Port ids in registration order.
    pub fn port_ids(&self) -> &[EntityId] {
        &self.ports
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up a port by id. Returns `None` if the id is unknown or belongs
    /// to another kind.
    pub fn find_port_by_id(&self, id: EntityId) -> Option<&PortData> {
        self.get(id).and_then(Entity::as_port)
    }

    /// Search `list` of every port, in port order, for `id`.
    ///
    /// Returns the id of the first port whose list holds it.
    pub fn find_in_ports(&self, list: PortList, id: EntityId) -> Option<EntityId> {
        self.ports.iter().copied().find(|&port_id| {
            self.find_port_by_id(port_id)
                .is_some_and(|port| list.of(port).contains(&id))
        })
    }

    pub(crate) fn port_list_mut(
        &mut self,
        port: EntityId,
        list: PortList,
    ) -> Option<&mut Vec<EntityId>> {
        let port = self.get_mut(port)?.as_port_mut()?;
        Some(list.of_mut(port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_port() -> Registry {
        let mut registry = Registry::new();
        registry.register(Entity::port("Boston", 1)).unwrap();
        registry
    }

    #[test]
    fn test_register_tracks_order_and_ports() {
        let mut registry = registry_with_port();
        registry.register(Entity::dock("Pier", 10, 1)).unwrap();
        registry.register(Entity::port("Lanshan", 2)).unwrap();

        let ids: Vec<_> = registry.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 10, 2]);
        assert_eq!(registry.port_ids(), &[1, 2]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = registry_with_port();
        let err = registry.register(Entity::dock("Pier", 1, 1)).unwrap_err();
        assert_eq!(err, ResolveError::DuplicateId(1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(1).unwrap().name, "Boston");
    }

    #[test]
    fn test_find_port_by_id_ignores_other_kinds() {
        let mut registry = registry_with_port();
        registry.register(Entity::dock("Pier", 10, 1)).unwrap();
        assert!(registry.find_port_by_id(1).is_some());
        assert!(registry.find_port_by_id(10).is_none());
        assert!(registry.find_port_by_id(99).is_none());
    }

    #[test]
    fn test_find_in_ports_walks_selected_list() {
        let mut registry = registry_with_port();
        registry.register(Entity::port("Lanshan", 2)).unwrap();
        registry.register(Entity::dock("Pier", 10, 2)).unwrap();
        registry
            .port_list_mut(2, PortList::Docks)
            .unwrap()
            .push(10);

        assert_eq!(registry.find_in_ports(PortList::Docks, 10), Some(2));
        assert_eq!(registry.find_in_ports(PortList::Ships, 10), None);
        assert!(registry.port_list_mut(10, PortList::Docks).is_none());
    }
}
