//! Entity types for the port world.
//!
//! Every record in a world file becomes one [`Entity`]: a name, a unique
//! [`EntityId`], an optional declared parent, and a kind-specific
//! [`Payload`]. Structural links (a port's docks, a dock's moored ship, a
//! ship's jobs) are stored as plain ids; the registry is the only owner of
//! entity data.

use serde::{Deserialize, Serialize};

/// Identifier shared by every entity kind. Ports, docks, ships, people and
/// jobs all live in one id namespace.
pub type EntityId = u32;

/// Closed set of record kinds, keyed by the discriminator token in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Port,
    Dock,
    PassengerShip,
    CargoShip,
    Person,
    Job,
}

impl EntityKind {
    /// All kinds in declaration order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Port,
        EntityKind::Dock,
        EntityKind::PassengerShip,
        EntityKind::CargoShip,
        EntityKind::Person,
        EntityKind::Job,
    ];

    /// Look up a kind by its line discriminator (`port`, `dock`, `pship`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "port" => Some(EntityKind::Port),
            "dock" => Some(EntityKind::Dock),
            "pship" => Some(EntityKind::PassengerShip),
            "cship" => Some(EntityKind::CargoShip),
            "person" => Some(EntityKind::Person),
            "job" => Some(EntityKind::Job),
            _ => None,
        }
    }

    /// The discriminator token used in world files.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Port => "port",
            EntityKind::Dock => "dock",
            EntityKind::PassengerShip => "pship",
            EntityKind::CargoShip => "cship",
            EntityKind::Person => "person",
            EntityKind::Job => "job",
        }
    }

    /// Human-readable kind name.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Port => "SeaPort",
            EntityKind::Dock => "Dock",
            EntityKind::PassengerShip => "PassengerShip",
            EntityKind::CargoShip => "CargoShip",
            EntityKind::Person => "Person",
            EntityKind::Job => "Job",
        }
    }

    pub fn is_ship(self) -> bool {
        matches!(self, EntityKind::PassengerShip | EntityKind::CargoShip)
    }
}

/// Sub-collections a port keeps. Parent probes walk one of these lists
/// across every port.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortData {
    pub docks: Vec<EntityId>,
    /// Every ship at the port, moored or waiting.
    pub ships: Vec<EntityId>,
    pub people: Vec<EntityId>,
    /// Unmoored ships in arrival order.
    pub queue: Vec<EntityId>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockData {
    /// Ship currently moored here. Non-owning: the ship lives in the
    /// owning port's `ships` list.
    pub ship: Option<EntityId>,
}

/// Hull measurements common to every ship.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpecs {
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub draft: f64,
}

/// Variant-specific ship payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShipClass {
    Passenger {
        passengers: u32,
        rooms: u32,
        occupied_rooms: u32,
    },
    Cargo {
        cargo_weight: f64,
        cargo_volume: f64,
        cargo_value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipData {
    pub specs: ShipSpecs,
    pub class: ShipClass,
    pub jobs: Vec<EntityId>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonData {
    pub skill: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobData {
    /// Duration in hours.
    pub duration: f64,
    /// Skills a worker needs for this job. May repeat.
    pub requirements: Vec<String>,
}

/// Kind-specific data carried by an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Port(PortData),
    Dock(DockData),
    Ship(ShipData),
    Person(PersonData),
    Job(JobData),
}

/// One parsed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub id: EntityId,
    /// Declared parent id. `None` only for ports.
    pub parent: Option<EntityId>,
    pub payload: Payload,
}

impl Entity {
    pub fn port(name: impl Into<String>, id: EntityId) -> Self {
        Self {
            name: name.into(),
            id,
            parent: None,
            payload: Payload::Port(PortData::default()),
        }
    }

    pub fn dock(name: impl Into<String>, id: EntityId, parent: EntityId) -> Self {
        Self {
            name: name.into(),
            id,
            parent: Some(parent),
            payload: Payload::Dock(DockData::default()),
        }
    }

    pub fn ship(
        name: impl Into<String>,
        id: EntityId,
        parent: EntityId,
        specs: ShipSpecs,
        class: ShipClass,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            parent: Some(parent),
            payload: Payload::Ship(ShipData {
                specs,
                class,
                jobs: Vec::new(),
            }),
        }
    }

    pub fn person(
        name: impl Into<String>,
        id: EntityId,
        parent: EntityId,
        skill: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            parent: Some(parent),
            payload: Payload::Person(PersonData {
                skill: skill.into(),
            }),
        }
    }

    pub fn job(name: impl Into<String>, id: EntityId, parent: EntityId, data: JobData) -> Self {
        Self {
            name: name.into(),
            id,
            parent: Some(parent),
            payload: Payload::Job(data),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match &self.payload {
            Payload::Port(_) => EntityKind::Port,
            Payload::Dock(_) => EntityKind::Dock,
            Payload::Ship(ship) => match ship.class {
                ShipClass::Passenger { .. } => EntityKind::PassengerShip,
                ShipClass::Cargo { .. } => EntityKind::CargoShip,
            },
            Payload::Person(_) => EntityKind::Person,
            Payload::Job(_) => EntityKind::Job,
        }
    }

    pub fn as_port(&self) -> Option<&PortData> {
        match &self.payload {
            Payload::Port(port) => Some(port),
            _ => None,
        }
    }

    pub fn as_dock(&self) -> Option<&DockData> {
        match &self.payload {
            Payload::Dock(dock) => Some(dock),
            _ => None,
        }
    }

    pub fn as_ship(&self) -> Option<&ShipData> {
        match &self.payload {
            Payload::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_person(&self) -> Option<&PersonData> {
        match &self.payload {
            Payload::Person(person) => Some(person),
            _ => None,
        }
    }

    pub fn as_job(&self) -> Option<&JobData> {
        match &self.payload {
            Payload::Job(job) => Some(job),
            _ => None,
        }
    }

    pub(crate) fn as_port_mut(&mut self) -> Option<&mut PortData> {
        match &mut self.payload {
            Payload::Port(port) => Some(port),
            _ => None,
        }
    }

    pub(crate) fn as_dock_mut(&mut self) -> Option<&mut DockData> {
        match &mut self.payload {
            Payload::Dock(dock) => Some(dock),
            _ => None,
        }
    }

    pub(crate) fn as_ship_mut(&mut self) -> Option<&mut ShipData> {
        match &mut self.payload {
            Payload::Ship(ship) => Some(ship),
            _ => None,
        }
    }
}
