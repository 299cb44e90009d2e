//! Port world model for SeaPort data files.
//!
//! This crate turns a line-oriented world file into a cross-referenced
//! graph of ports, docks, ships, people and jobs. It has no UI or runtime
//! dependencies: functions take text and return plain data, so every step
//! is unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Load options (reject or skip unusable records) |
//! | [`entity`] | Entity kinds, payloads and the shared id space |
//! | [`error`] | Parse, resolve and load errors |
//! | [`invariants`] | Structural checks over a loaded world |
//! | [`parse`] | Line-record parser |
//! | [`registry`] | Id-indexed entity store and per-port list probes |
//! | [`render`] | Text rendering of entities and the world tree |
//! | [`resolve`] | Parent resolution (dock-or-port, ship-or-dock probes) |
//! | [`search`] | Name, index and skill lookup |
//! | [`world`] | The loaded world and `load_world` entry points |

pub mod config;
pub mod entity;
pub mod error;
pub mod invariants;
pub mod parse;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod search;
pub mod world;

pub use config::{LoadOptions, UnresolvedPolicy};
pub use entity::{Entity, EntityId, EntityKind};
pub use error::LoadError;
pub use world::{load_world, load_world_with, World};
