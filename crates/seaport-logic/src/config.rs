//! Load options: how the loader reacts to records it cannot use.
//!
//! Options are plain serde data so front ends can read them from a JSON file:
//!
//! ```
//! use seaport_logic::config::{LoadOptions, UnresolvedPolicy};
//!
//! let options = LoadOptions::from_json(r#"{ "on_unresolved": "skip" }"#).unwrap();
//! assert_eq!(options.on_unresolved, UnresolvedPolicy::Skip);
//! assert_eq!(options.on_malformed, UnresolvedPolicy::Reject);
//! ```

use serde::{Deserialize, Serialize};

/// What to do with a record that cannot be placed in the world.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Abort the whole load; no world is produced.
    #[default]
    Reject,
    /// Drop only the offending record, log it, and report it on the world.
    Skip,
}

/// Options for [`crate::world::load_world_with`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Records whose parent cannot be found, or that name a dock with no
    /// moored ship.
    pub on_unresolved: UnresolvedPolicy,
    /// Lines with a known discriminator whose fields fail to decode.
    pub on_malformed: UnresolvedPolicy,
}

impl LoadOptions {
    /// Options that skip every bad record instead of failing the load.
    pub fn lenient() -> Self {
        Self {
            on_unresolved: UnresolvedPolicy::Skip,
            on_malformed: UnresolvedPolicy::Skip,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain enums and structs always serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
