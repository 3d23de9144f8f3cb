//! Metadata information regarding the entities and how they map onto database tables.

pub mod entities;
pub mod resolvers;

// re-export without modules
pub use entities::*;
pub use resolvers::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[serde(default)]
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }
}
