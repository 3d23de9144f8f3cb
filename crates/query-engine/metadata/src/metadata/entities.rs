//! Per-entity storage information.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use odata_models::EntityType;

/// Mapping from entity type names to their storage information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<EntityType, EntityInfo>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }

    pub fn get(&self, entity_type: &EntityType) -> Option<&EntityInfo> {
        self.0.get(entity_type)
    }
}

/// How a single entity type is stored.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntityInfo {
    /// The primary key column, already quoted, e.g. `[CustomerId]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Property name to column overrides, already quoted. Properties not listed here map to
    /// a column of the same name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, String>,
}
