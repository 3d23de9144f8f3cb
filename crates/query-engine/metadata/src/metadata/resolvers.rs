//! The two hooks used to turn properties and entity types into column names.

use std::sync::Arc;

use odata_models::{EntityType, PropertyRef};

use super::Metadata;

/// The key column used when nothing else is known about an entity.
pub const DEFAULT_KEY_COLUMN: &str = "[Id]";

type ColumnResolver = Arc<dyn Fn(&PropertyRef) -> Option<String> + Send + Sync>;
type KeyResolver = Arc<dyn Fn(&EntityType) -> String + Send + Sync>;

/// Resolves property references to column names and entity types to key column names.
///
/// Both hooks can be replaced. The defaults quote the property name in brackets and use
/// [`DEFAULT_KEY_COLUMN`] as the key.
#[derive(Clone)]
pub struct Resolvers {
    column: ColumnResolver,
    key: KeyResolver,
}

impl Default for Resolvers {
    fn default() -> Self {
        Resolvers {
            column: Arc::new(|property: &PropertyRef| Some(default_column(property))),
            key: Arc::new(|_: &EntityType| DEFAULT_KEY_COLUMN.to_string()),
        }
    }
}

impl std::fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolvers").finish_non_exhaustive()
    }
}

/// `[Name]`
pub fn default_column(property: &PropertyRef) -> String {
    format!("[{}]", property.name)
}

impl Resolvers {
    #[must_use]
    pub fn with_column_resolver(
        mut self,
        resolve: impl Fn(&PropertyRef) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.column = Arc::new(resolve);
        self
    }

    #[must_use]
    pub fn with_key_resolver(
        mut self,
        resolve: impl Fn(&EntityType) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key = Arc::new(resolve);
        self
    }

    /// Resolvers backed by the configured metadata of a single entity type. Anything the
    /// metadata does not mention falls back to the defaults.
    pub fn from_metadata(metadata: &Metadata, entity_type: &EntityType) -> Self {
        let info = metadata.entities.get(entity_type).cloned().unwrap_or_default();
        tracing::debug!(
            entity_type = %entity_type,
            overrides = info.columns.len(),
            "resolvers from metadata"
        );

        let key = info
            .key
            .clone()
            .unwrap_or_else(|| DEFAULT_KEY_COLUMN.to_string());
        let columns = Arc::new(info.columns);

        Resolvers::default()
            .with_column_resolver(move |property| {
                Some(
                    columns
                        .get(&property.name)
                        .cloned()
                        .unwrap_or_else(|| default_column(property)),
                )
            })
            .with_key_resolver(move |_| key.clone())
    }

    /// The column for a property, or `None` when the hook produced nothing usable.
    pub fn resolve_column(&self, property: &PropertyRef) -> Option<String> {
        (self.column)(property).filter(|column| !column.trim().is_empty())
    }

    pub fn resolve_key(&self, entity_type: &EntityType) -> String {
        (self.key)(entity_type)
    }
}
