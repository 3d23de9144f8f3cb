//! Runtime configuration of the query engine.

use odata_models::EntityType;
use query_engine_metadata::metadata;
use query_engine_validation::validation::ValidationSettings;

/// The 'Configuration' type collects all the information necessary to translate and validate
/// queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration'. Keeping the two apart leaves the evolution of the file format
/// to 'ParsedConfiguration'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub validation: ValidationSettings,
}

impl Configuration {
    /// The column and key resolvers of an entity type.
    pub fn resolvers(&self, entity_type: &EntityType) -> metadata::Resolvers {
        metadata::Resolvers::from_metadata(&self.metadata, entity_type)
    }
}
