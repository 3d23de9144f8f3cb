//! Convert a parsed configuration into the one used at runtime.

use crate::configuration::Configuration;
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::{ParsedConfiguration, CURRENT_VERSION};

/// Make a runtime configuration from the parsed one.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    if parsed_config.version != CURRENT_VERSION {
        return Err(MakeRuntimeConfigurationError::UnsupportedVersion {
            version: parsed_config.version,
            expected: CURRENT_VERSION,
        });
    }

    tracing::debug!(
        entities = parsed_config.metadata.entities.0.len(),
        "runtime configuration"
    );
    Ok(Configuration {
        metadata: parsed_config.metadata,
        validation: parsed_config.validation,
    })
}
