//! Model name mapping
//!
//! Maps client-supplied model names to Bedrock model ids

use std::collections::HashMap;

use crate::config::ModelCatalog;

/// Namespace marker carried by Bedrock-native Anthropic model ids
pub const PROVIDER_NAMESPACE: &str = "anthropic.";

/// Maps client model names to Bedrock model ids.
///
/// Total function: Bedrock-native ids pass through unchanged, known aliases
/// map through the table, anything else falls back to the flagship default.
#[derive(Debug, Clone)]
pub struct ModelMapper {
    aliases: HashMap<String, String>,
    default_model: String,
}

impl ModelMapper {
    /// Build a mapper from the loaded catalog
    pub fn new(catalog: &ModelCatalog) -> Self {
        Self {
            aliases: catalog.aliases.clone(),
            default_model: catalog.default_model.clone(),
        }
    }

    /// Map a client model name to a Bedrock model id
    pub fn map(&self, client_model: &str) -> String {
        // Already a Bedrock model ID
        if client_model.contains(PROVIDER_NAMESPACE) {
            return client_model.to_string();
        }

        self.aliases
            .get(client_model)
            .cloned()
            .unwrap_or_else(|| self.default_model.clone())
    }
}
