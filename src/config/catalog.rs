//! Model catalog
//!
//! Alias and pricing tables keyed by Bedrock model id. Model identifiers churn
//! with the provider's release cadence, so both tables are data: built-in
//! defaults here, overridable from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Flagship model used when an alias is unrecognized
pub const DEFAULT_MODEL: &str = "anthropic.claude-sonnet-4-5-20250929-v1:0";

/// Model whose pricing applies to unrecognized ids
pub const FALLBACK_PRICING_MODEL: &str = "anthropic.claude-haiku-4-5-20251001-v1:0";

/// Per-model pricing in dollars per 1M tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Input token price
    pub input: f64,
    /// Output token price
    pub output: f64,
}

/// Alias and pricing catalog loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Flagship model id for unknown aliases
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Model id whose pricing covers unknown models
    #[serde(default = "default_pricing_fallback")]
    pub pricing_fallback: String,

    /// Client model name -> Bedrock model id
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,

    /// Bedrock model id -> pricing
    #[serde(default = "default_pricing")]
    pub pricing: HashMap<String, ModelPricing>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_pricing_fallback() -> String {
    FALLBACK_PRICING_MODEL.to_string()
}

fn default_aliases() -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    aliases.insert(
        "claude-sonnet-4.5".to_string(),
        "anthropic.claude-sonnet-4-5-20250929-v1:0".to_string(),
    );
    aliases.insert(
        "claude-haiku-4.5".to_string(),
        "anthropic.claude-haiku-4-5-20251001-v1:0".to_string(),
    );
    // Fallbacks for clients hardwired to OpenAI model names
    aliases.insert(
        "gpt-4".to_string(),
        "anthropic.claude-sonnet-4-5-20250929-v1:0".to_string(),
    );
    aliases.insert(
        "gpt-3.5-turbo".to_string(),
        "anthropic.claude-haiku-4-5-20251001-v1:0".to_string(),
    );
    aliases
}

fn default_pricing() -> HashMap<String, ModelPricing> {
    let mut pricing = HashMap::new();
    pricing.insert(
        "anthropic.claude-sonnet-4-5-20250929-v1:0".to_string(),
        ModelPricing {
            input: 3.00,
            output: 15.00,
        },
    );
    pricing.insert(
        "anthropic.claude-haiku-4-5-20251001-v1:0".to_string(),
        ModelPricing {
            input: 0.25,
            output: 1.25,
        },
    );
    pricing
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            pricing_fallback: default_pricing_fallback(),
            aliases: default_aliases(),
            pricing: default_pricing(),
        }
    }
}

impl ModelCatalog {
    /// Load the catalog from a JSON file; omitted fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading model catalog from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let catalog: ModelCatalog =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        catalog.validate()?;

        debug!(
            "Loaded {} aliases, {} priced models",
            catalog.aliases.len(),
            catalog.pricing.len()
        );
        Ok(catalog)
    }

    /// Load the catalog from default locations.
    /// Searches in order:
    /// 1. ~/.config/bedrock-gateway/models.json
    /// 2. ./models.json
    ///
    /// Falls back to the built-in tables when no file is found.
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home
                .join(".config")
                .join("bedrock-gateway")
                .join("models.json");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        let local_path = Path::new("models.json");
        if local_path.exists() {
            return Self::load(local_path);
        }

        debug!("No model catalog file found, using built-in tables");
        Ok(Self::default())
    }

    /// Validate catalog contents
    fn validate(&self) -> Result<()> {
        if self.default_model.is_empty() {
            anyhow::bail!("Default model id cannot be empty");
        }

        for (alias, target) in &self.aliases {
            if target.is_empty() {
                anyhow::bail!("Alias '{}' maps to an empty model id", alias);
            }
        }

        for (model, pricing) in &self.pricing {
            if pricing.input < 0.0 || pricing.output < 0.0 {
                anyhow::bail!("Negative pricing for model '{}'", model);
            }
        }

        Ok(())
    }

    /// Pricing for a model id, falling back to the designated default
    pub fn pricing_for(&self, model_id: &str) -> ModelPricing {
        self.pricing
            .get(model_id)
            .or_else(|| self.pricing.get(&self.pricing_fallback))
            .copied()
            .unwrap_or(ModelPricing {
                input: 0.0,
                output: 0.0,
            })
    }
}
