//! Configuration management module
//!
//! Environment-derived settings plus the model alias/pricing catalog

pub mod catalog;
pub mod settings;

pub use catalog::{ModelCatalog, ModelPricing};
pub use settings::Settings;
