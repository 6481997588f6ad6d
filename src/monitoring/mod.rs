//! Token usage and cost tracking
//!
//! Advisory telemetry over an append-only in-memory log. History lives for
//! the process lifetime only; this is not billing of record.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Mutex;
use tracing::info;

use crate::config::ModelCatalog;

/// Token usage for one request
#[derive(Debug, Clone, Serialize)]
pub struct TokenUsage {
    /// Input token count
    pub input_tokens: u64,
    /// Output token count
    pub output_tokens: u64,
    /// Total token count, always input + output
    pub total_tokens: u64,
    /// Recording time
    pub timestamp: DateTime<Utc>,
}

impl TokenUsage {
    fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            timestamp: Utc::now(),
        }
    }
}

/// Cost metrics for one request
#[derive(Debug, Clone, Serialize)]
pub struct CostMetrics {
    /// Model the request ran against
    pub model_id: String,
    /// Input cost in dollars
    pub input_cost: f64,
    /// Output cost in dollars
    pub output_cost: f64,
    /// Total cost, always input + output
    pub total_cost: f64,
    /// Recording time
    pub timestamp: DateTime<Utc>,
}

/// Aggregated usage over a query window
#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    /// Window length in days
    pub period_days: i64,
    /// Summed input tokens
    pub total_input_tokens: u64,
    /// Summed output tokens
    pub total_output_tokens: u64,
    /// Summed total tokens
    pub total_tokens: u64,
    /// Requests in the window
    pub request_count: usize,
}

/// Aggregated cost over a query window
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    /// Window length in days
    pub period_days: i64,
    /// Summed input cost
    pub total_input_cost: f64,
    /// Summed output cost
    pub total_output_cost: f64,
    /// Summed total cost
    pub total_cost: f64,
    /// Requests in the window
    pub request_count: usize,
}

#[derive(Debug, Default)]
struct History {
    usage: Vec<TokenUsage>,
    cost: Vec<CostMetrics>,
}

/// Tracks token usage and cost across concurrent requests.
///
/// Appends are serialized behind a mutex; recording never fails, unknown
/// model ids price through the catalog's designated fallback.
#[derive(Debug)]
pub struct UsageTracker {
    catalog: ModelCatalog,
    history: Mutex<History>,
}

impl UsageTracker {
    /// Create a tracker pricing against the given catalog
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            history: Mutex::new(History::default()),
        }
    }

    /// Record token usage for a request and return the computed metrics
    pub fn record(
        &self,
        model_id: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> (TokenUsage, CostMetrics) {
        let usage = TokenUsage::new(input_tokens, output_tokens);

        let pricing = self.catalog.pricing_for(model_id);
        let input_cost = (input_tokens as f64 / 1_000_000.0) * pricing.input;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * pricing.output;

        let cost = CostMetrics {
            model_id: model_id.to_string(),
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            timestamp: usage.timestamp,
        };

        info!(
            "Usage recorded: {} input + {} output tokens, Cost: ${:.4}",
            input_tokens, output_tokens, cost.total_cost
        );

        let mut history = self.lock_history();
        history.usage.push(usage.clone());
        history.cost.push(cost.clone());

        (usage, cost)
    }

    /// Total usage over the last N days (window boundary inclusive)
    pub fn total_usage(&self, days: i64) -> UsageSummary {
        let cutoff = Utc::now() - Duration::days(days);
        let history = self.lock_history();

        let recent: Vec<&TokenUsage> = history
            .usage
            .iter()
            .filter(|u| u.timestamp >= cutoff)
            .collect();

        UsageSummary {
            period_days: days,
            total_input_tokens: recent.iter().map(|u| u.input_tokens).sum(),
            total_output_tokens: recent.iter().map(|u| u.output_tokens).sum(),
            total_tokens: recent.iter().map(|u| u.total_tokens).sum(),
            request_count: recent.len(),
        }
    }

    /// Total cost over the last N days (window boundary inclusive)
    pub fn total_cost(&self, days: i64) -> CostSummary {
        let cutoff = Utc::now() - Duration::days(days);
        let history = self.lock_history();

        let recent: Vec<&CostMetrics> = history
            .cost
            .iter()
            .filter(|c| c.timestamp >= cutoff)
            .collect();

        CostSummary {
            period_days: days,
            total_input_cost: recent.iter().map(|c| c.input_cost).sum(),
            total_output_cost: recent.iter().map(|c| c.output_cost).sum(),
            total_cost: recent.iter().map(|c| c.total_cost).sum(),
            request_count: recent.len(),
        }
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, History> {
        // A poisoned lock only means a panic mid-append; the log stays usable
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
