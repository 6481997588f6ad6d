//! Linear issue-tracker client
//!
//! Small GraphQL client used to mirror gateway rollout tasks into Linear.
//! Peripheral to the translation core; every call shares one fixed-timeout
//! HTTP client.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Linear GraphQL API
#[derive(Debug, Clone)]
pub struct LinearClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LinearClient {
    /// Create a client; the key falls back to `LINEAR_API_KEY`
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .or_else(|| std::env::var("LINEAR_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .context("LINEAR_API_KEY not provided")?;

        Self::with_base_url(api_key, LINEAR_API_URL)
    }

    /// Create a client against a specific endpoint (tests point this at a mock)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Get issue by ID
    pub async fn get_issue(&self, issue_id: &str) -> Result<Value> {
        let query = r#"
        query GetIssue($id: String!) {
          issue(id: $id) {
            id
            identifier
            title
            description
            status {
              id
              name
            }
            progress
            updatedAt
          }
        }
        "#;

        let data = self.execute(query, json!({ "id": issue_id })).await?;
        Ok(data["issue"].clone())
    }

    /// Update issue progress (0.0 to 1.0)
    pub async fn update_progress(&self, issue_id: &str, progress: f64) -> Result<Value> {
        let mutation = r#"
        mutation UpdateProgress($id: String!, $progress: Float!) {
          issueUpdate(id: $id, input: { progress: $progress }) {
            issue {
              id
              identifier
              progress
            }
          }
        }
        "#;

        let data = self
            .execute(mutation, json!({ "id": issue_id, "progress": progress }))
            .await?;
        Ok(data["issueUpdate"]["issue"].clone())
    }

    /// Add comment to issue
    pub async fn add_comment(&self, issue_id: &str, body: &str) -> Result<Value> {
        let mutation = r#"
        mutation AddComment($issueId: String!, $body: String!) {
          commentCreate(input: { issueId: $issueId, body: $body }) {
            comment {
              id
              body
              createdAt
            }
          }
        }
        "#;

        let data = self
            .execute(mutation, json!({ "issueId": issue_id, "body": body }))
            .await?;
        Ok(data["commentCreate"]["comment"].clone())
    }

    /// Update issue status
    pub async fn update_status(&self, issue_id: &str, status_id: &str) -> Result<Value> {
        let mutation = r#"
        mutation UpdateStatus($id: String!, $statusId: String!) {
          issueUpdate(id: $id, input: { statusId: $statusId }) {
            issue {
              id
              identifier
              status {
                id
                name
              }
            }
          }
        }
        "#;

        let data = self
            .execute(mutation, json!({ "id": issue_id, "statusId": status_id }))
            .await?;
        Ok(data["issueUpdate"]["issue"].clone())
    }

    /// Run one GraphQL operation and unwrap the data envelope
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        debug!("Executing Linear GraphQL request");

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .context("Linear request failed")?
            .error_for_status()
            .context("Linear returned an error status")?;

        let payload: Value = response
            .json()
            .await
            .context("Failed to parse Linear response")?;

        if let Some(errors) = payload.get("errors") {
            anyhow::bail!("GraphQL errors: {}", errors);
        }

        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }
}
