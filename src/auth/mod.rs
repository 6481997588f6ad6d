//! AWS credential resolution
//!
//! Detects an authentication method from environment signals, constructs a
//! Bedrock-capable session, and verifies it against STS before handing it out.
//!
//! Supported methods:
//! 1. AWS CLI configuration (default profile)
//! 2. Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY)
//! 3. SSO profile (AWS_PROFILE)
//! 4. Bedrock API keys (AWS_BEARER_TOKEN_BEDROCK)

use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::{info, warn};

use crate::utils::error::{AppError, AppResult};

/// Supported authentication methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Ambient AWS CLI configuration (default)
    AwsCli,
    /// Static access-key/secret-key pair from the environment
    EnvVars,
    /// Named SSO profile
    SsoProfile,
    /// Bedrock bearer API key
    BedrockApiKey,
}

impl AuthMethod {
    /// Stable name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::AwsCli => "aws_cli",
            AuthMethod::EnvVars => "env_vars",
            AuthMethod::SsoProfile => "sso_profile",
            AuthMethod::BedrockApiKey => "bedrock_api_key",
        }
    }
}

/// Snapshot of the environment signals the resolver inspects.
///
/// Detection operates on this value rather than reading the process
/// environment piecemeal, so the priority order is testable without
/// mutating global state.
#[derive(Debug, Clone, Default)]
pub struct AuthSignals {
    /// AWS_BEARER_TOKEN_BEDROCK
    pub bearer_token: Option<String>,
    /// AWS_PROFILE
    pub profile: Option<String>,
    /// AWS_ACCESS_KEY_ID
    pub access_key: Option<String>,
    /// AWS_SECRET_ACCESS_KEY
    pub secret_key: Option<String>,
    /// AWS_REGION
    pub region: Option<String>,
}

impl AuthSignals {
    /// Read the current process environment
    pub fn from_env() -> Self {
        Self {
            bearer_token: non_empty_var("AWS_BEARER_TOKEN_BEDROCK"),
            profile: non_empty_var("AWS_PROFILE"),
            access_key: non_empty_var("AWS_ACCESS_KEY_ID"),
            secret_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
            region: non_empty_var("AWS_REGION"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Pick an authentication method from the available signals.
///
/// First match wins: bearer key, then SSO profile, then the env-var pair,
/// then the AWS CLI default.
pub fn detect_auth_method(signals: &AuthSignals) -> AuthMethod {
    if signals.bearer_token.is_some() {
        return AuthMethod::BedrockApiKey;
    }

    if signals.profile.is_some() {
        return AuthMethod::SsoProfile;
    }

    if signals.access_key.is_some() && signals.secret_key.is_some() {
        return AuthMethod::EnvVars;
    }

    AuthMethod::AwsCli
}

/// Authenticated handle to AWS, read-only once constructed
#[derive(Debug, Clone)]
pub struct Session {
    config: SdkConfig,
    region: String,
    method: AuthMethod,
}

impl Session {
    /// Wrap an already-loaded SDK configuration
    pub fn new(config: SdkConfig, region: impl Into<String>, method: AuthMethod) -> Self {
        Self {
            config,
            region: region.into(),
            method,
        }
    }

    /// Loaded AWS SDK configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Region the session is scoped to
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Method the session was resolved with
    pub fn method(&self) -> AuthMethod {
        self.method
    }
}

/// Resolves environment signals into a verified [`Session`]
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    region: String,
}

impl CredentialResolver {
    /// Create a resolver with a default region
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// Authenticate using the given method, or auto-detect one.
    ///
    /// Construction success never implies usable credentials: every branch is
    /// followed by a mandatory identity check, and any failure there converts
    /// to [`AppError::NoCredentials`]. A single failed check is fatal; there
    /// are no retries.
    pub async fn resolve(&self, method: Option<AuthMethod>) -> AppResult<Session> {
        let signals = AuthSignals::from_env();
        let method = method.unwrap_or_else(|| detect_auth_method(&signals));

        info!("Using authentication method: {}", method.as_str());

        let session = self.build_session(method, &signals).await?;
        self.verify(&session).await?;

        Ok(session)
    }

    /// Construct a session for the chosen method
    async fn build_session(&self, method: AuthMethod, signals: &AuthSignals) -> AppResult<Session> {
        match method {
            AuthMethod::AwsCli => {
                let config = self.load_default_chain().await;
                Ok(Session::new(config, self.region.clone(), method))
            }
            AuthMethod::EnvVars => {
                if signals.access_key.is_none() || signals.secret_key.is_none() {
                    return Err(AppError::NoCredentials(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set".to_string(),
                    ));
                }

                // AWS_REGION overrides the resolver default for this branch only
                let region = signals
                    .region
                    .clone()
                    .unwrap_or_else(|| self.region.clone());

                let config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.clone()))
                    .credentials_provider(EnvironmentVariableCredentialsProvider::new())
                    .load()
                    .await;

                Ok(Session::new(config, region, method))
            }
            AuthMethod::SsoProfile => {
                let profile = signals.profile.clone().ok_or_else(|| {
                    AppError::NoCredentials("AWS_PROFILE environment variable not set".to_string())
                })?;

                let config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()))
                    .profile_name(profile)
                    .load()
                    .await;

                Ok(Session::new(config, self.region.clone(), method))
            }
            AuthMethod::BedrockApiKey => {
                if signals.bearer_token.is_none() {
                    return Err(AppError::NoCredentials(
                        "AWS_BEARER_TOKEN_BEDROCK environment variable not set".to_string(),
                    ));
                }

                // Bearer-token signing is not implemented; the session still
                // comes from the standard chain, so the supplied key is not
                // actually honored.
                warn!(
                    "Bedrock API key authentication not fully implemented. \
                     Falling back to standard AWS authentication."
                );

                let config = self.load_default_chain().await;
                Ok(Session::new(config, self.region.clone(), method))
            }
        }
    }

    async fn load_default_chain(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await
    }

    /// Verify the session against the STS identity endpoint
    async fn verify(&self, session: &Session) -> AppResult<()> {
        let sts = aws_sdk_sts::Client::new(session.config());

        match sts.get_caller_identity().send().await {
            Ok(identity) => {
                info!(
                    "Authenticated as: {}",
                    identity.arn().unwrap_or("<unknown>")
                );
                Ok(())
            }
            Err(e) => Err(AppError::NoCredentials(format!(
                "Invalid credentials: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }
}
