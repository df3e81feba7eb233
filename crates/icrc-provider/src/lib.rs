//! # icrc-provider
//!
//! Network host configuration for the Internet Computer and construction of
//! the [`Agent`] every ledger client shares.
//!
//! ## Example
//!
//! ```ignore
//! use icrc_provider::{build_agent, presets};
//! use ic_agent::identity::AnonymousIdentity;
//!
//! let agent = build_agent(&presets::mainnet(), AnonymousIdentity).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use ic_agent::{Agent, Identity};
use icrc_error::{IcrcError, Result};
use url::Url;

/// Configuration for the boundary node or replica the agent talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Host URL
    pub url: String,
    /// Fetch the root key before the first call (local replicas only)
    pub fetch_root_key: bool,
}

impl ProviderConfig {
    /// Creates a configuration for `url`.
    ///
    /// The root key is fetched by default when the host is a loopback
    /// address.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let fetch_root_key = is_local_host(&url);
        Self {
            url,
            fetch_root_key,
        }
    }

    /// Overrides whether the root key is fetched
    pub fn with_fetch_root_key(mut self, fetch: bool) -> Self {
        self.fetch_root_key = fetch;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url).map_err(|e| IcrcError::InvalidUrl(format!("{}: {e}", self.url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(IcrcError::InvalidUrl(format!(
                "{}: unsupported scheme '{other}'",
                self.url
            ))),
        }
    }

    /// Returns true when the host is a local replica
    pub fn is_local(&self) -> bool {
        is_local_host(&self.url)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        presets::local()
    }
}

fn is_local_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

/// Builds an agent for `config` that signs with `identity`.
pub async fn build_agent<I>(config: &ProviderConfig, identity: I) -> Result<Agent>
where
    I: Identity + 'static,
{
    config.validate()?;

    let agent = Agent::builder()
        .with_url(config.url.as_str())
        .with_identity(identity)
        .build()
        .map_err(|e| IcrcError::AgentError(e.to_string()))?;

    if config.fetch_root_key {
        tracing::debug!("Fetching root key from {}", config.url);
        agent
            .fetch_root_key()
            .await
            .map_err(|e| IcrcError::AgentError(format!("fetch root key from {}: {e}", config.url)))?;
    }

    tracing::info!("Agent ready for {}", config.url);
    Ok(agent)
}

/// Common host presets
pub mod presets {
    use super::ProviderConfig;

    /// Mainnet boundary nodes
    pub const MAINNET_URL: &str = "https://icp-api.io";

    /// Default address of a local replica started by dfx
    pub const LOCAL_URL: &str = "http://127.0.0.1:4943";

    /// Mainnet provider configuration
    pub fn mainnet() -> ProviderConfig {
        ProviderConfig::new(MAINNET_URL)
    }

    /// Local replica provider configuration
    pub fn local() -> ProviderConfig {
        ProviderConfig::new(LOCAL_URL)
    }
}
