//! Application state wiring configuration and the backend together.

use std::path::PathBuf;

use adchat_infra::config::{api_token_from_env, load_config, resolve_data_dir};
use adchat_infra::http::HttpAssistantBackend;
use adchat_types::config::AssistantConfig;

use crate::cli::Cli;

/// Resolved configuration for one CLI invocation.
pub struct AppState {
    pub config: AssistantConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml` from the data directory and apply CLI overrides.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let mut config = load_config(&data_dir).await;

        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.request_timeout_secs = timeout;
        }

        tracing::debug!(
            data_dir = %data_dir.display(),
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            "Configuration resolved"
        );

        Ok(Self { config, data_dir })
    }

    /// Build an HTTP backend for the resolved configuration.
    pub fn backend(&self) -> anyhow::Result<HttpAssistantBackend> {
        Ok(HttpAssistantBackend::new(&self.config, api_token_from_env())?)
    }
}
