//! Configuration loader for adchat.
//!
//! Reads `config.toml` from the data directory (`~/.adchat/` in production)
//! and deserializes it into [`AssistantConfig`]. Falls back to sensible
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use adchat_types::config::AssistantConfig;
use adchat_types::error::ConfigError;
use secrecy::SecretString;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ADCHAT_DATA_DIR";

/// Environment variable holding the backend bearer token.
pub const API_TOKEN_ENV: &str = "ADCHAT_API_TOKEN";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ADCHAT_DATA_DIR` environment variable
/// 2. `~/.adchat`
/// 3. `.adchat` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".adchat");
    }

    PathBuf::from(".adchat")
}

/// Read the backend bearer token from the environment, if set and non-blank.
pub fn api_token_from_env() -> Option<SecretString> {
    std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from)
}

/// Load `{data_dir}/config.toml`, surfacing IO and parse errors.
pub async fn load_config_strict(data_dir: &Path) -> Result<AssistantConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");
    let content = tokio::fs::read_to_string(&config_path).await?;
    toml::from_str::<AssistantConfig>(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Load `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AssistantConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AssistantConfig {
    match load_config_strict(data_dir).await {
        Ok(config) => config,
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found in {}, using defaults",
                data_dir.display()
            );
            AssistantConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to load config.toml from {}: {err}, using defaults",
                data_dir.display()
            );
            AssistantConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, AssistantConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
base_url = "https://ads.example.com"
default_ask_limit = 5
thinking_text = "One moment..."
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.base_url, "https://ads.example.com");
        assert_eq!(config.default_ask_limit, 5);
        assert_eq!(config.thinking_text, "One moment...");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, AssistantConfig::default());
    }

    #[tokio::test]
    async fn load_config_strict_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "default_ask_limit = \"ten\"")
            .await
            .unwrap();

        let err = load_config_strict(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
