use thiserror::Error;

/// Errors from talking to the assistant backend (used by the port trait in adchat-core).
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors from loading `config.toml` strictly.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert_eq!(BackendError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Parse("expected `=`".to_string());
        assert!(err.to_string().contains("expected `=`"));
    }
}
