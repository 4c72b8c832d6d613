//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProbeConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProbeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProbeConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use std::time::Duration;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [interceptor]
            timeout = 20

            [probe]
            latency_ms = 5
            cancelable = false
            invocations = 4

            [observability]
            log_format = "compact"
            metrics_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.interceptor.timeout(), Some(Duration::from_millis(20)));
        assert_eq!(config.probe.latency_ms, 5);
        assert!(!config.probe.cancelable);
        assert_eq!(config.probe.invocations, 4);
        assert_eq!(config.observability.log_format, LogFormat::Compact);
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_empty_config_disables_timeout() {
        let config = parse_config("").unwrap();
        assert_eq!(config.interceptor.timeout(), None);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[interceptor]\ntimeout = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/interceptor.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
