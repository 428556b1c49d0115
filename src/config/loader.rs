//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{AppConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line or through the environment.
///
/// Applied on top of the file (or the defaults) before validation.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub rpc_url: Option<String>,
    pub contract_address: Option<String>,
    pub sender: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    /// Write every set override into `config`.
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(bind_address) = self.bind_address {
            config.listener.bind_address = bind_address;
        }
        if let Some(rpc_url) = self.rpc_url {
            config.blockchain.rpc_url = rpc_url;
        }
        if let Some(address) = self.contract_address {
            config.contract.address = address;
        }
        if let Some(sender) = self.sender {
            config.contract.sender = Some(sender);
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration: file (or defaults), then overrides,
/// then validation of the merged result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => AppConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            [listener]
            bind_address = "0.0.0.0:8000"

            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(
            config.contract.address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("[listener\nbind_address = 1");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = write_config(
            r#"
            [blockchain]
            rpc_timeout_secs = 0
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("blockchain.rpc_timeout_secs"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config(
            r#"
            [blockchain]
            rpc_url = "http://from-file:8545"
            "#,
        );
        let overrides = ConfigOverrides {
            rpc_url: Some("http://from-cli:8545".to_string()),
            log_format: Some(LogFormat::Json),
            ..Default::default()
        };

        let config = resolve_config(Some(file.path()), overrides).unwrap();
        assert_eq!(config.blockchain.rpc_url, "http://from-cli:8545");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            contract_address: Some("not-an-address".to_string()),
            ..Default::default()
        };
        let err = resolve_config(None, overrides).unwrap_err();
        assert!(err.to_string().contains("contract.address"));
    }

    #[test]
    fn test_validation_errors_joined_in_message() {
        let file = write_config(
            r#"
            [listener]
            bind_address = "nowhere"

            [security]
            max_body_size = 0
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.bind_address: 'nowhere' is not a socket address: invalid socket address syntax, security.max_body_size: must be greater than 0"
        );
    }
}
