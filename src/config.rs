use thiserror::Error;

/// Default field ceiling for uploads: 2 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub node: NodeConfig,
    /// Maximum size of the uploaded file field in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_address: String,
    pub data_dir: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = NodeConfig::default();

        let bind_address = std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        let data_dir = std::env::var("DATA_DIR").unwrap_or(defaults.data_dir);

        let max_upload_size = match std::env::var("MAX_UPLOAD_SIZE") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "MAX_UPLOAD_SIZE must be a byte count, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_SIZE,
        };

        let config = Config {
            node: NodeConfig {
                bind_address,
                data_dir,
            },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node.bind_address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "BIND_ADDRESS cannot be empty".to_string(),
            ));
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling_is_two_mebibytes() {
        let config = Config::default();
        assert_eq!(config.max_upload_size, 2_097_152);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ceiling_is_rejected() {
        let config = Config {
            max_upload_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_bind_address_is_rejected() {
        let config = Config {
            node: NodeConfig {
                bind_address: " ".to_string(),
                data_dir: "./data".to_string(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
