//! Service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use salebook_core::TotalPolicy;
use salebook_db::DbConfig;

/// Salebook service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file path
    pub db_path: PathBuf,

    /// Maximum pooled connections
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub db_connect_timeout_secs: u64,

    /// How caller-supplied line totals are treated
    pub total_policy: TotalPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from("salebook.db"),
            db_max_connections: 5,
            db_connect_timeout_secs: 30,
            total_policy: TotalPolicy::Trusted,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let config = AppConfig {
            db_path: lookup("SALEBOOK_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),

            db_max_connections: lookup("SALEBOOK_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| defaults.db_max_connections.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SALEBOOK_DB_MAX_CONNECTIONS".to_string()))?,

            db_connect_timeout_secs: lookup("SALEBOOK_DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| defaults.db_connect_timeout_secs.to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("SALEBOOK_DB_CONNECT_TIMEOUT_SECS".to_string())
                })?,

            total_policy: lookup("SALEBOOK_TOTAL_POLICY")
                .unwrap_or_else(|| defaults.total_policy.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SALEBOOK_TOTAL_POLICY".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SALEBOOK_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Pool settings for [`salebook_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
            .max_connections(self.db_max_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::load_from(|_| None).unwrap();
        assert_eq!(config.db_path, PathBuf::from("salebook.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_connect_timeout_secs, 30);
        assert_eq!(config.total_policy, TotalPolicy::Trusted);
    }

    #[test]
    fn test_reads_overrides() {
        let env = vars(&[
            ("SALEBOOK_DB_PATH", "/tmp/shop.db"),
            ("SALEBOOK_DB_MAX_CONNECTIONS", "2"),
            ("SALEBOOK_TOTAL_POLICY", "Strict"),
        ]);
        let config = AppConfig::load_from(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.total_policy, TotalPolicy::Strict);

        let db = config.db_config();
        assert_eq!(db.max_connections, 2);
        assert_eq!(db.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_bad_values() {
        let env = vars(&[("SALEBOOK_DB_MAX_CONNECTIONS", "many")]);
        let err = AppConfig::load_from(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == "SALEBOOK_DB_MAX_CONNECTIONS"));

        let env = vars(&[("SALEBOOK_DB_MAX_CONNECTIONS", "0")]);
        assert!(AppConfig::load_from(|k| env.get(k).cloned()).is_err());

        let env = vars(&[("SALEBOOK_TOTAL_POLICY", "lenient")]);
        let err = AppConfig::load_from(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SALEBOOK_TOTAL_POLICY");
    }
}
