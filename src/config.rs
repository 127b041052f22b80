use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_path: String,
    pub log_level: String,
    pub registered_user: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            database_path: env::var("MPA_DATABASE_PATH").unwrap_or_else(|_| "mpa.db".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            registered_user: env::var("MPA_REGISTERED_USER").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_with_defaults() {
        env::remove_var("MPA_DATABASE_PATH");
        env::remove_var("LOG_LEVEL");
        env::remove_var("MPA_REGISTERED_USER");

        let config = Config::from_env();
        assert_eq!(config.database_path, "mpa.db");
        assert_eq!(config.log_level, "info");
        assert!(config.registered_user.is_none());
    }

    #[test]
    fn test_config_reads_overrides() {
        env::set_var("MPA_DATABASE_PATH", "/tmp/test-mpa.db");
        env::set_var("MPA_REGISTERED_USER", "owner-1");

        let config = Config::from_env();
        assert_eq!(config.database_path, "/tmp/test-mpa.db");
        assert_eq!(config.registered_user.as_deref(), Some("owner-1"));

        env::remove_var("MPA_DATABASE_PATH");
        env::remove_var("MPA_REGISTERED_USER");
    }
}
