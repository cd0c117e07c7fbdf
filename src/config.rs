//! Configuration Module
//!
//! Environment-variable driven configuration, validated fail-fast at
//! startup so a misconfigured process dies before serving traffic.

use std::env;

use anyhow::{Context, Result};

/// Application settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 8000).
    pub port: u16,

    /// SQLite connection string.
    /// Format: sqlite://path/to/file.db
    pub database_url: String,

    /// Deployment environment (development, staging, production).
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: server port (default: 8000)
    /// - `DATABASE_URL`: SQLite connection string (default: `sqlite://loans.db`)
    /// - `ENVIRONMENT`: development | staging | production
    pub fn from_env() -> Result<Self> {
        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://loans.db".to_string()),

            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.is_production());
    }
}
