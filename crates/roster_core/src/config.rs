use crate::player::{ValidationRules, DEFAULT_MIN_BIRTH_YEAR};
use crate::store::DEFAULT_PAGE_SIZES;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{env, fs};
use thiserror::Error;

/// Environment variable naming the JSON settings file
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG_PATH";

pub const DEFAULT_DATABASE_PATH: &str = "roster.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file from {env}='{path}': {source}")]
    Read { env: &'static str, path: String, source: std::io::Error },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub database_path: PathBuf,
    pub min_birth_year: i32,
    /// Page sizes the caller may request
    pub page_sizes: Vec<u32>,
    pub default_page_size: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            min_birth_year: DEFAULT_MIN_BIRTH_YEAR,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZES[0],
        }
    }
}

impl RosterConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from the file named by `ROSTER_CONFIG_PATH`; defaults when the
    /// variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            env: CONFIG_PATH_ENV,
            path: path.to_string(),
            source,
        })?;

        let config = Self::from_json(&content)?;
        config.validate(chrono::Local::now().date_naive())?;
        Ok(config)
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::Invalid("page_sizes must not be empty".to_string()));
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::Invalid("page_sizes must be positive".to_string()));
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_sizes
            )));
        }
        if self.min_birth_year > today.year() {
            return Err(ConfigError::Invalid(format!(
                "min_birth_year {} is in the future",
                self.min_birth_year
            )));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules { min_birth_year: self.min_birth_year }
    }
}
