use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    storage::write_atomic,
};

pub const DEFAULT_STORAGE_KEY: &str = "dcd_fundraising_v20";
pub const DEFAULT_BACKUP_PREFIX: &str = "dcd-backup";
pub const DEFAULT_CURRENCY_LABEL: &str = "KES";
pub const DEFAULT_FALLBACK_DEPARTMENT: &str = "Guests";
pub const DEFAULT_DEPARTMENTS: [&str; 5] = [
    "Eagles",
    "Daughters of Faith",
    "Youth",
    "Planning Committee",
    "Guests",
];

/// Organization-level settings: departments, labels and the storage slot name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_departments")]
    pub departments: Vec<String>,
    #[serde(default = "Config::default_fallback_department")]
    pub fallback_department: String,
    #[serde(default = "Config::default_currency_label")]
    pub currency_label: String,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::default_backup_prefix")]
    pub backup_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            departments: Self::default_departments(),
            fallback_department: Self::default_fallback_department(),
            currency_label: Self::default_currency_label(),
            storage_key: Self::default_storage_key(),
            backup_prefix: Self::default_backup_prefix(),
        }
    }
}

impl Config {
    fn default_departments() -> Vec<String> {
        DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
    }

    fn default_fallback_department() -> String {
        DEFAULT_FALLBACK_DEPARTMENT.into()
    }

    fn default_currency_label() -> String {
        DEFAULT_CURRENCY_LABEL.into()
    }

    fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    fn default_backup_prefix() -> String {
        DEFAULT_BACKUP_PREFIX.into()
    }

    /// Returns the configured spelling of `name`, matched case-insensitively.
    pub fn canonical_department(&self, name: &str) -> Option<&str> {
        let needle = name.trim();
        self.departments
            .iter()
            .find(|dept| dept.eq_ignore_ascii_case(needle))
            .map(String::as_str)
    }
}

/// Loads and saves [`Config`] as `config.json` under the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            if config.departments.is_empty() {
                return Err(LedgerError::InvalidInput(format!(
                    "`{}` lists no departments",
                    self.path.display()
                )));
            }
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
