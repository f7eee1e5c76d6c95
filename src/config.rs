// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Period, TypeFilter};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "SmartFin", "smartfin"));

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SMARTFIN_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub transactions_path: Option<PathBuf>,
    pub fixed_path: Option<PathBuf>,
    pub goals_path: Option<PathBuf>,
    pub bills_path: Option<PathBuf>,
    pub default_period: Period,
    pub default_filter: TypeFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            transactions_path: None,
            fixed_path: None,
            goals_path: None,
            bills_path: None,
            default_period: Period::Month,
            default_filter: TypeFilter::All,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Config {
    /// Load from the resolved config path; defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("Parse config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/smartfin/config.json")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"currency_symbol": "US$", "default_period": "week"}}"#).unwrap();
        file.flush().unwrap();
        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.currency_symbol, "US$");
        assert_eq!(cfg.default_period, Period::Week);
        assert_eq!(cfg.default_filter, TypeFilter::All);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        file.flush().unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
