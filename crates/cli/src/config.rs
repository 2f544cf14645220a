// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! TOML configuration for the `tickvol` binary.

use std::{path::{Path, PathBuf}, str::FromStr};

use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tickvol_model::defi::{StablecoinSet, data_source::DEFAULT_PAGE_SIZE};

use crate::opt::AnalyzeOpt;

/// The 0.3% USDC/WETH pool on Ethereum mainnet.
pub const DEFAULT_POOL_ID: &str = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8";

/// Environment variable supplying the data path when neither flag nor file does.
pub const DATA_PATH_ENV_VAR: &str = "TICKVOL_DATA_PATH";

/// Configuration for a pool volatility analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TickVolConfig {
    /// The pool contract address to analyze.
    pub pool_id: String,
    /// Path to the JSON pool data dump.
    pub data_path: Option<PathBuf>,
    /// Number of tick records requested per page.
    pub page_size: usize,
    /// Token symbols treated as stablecoins when orienting prices.
    pub stablecoins: StablecoinSet,
    /// The maximum log level, e.g. `"info"` or `"debug"`.
    pub log_level: String,
}

impl Default for TickVolConfig {
    fn default() -> Self {
        Self {
            pool_id: DEFAULT_POOL_ID.to_string(),
            data_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            stablecoins: StablecoinSet::default(),
            log_level: "info".to_string(),
        }
    }
}

impl TickVolConfig {
    /// Parses a configuration from TOML, with absent keys taking their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or contains unknown keys.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Loads a configuration from the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Loads the configuration for `opt`: the `--config` file (or defaults), then the
    /// command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result is invalid.
    pub fn load(opt: &AnalyzeOpt) -> anyhow::Result<Self> {
        let mut config = match &opt.config {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_overrides(opt);
        config.validate()?;
        Ok(config)
    }

    /// Overrides file values with any options given on the command line.
    pub fn apply_overrides(&mut self, opt: &AnalyzeOpt) {
        if let Some(pool) = &opt.pool {
            self.pool_id.clone_from(pool);
        }
        if let Some(data) = &opt.data {
            self.data_path = Some(data.clone());
        }
        if let Some(page_size) = opt.page_size {
            self.page_size = page_size;
        }
    }

    /// Checks the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool id is empty.
    /// - The page size is zero.
    /// - The log level is unknown.
    pub fn validate(&self) -> anyhow::Result<()> {
        tickvol_core::correctness::check_valid_string(&self.pool_id, "pool_id")?;
        if self.page_size == 0 {
            anyhow::bail!("invalid usize for 'page_size' not positive, was 0");
        }
        self.level_filter()?;
        Ok(())
    }

    /// Returns the configured maximum log level.
    ///
    /// # Errors
    ///
    /// Returns an error if `log_level` is not a valid level name.
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.log_level))
    }

    /// Returns the data path from the configuration, falling back to the
    /// `TICKVOL_DATA_PATH` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if no data path is configured anywhere.
    pub fn resolve_data_path(&self) -> anyhow::Result<PathBuf> {
        self.resolve_data_path_with(tickvol_core::env::get_optional_env_var(DATA_PATH_ENV_VAR))
    }

    fn resolve_data_path_with(&self, env_value: Option<String>) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }
        env_value.map(PathBuf::from).ok_or_else(|| {
            anyhow::anyhow!("No data path provided via --data, config file or {DATA_PATH_ENV_VAR}")
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_config() {
        let config = TickVolConfig::default();
        assert_eq!(config.pool_id, DEFAULT_POOL_ID);
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.log_level, "info");
        assert!(config.stablecoins.contains("USDC"));
        assert!(config.data_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let config = TickVolConfig::from_toml_str(
            r#"
page_size = 250
stablecoins = ["USDC", "FRAX"]
"#,
        )
        .unwrap();

        assert_eq!(config.page_size, 250);
        assert_eq!(config.pool_id, DEFAULT_POOL_ID);
        assert!(config.stablecoins.contains("FRAX"));
        assert!(!config.stablecoins.contains("DAI"));
    }

    #[rstest]
    fn test_unknown_key_rejected() {
        assert!(TickVolConfig::from_toml_str("pool = \"0xabc\"").is_err());
    }

    #[rstest]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pool_id = \"0xfile\"\npage_size = 10\nlog_level = \"debug\"").unwrap();

        let opt = AnalyzeOpt {
            config: Some(file.path().to_path_buf()),
            page_size: Some(20),
            ..Default::default()
        };
        let config = TickVolConfig::load(&opt).unwrap();

        assert_eq!(config.pool_id, "0xfile");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[rstest]
    fn test_load_missing_file_fails() {
        let opt = AnalyzeOpt {
            config: Some(PathBuf::from("/nonexistent/tickvol.toml")),
            ..Default::default()
        };
        assert!(TickVolConfig::load(&opt).is_err());
    }

    #[rstest]
    #[case(0, "info")]
    #[case(10, "loud")]
    fn test_validate_rejects(#[case] page_size: usize, #[case] log_level: &str) {
        let config = TickVolConfig {
            page_size,
            log_level: log_level.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn test_data_path_precedence() {
        let mut config = TickVolConfig::default();
        assert!(config.resolve_data_path_with(None).is_err());
        assert_eq!(
            config
                .resolve_data_path_with(Some("/env/pool.json".to_string()))
                .unwrap(),
            PathBuf::from("/env/pool.json")
        );

        config.data_path = Some(PathBuf::from("/flag/pool.json"));
        assert_eq!(
            config
                .resolve_data_path_with(Some("/env/pool.json".to_string()))
                .unwrap(),
            PathBuf::from("/flag/pool.json")
        );
    }
}
