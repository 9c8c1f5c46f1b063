pub mod toml_config;

use crate::adapters::storage::DEFAULT_RESULTS_FILE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{parse_region_code, validate_existing_dir, validate_path, Validate};
use phonenumber::country;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_LOG_FILE: &str = "phonenumber_utility.log";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "phonenumber-utility")]
#[command(about = "Validate phone numbers and look up their time zones, carrier and region")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// File that results are appended to
    #[arg(long)]
    pub results_file: Option<String>,

    /// File that log lines are appended to
    #[arg(long)]
    pub log_file: Option<String>,

    /// Region assumed for numbers written without a country code, e.g. IN
    #[arg(long)]
    pub default_region: Option<String>,

    /// Directory with timezones.csv / carriers.csv / geocoding.csv / regions.csv overrides
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long, help = "Write the log file as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            settings = settings.with_toml(&file_config);
        }

        if let Some(results) = &self.results_file {
            settings.results_path = results.clone();
        }
        if let Some(log) = &self.log_file {
            settings.log_path = log.clone();
        }
        if let Some(region) = &self.default_region {
            settings.default_region = Some(region.clone());
        }
        if let Some(dir) = &self.data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if self.json_logs {
            settings.json_logs = true;
        }

        Ok(settings)
    }
}

/// Effective settings after defaults, the TOML file and flags are layered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub results_path: String,
    pub log_path: String,
    pub default_region: Option<String>,
    pub data_dir: Option<String>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_path: DEFAULT_RESULTS_FILE.to_string(),
            log_path: DEFAULT_LOG_FILE.to_string(),
            default_region: None,
            data_dir: None,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn with_toml(mut self, file_config: &TomlConfig) -> Self {
        if let Some(results) = &file_config.files.results {
            self.results_path = results.clone();
        }
        if let Some(log) = &file_config.files.log {
            self.log_path = log.clone();
        }
        if let Some(json) = file_config.files.json_logs {
            self.json_logs = json;
        }
        if let Some(region) = &file_config.lookup.default_region {
            self.default_region = Some(region.clone());
        }
        if let Some(dir) = &file_config.lookup.data_dir {
            self.data_dir = Some(dir.clone());
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("files.results", &self.results_path)?;
        validate_path("files.log", &self.log_path)?;

        if let Some(region) = &self.default_region {
            parse_region_code("lookup.default_region", region)?;
        }
        if let Some(dir) = &self.data_dir {
            validate_existing_dir("lookup.data_dir", dir)?;
        }

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn results_path(&self) -> &str {
        &self.results_path
    }

    fn log_path(&self) -> &str {
        &self.log_path
    }

    fn default_region(&self) -> Result<Option<country::Id>> {
        self.default_region
            .as_deref()
            .map(|region| parse_region_code("lookup.default_region", region))
            .transpose()
    }

    fn data_dir(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }
}
