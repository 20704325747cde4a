//! Configuration system for armswatch with validation and default generation.
//!
//! The configuration file is searched at
//! **XDG_CONFIG_HOME**/armswatch/armswatch.toml (or under the directory given
//! with `--config`). When no file exists a commented default is written there
//! on first run.
//!
//! ```toml
//! #[Display]
//! update_interval = 1        # Seconds between display refreshes (1-60)
//! use_12_hour_clock = false  # Show slot times with AM/PM
//!
//! #[Schedule]
//! server_utc_offset = -2         # Fixed UTC offset of the game server (-12 to 14)
//! reference_date = "2025-10-21"  # Calendar date of cycle day 1 at server midnight
//! ```
//!
//! Every field is optional; missing fields fall back to the defaults in
//! [`crate::constants`]. Out-of-range values and unparseable dates are
//! rejected with messages that spell out the accepted range.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;

/// Application configuration loaded from `armswatch.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seconds between display refreshes (1-60)
    pub update_interval: Option<u64>,
    /// Show slot times with AM/PM instead of a 24-hour clock
    pub use_12_hour_clock: Option<bool>,
    /// Fixed UTC offset of the game server in hours (-12 to 14)
    pub server_utc_offset: Option<i32>,
    /// Calendar date of cycle day 1 at server midnight (YYYY-MM-DD)
    pub reference_date: Option<String>,
}

impl Config {
    /// Load the configuration, writing a default file first if none exists.
    pub fn load(custom_dir: Option<&str>) -> Result<Self> {
        let path = get_config_path(custom_dir)?;
        if !path.exists() {
            create_default_config(&path)?;
        }
        load_from_path(&path)
    }

    pub fn update_interval(&self) -> u64 {
        self.update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL)
    }

    pub fn use_12_hour_clock(&self) -> bool {
        self.use_12_hour_clock.unwrap_or(DEFAULT_USE_12_HOUR_CLOCK)
    }

    pub fn server_utc_offset(&self) -> i32 {
        self.server_utc_offset.unwrap_or(DEFAULT_SERVER_UTC_OFFSET)
    }

    /// The validated day-1 anchor date.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .unwrap_or_else(builtin_reference_date)
    }

    /// Log the effective configuration as an indented block.
    pub fn log_config(&self, path: &Path) {
        log_block_start!("Loaded configuration from {}", path.display());
        log_indented!("Server timezone: UTC{:+}", self.server_utc_offset());
        log_indented!("Cycle day 1 reference: {}", self.reference_date());
        log_indented!("Update interval: {}s", self.update_interval());
        log_indented!(
            "Clock style: {}",
            if self.use_12_hour_clock() {
                "12-hour"
            } else {
                "24-hour"
            }
        );
    }
}

/// The reference date shipped with the binary.
fn builtin_reference_date() -> NaiveDate {
    NaiveDate::parse_from_str(DEFAULT_REFERENCE_DATE, "%Y-%m-%d").unwrap()
}

/// Resolve the path of `armswatch.toml`, honoring a `--config` override.
pub fn get_config_path(custom_dir: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = custom_dir {
        return Ok(PathBuf::from(dir).join("armswatch.toml"));
    }
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("armswatch").join("armswatch.toml"))
}

/// Load and validate the configuration at `path`.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Write the commented default configuration to `path`.
fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = format!(
        r#"#[Display]
update_interval = {DEFAULT_UPDATE_INTERVAL}        # Seconds between display refreshes ({MINIMUM_UPDATE_INTERVAL}-{MAXIMUM_UPDATE_INTERVAL})
use_12_hour_clock = {DEFAULT_USE_12_HOUR_CLOCK}  # Show slot times with AM/PM

#[Schedule]
server_utc_offset = {DEFAULT_SERVER_UTC_OFFSET}         # Fixed UTC offset of the game server ({MINIMUM_UTC_OFFSET} to {MAXIMUM_UTC_OFFSET})
reference_date = "{DEFAULT_REFERENCE_DATE}"  # Calendar date of cycle day 1 at server midnight
"#
    );

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write default config: {}", path.display()))?;
    log_block_start!("Created default configuration: {}", path.display());
    Ok(())
}

/// Validate field ranges and formats.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval) = config.update_interval
        && !(MINIMUM_UPDATE_INTERVAL..=MAXIMUM_UPDATE_INTERVAL).contains(&interval)
    {
        return Err(anyhow!(
            "Update interval must be between {MINIMUM_UPDATE_INTERVAL} and {MAXIMUM_UPDATE_INTERVAL} seconds, got {interval}"
        ));
    }

    if let Some(offset) = config.server_utc_offset
        && !(MINIMUM_UTC_OFFSET..=MAXIMUM_UTC_OFFSET).contains(&offset)
    {
        return Err(anyhow!(
            "Server UTC offset must be between {MINIMUM_UTC_OFFSET} and {MAXIMUM_UTC_OFFSET} hours, got {offset}"
        ));
    }

    if let Some(raw) = config.reference_date.as_deref()
        && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err()
    {
        return Err(anyhow!(
            "Reference date must be a valid YYYY-MM-DD date, got \"{raw}\""
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Log;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("armswatch.toml");
        let mut file = std::fs::File::create(&path).expect("create config file");
        file.write_all(content.as_bytes()).expect("write config");
        (dir, path)
    }

    #[test]
    fn loads_valid_config() {
        let (_dir, path) = write_config(
            "update_interval = 5\nuse_12_hour_clock = true\nserver_utc_offset = 1\nreference_date = \"2025-01-06\"\n",
        );
        let config = load_from_path(&path).expect("load config");
        assert_eq!(config.update_interval(), 5);
        assert!(config.use_12_hour_clock());
        assert_eq!(config.server_utc_offset(), 1);
        assert_eq!(
            config.reference_date(),
            NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid date")
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let (_dir, path) = write_config("");
        let config = load_from_path(&path).expect("load config");
        assert_eq!(config.update_interval(), DEFAULT_UPDATE_INTERVAL);
        assert!(!config.use_12_hour_clock());
        assert_eq!(config.server_utc_offset(), DEFAULT_SERVER_UTC_OFFSET);
        assert_eq!(config.reference_date(), builtin_reference_date());
    }

    #[test]
    fn rejects_out_of_range_interval() {
        let (_dir, path) = write_config("update_interval = 0\n");
        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Update interval"));

        let (_dir, path) = write_config("update_interval = 61\n");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let (_dir, path) = write_config("server_utc_offset = 15\n");
        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Server UTC offset"));
    }

    #[test]
    fn rejects_malformed_reference_date() {
        let (_dir, path) = write_config("reference_date = \"21/10/2025\"\n");
        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Reference date"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let (_dir, path) = write_config("update_interval = [not toml\n");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn creates_default_config_on_first_load() {
        Log::set_enabled(false);
        let dir = tempfile::tempdir().expect("create temp dir");
        let dir_str = dir.path().to_str().expect("utf-8 path");
        let config = Config::load(Some(dir_str)).expect("load with default creation");
        Log::set_enabled(true);

        assert!(dir.path().join("armswatch.toml").exists());
        assert_eq!(config.update_interval(), DEFAULT_UPDATE_INTERVAL);
        assert_eq!(config.server_utc_offset(), DEFAULT_SERVER_UTC_OFFSET);
    }
}
