//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use sched_core::ValidityPeriod;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Classroom list used when a command is not given one.
    pub classrooms_path: Option<PathBuf>,
    /// Column mapping used for tabular input when a command is not given one.
    pub mapping_path: Option<PathBuf>,
    /// First day of the schedule's validity period.
    pub valid_from: NaiveDate,
    /// Last day of the schedule's validity period.
    pub valid_to: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        let (valid_from, valid_to) = academic_year(Local::now().date_naive());
        Self {
            classrooms_path: None,
            mapping_path: None,
            valid_from,
            valid_to,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SCHED_*)
        figment = figment.merge(Env::prefixed("SCHED_"));

        figment.extract()
    }

    pub const fn validity_period(&self) -> ValidityPeriod {
        ValidityPeriod::new(self.valid_from, self.valid_to)
    }
}

/// The teaching year containing `today`: 1 October to 1 July of the next year.
fn academic_year(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = if today.month() >= 10 {
        today.year()
    } else {
        today.year() - 1
    };
    let start = NaiveDate::from_ymd_opt(year, 10, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(year + 1, 7, 1).unwrap_or(today);
    (start, end)
}

/// Returns the platform-specific config directory for sched.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sched"))
}
