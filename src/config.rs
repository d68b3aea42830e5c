//! Layered settings: defaults, `~/.timesheetrc`, `TIMESHEET_*` env, flags.

use crate::error::{Result, TimesheetError};
use crate::estimate::{SessionParams, DEFAULT_FIRST_COMMIT_BONUS_MINUTES, DEFAULT_MAX_SESSION_GAP_MINUTES};
use crate::model::DateRange;
use crate::util::parse_date_input;
use chrono::{DateTime, TimeZone};
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".timesheetrc";
pub const ENV_PREFIX: &str = "TIMESHEET_";

/// A config file to merge. Missing files are skipped unless `required`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub required: bool,
}

impl ConfigFile {
    pub fn optional(path: PathBuf) -> Self {
        Self { path, required: false }
    }

    pub fn required(path: PathBuf) -> Self {
        Self { path, required: true }
    }
}

/// Immutable inputs of the estimation core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateConfig {
    pub session: SessionParams,
    pub email_aliases: HashMap<String, String>,
    /// Identities to keep; empty keeps everyone.
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub max_commit_diff_in_minutes: u32,
    pub first_commit_addition_in_minutes: u32,
    pub since: String,
    pub until: String,
    pub count_merges: bool,
    pub repositories: Vec<String>,
    pub email_aliases: HashMap<String, String>,
    pub authors: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_commit_diff_in_minutes: DEFAULT_MAX_SESSION_GAP_MINUTES,
            first_commit_addition_in_minutes: DEFAULT_FIRST_COMMIT_BONUS_MINUTES,
            since: "always".to_string(),
            until: "always".to_string(),
            count_merges: true,
            repositories: vec![".".to_string()],
            email_aliases: HashMap::new(),
            authors: Vec::new(),
        }
    }
}

/// Settings given by one layer. The rc file spells keys in camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PartialSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_commit_diff_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_commit_addition_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_merges: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_aliases: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}

impl PartialSettings {
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Figment::from(Json::file(path)).extract()?)
    }
}

impl Settings {
    /// Merge `files` in order, then the environment, then `overrides`.
    pub fn load(files: &[ConfigFile], overrides: PartialSettings) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        for file in files {
            if !file.path.is_file() {
                if file.required {
                    return Err(TimesheetError::InvalidConfig(format!(
                        "config file {} does not exist",
                        file.path.display()
                    )));
                }
                continue;
            }
            tracing::debug!(path = %file.path.display(), "merging config file");
            figment = figment.merge(Serialized::defaults(PartialSettings::from_file(&file.path)?));
        }

        figment = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides));

        let settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (from, to) in &self.email_aliases {
            if from.is_empty() || to.is_empty() {
                return Err(TimesheetError::InvalidAlias(format!(
                    "'{from}={to}' has an empty side"
                )));
            }
        }
        if self.repositories.is_empty() {
            return Err(TimesheetError::InvalidConfig("no repositories configured".to_string()));
        }
        Ok(())
    }

    pub fn estimate_config(&self) -> EstimateConfig {
        EstimateConfig {
            session: SessionParams {
                max_session_gap_minutes: self.max_commit_diff_in_minutes,
                first_commit_bonus_minutes: self.first_commit_addition_in_minutes,
            },
            email_aliases: self.email_aliases.clone(),
            authors: self.authors.clone(),
        }
    }

    /// Resolve `since` / `until`; calendar keywords use the time zone of `now`.
    pub fn date_range<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DateRange> {
        let mut range = DateRange::new();
        let since = parse_date_input(&self.since, now)?;
        let until = parse_date_input(&self.until, now)?;

        if let (Some(s), Some(u)) = (since, until) {
            if s > u {
                return Err(TimesheetError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }
        if let Some(s) = since {
            range = range.with_since(s);
        }
        if let Some(u) = until {
            range = range.with_until(u);
        }
        Ok(range)
    }

    pub fn repository_paths(&self) -> Vec<PathBuf> {
        self.repositories.iter().map(PathBuf::from).collect()
    }
}

/// Config files to merge, lowest precedence first.
///
/// `~/.timesheetrc` is optional; a file named explicitly must exist.
pub fn config_files(ignore_rc: bool, explicit: Option<&Path>) -> Vec<ConfigFile> {
    let mut files = Vec::new();
    if !ignore_rc {
        if let Some(home) = dirs::home_dir() {
            files.push(ConfigFile::optional(home.join(RC_FILE_NAME)));
        }
    }
    if let Some(path) = explicit {
        files.push(ConfigFile::required(path.to_path_buf()));
    }
    files
}
