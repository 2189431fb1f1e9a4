//! Run settings.
//!
//! Resolved in three layers, lowest precedence first: built-in defaults,
//! `LABCFG_*` environment variables, then command-line flags.

use std::path::PathBuf;

use labcfg_core::ConfigType;

use crate::layout::Layout;

/// Default base directory, relative to the working directory.
pub const DEFAULT_BASE_DIR: &str = "configs";

/// How the run report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable log lines on stderr.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(SettingsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Flags that override environment settings. `None` leaves the lower
/// layer in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
    pub types: Vec<ConfigType>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_dir: PathBuf,
    /// Explicit schema path; `None` uses the layout default under `base_dir`.
    pub schema_path: Option<PathBuf>,
    /// Types to process; empty means all of them.
    pub types: Vec<ConfigType>,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            schema_path: None,
            types: Vec::new(),
            format: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Variables:
    /// - `LABCFG_BASE_DIR` (default: `configs`)
    /// - `LABCFG_SCHEMA_PATH` (default: `<base>/validation/schema/config.schema.json`)
    /// - `LABCFG_FORMAT` (`text` or `json`, default: `text`)
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Settings::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            base_dir: non_empty("LABCFG_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
            schema_path: non_empty("LABCFG_SCHEMA_PATH").map(PathBuf::from),
            types: defaults.types,
            format: match non_empty("LABCFG_FORMAT") {
                Some(raw) => raw.parse()?,
                None => defaults.format,
            },
        })
    }

    /// Apply command-line overrides on top of these settings.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_dir) = overrides.base_dir {
            self.base_dir = base_dir;
        }
        if let Some(schema_path) = overrides.schema_path {
            self.schema_path = Some(schema_path);
        }
        if !overrides.types.is_empty() {
            self.types = overrides.types;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }

    /// Selected types in processing order, duplicates removed.
    pub fn selected_types(&self) -> Vec<ConfigType> {
        if self.types.is_empty() {
            return ConfigType::all().to_vec();
        }
        let mut types = self.types.clone();
        types.sort();
        types.dedup();
        types
    }

    /// Path layout for this run.
    pub fn layout(&self) -> Layout {
        let layout = Layout::new(&self.base_dir);
        match &self.schema_path {
            Some(schema_path) => layout.with_schema_path(schema_path),
            None => layout,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid output format \"{0}\" (expected text or json)")]
    InvalidFormat(String),
}
