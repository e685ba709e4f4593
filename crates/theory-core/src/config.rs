//! Configuration types for theory-task.
//!
//! [`Config::load`] reads `~/.config/theory-task/config.toml`, creating it with
//! the built-in defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! Field bindings live here rather than in code: every `[[fields]]` entry
//! turns one form field into an autocomplete with its own label, narrowing
//! and companion-fill rules.

use crate::autocomplete::AutocompleteConfig;
use crate::form::FieldId;
use crate::search::{LabelTemplate, MatchTarget};
use crate::types::CollectionKind;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
[ui]
theme           = "default"
time_format     = "%H:%M:%S"
date_format     = "%d/%m/%Y"
dropdown_rows   = 8
label_width     = 14

[data]
path = ""
"#;

/// Default bindings. Kept apart from the settings because a `[[fields]]`
/// array in the user file replaces these as a whole rather than merging.
const DEFAULT_FIELDS: &str = r#"
[[fields]]
field          = "fromLocation"
source         = "locations"
label          = ["code", "room"]
narrow_by      = { building = "fromBuilding", department = "fromDepartment" }
fill           = { building = "fromBuilding", department = "fromDepartment" }

[[fields]]
field          = "fromBuilding"
source         = "locations"
label          = ["building"]
match_on       = "label"
distinct       = true
fill           = { department = "fromDepartment" }

[[fields]]
field          = "fromDepartment"
source         = "locations"
label          = ["department"]
match_on       = "label"
distinct       = true
narrow_by      = { building = "fromBuilding" }

[[fields]]
field          = "toLocation"
source         = "locations"
label          = ["code", "room"]
narrow_by      = { building = "toBuilding", department = "toDepartment" }
fill           = { building = "toBuilding", department = "toDepartment" }

[[fields]]
field          = "toBuilding"
source         = "locations"
label          = ["building"]
match_on       = "label"
distinct       = true
fill           = { department = "toDepartment" }

[[fields]]
field          = "toDepartment"
source         = "locations"
label          = ["department"]
match_on       = "label"
distinct       = true
narrow_by      = { building = "toBuilding" }

[[fields]]
field          = "category"
source         = "disciplines"
label          = ["discipline"]
min_query_len  = 2
auto_highlight = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldBinding>,
}

#[derive(Deserialize)]
struct FieldsOnly {
    fields: Vec<FieldBinding>,
}

fn default_fields() -> Vec<FieldBinding> {
    config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_FIELDS, config::FileFormat::Toml))
        .build()
        .and_then(|c| c.try_deserialize::<FieldsOnly>())
        .map(|f| f.fields)
        .expect("built-in default field bindings must deserialize correctly")
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Maximum number of rows the popup shows before scrolling.
    #[serde(default = "default_dropdown_rows")]
    pub dropdown_rows: u16,
    /// Width of the label column in front of each field.
    #[serde(default = "default_label_width")]
    pub label_width: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_time_format() -> String { "%H:%M:%S".to_string() }
fn default_date_format() -> String { "%d/%m/%Y".to_string() }
fn default_dropdown_rows() -> u16 { 8 }
fn default_label_width() -> u16 { 14 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            time_format: default_time_format(),
            date_format: default_date_format(),
            dropdown_rows: default_dropdown_rows(),
            label_width: default_label_width(),
        }
    }
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// JSON record file. Empty means the embedded seed data.
    #[serde(default)]
    pub path: String,
}

impl DataConfig {
    pub fn path(&self) -> Option<&Path> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }
}

/// One `[[fields]]` entry: binds an autocomplete to a form field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldBinding {
    pub field: FieldId,
    pub source: CollectionKind,
    #[serde(default)]
    pub label: LabelTemplate,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default)]
    pub auto_highlight: bool,
    #[serde(default)]
    pub match_on: MatchTarget,
    #[serde(default)]
    pub distinct: bool,
    /// Record detail → field whose value the record must agree with. Detail
    /// keys are matched case-insensitively.
    #[serde(default)]
    pub narrow_by: BTreeMap<String, FieldId>,
    /// Record detail → field filled on commit when that field is empty.
    #[serde(default)]
    pub fill: BTreeMap<String, FieldId>,
}

fn default_min_query_len() -> usize { 1 }

impl FieldBinding {
    pub fn autocomplete_config(&self) -> AutocompleteConfig {
        AutocompleteConfig {
            min_query_len: self.min_query_len,
            auto_highlight_first: self.auto_highlight,
            match_on: self.match_on,
            label: self.label.clone(),
            distinct: self.distinct,
        }
    }

    pub fn narrow_constraints(&self) -> Vec<(String, FieldId)> {
        self.narrow_by
            .iter()
            .map(|(key, field)| (key.clone(), *field))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/theory-task/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, format!("{}{DEFAULT_FIELDS}", DEFAULT_SETTINGS.trim_start()))?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file, layered on top of the built-in defaults.
    ///
    /// Tables such as `[ui]` merge key by key. A `[[fields]]` array in the
    /// file replaces the default bindings as a whole.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The binding for `field`, if it has an autocomplete.
    pub fn binding(&self, field: FieldId) -> Option<&FieldBinding> {
        self.fields.iter().find(|b| b.field == field)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for binding in &self.fields {
            if !seen.insert(binding.field) {
                anyhow::bail!("field {} is bound more than once", binding.field);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("theory-task")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
