//! JSON configuration: column-name mapping, squad colors, axis layout.
//!
//! The table schema is configurable rather than hard-coded: every
//! logical field of a delivery row maps to an actual column header.
//! Header lookup happens once at load time; the per-row path works on
//! resolved indices only.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Column header for each logical field of a delivery row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    /// Product identifier column
    pub product: String,
    /// Solution identifier column
    pub solution: String,
    /// Planning label column (`T<1-4>/<YYYY>` free text)
    pub planning: String,
    /// Tribe column
    pub tribe: String,
    /// Squad column
    pub squad: String,
    /// Full-kube flag column
    pub full_kube: String,
    /// Full-z flag column
    pub full_z: String,
    /// Mosart flag column
    pub mosart: String,
    /// Criticality flag column
    pub critical: String,
    /// Decommissioning flag column
    pub decommissioned: String,
    /// Sign-off flag column
    pub validated: String,
    /// Sub-task type column
    pub subtask: String,
    /// Per-subtask completion text column
    pub realization: String,
}

/// Quarter axis layout of a deck: the first column and how many
/// consecutive quarters the slide shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Label of the first quarter column
    #[serde(default = "AxisConfig::default_start")]
    pub start: String,
    /// Number of quarter columns
    #[serde(default = "AxisConfig::default_quarters")]
    pub quarters: usize,
}

impl AxisConfig {
    fn default_start() -> String {
        "T1/2025".to_string()
    }

    fn default_quarters() -> usize {
        8
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            start: Self::default_start(),
            quarters: Self::default_quarters(),
        }
    }
}

/// Full generator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logical field -> column header mapping
    pub columns: Columns,
    /// Explicit squad colors, `squad -> "#RRGGBB"`. Squads missing here
    /// get a derived color.
    #[serde(default)]
    pub squad_colors: BTreeMap<String, String>,
    /// Quarter axis layout
    #[serde(default)]
    pub axis: AxisConfig,
    /// Duplicate critical rows one year out before merging
    #[serde(default)]
    pub carry_critical: bool,
}

impl Config {
    /// Read and parse a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
