use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{LoadOptions, NumericPolicy, RowPolicy};
use crate::selector::TargetSpec;

/// Run settings read from a JSON file; every field is optional.
///
/// ```json
/// { "target": "species", "train_fraction": 0.75, "seed": 42,
///   "numeric_policy": "strict", "row_policy": "skip_incomplete",
///   "standardize": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target column; prompt interactively when absent.
    pub target: Option<TargetSpec>,
    pub train_fraction: f64,
    /// Seed for a reproducible split.
    pub seed: Option<u64>,
    pub numeric_policy: NumericPolicy,
    pub row_policy: RowPolicy,
    /// Z-score features (fitted on train) after splitting.
    pub standardize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: None,
            train_fraction: 0.8,
            seed: None,
            numeric_policy: NumericPolicy::default(),
            row_policy: RowPolicy::default(),
            standardize: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            numeric: self.numeric_policy,
            rows: self.row_policy,
        }
    }
}
