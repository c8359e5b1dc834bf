use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Hyper-parameters for one training run.
///
/// Loadable from a JSON file; unspecified fields fall back to the defaults
/// below, and the CLI can override any field individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of units in the hidden layer.
    pub hidden_width: usize,
    pub learning_rate: f64,
    /// Fraction of the previous update folded into the current one.
    pub momentum: f64,
    /// Number of epochs to run; training never stops earlier unless
    /// `early_stopping` is set.
    pub epoch_limit: usize,
    /// Stop once an epoch fails to improve training accuracy. Off by
    /// default: every epoch's result is adopted unconditionally.
    pub early_stopping: bool,
    /// Z-score the attributes per feature, fit on the training set.
    pub standardize: bool,
    /// Seed for weight init, shuffling, and tie-breaks. Random when unset.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            hidden_width: 8,
            learning_rate: 0.1,
            momentum: 0.3,
            epoch_limit: 50,
            early_stopping: false,
            standardize: false,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Loads a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
