//! Generator configuration.
//!
//! Settings come from a JSON file (explicit path or the per-user config
//! directory) and are then overridden by command-line flags.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SynthesisError};
use crate::registry::RegistryMode;
use crate::sizing::{SizingPolicy, no_inflation, resistance_inflation};
use crate::{
    DEFAULT_ANCHOR_RESISTANCE, DEFAULT_DOTTED_PROBABILITY, DEFAULT_MAX_NODES, DEFAULT_MIN_NODES,
};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_nodes: usize,
    /// Exclusive.
    pub max_nodes: usize,
    pub dotted_probability: f64,
    /// Track usage and resistance, prefer weight-1 merge endpoints and
    /// inflate the edge budget for anchors.
    pub anchor_aware: bool,
    pub anchor_resistance: u32,
    /// Resample colliding labels instead of letting them share a node.
    pub unique_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_nodes: DEFAULT_MIN_NODES,
            max_nodes: DEFAULT_MAX_NODES,
            dotted_probability: DEFAULT_DOTTED_PROBABILITY,
            anchor_aware: false,
            anchor_resistance: DEFAULT_ANCHOR_RESISTANCE,
            unique_labels: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            SynthesisError::InvalidConfig(format!("failed to read '{}': {err}", path.display()))
        })?;
        let config: GeneratorConfig = serde_json::from_str(&contents).map_err(|err| {
            SynthesisError::InvalidConfig(format!("failed to parse '{}': {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "oxlore").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads the per-user config file when one exists, else the defaults.
    pub fn discover() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.dotted_probability) {
            return Err(SynthesisError::InvalidConfig(format!(
                "dotted_probability must be within [0, 1], got {}",
                self.dotted_probability
            )));
        }
        self.sizing_policy().validate()
    }

    pub fn registry_mode(&self) -> RegistryMode {
        if self.anchor_aware {
            RegistryMode::AnchorAware
        } else {
            RegistryMode::Simple
        }
    }

    /// Resistance handed to anchors; zero unless anchor-aware.
    pub fn effective_resistance(&self) -> u32 {
        if self.anchor_aware {
            self.anchor_resistance
        } else {
            0
        }
    }

    pub fn sizing_policy(&self) -> SizingPolicy {
        SizingPolicy {
            min_nodes: self.min_nodes,
            max_nodes: self.max_nodes,
            resistance: self.effective_resistance(),
            inflation: if self.anchor_aware {
                resistance_inflation
            } else {
                no_inflation
            },
        }
    }
}
