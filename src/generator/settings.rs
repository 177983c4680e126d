// src/generator/settings.rs

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generator::curve::KeyframeCurve;

/// Map sizes the generator accepts from configuration.
pub const MAP_SIZE_RANGE: RangeInclusive<usize> = 15..=250;

/// Parameters of one automatic generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Side length of the square map.
    pub map_size: usize,
    /// Carried through to seeding, which currently ignores it.
    pub initial_density: f32,
    /// Solidity probability by distance from the map center.
    pub density_curve: KeyframeCurve,
    /// Solid cells need at least this many solid neighbors to survive.
    pub min_threshold: usize,
    /// Open cells with more than this many solid neighbors fill in.
    pub max_threshold: usize,
    /// Refine passes before and after chamber removal.
    pub refinement_steps: usize,
    pub max_pillar_size: usize,
    pub remove_pillars: bool,
    pub invert_height: bool,
    /// `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            map_size: 128,
            initial_density: 0.4,
            density_curve: KeyframeCurve::default(),
            min_threshold: 4,
            max_threshold: 4,
            refinement_steps: 3,
            max_pillar_size: 20,
            remove_pillars: false,
            invert_height: true,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Parses and validates settings from JSON. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: GeneratorSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        info!("Loaded generator settings from {:?}", path);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MAP_SIZE_RANGE.contains(&self.map_size) {
            return Err(ConfigError::Invalid(format!(
                "map_size {} outside {}..={}",
                self.map_size,
                MAP_SIZE_RANGE.start(),
                MAP_SIZE_RANGE.end()
            )));
        }
        if self.min_threshold > self.max_threshold {
            return Err(ConfigError::Invalid(format!(
                "min_threshold {} exceeds max_threshold {}",
                self.min_threshold, self.max_threshold
            )));
        }
        if self.max_threshold > 8 {
            return Err(ConfigError::Invalid(format!(
                "max_threshold {} exceeds the 8 cells of a neighborhood",
                self.max_threshold
            )));
        }
        if self.density_curve.is_empty() {
            return Err(ConfigError::Invalid("density_curve has no keyframes".to_string()));
        }
        Ok(())
    }
}
