use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SEED: u64 = 42;

/// Inclusive integer range a generated value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn check(self, field: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.max {
            return Err(ConfigError::InvalidSpan { field, min: self.min, max: self.max });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub drone_count: usize,
    pub order_count: usize,
    /// kg
    pub capacity: Span,
    /// km
    pub max_range: Span,
    /// km/h
    pub speed: Span,
    /// kg
    pub weight: Span,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            drone_count: 15,
            order_count: 100,
            capacity: Span::new(10, 29),
            max_range: Span::new(10, 19),
            speed: Span::new(30, 50),
            weight: Span::new(1, 20),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity.check("capacity")?;
        self.max_range.check("max_range")?;
        self.speed.check("speed")?;
        self.weight.check("weight")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Upper bound on allocation passes per run.
    pub max_rounds: usize,
    pub generator: GeneratorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED, max_rounds: 10, generator: GeneratorConfig::default() }
    }
}

impl SimulationConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.generator.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
