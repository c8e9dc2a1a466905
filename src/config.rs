//! Configuration structures for the classifier and the forgetting experiment
//!
//! Both structures deserialize from JSON; every field has a default, so an
//! empty object `{}` is a valid configuration.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_HIDDEN_SIZE: usize = 8;
/// Epochs between weight snapshots.
pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 5;
pub const DEFAULT_TASK_EPOCHS: usize = 100;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 20;

/// Hyperparameters of a single classifier.
///
/// # Example
///
/// ```json
/// {
///   "learning_rate": 0.1,
///   "hidden_size": 8,
///   "seed": 42,
///   "snapshot_interval": 5,
///   "snapshot_retention": 100
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Step size of the gradient descent update (must be positive)
    pub learning_rate: f64,

    /// Number of sigmoid units in the hidden layer (must be positive)
    pub hidden_size: usize,

    /// Seed for the owned RNG; `None` seeds from the clock
    pub seed: Option<u64>,

    /// Take a weight snapshot every this many epochs (must be positive)
    pub snapshot_interval: usize,

    /// Keep at most this many snapshots, dropping the oldest; `None` keeps all
    pub snapshot_retention: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            hidden_size: DEFAULT_HIDDEN_SIZE,
            seed: None,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            snapshot_retention: None,
        }
    }
}

impl ClassifierConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }

        if self.hidden_size == 0 {
            return Err(Error::InvalidConfig(
                "hidden_size must be positive".to_string(),
            ));
        }

        if self.snapshot_interval == 0 {
            return Err(Error::InvalidConfig(
                "snapshot_interval must be positive".to_string(),
            ));
        }

        if self.snapshot_retention == Some(0) {
            return Err(Error::InvalidConfig(
                "snapshot_retention must be positive when set".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for the two-phase forgetting experiment.
///
/// # Example
///
/// ```json
/// {
///   "classifier": { "seed": 7 },
///   "task_epochs": 100,
///   "progress_interval": 20
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub classifier: ClassifierConfig,

    /// Epochs spent on each task
    pub task_epochs: usize,

    /// Log progress every this many epochs (0 disables progress logging)
    pub progress_interval: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            task_epochs: DEFAULT_TASK_EPOCHS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        if self.task_epochs == 0 {
            return Err(Error::InvalidConfig(
                "task_epochs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads an experiment configuration from a JSON file.
///
/// Reads the file at `path`, deserializes its JSON contents into an
/// `ExperimentConfig` and validates it.
///
/// # Examples
///
/// ```no_run
/// use mlp_forgetting::config::load_config;
///
/// let cfg = load_config("config/forgetting.json").unwrap();
/// assert!(cfg.task_epochs > 0);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses and validates an experiment configuration from a JSON string.
pub fn parse_config(contents: &str) -> Result<ExperimentConfig> {
    let config: ExperimentConfig = serde_json::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.hidden_size, 8);
        assert_eq!(config.snapshot_interval, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_learning_rate() {
        let config = ClassifierConfig {
            learning_rate: 0.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_retention() {
        let config = ClassifierConfig {
            snapshot_retention: Some(0),
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
