//! Catastrophic forgetting in a small MLP
//!
//! This library trains a two-layer fully connected classifier sequentially on
//! two disjoint two-class tasks drawn from a four-class 2-D dataset and
//! measures how much first-task accuracy is lost after learning the second.
//!
//! # Modules
//!
//! - `classifier`: forward pass, per-sample backpropagation, evaluation
//! - `layers`: Layer trait and the dense layer holding weights and biases
//! - `optimizers`: plain gradient descent
//! - `history`: loss/accuracy log and weight snapshots
//! - `data`: the fixed task datasets
//! - `experiment`: the two-phase forgetting run
//! - `config`: JSON-loadable configuration
//! - `utils`: RNG and activation functions

pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod history;
pub mod layers;
pub mod metrics;
pub mod optimizers;
pub mod utils;

pub use classifier::{ForwardResult, MlpClassifier};
pub use config::{ClassifierConfig, ExperimentConfig};
pub use data::Sample;
pub use error::{Error, Result};
pub use history::WeightSnapshot;
pub use metrics::{EpochMetrics, WeightMagnitudes};

/// Features per sample (2-D points).
pub const INPUT_SIZE: usize = 2;
/// Output classes across both tasks.
pub const NUM_CLASSES: usize = 4;
/// Weights are initialized uniformly in `[-WEIGHT_INIT_RANGE, WEIGHT_INIT_RANGE]`.
pub const WEIGHT_INIT_RANGE: f64 = 0.1;
/// Biases are initialized uniformly in `[-BIAS_INIT_RANGE, BIAS_INIT_RANGE]`.
pub const BIAS_INIT_RANGE: f64 = 0.05;
/// Added to the true-class probability before taking the log.
pub const LOSS_EPSILON: f64 = 1e-15;
