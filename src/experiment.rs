//! Two-phase forgetting experiment
//!
//! Trains on task 1, measures it, trains on task 2 with the same parameters,
//! then measures task 1 again. The drop in task 1 accuracy is the amount of
//! catastrophic forgetting.

use crate::classifier::MlpClassifier;
use crate::config::ExperimentConfig;
use crate::data::Sample;
use crate::error::{Error, Result};
use crate::metrics::{EpochMetrics, WeightMagnitudes};
use log::info;
use std::fmt;

/// Accuracy drop above which forgetting is reported as severe.
pub const SEVERE_FORGETTING_THRESHOLD: f64 = 0.3;
/// Accuracy drop above which forgetting is reported as moderate.
pub const MODERATE_FORGETTING_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgettingSeverity {
    Severe,
    Moderate,
    Minimal,
}

impl ForgettingSeverity {
    pub fn from_drop(accuracy_drop: f64) -> Self {
        if accuracy_drop > SEVERE_FORGETTING_THRESHOLD {
            ForgettingSeverity::Severe
        } else if accuracy_drop > MODERATE_FORGETTING_THRESHOLD {
            ForgettingSeverity::Moderate
        } else {
            ForgettingSeverity::Minimal
        }
    }
}

impl fmt::Display for ForgettingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ForgettingSeverity::Severe => "severe catastrophic forgetting",
            ForgettingSeverity::Moderate => "moderate catastrophic forgetting",
            ForgettingSeverity::Minimal => "minimal forgetting",
        };
        f.write_str(text)
    }
}

/// Evaluation of the model on one dataset at one point in the experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEvaluation {
    pub metrics: EpochMetrics,
    /// Metrics per label present in the dataset, ascending
    pub per_class: Vec<(usize, EpochMetrics)>,
    pub weights: WeightMagnitudes,
}

impl TaskEvaluation {
    pub fn measure(model: &MlpClassifier, dataset: &[Sample]) -> Result<Self> {
        Ok(Self {
            metrics: model.evaluate(dataset)?,
            per_class: model.class_accuracies(dataset)?,
            weights: model.weight_magnitudes(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForgettingReport {
    /// Last training epoch of each phase
    pub task1_training: EpochMetrics,
    pub task2_training: EpochMetrics,
    pub task1_before: TaskEvaluation,
    pub task2: TaskEvaluation,
    pub task1_after: TaskEvaluation,
    pub all_classes: TaskEvaluation,
    /// `task1_before.accuracy - task1_after.accuracy`
    pub accuracy_drop: f64,
    pub severity: ForgettingSeverity,
}

/// Train on `task1`, then on `task2`, measuring task 1 before and after.
///
/// Progress is logged at `info` level every `progress_interval` epochs.
pub fn run_forgetting_experiment(
    model: &mut MlpClassifier,
    task1: &[Sample],
    task2: &[Sample],
    config: &ExperimentConfig,
) -> Result<ForgettingReport> {
    config.validate()?;

    info!("phase 1: training on task 1 ({} samples)", task1.len());
    let task1_training = train_phase(model, task1, config)?;
    let task1_before = TaskEvaluation::measure(model, task1)?;
    info!(
        "task 1 accuracy after phase 1: {:.1}%",
        task1_before.metrics.accuracy * 100.0
    );

    info!("phase 2: training on task 2 ({} samples)", task2.len());
    let task2_training = train_phase(model, task2, config)?;
    let task2_eval = TaskEvaluation::measure(model, task2)?;
    let task1_after = TaskEvaluation::measure(model, task1)?;

    let all: Vec<Sample> = task1.iter().chain(task2).copied().collect();
    let all_classes = TaskEvaluation::measure(model, &all)?;

    let accuracy_drop = task1_before.metrics.accuracy - task1_after.metrics.accuracy;
    let severity = ForgettingSeverity::from_drop(accuracy_drop);
    info!(
        "task 1 accuracy {:.1}% -> {:.1}%: {}",
        task1_before.metrics.accuracy * 100.0,
        task1_after.metrics.accuracy * 100.0,
        severity
    );

    Ok(ForgettingReport {
        task1_training,
        task2_training,
        task1_before,
        task2: task2_eval,
        task1_after,
        all_classes,
        accuracy_drop,
        severity,
    })
}

fn train_phase(
    model: &mut MlpClassifier,
    dataset: &[Sample],
    config: &ExperimentConfig,
) -> Result<EpochMetrics> {
    let mut last = None;
    for n in 1..=config.task_epochs {
        let metrics = model.train_step(dataset)?;
        if config.progress_interval > 0 && n % config.progress_interval == 0 {
            let WeightMagnitudes { hidden, output } = model.weight_magnitudes();
            info!(
                "epoch {}: loss = {:.4}, accuracy = {:.1}%, hidden mag = {:.3}, output mag = {:.3}",
                model.epoch(),
                metrics.loss,
                metrics.accuracy * 100.0,
                hidden,
                output
            );
        }
        last = Some(metrics);
    }
    last.ok_or_else(|| Error::InvalidConfig("task_epochs must be positive".to_string()))
}
