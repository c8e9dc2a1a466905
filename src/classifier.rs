//! Two-layer sigmoid/softmax classifier trained by per-sample gradient descent
//!
//! Network: `INPUT_SIZE -> hidden_size (sigmoid) -> NUM_CLASSES (softmax)`,
//! trained on cross-entropy loss. Every sample updates all four parameter
//! tensors immediately; there is no batching.

use crate::config::ClassifierConfig;
use crate::data::{labels_in, Sample};
use crate::error::{Error, Result};
use crate::history::{TrainingHistory, WeightSnapshot};
use crate::layers::{DenseLayer, Layer};
use crate::metrics::{EpochMetrics, MetricsAccumulator, WeightMagnitudes};
use crate::optimizers::{Optimizer, SGD};
use crate::utils::{argmax, sigmoid, sigmoid_derivative, softmax, SimpleRng};
use crate::{BIAS_INIT_RANGE, INPUT_SIZE, LOSS_EPSILON, NUM_CLASSES, WEIGHT_INIT_RANGE};
use log::debug;

/// Intermediate values of one forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResult {
    /// Sigmoid activations of the hidden layer
    pub hidden: Vec<f64>,
    /// Raw output scores before softmax
    pub logits: Vec<f64>,
    /// Class probabilities (non-negative, sum to 1)
    pub output: Vec<f64>,
}

/// Rectangle sampled by [`MlpClassifier::decision_boundary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Prediction at one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPoint {
    pub x: f64,
    pub y: f64,
    pub class: usize,
    /// Probability of the predicted class
    pub confidence: f64,
    pub probabilities: Vec<f64>,
}

/// Cross-entropy of `probabilities` against `label`: `-ln(p[label] + 1e-15)`.
///
/// The epsilon keeps the loss finite when the true class has probability 0.
pub fn cross_entropy_loss(probabilities: &[f64], label: usize) -> f64 {
    -(probabilities[label] + LOSS_EPSILON).ln()
}

/// Fully connected classifier with one sigmoid hidden layer.
///
/// Owns its parameters, its RNG, and its training history.
///
/// # Example
///
/// ```
/// use mlp_forgetting::classifier::MlpClassifier;
/// use mlp_forgetting::config::ClassifierConfig;
/// use mlp_forgetting::data::task1_dataset;
///
/// let mut model = MlpClassifier::new(ClassifierConfig::seeded(42)).unwrap();
/// let metrics = model.train(&task1_dataset(), 10).unwrap();
/// assert_eq!(model.epoch(), 10);
/// assert!(metrics.loss >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    config: ClassifierConfig,
    hidden_layer: DenseLayer,
    output_layer: DenseLayer,
    optimizer: SGD,
    rng: SimpleRng,
    epoch: usize,
    history: TrainingHistory,
}

impl MlpClassifier {
    /// Build a classifier with freshly initialized parameters.
    ///
    /// The initial weight snapshot (epoch 0) is recorded immediately.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if the configuration fails validation.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        };
        let (hidden_layer, output_layer) = initialize_layers(config.hidden_size, &mut rng);

        let mut model = Self {
            optimizer: SGD::new(config.learning_rate),
            history: TrainingHistory::new(config.snapshot_retention),
            config,
            hidden_layer,
            output_layer,
            rng,
            epoch: 0,
        };
        model.snapshot();

        debug!(
            "initialized classifier: {} -> {} -> {}, learning rate {}",
            INPUT_SIZE,
            model.config.hidden_size,
            NUM_CLASSES,
            model.config.learning_rate
        );
        Ok(model)
    }

    /// Run the network on one input vector.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if `x.len() != INPUT_SIZE`.
    pub fn forward(&self, x: &[f64]) -> Result<ForwardResult> {
        check_input(x)?;
        Ok(self.forward_unchecked(x))
    }

    /// Class probabilities for `x`.
    pub fn predict(&self, x: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(x)?.output)
    }

    /// Most probable class for `x`; ties go to the lowest index.
    pub fn predict_class(&self, x: &[f64]) -> Result<usize> {
        Ok(argmax(&self.predict(x)?))
    }

    fn forward_unchecked(&self, x: &[f64]) -> ForwardResult {
        let mut hidden = vec![0.0; self.hidden_layer.output_size()];
        self.hidden_layer.forward(x, &mut hidden);
        for h in hidden.iter_mut() {
            *h = sigmoid(*h);
        }

        let mut logits = vec![0.0; self.output_layer.output_size()];
        self.output_layer.forward(&hidden, &mut logits);
        let output = softmax(&logits);

        ForwardResult {
            hidden,
            logits,
            output,
        }
    }

    /// One epoch of per-sample gradient descent over `dataset`, in order.
    ///
    /// Increments the epoch, appends loss and accuracy to the history, and
    /// records a weight snapshot whenever the epoch is a multiple of the
    /// snapshot interval. The returned metrics are measured during the pass,
    /// each sample scored before its own update.
    ///
    /// # Errors
    ///
    /// `Error::EmptyDataset` or `Error::LabelOutOfRange`; on error nothing is
    /// mutated.
    pub fn train_step(&mut self, dataset: &[Sample]) -> Result<EpochMetrics> {
        check_dataset(dataset)?;

        let mut accumulator = MetricsAccumulator::default();
        let mut grad_hidden = vec![0.0; self.hidden_layer.output_size()];
        let mut grad_input = vec![0.0; INPUT_SIZE];

        for sample in dataset {
            let ForwardResult { hidden, output, .. } = self.forward_unchecked(&sample.input);

            accumulator.add(
                cross_entropy_loss(&output, sample.label),
                argmax(&output) == sample.label,
            );

            // Softmax + cross-entropy gradient: p - one_hot(label).
            let mut output_error = output;
            output_error[sample.label] -= 1.0;

            // Both backward calls read pre-update weights; updates come after.
            self.output_layer
                .backward(&hidden, &output_error, &mut grad_hidden);
            for (g, &h) in grad_hidden.iter_mut().zip(&hidden) {
                *g *= sigmoid_derivative(h);
            }
            self.hidden_layer
                .backward(&sample.input, &grad_hidden, &mut grad_input);

            self.output_layer.update_parameters(&mut self.optimizer);
            self.hidden_layer.update_parameters(&mut self.optimizer);
        }

        self.epoch += 1;
        let metrics = accumulator.finish();
        self.history.record_epoch(metrics.loss, metrics.accuracy);

        if self.epoch % self.config.snapshot_interval == 0 {
            self.snapshot();
        }

        debug!(
            "epoch {}: loss = {:.4}, accuracy = {:.1}%",
            self.epoch,
            metrics.loss,
            metrics.accuracy * 100.0
        );
        Ok(metrics)
    }

    /// Run `train_step` `epochs` times and return the last epoch's metrics.
    ///
    /// With `epochs == 0` nothing is trained and the current model is
    /// evaluated instead.
    pub fn train(&mut self, dataset: &[Sample], epochs: usize) -> Result<EpochMetrics> {
        self.train_with_callback(dataset, epochs, |_, _| {})
    }

    /// Like [`train`](Self::train), calling `on_epoch(metrics, n)` after
    /// each epoch, where `n` counts from 1 within this call.
    pub fn train_with_callback<F>(
        &mut self,
        dataset: &[Sample],
        epochs: usize,
        mut on_epoch: F,
    ) -> Result<EpochMetrics>
    where
        F: FnMut(&EpochMetrics, usize),
    {
        check_dataset(dataset)?;
        if epochs == 0 {
            return self.evaluate(dataset);
        }

        let mut metrics = self.train_step(dataset)?;
        on_epoch(&metrics, 1);
        for n in 2..=epochs {
            metrics = self.train_step(dataset)?;
            on_epoch(&metrics, n);
        }
        Ok(metrics)
    }

    /// Loss and accuracy over `dataset` without touching parameters or history.
    pub fn evaluate(&self, dataset: &[Sample]) -> Result<EpochMetrics> {
        check_dataset(dataset)?;

        let mut accumulator = MetricsAccumulator::default();
        for sample in dataset {
            let output = self.forward_unchecked(&sample.input).output;
            accumulator.add(
                cross_entropy_loss(&output, sample.label),
                argmax(&output) == sample.label,
            );
        }
        Ok(accumulator.finish())
    }

    /// Evaluation restricted to each label present in `dataset`, ascending by label.
    pub fn class_accuracies(&self, dataset: &[Sample]) -> Result<Vec<(usize, EpochMetrics)>> {
        check_dataset(dataset)?;

        labels_in(dataset)
            .into_iter()
            .map(|label| {
                let subset: Vec<Sample> = dataset
                    .iter()
                    .filter(|s| s.label == label)
                    .copied()
                    .collect();
                Ok((label, self.evaluate(&subset)?))
            })
            .collect()
    }

    /// L2 norms of the input-to-hidden and hidden-to-output weight matrices.
    pub fn weight_magnitudes(&self) -> WeightMagnitudes {
        WeightMagnitudes {
            hidden: self.hidden_layer.weight_norm(),
            output: self.output_layer.weight_norm(),
        }
    }

    /// Predictions over a `(resolution + 1) × (resolution + 1)` grid spanning
    /// `bounds` inclusively, x-major. A resolution of 0 yields no points.
    pub fn decision_boundary(&self, bounds: GridBounds, resolution: usize) -> Vec<BoundaryPoint> {
        if resolution == 0 {
            return Vec::new();
        }

        let step_x = (bounds.x_max - bounds.x_min) / resolution as f64;
        let step_y = (bounds.y_max - bounds.y_min) / resolution as f64;
        let mut points = Vec::with_capacity((resolution + 1) * (resolution + 1));

        for i in 0..=resolution {
            let x = bounds.x_min + step_x * i as f64;
            for j in 0..=resolution {
                let y = bounds.y_min + step_y * j as f64;
                let probabilities = self.forward_unchecked(&[x, y]).output;
                let class = argmax(&probabilities);
                points.push(BoundaryPoint {
                    x,
                    y,
                    class,
                    confidence: probabilities[class],
                    probabilities,
                });
            }
        }
        points
    }

    /// Record a deep copy of the current parameters, tagged with the current epoch.
    pub fn snapshot(&mut self) -> WeightSnapshot {
        let snapshot = WeightSnapshot::capture(self.epoch, &self.hidden_layer, &self.output_layer);
        self.history.push_snapshot(snapshot.clone());
        snapshot
    }

    /// Redraw all parameters from the owned RNG, zero the epoch, clear the
    /// history, and record a fresh initial snapshot.
    pub fn reset(&mut self) {
        let (hidden_layer, output_layer) = initialize_layers(self.config.hidden_size, &mut self.rng);
        self.hidden_layer = hidden_layer;
        self.output_layer = output_layer;
        self.epoch = 0;
        self.history.clear();
        self.snapshot();
        debug!("classifier reset");
    }

    /// Loss and accuracy of the most recent training epoch.
    pub fn latest_metrics(&self) -> Option<EpochMetrics> {
        let loss = *self.history.losses().last()?;
        let accuracy = *self.history.accuracies().last()?;
        Some(EpochMetrics { loss, accuracy })
    }

    /// Completed training epochs since construction or the last reset.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn loss_history(&self) -> &[f64] {
        self.history.losses()
    }

    pub fn accuracy_history(&self) -> &[f64] {
        self.history.accuracies()
    }

    /// Weight snapshots, oldest first.
    pub fn weight_history(&self) -> impl ExactSizeIterator<Item = &WeightSnapshot> {
        self.history.snapshots()
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn hidden_layer(&self) -> &DenseLayer {
        &self.hidden_layer
    }

    pub fn output_layer(&self) -> &DenseLayer {
        &self.output_layer
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

fn initialize_layers(hidden_size: usize, rng: &mut SimpleRng) -> (DenseLayer, DenseLayer) {
    let hidden = DenseLayer::new(INPUT_SIZE, hidden_size, WEIGHT_INIT_RANGE, BIAS_INIT_RANGE, rng);
    let output = DenseLayer::new(hidden_size, NUM_CLASSES, WEIGHT_INIT_RANGE, BIAS_INIT_RANGE, rng);
    (hidden, output)
}

fn check_input(x: &[f64]) -> Result<()> {
    if x.len() != INPUT_SIZE {
        return Err(Error::InvalidInput {
            expected: INPUT_SIZE,
            actual: x.len(),
        });
    }
    Ok(())
}

fn check_dataset(dataset: &[Sample]) -> Result<()> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if let Some(sample) = dataset.iter().find(|s| s.label >= NUM_CLASSES) {
        return Err(Error::LabelOutOfRange {
            label: sample.label,
            num_classes: NUM_CLASSES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::task1_dataset;

    fn model(seed: u64) -> MlpClassifier {
        MlpClassifier::new(ClassifierConfig::seeded(seed)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let model = model(42);
        assert_eq!(model.epoch(), 0);
        assert!(model.loss_history().is_empty());
        assert_eq!(model.weight_history().len(), 1);
        assert_eq!(model.hidden_layer().weights().len(), INPUT_SIZE * 8);
        assert_eq!(model.output_layer().weights().len(), 8 * NUM_CLASSES);
    }

    #[test]
    fn test_same_seed_same_parameters() {
        let a = model(7);
        let b = model(7);
        assert_eq!(a.hidden_layer().weights(), b.hidden_layer().weights());
        assert_eq!(a.output_layer().biases(), b.output_layer().biases());
    }

    #[test]
    fn test_cross_entropy_of_zero_probability_is_finite() {
        let loss = cross_entropy_loss(&[1.0, 0.0], 1);
        assert!(loss.is_finite());
        assert!((loss - 15.0 * std::f64::consts::LN_10).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_interval() {
        let mut model = model(3);
        model.train(&task1_dataset(), 12).unwrap();

        let epochs: Vec<usize> = model.weight_history().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![0, 5, 10]);
    }

    #[test]
    fn test_failed_train_step_mutates_nothing() {
        let mut model = model(5);
        let before = model.hidden_layer().weights().to_vec();
        let bad = vec![Sample::new(1.0, 1.0, 0), Sample::new(2.0, 2.0, 4)];

        assert!(matches!(
            model.train_step(&bad),
            Err(Error::LabelOutOfRange { label: 4, .. })
        ));
        assert_eq!(model.epoch(), 0);
        assert_eq!(model.hidden_layer().weights(), before.as_slice());
    }
}
