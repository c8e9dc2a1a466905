// Tests for backward propagation and the per-sample gradient descent update.
// The reference below is a direct nested-loop implementation of the update
// rule, checked against the library's layer-based implementation.

use approx::assert_relative_eq;
use mlp_forgetting::classifier::{cross_entropy_loss, MlpClassifier};
use mlp_forgetting::config::ClassifierConfig;
use mlp_forgetting::data::{task1_dataset, Sample};
use mlp_forgetting::{INPUT_SIZE, NUM_CLASSES};

// ============================================================================
// Reference implementation (nested loops, row-major weights)
// ============================================================================

#[derive(Debug, Clone)]
struct Params {
    hidden_size: usize,
    w1: Vec<f64>,
    b1: Vec<f64>,
    w2: Vec<f64>,
    b2: Vec<f64>,
}

impl Params {
    fn from_model(model: &MlpClassifier) -> Self {
        Self {
            hidden_size: model.hidden_size(),
            w1: model.hidden_layer().weights().to_vec(),
            b1: model.hidden_layer().biases().to_vec(),
            w2: model.output_layer().weights().to_vec(),
            b2: model.output_layer().biases().to_vec(),
        }
    }

    fn forward(&self, x: &[f64; 2]) -> (Vec<f64>, Vec<f64>) {
        let h_size = self.hidden_size;
        let mut hidden = vec![0.0; h_size];
        for j in 0..h_size {
            let mut sum = self.b1[j];
            for i in 0..INPUT_SIZE {
                sum += x[i] * self.w1[i * h_size + j];
            }
            hidden[j] = 1.0 / (1.0 + (-sum.clamp(-500.0, 500.0)).exp());
        }

        let mut logits = vec![0.0; NUM_CLASSES];
        for k in 0..NUM_CLASSES {
            let mut sum = self.b2[k];
            for j in 0..h_size {
                sum += hidden[j] * self.w2[j * NUM_CLASSES + k];
            }
            logits[k] = sum;
        }
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        (hidden, exps.iter().map(|e| e / total).collect())
    }

    fn update(&mut self, x: &[f64; 2], y: usize, lr: f64) {
        let h_size = self.hidden_size;
        let (hidden, output) = self.forward(x);

        let mut output_errors = output.clone();
        output_errors[y] -= 1.0;

        let mut hidden_errors = vec![0.0; h_size];
        for j in 0..h_size {
            let mut error = 0.0;
            for k in 0..NUM_CLASSES {
                error += output_errors[k] * self.w2[j * NUM_CLASSES + k];
            }
            hidden_errors[j] = error * hidden[j] * (1.0 - hidden[j]);
        }

        for j in 0..h_size {
            for k in 0..NUM_CLASSES {
                self.w2[j * NUM_CLASSES + k] -= lr * output_errors[k] * hidden[j];
            }
        }
        for k in 0..NUM_CLASSES {
            self.b2[k] -= lr * output_errors[k];
        }
        for i in 0..INPUT_SIZE {
            for j in 0..h_size {
                self.w1[i * h_size + j] -= lr * hidden_errors[j] * x[i];
            }
        }
        for j in 0..h_size {
            self.b1[j] -= lr * hidden_errors[j];
        }
    }
}

fn assert_params_close(actual: &Params, expected: &Params) {
    for (pairs, name) in [
        (actual.w1.iter().zip(&expected.w1), "w1"),
        (actual.b1.iter().zip(&expected.b1), "b1"),
        (actual.w2.iter().zip(&expected.w2), "w2"),
        (actual.b2.iter().zip(&expected.b2), "b2"),
    ] {
        for (a, e) in pairs {
            assert!((a - e).abs() < 1e-12, "{} mismatch: {} vs {}", name, a, e);
        }
    }
}

fn seeded_model(seed: u64) -> MlpClassifier {
    MlpClassifier::new(ClassifierConfig::seeded(seed)).expect("valid config")
}

// ============================================================================
// Update Rule Tests
// ============================================================================

mod update_rule_tests {
    use super::*;

    #[test]
    fn test_single_sample_update_matches_reference() {
        let mut model = seeded_model(42);
        let mut reference = Params::from_model(&model);
        let sample = Sample::new(1.5, 6.5, 0);

        model.train_step(&[sample]).unwrap();
        reference.update(&sample.input, sample.label, 0.1);

        assert_params_close(&Params::from_model(&model), &reference);
    }

    #[test]
    fn test_full_epoch_matches_sequential_reference() {
        let mut model = seeded_model(7);
        let mut reference = Params::from_model(&model);
        let dataset = task1_dataset();

        model.train_step(&dataset).unwrap();
        for sample in &dataset {
            reference.update(&sample.input, sample.label, 0.1);
        }

        assert_params_close(&Params::from_model(&model), &reference);
    }

    #[test]
    fn test_custom_learning_rate_is_used() {
        let config = ClassifierConfig {
            learning_rate: 0.37,
            hidden_size: 5,
            ..ClassifierConfig::seeded(99)
        };
        let mut model = MlpClassifier::new(config).unwrap();
        let mut reference = Params::from_model(&model);
        let sample = Sample::new(6.5, 7.5, 2);

        model.train_step(&[sample]).unwrap();
        reference.update(&sample.input, sample.label, 0.37);

        assert_params_close(&Params::from_model(&model), &reference);
    }

    #[test]
    fn test_output_bias_moves_by_probability_error() {
        let mut model = seeded_model(3);
        let sample = Sample::new(7.0, 2.0, 1);
        let before = model.output_layer().biases().to_vec();
        let probabilities = model.predict(&sample.input).unwrap();

        model.train_step(&[sample]).unwrap();
        let after = model.output_layer().biases();

        for k in 0..NUM_CLASSES {
            let target = if k == sample.label { 1.0 } else { 0.0 };
            let expected = before[k] - 0.1 * (probabilities[k] - target);
            assert_relative_eq!(after[k], expected, epsilon = 1e-12);
        }
        // True-class bias rises, every other bias falls.
        assert!(after[1] > before[1]);
        for k in [0, 2, 3] {
            assert!(after[k] < before[k]);
        }
    }

    #[test]
    fn test_update_reduces_sample_loss() {
        let mut model = seeded_model(13);
        let sample = Sample::new(2.0, 7.0, 0);

        let before = cross_entropy_loss(&model.predict(&sample.input).unwrap(), 0);
        model.train_step(&[sample]).unwrap();
        let after = cross_entropy_loss(&model.predict(&sample.input).unwrap(), 0);

        assert!(after < before);
    }

    #[test]
    fn test_zero_input_leaves_hidden_weights() {
        let mut model = seeded_model(21);
        let before = model.hidden_layer().weights().to_vec();

        model.train_step(&[Sample::new(0.0, 0.0, 2)]).unwrap();

        // dL/dw1 = hidden_error * x, which is zero for x = 0.
        assert_eq!(model.hidden_layer().weights(), before.as_slice());
    }
}

// ============================================================================
// Reported Metrics Tests
// ============================================================================

mod metrics_tests {
    use super::*;

    #[test]
    fn test_train_step_metrics_use_pre_update_predictions() {
        let mut model = seeded_model(42);
        let dataset = task1_dataset();

        // Replay the epoch on the reference to get per-sample pre-update losses.
        let mut reference = Params::from_model(&model);
        let mut total_loss = 0.0;
        let mut correct = 0;
        for sample in &dataset {
            let (_, output) = reference.forward(&sample.input);
            total_loss += -(output[sample.label] + 1e-15).ln();
            let predicted = (0..NUM_CLASSES)
                .fold(0, |best, k| if output[k] > output[best] { k } else { best });
            if predicted == sample.label {
                correct += 1;
            }
            reference.update(&sample.input, sample.label, 0.1);
        }

        let metrics = model.train_step(&dataset).unwrap();
        assert_relative_eq!(metrics.loss, total_loss / 16.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.accuracy, correct as f64 / 16.0);
    }

    #[test]
    fn test_loss_is_finite_and_non_negative() {
        let mut model = seeded_model(4);
        let dataset = task1_dataset();
        for _ in 0..30 {
            let metrics = model.train_step(&dataset).unwrap();
            assert!(metrics.loss.is_finite());
            assert!(metrics.loss >= 0.0);
            assert!((0.0..=1.0).contains(&metrics.accuracy));
        }
    }
}
