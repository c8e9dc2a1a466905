//! Dense (fully connected) layer implementation
//!
//! This module provides the DenseLayer that stores one weight matrix and one
//! bias vector and performs the transformation: output = input × weights + biases

use crate::layers::Layer;
use crate::optimizers::Optimizer;
use crate::utils::SimpleRng;

/// Dense (fully connected) layer with weights and biases.
///
/// Performs the linear transformation: y = xW + b
/// where x is the input (input_size),
/// W is the weight matrix (input_size × output_size),
/// and b is the bias vector (output_size).
///
/// # Fields
///
/// * `weights` - Weight matrix stored in row-major format (input_size × output_size)
/// * `biases` - Bias vector (output_size)
/// * `weight_grads` / `bias_grads` - Gradients recorded by the last `backward`
///
/// # Example
///
/// ```
/// use mlp_forgetting::layers::{DenseLayer, Layer};
/// use mlp_forgetting::utils::SimpleRng;
///
/// let mut rng = SimpleRng::new(42);
/// let layer = DenseLayer::new(2, 8, 0.1, 0.05, &mut rng);
/// assert_eq!(layer.input_size(), 2);
/// assert_eq!(layer.output_size(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<f64>,
    biases: Vec<f64>,
    weight_grads: Vec<f64>,
    bias_grads: Vec<f64>,
}

impl DenseLayer {
    /// Create a new DenseLayer with small uniform initialization.
    ///
    /// Weights are drawn uniformly from `[-weight_range, weight_range]`, then
    /// biases from `[-bias_range, bias_range]`, in that order from `rng`.
    pub fn new(
        input_size: usize,
        output_size: usize,
        weight_range: f64,
        bias_range: f64,
        rng: &mut SimpleRng,
    ) -> Self {
        let weights = initialize(input_size, output_size, weight_range, rng);
        let biases = initialize(1, output_size, bias_range, rng);

        Self {
            input_size,
            output_size,
            weights,
            biases,
            weight_grads: vec![0.0; input_size * output_size],
            bias_grads: vec![0.0; output_size],
        }
    }

    /// Build a layer from explicit parameters.
    ///
    /// # Panics
    ///
    /// Panics if `weights.len() != input_size * output_size` or
    /// `biases.len() != output_size`.
    pub fn from_parameters(
        input_size: usize,
        output_size: usize,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> Self {
        assert_eq!(
            weights.len(),
            input_size * output_size,
            "weights length mismatch in DenseLayer::from_parameters"
        );
        assert_eq!(
            biases.len(),
            output_size,
            "biases length mismatch in DenseLayer::from_parameters"
        );

        Self {
            input_size,
            output_size,
            weights,
            biases,
            weight_grads: vec![0.0; input_size * output_size],
            bias_grads: vec![0.0; output_size],
        }
    }

    /// Row-major weight matrix (input_size × output_size).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight connecting input `i` to output `j`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.output_size + j]
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Euclidean norm over every entry of the weight matrix (biases excluded).
    pub fn weight_norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }
}

/// Fill a `rows × cols` matrix with values uniform in `[-range, range]`.
pub fn initialize(rows: usize, cols: usize, range: f64, rng: &mut SimpleRng) -> Vec<f64> {
    (0..rows * cols).map(|_| rng.gen_symmetric(range)).collect()
}

impl Layer for DenseLayer {
    fn forward(&self, input: &[f64], output: &mut [f64]) {
        assert_eq!(input.len(), self.input_size, "input length mismatch in DenseLayer::forward");
        assert_eq!(
            output.len(),
            self.output_size,
            "output length mismatch in DenseLayer::forward"
        );

        output.copy_from_slice(&self.biases);
        for (i, &x) in input.iter().enumerate() {
            let row = &self.weights[i * self.output_size..(i + 1) * self.output_size];
            for (out, &w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
    }

    fn backward(&mut self, input: &[f64], grad_output: &[f64], grad_input: &mut [f64]) {
        assert_eq!(input.len(), self.input_size, "input length mismatch in DenseLayer::backward");
        assert_eq!(
            grad_output.len(),
            self.output_size,
            "grad_output length mismatch in DenseLayer::backward"
        );
        assert_eq!(
            grad_input.len(),
            self.input_size,
            "grad_input length mismatch in DenseLayer::backward"
        );

        for (i, (&x, gi)) in input.iter().zip(grad_input.iter_mut()).enumerate() {
            let row = i * self.output_size;
            let mut sum = 0.0;
            for (j, &delta) in grad_output.iter().enumerate() {
                sum += delta * self.weights[row + j];
                self.weight_grads[row + j] = delta * x;
            }
            *gi = sum;
        }
        self.bias_grads.copy_from_slice(grad_output);
    }

    fn update_parameters(&mut self, optimizer: &mut dyn Optimizer) {
        optimizer.update(&mut self.weights, &self.weight_grads);
        optimizer.update(&mut self.biases, &self.bias_grads);
        self.weight_grads.fill(0.0);
        self.bias_grads.fill(0.0);
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
