//! Layer trait definition
//!
//! This module defines the core Layer trait for the classifier's parameter
//! store. The trait separates gradient computation from the parameter update
//! so that every error term of a sample is computed from pre-update weights.

use crate::optimizers::Optimizer;

/// Core trait for network layers.
///
/// # Example
///
/// ```ignore
/// // Forward pass through a layer
/// let mut output = vec![0.0; layer.output_size()];
/// layer.forward(&input, &mut output);
///
/// // Backward pass records gradients, then the optimizer applies them
/// let mut grad_input = vec![0.0; layer.input_size()];
/// layer.backward(&input, &grad_output, &mut grad_input);
/// layer.update_parameters(&mut optimizer);
/// ```
pub trait Layer {
    /// Affine forward propagation for one sample: `output = input × W + b`.
    ///
    /// No activation is applied.
    ///
    /// # Panics
    ///
    /// Implementations may panic if input/output lengths don't match the layer.
    fn forward(&self, input: &[f64], output: &mut [f64]);

    /// Backward propagation for one sample.
    ///
    /// Writes `grad_input = W × grad_output` using the current (pre-update)
    /// weights and records the weight and bias gradients for the next
    /// `update_parameters` call. Recorded gradients are overwritten, not
    /// accumulated.
    fn backward(&mut self, input: &[f64], grad_output: &[f64], grad_input: &mut [f64]);

    /// Apply the recorded gradients through the optimizer and clear them.
    fn update_parameters(&mut self, optimizer: &mut dyn Optimizer);

    /// Number of input features.
    fn input_size(&self) -> usize;

    /// Number of output features.
    fn output_size(&self) -> usize;

    /// Total count of weights and biases.
    fn parameter_count(&self) -> usize;
}
