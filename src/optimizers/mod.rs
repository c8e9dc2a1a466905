//! Optimizer abstractions for parameter updates
//!
//! The classifier is trained by plain per-sample gradient descent, so the only
//! optimizer is [`SGD`]: `weight = weight - learning_rate * gradient`.

pub mod sgd;

pub use sgd::SGD;

/// Core trait for optimizers.
///
/// Layers hand their recorded gradients to an optimizer, which applies its
/// update rule to the parameters in-place.
pub trait Optimizer {
    /// Update parameters using gradients.
    ///
    /// # Panics
    ///
    /// Implementations may panic if parameters and gradients have different lengths.
    fn update(&mut self, parameters: &mut [f64], gradients: &[f64]);

    /// Get the learning rate for this optimizer.
    fn learning_rate(&self) -> f64;
}
