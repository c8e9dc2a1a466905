//! Shared utilities for the classifier
//!
//! This module provides the owned random number generator and the activation
//! functions used by the forward and backward passes.

pub mod activations;
pub mod rng;

pub use activations::{argmax, sigmoid, sigmoid_derivative, softmax, softmax_inplace};
pub use rng::SimpleRng;
