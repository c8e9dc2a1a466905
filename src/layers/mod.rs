//! Layer abstractions for the classifier
//!
//! This module provides the Layer trait and the dense layer that stores the
//! classifier's weight matrices and bias vectors.

mod r#trait;
pub mod dense;

// Re-export the Layer trait for convenience
pub use dense::{initialize, DenseLayer};
pub use r#trait::Layer;
