//! Activation functions for the classifier
//!
//! - Sigmoid for the hidden layer, clamped so `exp` never overflows
//! - Softmax for the output layer, shifted by the max logit
//! - Argmax with a first-occurrence tie-break

/// Pre-activations are clamped to this range before exponentiation.
pub const SIGMOID_CLAMP: f64 = 500.0;

/// Sigmoid activation function.
///
/// Returns `1 / (1 + exp(-z))` with `z` clamped to `[-500, 500]`, so the result
/// is finite and deterministic for any input, including infinities.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

/// Sigmoid derivative assuming h = sigmoid(z).
///
/// Returns the derivative: h * (1 - h)
pub fn sigmoid_derivative(h: f64) -> f64 {
    h * (1.0 - h)
}

/// Softmax over a logit vector.
///
/// Converts logits to probabilities. Uses the max-subtraction trick for
/// numerical stability to avoid overflow with large values. An empty input
/// yields an empty output.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let mut probabilities = logits.to_vec();
    softmax_inplace(&mut probabilities);
    probabilities
}

/// Softmax applied in-place.
pub fn softmax_inplace(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }

    let mut max_value = values[0];
    for &value in values.iter().skip(1) {
        if value > max_value {
            max_value = value;
        }
    }

    let mut sum = 0.0f64;
    for value in values.iter_mut() {
        *value = (*value - max_value).exp();
        sum += *value;
    }

    let inv_sum = 1.0 / sum;
    for value in values.iter_mut() {
        *value *= inv_sum;
    }
}

/// Index of the largest value; the first maximum wins on ties.
///
/// Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_sigmoid_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_extremes_are_finite() {
        assert_eq!(sigmoid(1e6), sigmoid(SIGMOID_CLAMP));
        assert_eq!(sigmoid(-1e6), sigmoid(-SIGMOID_CLAMP));
        assert!(sigmoid(f64::NEG_INFINITY).is_finite());
        assert!(sigmoid(f64::INFINITY) <= 1.0);
    }

    #[test]
    fn test_sigmoid_derivative_at_half() {
        assert!((sigmoid_derivative(0.5) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_softmax_sum() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_argmax_first_tie_wins() {
        assert_eq!(argmax(&[0.25, 0.25, 0.25, 0.25]), 0);
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), 1);
        assert_eq!(argmax(&[]), 0);
    }
}
