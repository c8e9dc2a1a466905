//! Measurement types produced by training and evaluation

/// Average loss and accuracy over one pass of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    /// Mean cross-entropy loss (non-negative)
    pub loss: f64,
    /// Fraction of samples classified correctly, in [0, 1]
    pub accuracy: f64,
}

/// L2 norms of the two weight matrices (biases excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightMagnitudes {
    /// Input-to-hidden matrix
    pub hidden: f64,
    /// Hidden-to-output matrix
    pub output: f64,
}

/// Running sums for one pass; turned into `EpochMetrics` at the end.
#[derive(Debug, Default)]
pub(crate) struct MetricsAccumulator {
    total_loss: f64,
    correct: usize,
    count: usize,
}

impl MetricsAccumulator {
    pub(crate) fn add(&mut self, loss: f64, correct: bool) {
        self.total_loss += loss;
        if correct {
            self.correct += 1;
        }
        self.count += 1;
    }

    /// Callers guarantee at least one sample was added.
    pub(crate) fn finish(&self) -> EpochMetrics {
        let n = self.count as f64;
        EpochMetrics {
            loss: self.total_loss / n,
            accuracy: self.correct as f64 / n,
        }
    }
}
