//! Training history: per-epoch loss and accuracy plus weight snapshots
//!
//! The classifier writes to the history; reporting code only reads it.

use crate::layers::DenseLayer;
use std::collections::VecDeque;

/// Deep copy of all four parameter tensors at a given epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSnapshot {
    pub epoch: usize,
    /// Input-to-hidden weights, row-major (input_size × hidden_size)
    pub hidden_weights: Vec<f64>,
    pub hidden_biases: Vec<f64>,
    /// Hidden-to-output weights, row-major (hidden_size × num_classes)
    pub output_weights: Vec<f64>,
    pub output_biases: Vec<f64>,
}

impl WeightSnapshot {
    pub fn capture(epoch: usize, hidden: &DenseLayer, output: &DenseLayer) -> Self {
        Self {
            epoch,
            hidden_weights: hidden.weights().to_vec(),
            hidden_biases: hidden.biases().to_vec(),
            output_weights: output.weights().to_vec(),
            output_biases: output.biases().to_vec(),
        }
    }
}

/// Ordered, append-only log of training progress.
///
/// Loss and accuracy grow by one entry per training epoch. Snapshots grow
/// without bound unless a retention cap is set, in which case the oldest
/// snapshots are dropped first.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    losses: Vec<f64>,
    accuracies: Vec<f64>,
    snapshots: VecDeque<WeightSnapshot>,
    retention: Option<usize>,
}

impl TrainingHistory {
    pub fn new(retention: Option<usize>) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    pub fn record_epoch(&mut self, loss: f64, accuracy: f64) {
        self.losses.push(loss);
        self.accuracies.push(accuracy);
    }

    pub fn push_snapshot(&mut self, snapshot: WeightSnapshot) {
        if let Some(cap) = self.retention {
            while self.snapshots.len() >= cap {
                self.snapshots.pop_front();
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Drop every entry; the retention policy is kept.
    pub fn clear(&mut self) {
        self.losses.clear();
        self.accuracies.clear();
        self.snapshots.clear();
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn accuracies(&self) -> &[f64] {
        &self.accuracies
    }

    /// Snapshots oldest first.
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = &WeightSnapshot> {
        self.snapshots.iter()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn latest_snapshot(&self) -> Option<&WeightSnapshot> {
        self.snapshots.back()
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }
}
