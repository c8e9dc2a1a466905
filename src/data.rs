//! Fixed four-class 2-D point datasets
//!
//! Two disjoint two-class tasks on a 0..8 square:
//! - Task 1: Red (0) top-left, Green (1) bottom-right
//! - Task 2: Blue (2) top-right, Yellow (3) bottom-left

use crate::INPUT_SIZE;

/// One labelled input point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub input: [f64; INPUT_SIZE],
    pub label: usize,
}

impl Sample {
    pub const fn new(x: f64, y: f64, label: usize) -> Self {
        Self {
            input: [x, y],
            label,
        }
    }
}

const CLASS_NAMES: [&str; 4] = ["Red", "Green", "Blue", "Yellow"];

const TASK1: [Sample; 16] = [
    Sample::new(1.5, 6.5, 0),
    Sample::new(2.0, 7.0, 0),
    Sample::new(1.0, 6.0, 0),
    Sample::new(2.5, 6.5, 0),
    Sample::new(1.5, 7.5, 0),
    Sample::new(2.0, 6.0, 0),
    Sample::new(1.0, 7.0, 0),
    Sample::new(2.5, 7.5, 0),
    Sample::new(6.0, 1.5, 1),
    Sample::new(7.0, 2.0, 1),
    Sample::new(6.5, 1.0, 1),
    Sample::new(7.5, 2.5, 1),
    Sample::new(6.5, 2.5, 1),
    Sample::new(7.0, 1.5, 1),
    Sample::new(6.0, 2.0, 1),
    Sample::new(7.5, 1.5, 1),
];

const TASK2: [Sample; 16] = [
    Sample::new(6.0, 6.5, 2),
    Sample::new(7.0, 7.0, 2),
    Sample::new(6.5, 6.0, 2),
    Sample::new(7.5, 6.5, 2),
    Sample::new(6.5, 7.5, 2),
    Sample::new(7.0, 6.0, 2),
    Sample::new(6.0, 7.0, 2),
    Sample::new(7.5, 7.5, 2),
    Sample::new(1.5, 1.5, 3),
    Sample::new(2.0, 2.0, 3),
    Sample::new(1.0, 1.0, 3),
    Sample::new(2.5, 2.5, 3),
    Sample::new(1.5, 2.5, 3),
    Sample::new(2.0, 1.0, 3),
    Sample::new(1.0, 2.0, 3),
    Sample::new(2.5, 1.5, 3),
];

/// Task 1: classes 0 and 1.
pub fn task1_dataset() -> Vec<Sample> {
    TASK1.to_vec()
}

/// Task 2: classes 2 and 3.
pub fn task2_dataset() -> Vec<Sample> {
    TASK2.to_vec()
}

/// Both tasks, task 1 first.
pub fn all_classes_dataset() -> Vec<Sample> {
    TASK1.iter().chain(TASK2.iter()).copied().collect()
}

/// Human-readable class name, or "Unknown" for labels outside 0..4.
pub fn class_name(label: usize) -> &'static str {
    CLASS_NAMES.get(label).copied().unwrap_or("Unknown")
}

/// Distinct labels present in `dataset`, ascending.
pub fn labels_in(dataset: &[Sample]) -> Vec<usize> {
    let mut labels: Vec<usize> = dataset.iter().map(|s| s.label).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}
