//! Training result serialization: the accuracy trace and the confusion
//! matrix, both written as headerless CSV.
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::network::{class_index_from_char, CLASS_COUNT};

/// Training and test accuracy measured after one epoch (or before any).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyPair {
    pub training_accuracy: f64,
    pub test_accuracy: f64,
}

impl AccuracyPair {
    pub fn new(training_accuracy: f64, test_accuracy: f64) -> Self {
        AccuracyPair {
            training_accuracy,
            test_accuracy,
        }
    }
}

/// Ordered accuracy trace produced by a training run. Entry 0 is the
/// pre-training baseline.
#[derive(Debug, Clone, Default)]
pub struct AccuracyHistory {
    pairs: Vec<AccuracyPair>,
}

impl AccuracyHistory {
    pub fn new() -> Self {
        AccuracyHistory::default()
    }

    /// Appends an entry to this history.
    pub fn add(&mut self, pair: AccuracyPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[AccuracyPair] {
        &self.pairs
    }

    pub fn last(&self) -> Option<&AccuracyPair> {
        self.pairs.last()
    }

    /// Writes one `training,test` line per entry, no header.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("failed to create accuracy history file {}", path.display()))?;
        for pair in &self.pairs {
            writer.write_record(&[
                pair.training_accuracy.to_string(),
                pair.test_accuracy.to_string(),
            ])?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to write accuracy history to {}", path.display()))?;
        Ok(())
    }
}

/// A 26x26 count matrix of classification outcomes; rows index the true
/// class, columns the predicted one.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<u64>>,
    total: u64,
}

impl Default for ConfusionMatrix {
    fn default() -> Self {
        ConfusionMatrix {
            counts: vec![vec![0; CLASS_COUNT]; CLASS_COUNT],
            total: 0,
        }
    }
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        ConfusionMatrix::default()
    }

    /// Builds a matrix from `(true_class, predicted_class)` pairs.
    pub fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        let mut matrix = ConfusionMatrix::new();
        for (true_class, predicted) in pairs {
            matrix.record(true_class, predicted);
        }
        matrix
    }

    /// Records one classification outcome.
    pub fn record(&mut self, true_class: char, predicted: char) {
        self.counts[class_index_from_char(true_class)][class_index_from_char(predicted)] += 1;
        self.total += 1;
    }

    pub fn count(&self, true_class: char, predicted: char) -> u64 {
        self.counts[class_index_from_char(true_class)][class_index_from_char(predicted)]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Fraction of recorded outcomes on the diagonal.
    pub fn accuracy(&self) -> f64 {
        let correct: u64 = (0..CLASS_COUNT).map(|i| self.counts[i][i]).sum();
        correct as f64 / self.total as f64
    }

    /// Renders the counts as comma-separated integer rows.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        for row in &self.counts {
            let line: Vec<String> = row.iter().map(u64::to_string).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_csv_string())
            .with_context(|| format!("failed to write confusion matrix to {}", path.display()))
    }
}
