//! Training statistics.

use serde::{Deserialize, Serialize};

/// What happened during one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Training algorithm name.
    pub algorithm: String,
    /// Number of epochs actually run.
    pub epochs_run: usize,
    /// Weight updates per epoch (mistakes for the perceptron, steps for
    /// logistic regression).
    pub updates_per_epoch: Vec<usize>,
    /// Mean training loss per epoch, measured before each step.
    /// Empty for algorithms without a loss.
    pub training_losses: Vec<f64>,
    /// Whether training stopped before the configured epoch count.
    pub early_stopped: bool,
    /// Number of distinct weight keys after training.
    pub num_weights: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
}

impl TrainingStats {
    /// Empty statistics for a run of `algorithm`.
    pub fn new<S: Into<String>>(algorithm: S) -> Self {
        Self {
            algorithm: algorithm.into(),
            epochs_run: 0,
            updates_per_epoch: Vec::new(),
            training_losses: Vec::new(),
            early_stopped: false,
            num_weights: 0,
            training_time_ms: 0,
            trained_at: chrono::Utc::now(),
        }
    }

    /// Final training loss, if the algorithm reports one.
    pub fn final_training_loss(&self) -> Option<f64> {
        self.training_losses.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_stats_creation() {
        let mut stats = TrainingStats::new("perceptron");
        assert_eq!(stats.algorithm, "perceptron");
        assert_eq!(stats.epochs_run, 0);
        assert!(stats.final_training_loss().is_none());

        stats.training_losses.extend([0.69, 0.41]);
        assert_eq!(stats.final_training_loss(), Some(0.41));
    }
}
