//! Logistic regression trained by stochastic / mini-batch gradient descent.
//!
//! For each example, `p = sigmoid(w · f)` and the gradient of the negative
//! log-likelihood is `(p - y) * f` with `y` in {0, 1}. A mini-batch averages
//! the gradients of its examples, all computed against the weights at the
//! start of the batch.
//!
//! L2 regularization shrinks every weight by `1 - lr * l2` each step. The
//! shrink is applied through a global scale factor (`w = scale * raw`), so
//! a step costs time proportional to the features it touches, not to the
//! size of the weight vector.

use std::fmt;
use std::time::Instant;

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::features::SparseVector;
use crate::ml::model::{FeaturizedExample, log_loss, sigmoid};
use crate::ml::order::EpochOrder;
use crate::ml::perceptron::check_finite;
use crate::ml::stats::TrainingStats;

/// Below this scale the factor is folded back into the raw weights.
const MIN_SCALE: f64 = 1e-9;

/// How the learning rate changes across epochs (epochs count from 0).
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearningRateSchedule {
    /// `lr`
    Constant,
    /// `lr / (1 + epoch)`
    InverseEpoch,
    /// `lr / sqrt(1 + epoch)`
    InverseSqrt,
}

impl LearningRateSchedule {
    /// Learning rate for `epoch`.
    pub fn rate(self, base: f64, epoch: usize) -> f64 {
        let t = epoch as f64 + 1.0;
        match self {
            LearningRateSchedule::Constant => base,
            LearningRateSchedule::InverseEpoch => base / t,
            LearningRateSchedule::InverseSqrt => base / t.sqrt(),
        }
    }
}

impl fmt::Display for LearningRateSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningRateSchedule::Constant => write!(f, "constant"),
            LearningRateSchedule::InverseEpoch => write!(f, "inverse-epoch"),
            LearningRateSchedule::InverseSqrt => write!(f, "inverse-sqrt"),
        }
    }
}

/// Logistic regression hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Number of passes over the training set.
    pub epochs: usize,
    /// Initial learning rate.
    pub learning_rate: f64,
    /// Learning-rate decay across epochs.
    pub schedule: LearningRateSchedule,
    /// L2 regularization coefficient (0 disables it).
    pub l2: f64,
    /// Examples per gradient step (1 is plain SGD).
    pub batch_size: usize,
    /// Reshuffle the visiting order every epoch with this seed.
    pub shuffle_seed: Option<u64>,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            epochs: 20,
            learning_rate: 0.5,
            schedule: LearningRateSchedule::InverseEpoch,
            l2: 0.0,
            batch_size: 1,
            shuffle_seed: None,
        }
    }
}

impl LogisticRegressionConfig {
    /// Check the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(PolarityError::config("epochs must be at least 1"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PolarityError::config(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !(self.l2.is_finite() && self.l2 >= 0.0) {
            return Err(PolarityError::config(format!(
                "l2 must be non-negative and finite, got {}",
                self.l2
            )));
        }
        // Every schedule is non-increasing, so the first epoch bounds the shrink.
        if self.learning_rate * self.l2 >= 1.0 {
            return Err(PolarityError::config(format!(
                "learning_rate * l2 must be below 1, got {}",
                self.learning_rate * self.l2
            )));
        }
        if self.batch_size == 0 {
            return Err(PolarityError::config("batch_size must be at least 1"));
        }
        Ok(())
    }
}

/// Weights stored as `scale * raw`.
#[derive(Debug)]
struct ScaledWeights {
    raw: SparseVector,
    scale: f64,
}

impl ScaledWeights {
    fn new() -> Self {
        Self {
            raw: SparseVector::new(),
            scale: 1.0,
        }
    }

    fn dot(&self, features: &SparseVector) -> f64 {
        self.scale * self.raw.dot(features)
    }

    /// `w *= factor`
    fn shrink(&mut self, factor: f64) {
        self.scale *= factor;
        if self.scale < MIN_SCALE {
            self.raw.scale(self.scale);
            self.scale = 1.0;
        }
    }

    /// `w += amount * direction`
    fn add_scaled(&mut self, direction: &SparseVector, amount: f64) {
        self.raw.add_scaled(direction, amount / self.scale);
    }

    fn into_weights(mut self) -> SparseVector {
        if self.scale != 1.0 {
            self.raw.scale(self.scale);
        }
        self.raw
    }
}

/// Trains a weight vector by minimizing the logistic loss.
#[derive(Debug, Clone)]
pub struct LogisticRegressionTrainer {
    config: LogisticRegressionConfig,
}

impl LogisticRegressionTrainer {
    /// Create a trainer after validating its configuration.
    pub fn new(config: LogisticRegressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The trainer configuration.
    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    /// Train from zero weights.
    pub fn train(&self, examples: &[FeaturizedExample]) -> Result<(SparseVector, TrainingStats)> {
        let start = Instant::now();
        let mut stats = TrainingStats::new("logistic_regression");
        let mut weights = ScaledWeights::new();
        let mut order = EpochOrder::new(examples.len(), self.config.shuffle_seed);

        for epoch in 0..self.config.epochs {
            let learning_rate = self.config.schedule.rate(self.config.learning_rate, epoch);
            let shrink = 1.0 - learning_rate * self.config.l2;
            let mut total_loss = 0.0;
            let mut steps = 0;

            for batch in order.next_epoch().chunks(self.config.batch_size) {
                let mut gradient = SparseVector::new();
                for &index in batch {
                    let example = &examples[index];
                    let score = weights.dot(&example.features);
                    total_loss += log_loss(score, example.label);
                    let error = sigmoid(score) - example.label.as_binary();
                    gradient.add_scaled(&example.features, error);
                }

                if self.config.l2 > 0.0 {
                    weights.shrink(shrink);
                }
                weights.add_scaled(&gradient, -learning_rate / batch.len() as f64);
                steps += 1;
            }

            // The scale stays positive and at most 1; only raw weights can blow up.
            check_finite(&weights.raw, epoch)?;

            let mean_loss = if examples.is_empty() {
                0.0
            } else {
                total_loss / examples.len() as f64
            };
            stats.epochs_run += 1;
            stats.updates_per_epoch.push(steps);
            stats.training_losses.push(mean_loss);
            debug!(
                "logistic regression epoch {}: lr {:.6}, mean loss {:.6}, {} weights",
                epoch + 1,
                learning_rate,
                mean_loss,
                weights.raw.len()
            );
        }

        let weights = weights.into_weights();
        stats.num_weights = weights.len();
        stats.training_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Logistic regression trained: {} epochs, final loss {:.6}, {} weights, {} ms",
            stats.epochs_run,
            stats.final_training_loss().unwrap_or(0.0),
            stats.num_weights,
            stats.training_time_ms
        );
        Ok((weights, stats))
    }
}
