//! Perceptron training.
//!
//! The perceptron is online and mistake-driven: it visits one example at a
//! time and only touches the weights when it predicts the wrong label.
//!
//! ```text
//! score = w · f
//! predicted = Positive if score >= 0 else Negative
//! if predicted != gold:  w += learning_rate * gold * f
//! ```

use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::features::SparseVector;
use crate::ml::model::{FeaturizedExample, predict_features};
use crate::ml::order::EpochOrder;
use crate::ml::stats::TrainingStats;

/// Perceptron hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptronConfig {
    /// Number of passes over the training set.
    pub epochs: usize,
    /// Step size. With zero-initialised weights any positive value yields
    /// the same predictions; 1.0 is the textbook rule.
    pub learning_rate: f64,
    /// Reshuffle the visiting order every epoch with this seed.
    pub shuffle_seed: Option<u64>,
    /// Stop as soon as an epoch makes no mistakes.
    pub stop_when_converged: bool,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            epochs: 30,
            learning_rate: 1.0,
            shuffle_seed: None,
            stop_when_converged: true,
        }
    }
}

impl PerceptronConfig {
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
        Ok(())
    }
}

/// Trains a weight vector with the perceptron rule.
#[derive(Debug, Clone)]
pub struct PerceptronTrainer {
    config: PerceptronConfig,
}

impl PerceptronTrainer {
    /// Create a trainer after validating its configuration.
    pub fn new(config: PerceptronConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The trainer configuration.
    pub fn config(&self) -> &PerceptronConfig {
        &self.config
    }

    /// Train from zero weights.
    pub fn train(&self, examples: &[FeaturizedExample]) -> Result<(SparseVector, TrainingStats)> {
        let start = Instant::now();
        let mut stats = TrainingStats::new("perceptron");
        let mut weights = SparseVector::new();
        let mut order = EpochOrder::new(examples.len(), self.config.shuffle_seed);

        for epoch in 0..self.config.epochs {
            let mistakes = self.run_epoch_in_order(&mut weights, examples, order.next_epoch());
            check_finite(&weights, epoch)?;

            stats.epochs_run += 1;
            stats.updates_per_epoch.push(mistakes);
            debug!(
                "perceptron epoch {}: {} mistakes over {} examples, {} weights",
                epoch + 1,
                mistakes,
                examples.len(),
                weights.len()
            );

            if mistakes == 0 && self.config.stop_when_converged {
                stats.early_stopped = epoch + 1 < self.config.epochs;
                break;
            }
        }

        stats.num_weights = weights.len();
        stats.training_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Perceptron trained: {} epochs, {} weights, {} ms",
            stats.epochs_run, stats.num_weights, stats.training_time_ms
        );
        Ok((weights, stats))
    }

    /// One pass over `examples` in the given order. Returns the number of
    /// updates made.
    pub fn run_epoch(&self, weights: &mut SparseVector, examples: &[FeaturizedExample]) -> usize {
        let order: Vec<usize> = (0..examples.len()).collect();
        self.run_epoch_in_order(weights, examples, &order)
    }

    fn run_epoch_in_order(
        &self,
        weights: &mut SparseVector,
        examples: &[FeaturizedExample],
        order: &[usize],
    ) -> usize {
        let mut mistakes = 0;
        for &index in order {
            let example = &examples[index];
            if predict_features(weights, &example.features) != example.label {
                weights.add_scaled(
                    &example.features,
                    self.config.learning_rate * example.label.sign(),
                );
                mistakes += 1;
            }
        }
        mistakes
    }
}

/// Fail on the first NaN or infinite weight.
pub(crate) fn check_finite(weights: &SparseVector, epoch: usize) -> Result<()> {
    match weights.first_non_finite() {
        Some((key, value)) => Err(PolarityError::numerical(format!(
            "weight for '{key}' became {value} in epoch {}",
            epoch + 1
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Example, Label};
    use crate::features::{FeatureConfig, FeatureExtractor};

    fn featurize(data: &[(&str, Label)]) -> Vec<FeaturizedExample> {
        let extractor = FeatureExtractor::fit(&FeatureConfig::default(), &[]).unwrap();
        let examples: Vec<Example> = data
            .iter()
            .map(|(text, label)| Example::from_text(text, *label))
            .collect();
        FeaturizedExample::from_examples(&extractor, &examples)
    }

    fn reviews() -> Vec<FeaturizedExample> {
        featurize(&[
            ("a great and moving film", Label::Positive),
            ("dull , boring and too long", Label::Negative),
            ("great fun", Label::Positive),
            ("boring mess", Label::Negative),
            ("moving and funny", Label::Positive),
            ("a dull film", Label::Negative),
        ])
    }

    #[test]
    fn test_update_rule() {
        let trainer = PerceptronTrainer::new(PerceptronConfig::default()).unwrap();
        let examples = featurize(&[("bad bad film", Label::Negative)]);
        let mut weights = SparseVector::new();

        // Zero score predicts Positive, which is a mistake here.
        assert_eq!(trainer.run_epoch(&mut weights, &examples), 1);
        assert_eq!(weights.get("uni:bad"), -2.0);
        assert_eq!(weights.get("uni:film"), -1.0);

        // Now correct: no further update.
        assert_eq!(trainer.run_epoch(&mut weights, &examples), 0);
        assert_eq!(weights.get("uni:bad"), -2.0);
    }

    #[test]
    fn test_zero_score_positive_needs_no_update() {
        let trainer = PerceptronTrainer::new(PerceptronConfig::default()).unwrap();
        let examples = vec![FeaturizedExample {
            features: SparseVector::new(),
            label: Label::Positive,
        }];
        let mut weights = SparseVector::new();

        assert_eq!(trainer.run_epoch(&mut weights, &examples), 0);
        assert!(weights.is_empty());
    }

    #[test]
    fn test_separable_data_converges() {
        let examples = reviews();
        let trainer = PerceptronTrainer::new(PerceptronConfig::default()).unwrap();
        let (weights, stats) = trainer.train(&examples).unwrap();

        assert!(stats.early_stopped);
        assert_eq!(stats.updates_per_epoch.last(), Some(&0));
        for example in &examples {
            assert_eq!(predict_features(&weights, &example.features), example.label);
        }
    }

    #[test]
    fn test_correct_examples_are_fixed_points() {
        let examples = reviews();
        let config = PerceptronConfig {
            epochs: 2,
            stop_when_converged: false,
            ..PerceptronConfig::default()
        };
        let trainer = PerceptronTrainer::new(config).unwrap();
        let (weights, _) = trainer.train(&examples).unwrap();

        for example in &examples {
            let margin = weights.dot(&example.features);
            if margin != 0.0 && predict_features(&weights, &example.features) == example.label {
                let mut replay = weights.clone();
                let updates = trainer.run_epoch(&mut replay, std::slice::from_ref(example));
                assert_eq!(updates, 0);
                assert_eq!(replay, weights);
            }
        }
    }

    #[test]
    fn test_keys_only_grow() {
        let examples = featurize(&[
            ("good", Label::Negative),
            ("good", Label::Positive),
            ("good", Label::Negative),
        ]);
        let trainer = PerceptronTrainer::new(PerceptronConfig::default()).unwrap();
        let mut weights = SparseVector::new();

        trainer.run_epoch(&mut weights, &examples);
        // -1, then +1 back to zero, then -1 again; the key is never dropped.
        assert!(weights.contains_key("uni:good"));

        let mut weights = SparseVector::new();
        trainer.run_epoch(&mut weights, &examples[..2]);
        assert!(weights.contains_key("uni:good"));
        assert_eq!(weights.get("uni:good"), 0.0);
    }

    #[test]
    fn test_training_is_deterministic() {
        let examples = reviews();
        for seed in [None, Some(42)] {
            let config = PerceptronConfig {
                shuffle_seed: seed,
                ..PerceptronConfig::default()
            };
            let trainer = PerceptronTrainer::new(config).unwrap();
            let (first, _) = trainer.train(&examples).unwrap();
            let (second, _) = trainer.train(&examples).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_invalid_config() {
        let zero_epochs = PerceptronConfig {
            epochs: 0,
            ..PerceptronConfig::default()
        };
        assert!(PerceptronTrainer::new(zero_epochs).is_err());

        let bad_rate = PerceptronConfig {
            learning_rate: f64::NAN,
            ..PerceptronConfig::default()
        };
        assert!(PerceptronTrainer::new(bad_rate).is_err());
    }

    #[test]
    fn test_non_finite_features_are_fatal() {
        let examples = vec![FeaturizedExample {
            features: [("uni:x", f64::INFINITY)].into_iter().collect(),
            label: Label::Negative,
        }];
        let trainer = PerceptronTrainer::new(PerceptronConfig::default()).unwrap();

        let error = trainer.train(&examples).unwrap_err();
        assert!(matches!(error, PolarityError::Numerical(_)));
    }
}
