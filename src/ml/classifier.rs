//! Classifier selection and training entry point.

use std::fmt;

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};

use crate::dataset::Example;
use crate::error::Result;
use crate::features::FeatureExtractor;
use crate::ml::logistic::{LogisticRegressionConfig, LogisticRegressionTrainer};
use crate::ml::model::{FeaturizedExample, LinearModel};
use crate::ml::perceptron::{PerceptronConfig, PerceptronTrainer};
use crate::ml::stats::TrainingStats;

/// Which classifier to train.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Always predicts positive
    Trivial,
    /// Mistake-driven perceptron
    Perceptron,
    /// Logistic regression
    #[value(name = "lr", alias = "logistic-regression")]
    LogisticRegression,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Trivial => write!(f, "trivial"),
            ClassifierKind::Perceptron => write!(f, "perceptron"),
            ClassifierKind::LogisticRegression => write!(f, "logistic_regression"),
        }
    }
}

/// A classifier together with its hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierConfig {
    /// Always predicts positive.
    Trivial,
    /// Perceptron.
    Perceptron(PerceptronConfig),
    /// Logistic regression.
    LogisticRegression(LogisticRegressionConfig),
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig::Perceptron(PerceptronConfig::default())
    }
}

impl ClassifierConfig {
    /// Default hyperparameters for the given classifier.
    pub fn for_kind(kind: ClassifierKind) -> Self {
        match kind {
            ClassifierKind::Trivial => ClassifierConfig::Trivial,
            ClassifierKind::Perceptron => ClassifierConfig::Perceptron(PerceptronConfig::default()),
            ClassifierKind::LogisticRegression => {
                ClassifierConfig::LogisticRegression(LogisticRegressionConfig::default())
            }
        }
    }

    /// The classifier this configuration selects.
    pub fn kind(&self) -> ClassifierKind {
        match self {
            ClassifierConfig::Trivial => ClassifierKind::Trivial,
            ClassifierConfig::Perceptron(_) => ClassifierKind::Perceptron,
            ClassifierConfig::LogisticRegression(_) => ClassifierKind::LogisticRegression,
        }
    }

    /// Check the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            ClassifierConfig::Trivial => Ok(()),
            ClassifierConfig::Perceptron(config) => config.validate(),
            ClassifierConfig::LogisticRegression(config) => config.validate(),
        }
    }
}

/// Featurize `train` with `extractor` and train the configured classifier.
pub fn train_model(
    config: &ClassifierConfig,
    extractor: FeatureExtractor,
    train: &[Example],
) -> Result<(LinearModel, TrainingStats)> {
    config.validate()?;

    let (weights, stats) = match config {
        ClassifierConfig::Trivial => {
            info!("Trivial classifier: predicting positive for every example");
            return Ok((LinearModel::trivial(), TrainingStats::new("trivial")));
        }
        ClassifierConfig::Perceptron(config) => {
            PerceptronTrainer::new(config.clone())?.train(&featurize(&extractor, train))?
        }
        ClassifierConfig::LogisticRegression(config) => {
            LogisticRegressionTrainer::new(config.clone())?.train(&featurize(&extractor, train))?
        }
    };

    Ok((LinearModel::new(extractor, weights), stats))
}

fn featurize(extractor: &FeatureExtractor, train: &[Example]) -> Vec<FeaturizedExample> {
    let featurized = FeaturizedExample::from_examples(extractor, train);
    info!(
        "Featurized {} training examples with {} features",
        featurized.len(),
        extractor.kind()
    );
    featurized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;
    use crate::features::{FeatureConfig, FeatureKind};
    use crate::ml::evaluation::evaluate;

    fn train_set() -> Vec<Example> {
        vec![
            Example::from_text("a great and moving film", Label::Positive),
            Example::from_text("dull , boring and too long", Label::Negative),
            Example::from_text("great fun", Label::Positive),
            Example::from_text("boring mess", Label::Negative),
        ]
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ClassifierConfig::LogisticRegression(LogisticRegressionConfig {
            l2: 0.001,
            ..LogisticRegressionConfig::default()
        });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"logistic_regression\""));

        let parsed: ClassifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let parsed: ClassifierConfig =
            serde_json::from_str(r#"{"type": "perceptron", "epochs": 5}"#).unwrap();
        assert_eq!(
            parsed,
            ClassifierConfig::Perceptron(PerceptronConfig {
                epochs: 5,
                ..PerceptronConfig::default()
            })
        );
    }

    #[test]
    fn test_train_every_classifier() {
        let train = train_set();
        for kind in [
            ClassifierKind::Trivial,
            ClassifierKind::Perceptron,
            ClassifierKind::LogisticRegression,
        ] {
            let config = ClassifierConfig::for_kind(kind);
            assert_eq!(config.kind(), kind);

            let extractor =
                FeatureExtractor::fit(&FeatureConfig::for_kind(FeatureKind::Bigram), &train)
                    .unwrap();
            let (model, stats) = train_model(&config, extractor, &train).unwrap();
            let accuracy = evaluate(&model, &train).accuracy();

            match kind {
                ClassifierKind::Trivial => {
                    assert_eq!(accuracy, 0.5);
                    assert!(model.weights().is_empty());
                }
                _ => {
                    assert_eq!(accuracy, 1.0, "{kind}");
                    assert_eq!(stats.num_weights, model.weights().len());
                }
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_training() {
        let config = ClassifierConfig::Perceptron(PerceptronConfig {
            epochs: 0,
            ..PerceptronConfig::default()
        });
        let extractor = FeatureExtractor::fit(&FeatureConfig::default(), &[]).unwrap();
        assert!(train_model(&config, extractor, &train_set()).is_err());
    }
}
