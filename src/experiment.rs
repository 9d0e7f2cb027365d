//! Experiment runner: fit features, train a classifier, evaluate it.

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetConfig, Example};
use crate::error::Result;
use crate::features::{FeatureConfig, FeatureExtractor, FeatureKind};
use crate::ml::{
    ClassifierConfig, ClassifierKind, EvaluationSummary, LinearModel, TrainingStats, evaluate,
    train_model,
};

/// Everything needed to reproduce one training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// How input files are read.
    pub dataset: DatasetConfig,
    /// Feature extraction strategy.
    pub features: FeatureConfig,
    /// Classifier and its hyperparameters.
    pub classifier: ClassifierConfig,
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ExperimentConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the feature and classifier settings.
    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.classifier.validate()
    }
}

/// Outcome of one experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Classifier that was trained.
    pub classifier: ClassifierKind,
    /// Feature strategy it was trained on.
    pub features: FeatureKind,
    /// Number of entries in the learned weight vector.
    pub num_weights: usize,
    /// Per-epoch training statistics.
    pub training: TrainingStats,
    /// Metrics on the training set.
    pub train: EvaluationSummary,
    /// Metrics on the development set.
    pub dev: EvaluationSummary,
    /// Wall time for extraction, training and evaluation.
    pub elapsed_ms: u64,
}

impl ExperimentReport {
    /// Short label such as `perceptron/unigram`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.classifier, self.features)
    }
}

/// Fit the extractor on `train`, train the classifier, then evaluate on
/// both splits.
pub fn run_experiment(
    config: &ExperimentConfig,
    train: &[Example],
    dev: &[Example],
) -> Result<(LinearModel, ExperimentReport)> {
    config.validate()?;
    let start = Instant::now();

    if dev.is_empty() {
        warn!("Development set is empty; dev accuracy will be reported as 0");
    }

    let extractor = FeatureExtractor::fit(&config.features, train)?;
    let (model, training) = train_model(&config.classifier, extractor, train)?;

    let train_eval = evaluate(&model, train);
    let dev_eval = evaluate(&model, dev);
    info!("{} train: {}", config.classifier.kind(), train_eval);
    info!("{} dev: {}", config.classifier.kind(), dev_eval);

    let report = ExperimentReport {
        classifier: config.classifier.kind(),
        features: config.features.kind,
        num_weights: model.weights().len(),
        training,
        train: train_eval.summary(),
        dev: dev_eval.summary(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    Ok((model, report))
}

/// Configurations covered by a full comparison: the trivial baseline, then
/// every trainable classifier with every feature kind.
///
/// A classifier takes its hyperparameters from the first entry of `tuned`
/// of the same kind, or its defaults when there is none.
pub fn comparison_configs(
    base: &ExperimentConfig,
    tuned: &[ClassifierConfig],
) -> Vec<ExperimentConfig> {
    let mut configs = vec![ExperimentConfig {
        classifier: ClassifierConfig::Trivial,
        ..base.clone()
    }];

    for classifier in [ClassifierKind::Perceptron, ClassifierKind::LogisticRegression] {
        let classifier_config = tuned
            .iter()
            .find(|config| config.kind() == classifier)
            .cloned()
            .unwrap_or_else(|| ClassifierConfig::for_kind(classifier));
        for kind in FeatureKind::ALL {
            configs.push(ExperimentConfig {
                dataset: base.dataset.clone(),
                features: FeatureConfig {
                    kind,
                    ..base.features.clone()
                },
                classifier: classifier_config.clone(),
            });
        }
    }
    configs
}

/// Run every configuration of [`comparison_configs`] on the same data.
pub fn compare(
    base: &ExperimentConfig,
    tuned: &[ClassifierConfig],
    train: &[Example],
    dev: &[Example],
) -> Result<Vec<ExperimentReport>> {
    let configs = comparison_configs(base, tuned);
    let mut reports = Vec::with_capacity(configs.len());
    for config in &configs {
        let (_, report) = run_experiment(config, train, dev)?;
        info!(
            "{}: dev accuracy {:.4} ({} ms)",
            report.name(),
            report.dev.accuracy,
            report.elapsed_ms
        );
        reports.push(report);
    }
    Ok(reports)
}
