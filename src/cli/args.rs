//! Command line argument parsing for the polarity CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::error::Result;
use crate::experiment::ExperimentConfig;
use crate::features::{FeatureConfig, FeatureKind};
use crate::ml::{
    ClassifierConfig, ClassifierKind, LearningRateSchedule, LogisticRegressionConfig,
    PerceptronConfig,
};

/// polarity - binary sentiment classification of short reviews
#[derive(Parser, Debug, Clone)]
#[command(name = "polarity")]
#[command(about = "Train and evaluate linear sentiment classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PolarityArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PolarityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train one classifier and report train / dev accuracy
    Train(TrainArgs),

    /// Train every classifier with every feature kind and compare them
    Compare(CompareArgs),
}

/// Input files shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Labeled training file (`<label>\t<text>` per line)
    #[arg(long = "train", value_name = "FILE")]
    pub train_file: PathBuf,

    /// Labeled development file
    #[arg(long = "dev", value_name = "FILE")]
    pub dev_file: PathBuf,
}

/// Hyperparameters that can be given as flags instead of a config file.
#[derive(Args, Debug, Clone)]
pub struct HyperparameterArgs {
    /// JSON experiment configuration; replaces the flags below
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Feature extraction strategy
    #[arg(long = "feats", default_value = "unigram")]
    pub features: FeatureKind,

    /// Use presence instead of counts (unigram / bigram)
    #[arg(long)]
    pub binary: bool,

    /// Maximum count of a single feature (enhanced)
    #[arg(long)]
    pub clip_threshold: Option<u32>,

    /// Stop-word file, one word per line (enhanced)
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Keep the original casing of the input
    #[arg(long)]
    pub no_lowercase: bool,

    /// Number of training epochs
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Base learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Learning-rate schedule (logistic regression)
    #[arg(long)]
    pub schedule: Option<LearningRateSchedule>,

    /// L2 regularization strength (logistic regression)
    #[arg(long)]
    pub l2: Option<f64>,

    /// Mini-batch size (logistic regression)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Shuffle the training set every epoch with this seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for training a single classifier
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Classifier to train
    #[arg(short, long, default_value = "perceptron")]
    pub model: ClassifierKind,

    #[command(flatten)]
    pub hyperparameters: HyperparameterArgs,

    /// Unlabeled sentences to classify, one per line
    #[arg(long, value_name = "FILE", requires = "test_output")]
    pub blind_test: Option<PathBuf>,

    /// Where to write blind test predictions
    #[arg(long, value_name = "FILE", requires = "blind_test")]
    pub test_output: Option<PathBuf>,

    /// Report this many of the most positive and most negative features
    #[arg(long, default_value = "0")]
    pub top_features: usize,
}

/// Arguments for comparing all classifiers
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hyperparameters: HyperparameterArgs,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl HyperparameterArgs {
    /// Build the experiment configuration for `classifier`.
    ///
    /// With `--config` the file is used as is. Otherwise the flags are
    /// applied on top of the defaults; flags that do not concern the
    /// selected classifier are ignored.
    pub fn experiment_config(&self, classifier: ClassifierKind) -> Result<ExperimentConfig> {
        if let Some(path) = &self.config {
            return ExperimentConfig::load(path);
        }

        let mut features = FeatureConfig {
            kind: self.features,
            binary: self.binary,
            ..FeatureConfig::default()
        };
        if let Some(clip_threshold) = self.clip_threshold {
            features.clip_threshold = clip_threshold;
        }
        if let Some(path) = &self.stop_words {
            features.stop_words = read_stop_words(path)?;
        }

        let classifier = match classifier {
            ClassifierKind::Trivial => ClassifierConfig::Trivial,
            ClassifierKind::Perceptron => {
                let mut config = PerceptronConfig {
                    shuffle_seed: self.seed,
                    ..PerceptronConfig::default()
                };
                if let Some(epochs) = self.epochs {
                    config.epochs = epochs;
                }
                if let Some(learning_rate) = self.learning_rate {
                    config.learning_rate = learning_rate;
                }
                ClassifierConfig::Perceptron(config)
            }
            ClassifierKind::LogisticRegression => {
                let mut config = LogisticRegressionConfig {
                    shuffle_seed: self.seed,
                    ..LogisticRegressionConfig::default()
                };
                if let Some(epochs) = self.epochs {
                    config.epochs = epochs;
                }
                if let Some(learning_rate) = self.learning_rate {
                    config.learning_rate = learning_rate;
                }
                if let Some(schedule) = self.schedule {
                    config.schedule = schedule;
                }
                if let Some(l2) = self.l2 {
                    config.l2 = l2;
                }
                if let Some(batch_size) = self.batch_size {
                    config.batch_size = batch_size;
                }
                ClassifierConfig::LogisticRegression(config)
            }
        };

        let config = ExperimentConfig {
            dataset: DatasetConfig {
                lowercase: !self.no_lowercase,
            },
            features,
            classifier,
        };
        config.validate()?;
        Ok(config)
    }
}

/// One stop word per line; blank lines and `#` comments are skipped.
fn read_stop_words(path: &std::path::Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}
