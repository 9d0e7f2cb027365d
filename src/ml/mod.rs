//! Linear binary classifiers over sparse features.
//!
//! This module provides the training algorithms and the model they produce:
//!
//! - [`PerceptronTrainer`]: online, mistake-driven updates
//! - [`LogisticRegressionTrainer`]: stochastic gradient descent on log loss
//! - [`LinearModel`]: a fitted extractor plus its weight vector
//! - [`evaluate`]: accuracy, precision, recall and F1 on labeled data

mod classifier;
mod evaluation;
mod logistic;
mod model;
mod order;
mod perceptron;
mod stats;

pub use classifier::{ClassifierConfig, ClassifierKind, train_model};
pub use evaluation::{Evaluation, EvaluationSummary, evaluate, evaluate_featurized};
pub use logistic::{LearningRateSchedule, LogisticRegressionConfig, LogisticRegressionTrainer};
pub use model::{FeaturizedExample, LinearModel, log_loss, predict_features, sigmoid, softplus};
pub use order::EpochOrder;
pub use perceptron::{PerceptronConfig, PerceptronTrainer};
pub use stats::TrainingStats;
