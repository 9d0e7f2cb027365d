//! # polarity
//!
//! Binary sentiment classification of short movie reviews with linear
//! models over sparse text features.
//!
//! ## Features
//!
//! - Unigram, bigram and enhanced (stop words, clipping, TF-IDF) features
//! - Perceptron and logistic regression trainers
//! - Accuracy, precision, recall and F1 evaluation
//! - Deterministic training with an optional seeded shuffle

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod experiment;
pub mod features;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
