//! Sparse text features.
//!
//! - [`SparseVector`]: string-keyed sparse vectors and their arithmetic
//! - [`FeatureExtractor`]: unigram, bigram and enhanced (TF-IDF) strategies
//! - [`IdfTable`]: document frequencies fitted on the training corpus
//! - [`StopWords`]: words the enhanced strategy drops

mod extractor;
mod idf;
mod sparse;
mod stop;

pub use extractor::{EnhancedExtractor, FeatureConfig, FeatureExtractor, FeatureKind};
pub use idf::IdfTable;
pub use sparse::SparseVector;
pub use stop::{SENTIMENT_STOP_WORDS, StopWords};
