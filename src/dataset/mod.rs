//! Labeled review datasets.

mod example;
mod loader;

pub use example::{Example, Label};
pub use loader::{
    DatasetConfig, parse_examples, read_examples, read_sentences, write_predictions,
};
