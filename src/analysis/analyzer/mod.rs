//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
