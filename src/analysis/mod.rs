//! Text analysis module for Polarity.
//!
//! This module turns raw review text into token sequences: a tokenizer splits
//! the text, filters rewrite or drop tokens, and an analyzer chains them.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
