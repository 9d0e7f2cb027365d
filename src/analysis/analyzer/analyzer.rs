//! Core analyzer trait definition.
//!
//! Analyzers combine a tokenizer and filters to turn raw review text into
//! the token sequence an [`Example`](crate::dataset::Example) holds.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;

    /// Analyze the text and keep only the token texts.
    fn analyze_to_words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
