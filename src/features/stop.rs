//! Stop-word lists for the enhanced feature strategy.
//!
//! The default list is the classic English list with the negations and the
//! contrastive "but" taken out, since those flip or shift the polarity of a
//! review.
//!
//! ```
//! use polarity::features::StopWords;
//!
//! let stop_words = StopWords::from_words(["foo", "bar", "baz"]);
//! assert_eq!(stop_words.len(), 3);
//! assert!(stop_words.contains("bar"));
//! ```

use ahash::AHashSet;

/// English stop words suitable for sentiment features.
pub const SENTIMENT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "if", "in", "into", "is", "it", "of",
    "on", "or", "such", "that", "the", "their", "then", "there", "these", "they", "this", "to",
    "was", "will", "with",
];

/// A set of words the enhanced extractor drops before counting.
#[derive(Clone, Debug, Default)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// Build a set from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWords {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The default sentiment list.
    pub fn sentiment() -> Self {
        Self::from_words(SENTIMENT_STOP_WORDS.iter().copied())
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Keep the words that are not stop words, in order.
    pub fn retain<'a, S: AsRef<str>>(&self, words: &'a [S]) -> Vec<&'a str> {
        words
            .iter()
            .map(AsRef::as_ref)
            .filter(|word| !self.contains(word))
            .collect()
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_drops_stop_words_in_order() {
        let stop_words = StopWords::from_words(vec!["the", "and", "or"]);
        let words = ["hello", "the", "world", "and", "test"];

        assert_eq!(stop_words.retain(&words), vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_sentiment_list_keeps_negations() {
        let stop_words = StopWords::sentiment();
        assert!(stop_words.contains("the"));
        assert!(!stop_words.contains("not"));
        assert!(!stop_words.contains("no"));
        assert!(!stop_words.contains("but"));
        assert_eq!(stop_words.len(), SENTIMENT_STOP_WORDS.len());
    }

    #[test]
    fn test_empty_list_keeps_everything() {
        let stop_words = StopWords::from_words(Vec::<String>::new());
        assert!(stop_words.is_empty());
        assert_eq!(stop_words.retain(&["the", "end"]), vec!["the", "end"]);
    }
}
