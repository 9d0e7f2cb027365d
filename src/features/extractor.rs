//! Feature extraction strategies.
//!
//! Every strategy maps a token sequence to a [`SparseVector`]. Keys are
//! tagged by order (`uni:<word>`, `bi:<first> <second>`) so unigram and
//! bigram features never collide. Words never contain whitespace, so the
//! space in a bigram key always marks the pair boundary.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::Example;
use crate::error::{PolarityError, Result};
use crate::features::idf::IdfTable;
use crate::features::sparse::SparseVector;
use crate::features::stop::{SENTIMENT_STOP_WORDS, StopWords};

/// Which feature extraction strategy to use.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Bag of words
    Unigram,
    /// Bag of words plus adjacent word pairs
    Bigram,
    /// Stop words removed, counts clipped, TF-IDF weighted
    Enhanced,
}

impl FeatureKind {
    /// All strategies, in reporting order.
    pub const ALL: [FeatureKind; 3] = [
        FeatureKind::Unigram,
        FeatureKind::Bigram,
        FeatureKind::Enhanced,
    ];
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Unigram => write!(f, "unigram"),
            FeatureKind::Bigram => write!(f, "bigram"),
            FeatureKind::Enhanced => write!(f, "enhanced"),
        }
    }
}

/// Feature extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Extraction strategy.
    pub kind: FeatureKind,
    /// Unigram / bigram: use presence (1) instead of counts.
    pub binary: bool,
    /// Enhanced: stop words to drop. Defaults to the sentiment stop list.
    pub stop_words: Vec<String>,
    /// Enhanced: maximum count any single feature contributes.
    pub clip_threshold: u32,
    /// Enhanced: also emit adjacent-pair features.
    pub bigrams: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            kind: FeatureKind::Unigram,
            binary: false,
            stop_words: SENTIMENT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            clip_threshold: 2,
            bigrams: true,
        }
    }
}

impl FeatureConfig {
    /// Default settings for the given strategy.
    pub fn for_kind(kind: FeatureKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Check the settings before any extraction happens.
    pub fn validate(&self) -> Result<()> {
        if self.kind == FeatureKind::Enhanced && self.clip_threshold == 0 {
            return Err(PolarityError::config("clip_threshold must be at least 1"));
        }
        Ok(())
    }
}

/// The enhanced strategy: stop-word removal, clipped counts, TF-IDF weights.
#[derive(Debug, Clone)]
pub struct EnhancedExtractor {
    stop_words: StopWords,
    clip_threshold: u32,
    bigrams: bool,
    idf: IdfTable,
}

impl EnhancedExtractor {
    /// Fit the IDF table on the training corpus.
    pub fn fit(config: &FeatureConfig, corpus: &[Example]) -> Self {
        let mut extractor = Self {
            stop_words: StopWords::from_words(config.stop_words.iter().cloned()),
            clip_threshold: config.clip_threshold,
            bigrams: config.bigrams,
            idf: IdfTable::default(),
        };

        let documents: Vec<Vec<String>> = corpus
            .iter()
            .map(|ex| extractor.clipped_counts(ex.words()).into_keys().collect())
            .collect();
        extractor.idf = IdfTable::fit(
            documents
                .iter()
                .map(|keys| keys.iter().map(String::as_str)),
        );

        debug!(
            "Fitted IDF over {} documents, {} distinct features, {} stop words",
            extractor.idf.n_documents(),
            extractor.idf.vocabulary_size(),
            extractor.stop_words.len()
        );
        extractor
    }

    fn extract<S: AsRef<str>>(&self, words: &[S]) -> SparseVector {
        self.clipped_counts(words)
            .into_iter()
            .map(|(key, count)| {
                let weight = count * self.idf.idf(&key);
                (key, weight)
            })
            .collect()
    }

    /// Counts after stop-word removal, clipped at the threshold.
    fn clipped_counts<S: AsRef<str>>(&self, words: &[S]) -> BTreeMap<String, f64> {
        let kept = self.stop_words.retain(words);

        let mut counts = BTreeMap::new();
        for word in &kept {
            *counts.entry(unigram_key(word)).or_insert(0.0) += 1.0;
        }
        if self.bigrams {
            for pair in kept.windows(2) {
                *counts.entry(bigram_key(pair[0], pair[1])).or_insert(0.0) += 1.0;
            }
        }

        let clip = f64::from(self.clip_threshold);
        for count in counts.values_mut() {
            *count = f64::min(*count, clip);
        }
        counts
    }
}

/// A feature extractor, ready to featurize any token sequence.
#[derive(Debug, Clone)]
pub enum FeatureExtractor {
    /// One feature per distinct word.
    Unigram {
        /// Presence instead of counts.
        binary: bool,
    },
    /// Unigram features plus one feature per adjacent pair.
    Bigram {
        /// Presence instead of counts.
        binary: bool,
    },
    /// Stop words removed, clipped, TF-IDF weighted.
    Enhanced(EnhancedExtractor),
}

impl FeatureExtractor {
    /// Build the extractor described by `config`.
    ///
    /// Only the enhanced strategy looks at `corpus` (to fit its IDF table);
    /// pass the training examples.
    pub fn fit(config: &FeatureConfig, corpus: &[Example]) -> Result<Self> {
        config.validate()?;
        Ok(match config.kind {
            FeatureKind::Unigram => FeatureExtractor::Unigram {
                binary: config.binary,
            },
            FeatureKind::Bigram => FeatureExtractor::Bigram {
                binary: config.binary,
            },
            FeatureKind::Enhanced => {
                FeatureExtractor::Enhanced(EnhancedExtractor::fit(config, corpus))
            }
        })
    }

    /// The strategy of this extractor.
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureExtractor::Unigram { .. } => FeatureKind::Unigram,
            FeatureExtractor::Bigram { .. } => FeatureKind::Bigram,
            FeatureExtractor::Enhanced(_) => FeatureKind::Enhanced,
        }
    }

    /// Featurize a token sequence. An empty sequence gives an empty vector.
    pub fn extract<S: AsRef<str>>(&self, words: &[S]) -> SparseVector {
        match self {
            FeatureExtractor::Unigram { binary } => {
                let features = words.iter().map(|w| (unigram_key(w.as_ref()), 1.0));
                Self::finish(features.collect(), *binary)
            }
            FeatureExtractor::Bigram { binary } => {
                let unigrams = words.iter().map(|w| (unigram_key(w.as_ref()), 1.0));
                let bigrams = words
                    .windows(2)
                    .map(|pair| (bigram_key(pair[0].as_ref(), pair[1].as_ref()), 1.0));
                Self::finish(unigrams.chain(bigrams).collect(), *binary)
            }
            FeatureExtractor::Enhanced(enhanced) => enhanced.extract(words),
        }
    }

    fn finish(counts: SparseVector, binary: bool) -> SparseVector {
        if binary {
            counts.keys().cloned().map(|key| (key, 1.0)).collect()
        } else {
            counts
        }
    }
}

fn unigram_key(word: &str) -> String {
    format!("uni:{word}")
}

fn bigram_key(first: &str, second: &str) -> String {
    format!("bi:{first} {second}")
}
