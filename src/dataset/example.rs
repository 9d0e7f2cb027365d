//! Labeled examples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Positive review, numerically +1.
    Positive,
    /// Negative review, numerically -1.
    Negative,
}

impl Label {
    /// The label as +1.0 / -1.0.
    pub fn sign(self) -> f64 {
        match self {
            Label::Positive => 1.0,
            Label::Negative => -1.0,
        }
    }

    /// The label as 1.0 / 0.0, the target of the logistic loss.
    pub fn as_binary(self) -> f64 {
        match self {
            Label::Positive => 1.0,
            Label::Negative => 0.0,
        }
    }

    /// Classify a score. A score of exactly zero is Positive.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.0 {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// The label as written to prediction files (`1` or `0`).
    pub fn as_digit(self) -> &'static str {
        match self {
            Label::Positive => "1",
            Label::Negative => "0",
        }
    }
}

impl FromStr for Label {
    type Err = PolarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "+1" | "pos" | "positive" => Ok(Label::Positive),
            "0" | "-1" | "neg" | "negative" => Ok(Label::Negative),
            "" => Err(PolarityError::dataset("missing label")),
            other => Err(PolarityError::dataset(format!("unknown label '{other}'"))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "positive"),
            Label::Negative => write!(f, "negative"),
        }
    }
}

/// A tokenized review with its gold label. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    words: Vec<String>,
    label: Label,
}

impl Example {
    /// Create a new example.
    pub fn new(words: Vec<String>, label: Label) -> Self {
        Example { words, label }
    }

    /// Convenience constructor splitting `text` on whitespace.
    pub fn from_text(text: &str, label: Label) -> Self {
        Example {
            words: text.split_whitespace().map(str::to_string).collect(),
            label,
        }
    }

    /// The tokens of the review.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The gold label.
    pub fn label(&self) -> Label {
        self.label
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.label.as_digit(), self.words.join(" "))
    }
}
