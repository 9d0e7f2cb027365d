//! Linear models over sparse features.

use serde::{Deserialize, Serialize};

use crate::dataset::{Example, Label};
use crate::features::{FeatureExtractor, SparseVector};

/// Overflow-safe logistic function.
///
/// Only ever exponentiates a non-positive number, so neither branch can
/// overflow.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

/// `ln(1 + e^z)` without overflow.
pub fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

/// Negative log-likelihood of `label` under a logistic model with `score`.
pub fn log_loss(score: f64, label: Label) -> f64 {
    match label {
        Label::Positive => softplus(-score),
        Label::Negative => softplus(score),
    }
}

/// An example already mapped into feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizedExample {
    /// Extracted features.
    pub features: SparseVector,
    /// Gold label.
    pub label: Label,
}

impl FeaturizedExample {
    /// Featurize a dataset with one extractor.
    pub fn from_examples(extractor: &FeatureExtractor, examples: &[Example]) -> Vec<Self> {
        examples
            .iter()
            .map(|ex| FeaturizedExample {
                features: extractor.extract(ex.words()),
                label: ex.label(),
            })
            .collect()
    }
}

/// Predict a label from weights and features; zero scores are Positive.
pub fn predict_features(weights: &SparseVector, features: &SparseVector) -> Label {
    Label::from_score(weights.dot(features))
}

/// A trained weight vector paired with the extractor that defines its keys.
#[derive(Debug, Clone)]
pub struct LinearModel {
    extractor: FeatureExtractor,
    weights: SparseVector,
}

impl LinearModel {
    /// Pair trained weights with their extractor.
    pub fn new(extractor: FeatureExtractor, weights: SparseVector) -> Self {
        Self { extractor, weights }
    }

    /// The always-positive baseline: no weights, so every score is zero.
    pub fn trivial() -> Self {
        Self {
            extractor: FeatureExtractor::Unigram { binary: false },
            weights: SparseVector::new(),
        }
    }

    /// The extractor used to featurize input.
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// The weight vector.
    pub fn weights(&self) -> &SparseVector {
        &self.weights
    }

    /// Raw score `w · f(words)`.
    pub fn score<S: AsRef<str>>(&self, words: &[S]) -> f64 {
        self.weights.dot(&self.extractor.extract(words))
    }

    /// Predicted label for a token sequence.
    pub fn predict<S: AsRef<str>>(&self, words: &[S]) -> Label {
        Label::from_score(self.score(words))
    }

    /// Probability of the positive class under the logistic link.
    pub fn probability<S: AsRef<str>>(&self, words: &[S]) -> f64 {
        sigmoid(self.score(words))
    }

    /// Mean log loss over a dataset. Zero for an empty dataset.
    pub fn log_loss(&self, examples: &[Example]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        let total: f64 = examples
            .iter()
            .map(|ex| log_loss(self.score(ex.words()), ex.label()))
            .sum();
        total / examples.len() as f64
    }

    /// The `n` most positive and `n` most negative weights.
    pub fn top_features(&self, n: usize) -> (Vec<(String, f64)>, Vec<(String, f64)>) {
        let mut entries: Vec<(String, f64)> = self
            .weights
            .iter()
            .filter(|(_, w)| **w != 0.0)
            .map(|(k, w)| (k.clone(), *w))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let positive = entries.iter().filter(|(_, w)| *w > 0.0).take(n).cloned().collect();
        let negative = entries
            .iter()
            .rev()
            .filter(|(_, w)| *w < 0.0)
            .take(n)
            .cloned()
            .collect();
        (positive, negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureConfig, FeatureExtractor};

    fn unigram() -> FeatureExtractor {
        FeatureExtractor::fit(&FeatureConfig::default(), &[]).unwrap()
    }

    fn weights(pairs: &[(&str, f64)]) -> SparseVector {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_sigmoid_is_overflow_safe() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(f64::MAX).is_finite());
        assert!(sigmoid(f64::MIN).is_finite());
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_softplus_and_log_loss() {
        assert!((softplus(0.0) - 2f64.ln()).abs() < 1e-15);
        assert_eq!(softplus(1000.0), 1000.0);
        assert_eq!(softplus(-1000.0), 0.0);

        assert!((log_loss(0.0, Label::Positive) - 2f64.ln()).abs() < 1e-15);
        assert!(log_loss(10.0, Label::Positive) < log_loss(10.0, Label::Negative));
        assert!(log_loss(-800.0, Label::Positive).is_finite());
    }

    #[test]
    fn test_zero_score_predicts_positive() {
        let model = LinearModel::new(unigram(), weights(&[("uni:bad", -1.0)]));

        // No words, no features: the score is exactly zero.
        assert_eq!(model.score::<&str>(&[]), 0.0);
        assert_eq!(model.predict::<&str>(&[]), Label::Positive);

        // Unknown words score zero too.
        assert_eq!(model.predict(&["unseen"]), Label::Positive);
        assert_eq!(model.predict(&["bad"]), Label::Negative);

        assert_eq!(
            predict_features(model.weights(), &SparseVector::new()),
            Label::Positive
        );
    }

    #[test]
    fn test_trivial_model_is_always_positive() {
        let model = LinearModel::trivial();
        assert_eq!(model.predict(&["terrible", "awful"]), Label::Positive);
        assert_eq!(model.probability(&["terrible"]), 0.5);
    }

    #[test]
    fn test_model_log_loss() {
        let model = LinearModel::trivial();
        let examples = vec![
            Example::from_text("good", Label::Positive),
            Example::from_text("bad", Label::Negative),
        ];
        assert!((model.log_loss(&examples) - 2f64.ln()).abs() < 1e-15);
        assert_eq!(model.log_loss(&[]), 0.0);
    }

    #[test]
    fn test_top_features() {
        let model = LinearModel::new(
            unigram(),
            weights(&[
                ("uni:great", 3.0),
                ("uni:fine", 1.0),
                ("uni:dull", -2.0),
                ("uni:awful", -4.0),
            ]),
        );
        let (positive, negative) = model.top_features(1);

        assert_eq!(positive, vec![("uni:great".to_string(), 3.0)]);
        assert_eq!(negative, vec![("uni:awful".to_string(), -4.0)]);
    }

    #[test]
    fn test_featurize_examples() {
        let examples = vec![Example::from_text("good good", Label::Positive)];
        let featurized = FeaturizedExample::from_examples(&unigram(), &examples);

        assert_eq!(featurized.len(), 1);
        assert_eq!(featurized[0].features.get("uni:good"), 2.0);
        assert_eq!(featurized[0].label, Label::Positive);
    }
}
