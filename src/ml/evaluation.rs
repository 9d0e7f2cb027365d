//! Held-out evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::{Example, Label};
use crate::features::SparseVector;
use crate::ml::model::{FeaturizedExample, LinearModel, predict_features};

/// Confusion counts of a classifier over a dataset, positive class first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Examples seen.
    pub total: usize,
    /// Examples whose prediction matched the gold label.
    pub correct: usize,
    /// Predicted Positive, gold Positive.
    pub true_positives: usize,
    /// Predicted Positive, gold Negative.
    pub false_positives: usize,
    /// Predicted Negative, gold Positive.
    pub false_negatives: usize,
}

impl Evaluation {
    /// Record one prediction.
    pub fn record(&mut self, gold: Label, predicted: Label) {
        self.total += 1;
        if gold == predicted {
            self.correct += 1;
        }
        match (gold, predicted) {
            (Label::Positive, Label::Positive) => self.true_positives += 1,
            (Label::Negative, Label::Positive) => self.false_positives += 1,
            (Label::Positive, Label::Negative) => self.false_negatives += 1,
            (Label::Negative, Label::Negative) => {}
        }
    }

    /// Fraction of correct predictions, in [0, 1]. Zero when empty.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    /// Precision of the positive class.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Recall of the positive class.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// F1 of the positive class.
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }

    /// Counts plus derived metrics, for reporting.
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            accuracy: self.accuracy(),
            precision: self.precision(),
            recall: self.recall(),
            f1: self.f1(),
            correct: self.correct,
            total: self.total,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.summary().fmt(f)
    }
}

/// Serializable view of an [`Evaluation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Fraction of examples predicted correctly.
    pub accuracy: f64,
    /// Precision of the positive class.
    pub precision: f64,
    /// Recall of the positive class.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of correct predictions.
    pub correct: usize,
    /// Number of examples evaluated.
    pub total: usize,
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy: {} / {} = {:.6}; Precision: {:.6}; Recall: {:.6}; F1: {:.6}",
            self.correct, self.total, self.accuracy, self.precision, self.recall, self.f1
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Evaluate a model on labeled examples. Read-only over both arguments.
pub fn evaluate(model: &LinearModel, examples: &[Example]) -> Evaluation {
    let mut evaluation = Evaluation::default();
    for example in examples {
        evaluation.record(example.label(), model.predict(example.words()));
    }
    evaluation
}

/// Evaluate raw weights on examples that are already featurized.
pub fn evaluate_featurized(weights: &SparseVector, examples: &[FeaturizedExample]) -> Evaluation {
    let mut evaluation = Evaluation::default();
    for example in examples {
        evaluation.record(example.label, predict_features(weights, &example.features));
    }
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureConfig, FeatureExtractor};

    fn model() -> LinearModel {
        let extractor = FeatureExtractor::fit(&FeatureConfig::default(), &[]).unwrap();
        let weights = [("uni:good", 1.0), ("uni:bad", -1.0)].into_iter().collect();
        LinearModel::new(extractor, weights)
    }

    #[test]
    fn test_accuracy() {
        let examples = vec![
            Example::from_text("good", Label::Positive),
            Example::from_text("bad", Label::Negative),
            Example::from_text("good", Label::Negative),
            Example::from_text("plain", Label::Positive),
        ];
        let evaluation = evaluate(&model(), &examples);

        assert_eq!(evaluation.total, 4);
        assert_eq!(evaluation.correct, 3);
        assert_eq!(evaluation.accuracy(), 0.75);
        assert_eq!(evaluation.true_positives, 2);
        assert_eq!(evaluation.false_positives, 1);
        assert_eq!(evaluation.false_negatives, 0);
        assert!((evaluation.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(evaluation.recall(), 1.0);
        assert!((evaluation.f1() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_empty_dataset() {
        let evaluation = evaluate(&model(), &[]);
        assert_eq!(evaluation.accuracy(), 0.0);
        assert_eq!(evaluation.precision(), 0.0);
        assert_eq!(evaluation.f1(), 0.0);
    }

    #[test]
    fn test_featurized_matches_raw() {
        let model = model();
        let examples = vec![
            Example::from_text("good bad bad", Label::Negative),
            Example::from_text("good good bad", Label::Negative),
        ];
        let featurized = FeaturizedExample::from_examples(model.extractor(), &examples);

        assert_eq!(
            evaluate(&model, &examples),
            evaluate_featurized(model.weights(), &featurized)
        );
    }

    #[test]
    fn test_display() {
        let mut evaluation = Evaluation::default();
        evaluation.record(Label::Positive, Label::Positive);
        evaluation.record(Label::Negative, Label::Positive);

        assert_eq!(
            evaluation.to_string(),
            "Accuracy: 1 / 2 = 0.500000; Precision: 0.500000; Recall: 1.000000; F1: 0.666667"
        );
    }
}
