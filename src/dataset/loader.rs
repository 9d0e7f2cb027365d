//! Reading labeled and blind datasets, writing predictions.
//!
//! Labeled files hold one example per line as `<label>\t<text>`. Any record
//! that cannot be read aborts the whole load with the file name and line
//! number; nothing is skipped silently. Blank lines are not records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::dataset::example::{Example, Label};
use crate::error::{PolarityError, Result};

/// Settings for turning raw lines into examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Lowercase every token while loading.
    pub lowercase: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

impl DatasetConfig {
    /// Build the analyzer matching this configuration.
    pub fn analyzer(&self) -> PipelineAnalyzer {
        PipelineAnalyzer::review(self.lowercase)
    }
}

/// Read a labeled dataset from `path`.
pub fn read_examples<P: AsRef<Path>>(path: P, analyzer: &dyn Analyzer) -> Result<Vec<Example>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PolarityError::dataset(format!("cannot open {}: {e}", path.display()))
    })?;
    let examples = parse_examples(
        BufReader::new(file),
        &path.display().to_string(),
        analyzer,
    )?;
    info!(
        "Read {} examples from {} ({} positive)",
        examples.len(),
        path.display(),
        examples
            .iter()
            .filter(|ex| ex.label() == Label::Positive)
            .count()
    );
    Ok(examples)
}

/// Parse labeled examples from any buffered reader.
///
/// `source` names the input in error messages.
pub fn parse_examples<R: BufRead>(
    reader: R,
    source: &str,
    analyzer: &dyn Analyzer,
) -> Result<Vec<Example>> {
    let mut examples = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;
        if line.trim().is_empty() {
            continue;
        }

        let Some((label, text)) = line.split_once('\t') else {
            return Err(PolarityError::malformed_record(
                source,
                line_num,
                "missing text field (expected '<label>\\t<text>')",
            ));
        };

        let label: Label = label
            .parse()
            .map_err(|e: PolarityError| PolarityError::malformed_record(source, line_num, reason(e)))?;

        let words = analyzer.analyze_to_words(text)?;
        if words.is_empty() {
            return Err(PolarityError::malformed_record(
                source,
                line_num,
                "missing text field",
            ));
        }

        examples.push(Example::new(words, label));
    }

    debug!("Parsed {} examples from {source}", examples.len());
    Ok(examples)
}

/// Read an unlabeled dataset, one sentence per line.
pub fn read_sentences<P: AsRef<Path>>(path: P, analyzer: &dyn Analyzer) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PolarityError::dataset(format!("cannot open {}: {e}", path.display()))
    })?;

    let mut sentences = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sentences.push(analyzer.analyze_to_words(&line)?);
    }

    info!("Read {} sentences from {}", sentences.len(), path.display());
    Ok(sentences)
}

/// Write predictions in the labeled input format (`<0|1>\t<text>`).
pub fn write_predictions<P: AsRef<Path>>(
    path: P,
    sentences: &[Vec<String>],
    labels: &[Label],
) -> Result<()> {
    if sentences.len() != labels.len() {
        return Err(PolarityError::other(format!(
            "{} sentences but {} predictions",
            sentences.len(),
            labels.len()
        )));
    }

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for (words, label) in sentences.iter().zip(labels) {
        writeln!(writer, "{}\t{}", label.as_digit(), words.join(" "))?;
    }
    writer.flush()?;

    info!(
        "Wrote {} predictions to {}",
        labels.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Strip the variant prefix so location and reason read as one message.
fn reason(error: PolarityError) -> String {
    match error {
        PolarityError::Dataset(msg) => msg,
        other => other.to_string(),
    }
}
