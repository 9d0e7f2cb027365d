//! Command implementations for the polarity CLI.

use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::{DatasetConfig, Example, Label, read_examples, read_sentences, write_predictions};
use crate::error::Result;
use crate::experiment::{compare, run_experiment};
use crate::ml::{ClassifierKind, LinearModel};

/// Execute a CLI command.
pub fn execute_command(args: PolarityArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Compare(compare_args) => compare_all(compare_args, &args),
    }
}

/// Train one classifier, evaluate it, and optionally label a blind test set.
fn train(args: &TrainArgs, cli_args: &PolarityArgs) -> Result<()> {
    let start = Instant::now();
    let config = args.hyperparameters.experiment_config(args.model)?;
    let (train_set, dev_set) = load_data(&args.data, &config.dataset)?;

    let (model, report) = run_experiment(&config, &train_set, &dev_set)?;
    let (top_positive, top_negative) = model.top_features(args.top_features);

    let mut predictions_written = 0;
    if let (Some(blind_test), Some(test_output)) = (&args.blind_test, &args.test_output) {
        predictions_written = label_blind_test(&model, &config.dataset, blind_test, test_output)?;
    }

    output_result(
        "Training finished",
        &TrainResult {
            report,
            top_positive,
            top_negative,
            predictions_file: args
                .test_output
                .as_ref()
                .map(|path| path.to_string_lossy().to_string()),
            predictions_written,
            total_duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Run the full classifier x feature grid.
fn compare_all(args: &CompareArgs, cli_args: &PolarityArgs) -> Result<()> {
    let start = Instant::now();
    let perceptron = args
        .hyperparameters
        .experiment_config(ClassifierKind::Perceptron)?;
    let logistic = args
        .hyperparameters
        .experiment_config(ClassifierKind::LogisticRegression)?;
    let (train_set, dev_set) = load_data(&args.data, &perceptron.dataset)?;

    let reports = compare(
        &perceptron,
        &[perceptron.classifier.clone(), logistic.classifier],
        &train_set,
        &dev_set,
    )?;

    output_result(
        "Comparison finished",
        &CompareResult {
            reports,
            total_duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

fn load_data(data: &DataArgs, dataset: &DatasetConfig) -> Result<(Vec<Example>, Vec<Example>)> {
    let analyzer = dataset.analyzer();
    let train_set = read_examples(&data.train_file, &analyzer)?;
    let dev_set = read_examples(&data.dev_file, &analyzer)?;
    info!(
        "Loaded {} training and {} development examples",
        train_set.len(),
        dev_set.len()
    );
    Ok((train_set, dev_set))
}

fn label_blind_test(
    model: &LinearModel,
    dataset: &DatasetConfig,
    input: &std::path::Path,
    output: &std::path::Path,
) -> Result<usize> {
    let sentences = read_sentences(input, &dataset.analyzer())?;
    let labels: Vec<Label> = sentences.iter().map(|words| model.predict(words.as_slice())).collect();
    write_predictions(output, &sentences, &labels)?;
    Ok(labels.len())
}
