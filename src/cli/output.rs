//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolarityArgs};
use crate::error::Result;
use crate::experiment::ExperimentReport;

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn print_human(&self, args: &PolarityArgs);
}

/// Result of the `train` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub report: ExperimentReport,
    pub top_positive: Vec<(String, f64)>,
    pub top_negative: Vec<(String, f64)>,
    pub predictions_file: Option<String>,
    pub predictions_written: usize,
    pub total_duration_ms: u64,
}

/// Result of the `compare` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResult {
    pub reports: Vec<ExperimentReport>,
    pub total_duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &PolarityArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PolarityArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for TrainResult {
    fn print_human(&self, args: &PolarityArgs) {
        let report = &self.report;
        println!("Model: {}", report.name());
        println!("═══════════════");
        println!("Train {}", report.train);
        println!("Dev   {}", report.dev);

        if args.verbosity() > 1 {
            println!();
            println!("Weights: {}", report.num_weights);
            println!(
                "Epochs run: {}{}",
                report.training.epochs_run,
                if report.training.early_stopped {
                    " (converged)"
                } else {
                    ""
                }
            );
            if let Some(loss) = report.training.final_training_loss() {
                println!("Final training loss: {loss:.6}");
            }
            println!("Training time: {}ms", report.training.training_time_ms);
        }

        print_features("Most positive features:", &self.top_positive);
        print_features("Most negative features:", &self.top_negative);

        if let Some(path) = &self.predictions_file {
            println!();
            println!("Wrote {} predictions to {}", self.predictions_written, path);
        }

        println!();
        println!("Total time: {}ms", self.total_duration_ms);
    }
}

impl HumanOutput for CompareResult {
    fn print_human(&self, _args: &PolarityArgs) {
        println!(
            "{:<30} {:>10} {:>10} {:>10} {:>10}",
            "Model", "Train", "Dev", "Dev F1", "Time(ms)"
        );
        println!("{}", "─".repeat(74));
        for report in &self.reports {
            println!(
                "{:<30} {:>10.4} {:>10.4} {:>10.4} {:>10}",
                report.name(),
                report.train.accuracy,
                report.dev.accuracy,
                report.dev.f1,
                report.elapsed_ms
            );
        }

        if let Some(best) = self
            .reports
            .iter()
            .max_by(|a, b| a.dev.accuracy.total_cmp(&b.dev.accuracy))
        {
            println!();
            println!("Best on dev: {} ({:.4})", best.name(), best.dev.accuracy);
        }

        println!();
        println!("Total time: {}ms", self.total_duration_ms);
    }
}

fn print_features(title: &str, features: &[(String, f64)]) {
    if features.is_empty() {
        return;
    }
    println!();
    println!("{title}");
    for (name, weight) in features {
        println!("  {weight:>+10.4}  {name}");
    }
}
