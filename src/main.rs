//! CLI entry point for the runs test.
//!
//! Reads a numeric column from a delimited file, runs the above/below-mean
//! runs test, and prints the report as text or JSON.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use runs_test::{
    RunsTestReport, Significance, TiePolicy, load_column,
    output::{append_record, print_pretty, render_text, to_json},
    run_test,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "runs_test")]
#[command(about = "Runs test above/below the mean for randomness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test on one column of a delimited file
    Analyze {
        /// Path to the delimited input file
        #[arg(short, long, default_value = "datos_corridas.csv")]
        input: String,

        /// Header name of the numeric column
        #[arg(short, long, default_value = "valor")]
        column: String,

        /// Field delimiter (a single ASCII character)
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// How to label observations exactly equal to the mean
        #[arg(short, long, value_enum, default_value_t = TiePolicy::Above)]
        ties: TiePolicy,

        /// Two-tailed significance level
        #[arg(short, long, value_enum, default_value = "0.05")]
        alpha: Significance,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Optional: CSV file to append the result row to
        #[arg(long)]
        append: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            column,
            delimiter,
            ties,
            alpha,
            format,
            append,
        } => {
            if !delimiter.is_ascii() {
                bail!("delimiter must be a single ASCII character, got '{delimiter}'");
            }

            let sample = load_column(&input, &column, delimiter as u8)
                .with_context(|| format!("failed to load column '{column}' from '{input}'"))?;
            info!(observations = sample.len(), "Sample loaded");

            let (classification, stats) = run_test(&sample, ties, alpha)
                .context("runs test could not be evaluated")?;
            info!(
                runs = stats.runs,
                z = stats.z,
                decision = ?stats.decision,
                "Runs test complete"
            );

            let report =
                RunsTestReport::from_run(&classification, &stats, ties).with_source(&input, &column);
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_text(&report)),
                Format::Json => println!("{}", to_json(&report)?),
            }

            if let Some(path) = append {
                append_record(&path, &report)
                    .with_context(|| format!("failed to append result to '{path}'"))?;
                info!(path = %path, "Result appended");
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/runs_test.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("runs_test.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
