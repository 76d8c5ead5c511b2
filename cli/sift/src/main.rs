//! s3sift CLI
//!
//! Streams a gzip-compressed JSON object from S3 and prints the records that
//! match every given filter.

use clap::Parser;
use sift_runner::PipelineStats;
use std::process::ExitCode;
use tracing::error;

mod args;
mod format;
mod logging;
mod run;

use args::Cli;
use format::{format_bytes, format_number};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(args.log_level) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    let summary = args.summary;

    match run::execute(args).await {
        Ok(stats) => {
            if summary {
                print_summary(&stats);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = %e.stage(), error = %e, "Run aborted");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Report run statistics to stderr.
fn print_summary(stats: &PipelineStats) {
    let secs = stats.duration().num_milliseconds() as f64 / 1000.0;

    eprintln!();
    eprintln!("s3sift completed:");
    eprintln!("  Records decoded:  {}", format_number(stats.records_decoded));
    eprintln!("  Records selected: {}", format_number(stats.records_selected));
    eprintln!("  Records skipped:  {}", format_number(stats.records_skipped()));
    eprintln!("  Bytes emitted:    {}", format_bytes(stats.bytes_emitted));
    eprintln!("  Duration:         {secs:.2}s");

    if secs > 0.0 && stats.records_decoded > 0 {
        eprintln!(
            "  Throughput:       {} records/sec",
            format_number(stats.records_per_second() as u64)
        );
    }
}
