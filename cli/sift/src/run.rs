//! Main execution logic for the s3sift CLI.

use sift_error::{Result, SiftError};
use sift_filter::FilterSet;
use sift_reader_ndjson::{ObjectLocator, RecordReader, RecordReaderConfig};
use sift_runner::{JsonLinesDestination, Pipeline, PipelineStats};
use tracing::debug;

use crate::args::Cli;

/// Build the reader configuration from the parsed arguments.
fn reader_config(args: &Cli) -> RecordReaderConfig {
    let mut config = RecordReaderConfig::new().with_compression(args.compression.into());

    if let Some(region) = &args.region {
        config = config.with_region(region);
    }
    if let Some(endpoint) = &args.s3_endpoint {
        config = config.with_endpoint(endpoint);
    }

    config
}

/// Validate the arguments and build the pipeline, without any I/O.
fn prepare(args: &Cli) -> Result<(String, Pipeline)> {
    let input = args
        .input
        .as_deref()
        .filter(|input| !input.is_empty())
        .ok_or_else(|| {
            SiftError::Config("--input is required (e.g. s3://bucket/key.json.gz)".to_string())
        })?;

    let locator = ObjectLocator::parse(input)?;
    let filters =
        FilterSet::from_options(args.with_id, &args.from_time, &args.to_time, &args.with_word)?;
    let config = reader_config(args);

    debug!(locator = %locator, config = ?config, "Arguments validated");

    Ok((input.to_string(), Pipeline::new(RecordReader::new(config), filters)))
}

/// Execute a run with the provided arguments, writing selected records to stdout.
pub async fn execute(args: Cli) -> Result<PipelineStats> {
    let (input, pipeline) = prepare(&args)?;

    let mut destination = JsonLinesDestination::stdout();
    pipeline.run(&input, &mut destination).await
}
