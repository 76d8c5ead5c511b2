//! End-to-end filtering tests against LocalStack S3.

use crate::common::{LocalStackTestContext, generate_test_records, gzip};
use sift_error::{FetchError, SiftError};
use sift_filter::FilterSet;
use sift_reader_ndjson::{RecordReader, RecordReaderConfig};
use sift_runner::{JsonLinesDestination, Pipeline, PipelineStats};
use sift_types::Record;
use std::sync::Arc;

const BUCKET: &str = "s3sift-test-bucket";

/// Run a pipeline over `uri` using the LocalStack client, returning stats and stdout.
async fn run(
    ctx: &LocalStackTestContext,
    uri: &str,
    filters: FilterSet,
) -> (Result<PipelineStats, SiftError>, Vec<Record>) {
    let reader = RecordReader::with_fetcher(RecordReaderConfig::new(), Arc::new(ctx.fetcher()));
    let mut dest = JsonLinesDestination::new(Vec::new());

    let result = Pipeline::new(reader, filters).run(uri, &mut dest).await;

    let output = String::from_utf8(dest.into_inner()).unwrap();
    let records = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    (result, records)
}

async fn setup() -> Option<LocalStackTestContext> {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available at {}, skipping test", ctx.endpoint);
        return None;
    }

    ctx.create_bucket(BUCKET).await.unwrap();
    Some(ctx)
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_filter_by_word_from_s3() {
    let Some(ctx) = setup().await else { return };

    let key = "words/data.json.gz";
    ctx.upload(BUCKET, key, gzip(&generate_test_records(1000)))
        .await
        .unwrap();

    let uri = format!("s3://{BUCKET}/{key}");
    let (result, records) = run(&ctx, &uri, FilterSet::new().with_word("fizz")).await;

    let stats = result.unwrap();
    assert_eq!(stats.records_decoded, 1000);
    assert_eq!(stats.records_selected, 333);
    assert!(records.iter().all(|r| r.id() % 3 == 0));
    assert!(records.windows(2).all(|w| w[0].id() < w[1].id()));

    ctx.delete_object(BUCKET, key).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_filter_by_id_and_time_from_s3() {
    let Some(ctx) = setup().await else { return };

    let key = "combined/data.json.gz";
    ctx.upload(BUCKET, key, gzip(&generate_test_records(500)))
        .await
        .unwrap();

    let uri = format!("s3://{BUCKET}/{key}");

    let filters = FilterSet::from_options(0, "2023-01-01T01:00:00Z", "2023-01-01T01:09:00Z", "")
        .unwrap();
    let (result, records) = run(&ctx, &uri, filters).await;
    result.unwrap();
    let ids: Vec<i64> = records.iter().map(Record::id).collect();
    assert_eq!(ids, (60..=69).collect::<Vec<_>>());

    let filters = FilterSet::from_options(42, "", "", "").unwrap();
    let (result, records) = run(&ctx, &uri, filters).await;
    result.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), 42);

    ctx.delete_object(BUCKET, key).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_multi_member_object() {
    let Some(ctx) = setup().await else { return };

    let key = "multi/data.json.gz";
    let mut body = gzip(&generate_test_records(10));
    body.extend(gzip("\n{\"id\":11,\"time\":\"2023-02-01T00:00:00Z\",\"words\":[]}"));
    ctx.upload(BUCKET, key, body).await.unwrap();

    let uri = format!("s3://{BUCKET}/{key}");
    let (result, records) = run(&ctx, &uri, FilterSet::new()).await;

    assert_eq!(result.unwrap().records_selected, 11);
    assert_eq!(records.last().map(Record::id), Some(11));

    ctx.delete_object(BUCKET, key).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_object_is_not_found() {
    let Some(ctx) = setup().await else { return };

    let uri = format!("s3://{BUCKET}/does/not/exist.json.gz");
    let (result, records) = run(&ctx, &uri, FilterSet::new()).await;

    match result {
        Err(SiftError::Fetch(FetchError::NotFound(_))) => {}
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
    assert!(records.is_empty());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plain_object_is_decompress_error() {
    let Some(ctx) = setup().await else { return };

    let key = "plain/data.json";
    ctx.upload(BUCKET, key, generate_test_records(5).into_bytes())
        .await
        .unwrap();

    let uri = format!("s3://{BUCKET}/{key}");
    let (result, records) = run(&ctx, &uri, FilterSet::new()).await;

    assert!(matches!(result, Err(SiftError::Decompress(_))));
    assert!(records.is_empty());

    ctx.delete_object(BUCKET, key).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_reader_built_from_endpoint_config() {
    let Some(ctx) = setup().await else { return };

    // The configured path takes credentials from the environment
    if std::env::var("AWS_ACCESS_KEY_ID").is_err() {
        eprintln!("AWS_ACCESS_KEY_ID not set, skipping test");
        return;
    }

    let key = "config/data.json.gz";
    ctx.upload(BUCKET, key, gzip(&generate_test_records(20)))
        .await
        .unwrap();

    let reader = RecordReader::new(
        RecordReaderConfig::new()
            .with_region(&ctx.region)
            .with_endpoint(&ctx.endpoint),
    );
    let mut dest = JsonLinesDestination::new(Vec::new());
    let stats = Pipeline::new(reader, FilterSet::new())
        .run(&format!("s3://{BUCKET}/{key}"), &mut dest)
        .await
        .unwrap();

    assert_eq!(stats.records_selected, 20);
    assert_eq!(dest.records_written(), 20);

    ctx.delete_object(BUCKET, key).await.ok();
}
