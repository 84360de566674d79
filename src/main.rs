mod engine;
mod models;
mod sink;
mod storage;
mod transform;
mod types;

use std::env;
use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{EtlEngine, InvocationOutcome, TriggerEvent};
use crate::sink::{PostgresSink, SinkConfig, SinkDispatcher};
use crate::storage::LocalObjectStore;
use crate::transform::Transformer;
use crate::types::AmountThresholds;

const SINK_HOST_VARIABLE: &str = "REDSHIFT_HOST";
const SINK_PORT_VARIABLE: &str = "REDSHIFT_PORT";
const SINK_DATABASE_VARIABLE: &str = "REDSHIFT_DB";
const SINK_USER_VARIABLE: &str = "REDSHIFT_USER";
const SINK_PASSWORD_VARIABLE: &str = "REDSHIFT_PASSWORD";
const SINK_TABLE_VARIABLE: &str = "REDSHIFT_TABLE";
const SINK_TIMEOUT_VARIABLE: &str = "REDSHIFT_TIMEOUT_SECONDS";
const THRESHOLDS_VARIABLE: &str = "AMOUNT_THRESHOLDS";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: transaction-etl [storage_root] [event].json [log_level:optional] > [response].json");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(2);
    }

    let storage_root = &args[1];
    let event_path = &args[2];
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let timer = Instant::now();
    let (response, succeeded) = match run(storage_root, event_path).await {
        Ok(outcome) => (success_response(&outcome), true),
        Err(error) => {
            error!("Error in ETL pipeline: {error:#}");
            (error_response(&error), false)
        }
    };

    info!("Invocation finished in: {:?}", timer.elapsed());

    write_response_to_stdout(&response)?;

    if !succeeded {
        exit(1);
    }

    Ok(())
}

async fn run(storage_root: &str, event_path: &str) -> Result<InvocationOutcome> {
    let payload = fs::read(event_path)
        .with_context(|| format!("reading event file {event_path}"))?;
    let event = TriggerEvent::from_json(&payload)?;

    let thresholds = thresholds_from_env()?;
    debug!("Amount thresholds: {:?}", thresholds.bounds().collect::<Vec<_>>());

    let config = sink_config_from_env();
    debug!("Sink configuration: {config:?}");

    let mut dispatcher = SinkDispatcher::new(config, PostgresSink::new());

    if let Some(seconds) = env::var(SINK_TIMEOUT_VARIABLE).ok().and_then(|value| value.trim().parse::<u64>().ok()) {
        dispatcher = dispatcher.with_timeout(Duration::from_secs(seconds));
    }

    let engine = EtlEngine::new(
        Arc::new(LocalObjectStore::new(storage_root)),
        Transformer::new(thresholds),
        dispatcher
    );

    Ok(engine.handle(&event).await?)
}

//NOTE: The environment is read here and nowhere else, the rest of the crate receives an explicit SinkConfig
fn sink_config_from_env() -> SinkConfig {
    let read = |name: &str| env::var(name).ok();

    SinkConfig {
        host: read(SINK_HOST_VARIABLE),
        port: read(SINK_PORT_VARIABLE),
        database: read(SINK_DATABASE_VARIABLE),
        user: read(SINK_USER_VARIABLE),
        password: read(SINK_PASSWORD_VARIABLE),
        table: read(SINK_TABLE_VARIABLE)
    }
}

/// Reads `AMOUNT_THRESHOLDS` as three comma-separated lower bounds (medium, large, very large).
fn thresholds_from_env() -> Result<AmountThresholds> {
    let Ok(value) = env::var(THRESHOLDS_VARIABLE) else {
        return Ok(AmountThresholds::default());
    };

    let bounds = value.split(',')
        .map(|bound| bound.trim().parse::<Decimal>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing {THRESHOLDS_VARIABLE}={value}"))?;

    let [medium, large, very_large] = bounds[..] else {
        return Err(anyhow!("{THRESHOLDS_VARIABLE} must list exactly three bounds, got {}", bounds.len()));
    };

    Ok(AmountThresholds::new(medium, large, very_large)?)
}

fn success_response(outcome: &InvocationOutcome) -> Value {
    let body = match outcome {
        InvocationOutcome::Processed(report) => json!({
            "message": "ETL pipeline completed successfully",
            "records_processed": report.records_written,
            "records_dropped": report.records_dropped,
            "source_file": report.source_file,
            "output_file": report.output_key,
            "sink": report.sink
        }),
        InvocationOutcome::Skipped { source_file, reason } => json!({
            "message": format!("File skipped - {reason}"),
            "source_file": source_file
        })
    };

    json!({ "status_code": 200, "body": body })
}

fn error_response(error: &anyhow::Error) -> Value {
    json!({
        "status_code": 500,
        "body": { "error": format!("{error:#}") }
    })
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the invocation response, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_response_to_stdout(response: &Value) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, response)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
