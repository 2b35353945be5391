use clap::{Args, Parser, Subcommand};
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration cannot be empty (expected e.g. 10s, 250ms, 1m)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        ));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: u64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"))?;

    let unit = unit_str.trim();
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => {
            Ok(Duration::from_millis(value))
        }
        "us" | "µs" | "usec" | "usecs" | "microsecond" | "microseconds" => {
            Ok(Duration::from_micros(value))
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            let secs = value
                .checked_mul(60)
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        "h" | "hr" | "hrs" | "hour" | "hours" => {
            let secs = value
                .checked_mul(60)
                .and_then(|v| v.checked_mul(60))
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        )),
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// Emit a single JSON report line to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "surge",
    author,
    version,
    about = "Concurrency-controlled HTTP benchmark driver",
    long_about = "surge issues a configurable number of concurrent GET probes against a target endpoint, measures per-request latency, and grades the aggregated statistics against SLA thresholds.\n\n`surge run` executes a single fixed-width scenario (steady or burst load, depending on how `--requests` relates to `--concurrency`).\n\n`surge ramp` repeats the pipeline across increasing concurrency levels — one request per simulated user — and reports the relative slowdown between the lowest and highest level.",
    after_help = "Examples:\n  surge run http://localhost:8080 --path /api/v1/clients --requests 50 --concurrency 50\n  surge run http://localhost:8080 --requests 100 --concurrency 20 --output json\n  surge ramp http://localhost:8080 --levels 1,5,10,25,50\n  surge run http://localhost:8080 --avg-ms 500 --success-ratio 0.99"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a fixed-concurrency benchmark scenario
    #[command(
        long_about = "Fan out `--requests` GET probes with at most `--concurrency` in flight, then grade the collected statistics against the SLA flags."
    )]
    Run(RunArgs),

    /// Probe increasing concurrency levels and measure degradation
    #[command(
        long_about = "Run the full pipeline once per `--levels` entry with one request per simulated user, then compare the first level's average latency against the last."
    )]
    Ramp(RampArgs),
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Base URL of the target, e.g. http://localhost:8080
    pub base_url: String,

    /// Request path probed on the target
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Response status that counts as a success
    #[arg(long, default_value_t = 200)]
    pub success_status: u16,

    /// Per-request timeout (e.g. 2s, 500ms); unset leaves only the connect timeout
    #[arg(long, value_parser = parse_duration)]
    pub request_timeout: Option<Duration>,

    /// Overall budget for a run; probes still in flight past it are abandoned
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SlaArgs {
    /// Minimum fraction of requests that must succeed
    #[arg(long, default_value_t = 0.95)]
    pub success_ratio: f64,

    /// Maximum fraction of requests that may fail
    #[arg(long, default_value_t = 0.05)]
    pub error_ratio: f64,

    /// Maximum acceptable average latency in milliseconds
    #[arg(long = "avg-ms", default_value_t = 10_000.0)]
    pub avg_ms: f64,

    /// Maximum acceptable slowdown between the first and last ramp level, in percent
    #[arg(long = "degradation-pct", default_value_t = 1_000.0)]
    pub degradation_pct: f64,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of requests to issue
    #[arg(long, default_value_t = 50)]
    pub requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value_t = 50)]
    pub concurrency: u64,

    #[command(flatten)]
    pub sla: SlaArgs,
}

#[derive(Debug, Args)]
pub struct RampArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Concurrency levels to probe, lowest first (one request per simulated user)
    #[arg(long, value_delimiter = ',', default_values_t = [1u64, 5, 10, 25, 50])]
    pub levels: Vec<u64>,

    #[command(flatten)]
    pub sla: SlaArgs,
}
