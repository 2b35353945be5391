use std::sync::Arc;

use surge_core::runner::{self, EndpointClient, RampConfig, ScenarioConfig, SlaThresholds};
use surge_core::{ClientConfig, HttpClient};

use crate::cli::{RampArgs, RunArgs, SlaArgs, TargetArgs};
use crate::exit_codes::ExitCode;
use crate::output;
use crate::run_error::RunError;

pub async fn run(args: RunArgs) -> Result<ExitCode, RunError> {
    let sla = thresholds(&args.sla)?;
    let out = output::formatter(args.target.output);
    let endpoint = endpoint(&args.target)?;

    let cfg = ScenarioConfig {
        requests: args.requests,
        concurrency: args.concurrency,
        target_path: args.target.path.clone(),
        run_timeout: args.target.timeout,
        success_status: args.target.success_status,
    };

    let report = runner::run_scenario(&endpoint, &cfg)
        .await
        .map_err(into_run_error)?;
    let verdict = runner::validate_run(&report.stats, &sla);

    out.print_run(&report, &verdict).map_err(RunError::RuntimeError)?;

    Ok(ExitCode::from_verdict(&verdict))
}

pub async fn ramp(args: RampArgs) -> Result<ExitCode, RunError> {
    let sla = thresholds(&args.sla)?;
    let out = output::formatter(args.target.output);
    let endpoint = endpoint(&args.target)?;

    let cfg = RampConfig {
        levels: args.levels.clone(),
        target_path: args.target.path.clone(),
        run_timeout: args.target.timeout,
        success_status: args.target.success_status,
    };

    let report = runner::run_ramp(&endpoint, &cfg)
        .await
        .map_err(into_run_error)?;
    let verdict = runner::validate_ramp(&report, &sla);

    out.print_ramp(&report, &verdict)
        .map_err(RunError::RuntimeError)?;

    Ok(ExitCode::from_verdict(&verdict))
}

fn endpoint(target: &TargetArgs) -> Result<EndpointClient, RunError> {
    if !target.base_url.starts_with("http://") {
        return Err(RunError::InvalidInput(anyhow::anyhow!(
            "base url must start with http:// (got `{}`)",
            target.base_url
        )));
    }

    let client = Arc::new(HttpClient::new(&ClientConfig::default()));
    Ok(EndpointClient::new(
        client,
        &target.base_url,
        target.success_status,
        target.request_timeout,
    ))
}

fn thresholds(args: &SlaArgs) -> Result<SlaThresholds, RunError> {
    for (name, value) in [
        ("success-ratio", args.success_ratio),
        ("error-ratio", args.error_ratio),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(RunError::InvalidInput(anyhow::anyhow!(
                "--{name} must be within 0..=1 (got {value})"
            )));
        }
    }

    Ok(SlaThresholds {
        success_ratio: args.success_ratio,
        error_ratio: args.error_ratio,
        avg_ms: args.avg_ms,
        degradation_pct: args.degradation_pct,
    })
}

fn into_run_error(err: runner::Error) -> RunError {
    match err {
        runner::Error::Join(_) => RunError::RuntimeError(err.into()),
        _ => RunError::InvalidInput(err.into()),
    }
}
