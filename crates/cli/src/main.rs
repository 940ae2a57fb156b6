//! days-estimate CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — flags with environment fallbacks, validated
//!    into a [`config::RunnerConfig`] before anything is contacted.
//! 2. **Wire observability** — `tracing-subscriber` (pretty or JSON) plus an
//!    optional OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure** — an [`HttpGraphQlClient`] wrapped in a
//!    [`GitHubProjectBoard`], injected into the [`ReconciliationEngine`].
//! 4. **Report** — print the run statistics and map failures to exit codes
//!    (see [`exit_codes`]).

mod config;
mod exit_codes;
mod telemetry;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use estimate::RunStatistics;
use github::{GitHubProjectBoard, HttpGraphQlClient};
use reconcile::ReconciliationEngine;
use tracing::error;

use crate::config::{Args, ReportFormat, RunnerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _telemetry = match telemetry::init(args.log_format) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to initialise logging: {e:#}");
            return ExitCode::from(exit_codes::EXIT_ERROR);
        }
    };

    let report = args.report;
    let result = async move {
        let config = args.validate().context("invalid configuration")?;
        run(config).await
    }
    .await;

    match result {
        Ok(stats) => {
            print_report(report, &stats);
            ExitCode::from(exit_codes::EXIT_SUCCESS)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Reconciliation aborted");
            ExitCode::from(exit_codes::for_error(&e))
        }
    }
}

async fn run(config: RunnerConfig) -> anyhow::Result<RunStatistics> {
    let client =
        HttpGraphQlClient::new(config.transport).context("failed to build the HTTP client")?;
    let engine =
        ReconciliationEngine::new(GitHubProjectBoard::new(client)).with_options(config.options);

    let target = &config.target;
    engine.run(target).await.with_context(|| {
        format!(
            "reconciling project {} of {} '{}'",
            target.project_number, target.owner_kind, target.owner
        )
    })
}

fn print_report(format: ReportFormat, stats: &RunStatistics) {
    match format {
        ReportFormat::Text => println!("{stats}"),
        ReportFormat::Json => match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialise the run report"),
        },
    }
}
