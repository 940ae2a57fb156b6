//! Command-line and environment configuration.
//!
//! Every setting can be given as a flag or through its environment variable,
//! which is how scheduled jobs usually supply them. [`Args::validate`] turns
//! the raw values into the explicit structs the engine and transport take.

use std::time::Duration;

use clap::{builder::FalseyValueParser, Parser, ValueEnum};
use estimate::{BoardTarget, EstimatorError, OwnerKind, ProjectNumber, DEFAULT_ESTIMATE_FIELD};
use github::{TransportConfig, DEFAULT_GRAPHQL_URL};
use reconcile::EngineOptions;

/// Console log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Format of the final run report printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Recomputes the "Days Estimate" field of a GitHub project from each item's
/// Size and Risk.
#[derive(Debug, Parser)]
#[command(name = "days-estimate", version, about)]
pub struct Args {
    /// GitHub token with read/write access to the project.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Owner account kind: `organization` or `user`.
    #[arg(long, env = "PROJECT_OWNER_TYPE")]
    pub owner_type: Option<String>,

    /// Login of the project owner.
    #[arg(long, env = "PROJECT_OWNER")]
    pub owner: Option<String>,

    /// Project number, as shown in the project URL.
    #[arg(long, env = "PROJECT_NUMBER")]
    pub project_number: Option<String>,

    /// Name of the numeric field to write.
    #[arg(long, env = "ESTIMATE_FIELD_NAME", default_value = DEFAULT_ESTIMATE_FIELD)]
    pub field: String,

    /// GraphQL endpoint (GitHub Enterprise Server uses `https://<host>/api/graphql`).
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub api_url: String,

    /// Evaluate every item but do not write any estimates.
    #[arg(long, env = "DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "HTTP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub target: BoardTarget,
    pub transport: TransportConfig,
    pub options: EngineOptions,
}

fn required(value: Option<String>, name: &str) -> Result<String, EstimatorError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EstimatorError::Configuration {
            message: format!("{name} is required"),
        })
}

impl Args {
    /// Checks every setting and builds the run configuration.
    ///
    /// # Errors
    ///
    /// [`EstimatorError::Configuration`] naming the first missing or malformed
    /// setting.
    pub fn validate(self) -> Result<RunnerConfig, EstimatorError> {
        let token = required(self.token, "GITHUB_TOKEN")?;
        let owner_kind: OwnerKind = required(self.owner_type, "PROJECT_OWNER_TYPE")?.parse()?;
        let owner = required(self.owner, "PROJECT_OWNER")?;
        let number = required(self.project_number, "PROJECT_NUMBER")?;
        let project_number = number
            .parse::<u64>()
            .map(ProjectNumber::new)
            .map_err(|_| EstimatorError::Configuration {
                message: format!("PROJECT_NUMBER must be an integer, got '{number}'"),
            })?;

        let target = BoardTarget::new(owner_kind, owner, project_number, self.field)?;

        if self.timeout_secs == Some(0) {
            return Err(EstimatorError::Configuration {
                message: "HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            });
        }
        let transport = TransportConfig {
            api_url: self.api_url,
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..TransportConfig::new(token)
        };

        Ok(RunnerConfig {
            target,
            transport,
            options: EngineOptions {
                dry_run: self.dry_run,
            },
        })
    }
}
