//! Lodge treasury report job.
//!
//! Reads a JSON snapshot exported from the hosted `lancamentos` table and
//! prints the financial statement, or checks a draft entry before it is
//! submitted.
//!
//! Usage:
//!   lodge-report statement --month 5 --year 2026
//!   lodge-report validate draft.json

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lodge_core::ledger::{
    Classifier, LedgerDraft, LedgerEntry, PeriodSelector, Snapshot, validate_draft,
};
use lodge_core::reports::{ReportService, TextRenderer};
use lodge_shared::config::LoggingConfig;
use lodge_shared::types::MoneyFormat;
use lodge_shared::{AppConfig, AppError, AppResult};

#[derive(Debug, Parser)]
#[command(name = "lodge-report", version, about = "Lodge treasury statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the financial statement for a period.
    Statement(StatementArgs),
    /// Check a draft entry (JSON object) against the ledger form rules.
    Validate {
        /// Path of the draft JSON file.
        draft: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
struct StatementArgs {
    /// Ledger snapshot; defaults to `report.input_path` from configuration.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Month 1-12, 0 for every month.
    #[arg(short, long, default_value_t = 0)]
    month: u32,
    /// Year, 0 for every year.
    #[arg(short, long, default_value_t = 0)]
    year: u32,
    /// Reference day for overdue detection (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load().map_err(AppError::from);
    let logging = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(&cli, &config))
        .and_then(|output| {
            std::io::stdout()
                .lock()
                .write_all(output.as_bytes())
                .map_err(AppError::from)
                .context("writing report")
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "lodge-report failed");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries only the report.
    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    match &cli.command {
        Command::Statement(args) => statement(args, config),
        Command::Validate { draft } => validate(draft),
    }
}

fn statement(args: &StatementArgs, config: &AppConfig) -> anyhow::Result<String> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.input_path));
    debug!(
        input = %input.display(),
        month = args.month,
        year = args.year,
        lodge = %config.report.lodge_name,
        "Statement settings"
    );

    let snapshot =
        load_snapshot(&input).with_context(|| format!("loading {}", input.display()))?;
    info!(
        count = snapshot.entries.len(),
        rejected = snapshot.rejected.len(),
        "Loaded ledger snapshot"
    );
    for row in &snapshot.rejected {
        warn!(position = row.position, reason = %row.reason, "Skipped unreadable row");
    }
    warn_on_fallbacks(&snapshot.entries);

    // One reference day for the whole run.
    let classifier = args.as_of.map_or_else(Classifier::today, Classifier::as_of);
    let mut statement = ReportService::build_statement(
        &config.report.lodge_name,
        &snapshot.entries,
        PeriodSelector::new(args.month, args.year),
        &classifier,
    )
    .map_err(|err| AppError::Validation(err.to_string()))?;
    statement.data_quality.rejected_rows = snapshot.rejected.len();
    if statement.data_quality.overflowed_amounts > 0 {
        warn!(
            count = statement.data_quality.overflowed_amounts,
            "Amounts too large to sum counted as zero"
        );
    }

    info!(
        period = %statement.period_label,
        as_of = %statement.as_of,
        balance = %statement.totals.balance,
        sections = statement.sections.len(),
        overdue = statement.overdue.len(),
        "Statement built"
    );

    match args.format {
        OutputFormat::Text => {
            let renderer = TextRenderer::new(MoneyFormat::new(&config.report.currency_symbol));
            Ok(renderer.render(&statement))
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&statement).map_err(AppError::from)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn validate(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(AppError::from)
        .with_context(|| format!("reading {}", path.display()))?;
    let draft: LedgerDraft = serde_json::from_str(&raw)
        .map_err(AppError::from)
        .with_context(|| format!("parsing {}", path.display()))?;

    match validate_draft(&draft) {
        Ok(()) => {
            info!(draft = %path.display(), "Draft accepted");
            Ok("ok\n".to_string())
        }
        Err(err) => {
            warn!(code = err.error_code(), field = err.field(), "Draft rejected");
            Err(AppError::Validation(err.to_string()).into())
        }
    }
}

fn load_snapshot(path: &Path) -> AppResult<Snapshot> {
    let raw = std::fs::read_to_string(path)?;
    Ok(Snapshot::from_json(&raw)?)
}

fn warn_on_fallbacks(entries: &[LedgerEntry]) {
    for (position, entry) in entries.iter().enumerate() {
        if entry.amount.is_malformed() {
            warn!(position, id = ?entry.id, amount = ?entry.amount, "Unreadable amount counted as zero");
        }
        if entry.due_date.is_malformed() {
            warn!(position, id = ?entry.id, due_date = ?entry.due_date.raw(), "Unreadable due date");
        }
        if entry.settlement_date.is_malformed() {
            warn!(
                position,
                id = ?entry.id,
                settlement_date = ?entry.settlement_date.raw(),
                "Unreadable settlement date"
            );
        }
    }
}
