//! Vitals CLI - Command-line interface for Vitals Score
//!
//! Commands:
//! - score: Compute the health score for one day
//! - history: Compute one score per day over a date range
//! - config: Print the default engine configuration

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals_score::pipeline::{parse_date, ScoreRequest};
use vitals_score::{
    BaselineSleepScorer, ComputeError, EngineConfig, HealthScoreEngine, PRODUCER_NAME,
    VITALS_VERSION,
};

/// Vitals - Composite daily health score from blood pressure, sleep and activity
#[derive(Parser)]
#[command(name = "vitals")]
#[command(author = "Synheart AI Inc")]
#[command(version = VITALS_VERSION)]
#[command(about = "Compute a daily health score from BP, sleep and activity data", long_about = None)]
struct Cli {
    /// Log pipeline decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use personalized sleep scoring when enough history exists
    #[arg(long)]
    personalized_sleep: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the health score for one day
    Score {
        #[command(flatten)]
        engine: EngineArgs,

        /// Day to score (YYYY-MM-DD); overrides the request's target_date
        #[arg(long)]
        date: Option<String>,
    },

    /// Compute one score per day over a date range
    History {
        #[command(flatten)]
        engine: EngineArgs,

        /// First day (YYYY-MM-DD); overrides the request's start_date
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD); overrides the request's end_date
        #[arg(long)]
        end: Option<String>,
    },

    /// Print the default engine configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), VitalsCliError> {
    match cli.command {
        Commands::Score { engine, date } => cmd_score(&engine, date.as_deref()),
        Commands::History { engine, start, end } => {
            cmd_history(&engine, start.as_deref(), end.as_deref())
        }
        Commands::Config => cmd_config(),
    }
}

fn cmd_score(args: &EngineArgs, date: Option<&str>) -> Result<(), VitalsCliError> {
    let engine = build_engine(args)?;
    let request = read_request(&args.input)?;

    let target = match date {
        Some(d) => parse_date(d)?,
        None => request.target()?,
    };

    let result = engine.calculate(
        &request.bp_readings,
        &request.sleep_entries,
        &request.activities,
        target,
    );
    write_json(&result, args.pretty)
}

fn cmd_history(
    args: &EngineArgs,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), VitalsCliError> {
    let engine = build_engine(args)?;
    let mut request = read_request(&args.input)?;

    if let Some(start) = start {
        request.start_date = Some(start.to_string());
    }
    if let Some(end) = end {
        request.end_date = Some(end.to_string());
    }
    let (start, end) = request.range()?;

    let results = engine.score_range(
        &request.bp_readings,
        &request.sleep_entries,
        &request.activities,
        start,
        end,
    )?;
    write_json(&results, args.pretty)
}

fn cmd_config() -> Result<(), VitalsCliError> {
    println!("{}", EngineConfig::default().to_json()?);
    Ok(())
}

fn build_engine(args: &EngineArgs) -> Result<HealthScoreEngine, VitalsCliError> {
    let engine = match &args.config {
        Some(path) => HealthScoreEngine::with_config(EngineConfig::from_json(&fs::read_to_string(path)?)?)?,
        None => HealthScoreEngine::new(),
    };

    if args.personalized_sleep {
        Ok(engine.with_personalized_sleep(BaselineSleepScorer::default()))
    } else {
        Ok(engine)
    }
}

fn read_request(input: &Path) -> Result<ScoreRequest, VitalsCliError> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if data.trim().is_empty() {
        return Err(VitalsCliError::EmptyInput);
    }

    let request = ScoreRequest::from_json(&data)?;
    debug!(
        producer = PRODUCER_NAME,
        bp_readings = request.bp_readings.len(),
        sleep_entries = request.sleep_entries.len(),
        activities = request.activities.len(),
        "request loaded"
    );
    Ok(request)
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), VitalsCliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum VitalsCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    EmptyInput,
}

impl From<io::Error> for VitalsCliError {
    fn from(e: io::Error) -> Self {
        VitalsCliError::Io(e)
    }
}

impl From<ComputeError> for VitalsCliError {
    fn from(e: ComputeError) -> Self {
        VitalsCliError::Compute(e)
    }
}

impl From<serde_json::Error> for VitalsCliError {
    fn from(e: serde_json::Error) -> Self {
        VitalsCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<VitalsCliError> for CliError {
    fn from(e: VitalsCliError) -> Self {
        match e {
            VitalsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            VitalsCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::JsonError(_) => (
                        "PARSE_ERROR",
                        "Ensure input has bp_readings, sleep_entries and activities arrays",
                    ),
                    ComputeError::DateParseError(_) => {
                        ("DATE_ERROR", "Dates must be formatted as YYYY-MM-DD")
                    }
                    ComputeError::InvalidConfig(_) => {
                        ("CONFIG_ERROR", "Run 'vitals config' to see a valid configuration")
                    }
                    ComputeError::InvalidRange(_) => {
                        ("RANGE_ERROR", "End must not precede start and span at most 366 days")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            VitalsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            VitalsCliError::EmptyInput => CliError {
                code: "EMPTY_INPUT".to_string(),
                message: "No request found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}
