// rollcall CLI - reconcile calendar invites against live meeting presence

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use rollcall_recon::ReconError;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Session attendance reconciliation (invites vs. who actually joined)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile sessions and print the attendance report
    #[command(after_help = "\
Examples:
  rollcall report sessions.json --config ops.recon.toml
  rollcall report sessions.json --config ops.recon.toml --json
  rollcall report sessions.json --config ops.recon.toml --session evt-123
  curl -s $DASHBOARD/sessions | rollcall report - --config ops.recon.toml --output result.json")]
    Report {
        /// Sessions JSON (array or single object); `-` reads stdin
        sessions: PathBuf,

        /// Path to the .recon.toml config file
        #[arg(long, short = 'c', env = "ROLLCALL_CONFIG")]
        config: PathBuf,

        /// Output JSON to stdout instead of the human report
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only reconcile the session with this id
        #[arg(long)]
        session: Option<String>,
    },

    /// Print the plain-text summary for one session
    #[command(after_help = "\
Examples:
  rollcall summary sessions.json --config ops.recon.toml --session evt-123 | pbcopy")]
    Summary {
        /// Sessions JSON (array or single object); `-` reads stdin
        sessions: PathBuf,

        /// Path to the .recon.toml config file
        #[arg(long, short = 'c', env = "ROLLCALL_CONFIG")]
        config: PathBuf,

        /// Session id
        #[arg(long)]
        session: String,
    },

    /// Group sessions into half-hour start slots
    #[command(after_help = "\
Examples:
  rollcall slots sessions.json
  rollcall slots sessions.json --hour 09:00 --hour 10:00")]
    Slots {
        /// Sessions JSON (array or single object); `-` reads stdin
        sessions: PathBuf,

        /// Keep only sessions starting in these hours (HH:00, repeatable)
        #[arg(long = "hour")]
        hours: Vec<String>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a recon config (and its roster files) without running
    #[command(after_help = "\
Examples:
  rollcall validate ops.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT_HASH"),
        ")",
        "\nengine:  rollcall-recon ",
        env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };
    // Also routes the engine's `log` records through the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Report { sessions, config, json, output, session } => {
            recon::cmd_report(sessions, config, json, output, session)
        }
        Commands::Summary { sessions, config, session } => {
            recon::cmd_summary(sessions, config, session)
        }
        Commands::Slots { sessions, hours, json } => recon::cmd_slots(sessions, hours, json),
        Commands::Validate { config } => recon::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Unexpected failure with no more specific code.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::MissingColumn { column, .. } => {
                Some(format!("the header row must include a '{column}' column"))
            }
            ReconError::ConfigValidation(_) => Some("run `rollcall validate <config>` for details".to_string()),
            _ => None,
        };
        Self { code: recon_exit_code(&err), message: err.to_string(), hint }
    }
}
