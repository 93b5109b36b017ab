//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::data::QuestionSource;
use crate::protocol::DEFAULT_PORT;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter, e.g. "info" or "disa_quiz=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log: String,

    /// Directory for the rolling log file
    #[arg(long, env = "DISA_QUIZ_LOG_DIR", default_value = "logs", global = true)]
    pub log_dir: PathBuf,

    /// Seconds to wait for the question source before giving up
    #[arg(
        long,
        env = "DISA_QUIZ_TIMEOUT_SECS",
        default_value_t = 10,
        global = true
    )]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take a quiz in the terminal
    Play {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Host quizzes for many participants over WebSocket
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Port to listen on
        #[arg(short, long, env = "DISA_QUIZ_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// JSON file to load the questions from
    #[arg(short, long, env = "DISA_QUIZ_QUESTIONS")]
    pub questions: Option<PathBuf>,

    /// URL of a JSON question file
    #[arg(short, long, env = "DISA_QUIZ_URL")]
    pub url: Option<String>,
}

impl SourceArgs {
    /// The single source selected on the command line.
    pub fn into_source(self) -> Result<QuestionSource, clap::Error> {
        match (self.questions, self.url) {
            (Some(path), None) => Ok(QuestionSource::File(path)),
            (None, Some(url)) => Ok(QuestionSource::Url(url)),
            _ => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "exactly one of --questions or --url is required",
            )),
        }
    }
}

/// What the binary has been asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Play,
    Serve { port: u16 },
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub source: QuestionSource,
    pub fetch_timeout: Duration,
    pub log_filter: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, clap::Error> {
        let (mode, source) = match cli.command {
            Command::Play { source } => (Mode::Play, source),
            Command::Serve { source, port } => (Mode::Serve { port }, source),
        };

        Ok(Self {
            mode,
            source: source.into_source()?,
            fetch_timeout: Duration::from_secs(cli.timeout_secs),
            log_filter: cli.log,
            log_dir: cli.log_dir,
        })
    }

    /// Parse the process arguments, exiting with clap's usage message on error.
    pub fn parse() -> Self {
        Self::from_cli(Cli::parse()).unwrap_or_else(|e| e.exit())
    }
}
