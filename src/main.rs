use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use disa_quiz::config::{Config, Mode};
use disa_quiz::server::{ServerState, serve};
use disa_quiz::ui::TerminalPresenter;
use disa_quiz::{Leaderboard, QuestionBank, QuestionRepository, QuizError, run_quiz};
use tokio::net::TcpListener;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOAD_ATTEMPTS: u32 = 3;
const LOAD_RETRY_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    let _guard = init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// The terminal UI owns stdout, so `play` logs to the file only.
fn init_tracing(config: &Config) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "disa-quiz.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.log_filter);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
    let stdout_layer = matches!(config.mode, Mode::Serve { .. })
        .then(|| fmt::layer().with_writer(std::io::stdout).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

async fn run(config: Config) -> Result<(), QuizError> {
    let repo = QuestionRepository::new(config.fetch_timeout);
    let bank = load_bank(&repo, &config).await?;
    if bank.is_empty() {
        return Err(QuizError::SourceUnavailable(format!(
            "{} contains no valid questions",
            config.source
        )));
    }

    let leaderboard = Arc::new(Leaderboard::new());

    match config.mode {
        Mode::Play => {
            tokio::task::spawn_blocking(move || {
                let mut presenter = TerminalPresenter::new(bank.len())?;
                run_quiz(&mut presenter, &bank, &leaderboard)
            })
            .await
            .map_err(|e| QuizError::Io(std::io::Error::other(e)))?
        }
        Mode::Serve { port } => {
            let listener = TcpListener::bind(("0.0.0.0", port)).await?;
            let state = Arc::new(ServerState::new(bank, leaderboard));
            serve(listener, state).await?;
            Ok(())
        }
    }
}

/// Load the bank, retrying a few times before giving up.
async fn load_bank(
    repo: &QuestionRepository,
    config: &Config,
) -> Result<Arc<QuestionBank>, QuizError> {
    let mut attempt = 1;
    loop {
        match repo.load(&config.source).await {
            Ok(bank) => return Ok(bank),
            Err(e) if attempt < LOAD_ATTEMPTS => {
                tracing::warn!(
                    attempt,
                    error = %e,
                    "question source not ready, retrying in {:?}",
                    LOAD_RETRY_DELAY
                );
                attempt += 1;
                tokio::time::sleep(LOAD_RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}
