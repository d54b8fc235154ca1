mod render;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use semres_client::ResultsClient;
use semres_core::{AppConfig, LookupRequest, RequestKind, SEMESTER_CODES};
use semres_session::{Orchestrator, SessionState, SubmitOutcome};
use semres_store::{FileStorage, RecentSearchCache};

#[derive(Debug, Parser)]
#[command(name = "semres")]
#[command(about = "Look up semester results from the results service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Subject grades with SGPA and CGPA for one semester
    Lookup {
        #[arg(long)]
        regd_no: String,
        /// Semester number, 1 through 8
        #[arg(long, value_parser = PossibleValuesParser::new(SEMESTER_CODES))]
        semester: String,
    },
    /// SGPA/CGPA for every semester so far, with the performance trend
    History {
        #[arg(long)]
        regd_no: String,
        /// Semester number, 1 through 8
        #[arg(long, value_parser = PossibleValuesParser::new(SEMESTER_CODES))]
        semester: String,
    },
    /// Recently looked-up registration numbers and semesters
    Recent {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = semres_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lookup { regd_no, semester } => {
            run_lookup(&config, regd_no, semester, RequestKind::SingleSemester).await
        }
        Commands::History { regd_no, semester } => {
            run_lookup(&config, regd_no, semester, RequestKind::FullHistory).await
        }
        Commands::Recent { clear } => {
            run_recent(&config, clear);
            Ok(())
        }
    }
}

/// Runs one lookup and prints the settled state.
///
/// # Errors
///
/// Returns an error if the client cannot be built from `config`, or carrying
/// the user-facing message if the lookup was rejected or failed.
async fn run_lookup(
    config: &AppConfig,
    regd_no: String,
    semester: String,
    kind: RequestKind,
) -> anyhow::Result<()> {
    let client = ResultsClient::from_app_config(config)?;
    let recent = RecentSearchCache::load(FileStorage::new(&config.data_dir));
    let mut orchestrator = Orchestrator::new(client, recent);
    let mut state = SessionState::new();

    let outcome = orchestrator
        .submit(&mut state, LookupRequest::new(regd_no, semester), kind)
        .await;

    match outcome {
        SubmitOutcome::Succeeded => {
            print!("{}", render::render_state(&state));
            Ok(())
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed | SubmitOutcome::Superseded => {
            let message = state.error().unwrap_or("Failed to fetch results");
            anyhow::bail!("{message}")
        }
    }
}

fn run_recent(config: &AppConfig, clear: bool) {
    let mut recent = RecentSearchCache::load(FileStorage::new(&config.data_dir));
    if clear {
        recent.clear();
        println!("recent searches cleared");
        return;
    }
    print!("{}", render::render_recent(recent.all()));
}
