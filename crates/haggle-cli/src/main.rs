//! # Haggle
//!
//! Terminal client that asks a negotiation backend for deals.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use haggle_core::{NegotiationStrength, StrengthSelector};
use haggle_present::ResultsView;
use haggle_sdk::{ClientConfig, HttpTransport, RequestController, RequestState, ENDPOINT_ENV};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;
mod shell;

use render::Renderer;

const BLANK_QUERY_HINT: &str =
    "Tell haggle what you want, e.g. haggle ask \"iPhone under $900 NYC pickup\"";

/// Let AI negotiate deals for you.
#[derive(Parser, Debug)]
#[command(name = "haggle", version, long_about = None)]
struct Cli {
    /// Negotiate endpoint URL
    #[arg(long, env = ENDPOINT_ENV, global = true)]
    endpoint: Option<String>,

    /// Give up on the backend after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// How hard to negotiate: quick, standard or max-savings
    #[arg(short, long, global = true, default_value_t = NegotiationStrength::Standard)]
    strength: NegotiationStrength,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log requests and state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Negotiate once and print the result
    Ask {
        /// What you want, e.g. "iPhone under $900 NYC pickup"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the raw backend result as JSON
        #[arg(long)]
        json: bool,

        /// Start with the negotiation transcript collapsed
        #[arg(long)]
        collapse_log: bool,
    },
    /// Interactive session
    Shell,
    /// List the agents the backend negotiates with
    Agents,
    /// List store agents
    Stores,
    /// List service agents
    Services,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// The words of an `ask` query joined into one, or `None` when they are all blank.
fn ask_query(words: &[String]) -> Option<String> {
    let query = words.join(" ");
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn build_transport(cli: &Cli) -> anyhow::Result<HttpTransport> {
    let mut config = ClientConfig::from_override(cli.endpoint.as_deref())?;
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    info!(endpoint = %config.endpoint(), "Using negotiation backend");
    HttpTransport::new(config).context("Failed to build HTTP client")
}

async fn ask(
    controller: &RequestController<HttpTransport>,
    renderer: Renderer,
    query: &str,
    strength: NegotiationStrength,
    json: bool,
    collapse_log: bool,
) -> anyhow::Result<ExitCode> {
    eprintln!("Negotiating with stores and services…");

    let state = tokio::select! {
        state = controller.submit(query, strength) => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };
    let Some(state) = state else {
        eprintln!("Cancelled.");
        return Ok(ExitCode::from(130));
    };
    let state = state?;

    match state {
        RequestState::Success(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        RequestState::Success(result) => {
            let mut view = ResultsView::from_result(&result);
            if collapse_log {
                view.toggle_transcript();
            }
            println!("{}", renderer.results(&view));

            if let Some(elapsed) = controller.last_submission().await.and_then(|s| s.elapsed()) {
                info!(elapsed_ms = elapsed.num_milliseconds(), "Negotiation finished");
            }
            Ok(ExitCode::SUCCESS)
        }
        RequestState::Error(message) => {
            println!("{}", renderer.failure(&message));
            Ok(ExitCode::FAILURE)
        }
        RequestState::Idle | RequestState::Loading => Ok(ExitCode::FAILURE),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let renderer = Renderer::new(!cli.no_color && std::io::stdout().is_terminal());
    let transport = build_transport(&cli)?;

    match &cli.command {
        Command::Ask {
            query,
            json,
            collapse_log,
        } => {
            let Some(query) = ask_query(query) else {
                eprintln!("{}", BLANK_QUERY_HINT);
                return Ok(ExitCode::FAILURE);
            };
            let controller = RequestController::new(transport);
            let code = ask(&controller, renderer, &query, cli.strength, *json, *collapse_log).await?;
            controller.close().await;
            Ok(code)
        }
        Command::Shell => {
            let mut selector = StrengthSelector::new();
            selector.select(cli.strength);
            shell::run(RequestController::new(transport), renderer, selector).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Agents => {
            let directory = transport.list_agents().await?;
            println!("{}", renderer.agents(&directory));
            Ok(ExitCode::SUCCESS)
        }
        Command::Stores => {
            let stores = transport.list_stores().await?;
            println!("{}", renderer.stores(&stores));
            Ok(ExitCode::SUCCESS)
        }
        Command::Services => {
            let services = transport.list_services().await?;
            println!("{}", renderer.services(&services));
            Ok(ExitCode::SUCCESS)
        }
    }
}
