//! Stratlify: AI-assisted copywriting flows.
//!
//! This is the main entry point for the `stratlify` CLI. It parses arguments,
//! installs logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.
//!
//! # Environment variables
//!
//! | Variable         | Default | Description                                   |
//! |------------------|---------|-----------------------------------------------|
//! | `GEMINI_API_KEY` | --      | Backend API key (name set by `api_key_env`)   |
//! | `STRATLIFY_LOG`  | `warn`  | Log filter, e.g. `stratlify=debug`            |

mod cli;
mod commands;

use cli::Cli;
use std::process::ExitCode;
use stratlify::exit_codes;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STRATLIFY_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stratlify=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
