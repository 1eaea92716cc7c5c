//! Command implementations for stratlify.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Generation commands print a JSON envelope; `flows`
//! and `render` never contact the backend.

mod generate;
mod io;
mod render;

use crate::cli::{Cli, Command};
use io::Envelope;
use stratlify::config::Config;
use stratlify::error::Result;
use stratlify::flows::{FlowClient, FlowKind};

/// Dispatch a command to its implementation.
///
/// Configuration is loaded first; a missing config file means defaults.
/// The backend (and its API key) is only resolved for commands that
/// generate.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;

    let (kind, output) = match cli.command {
        Command::Flows => {
            cmd_flows();
            return Ok(());
        }
        Command::Render(args) => return render::cmd_render(args, &config.invoke_options()),
        Command::Mechanisms(args) => {
            let client = FlowClient::from_config(&config)?;
            (
                FlowKind::MechanismIdeas,
                generate::cmd_mechanisms(&client, args).await?,
            )
        }
        Command::AdCopy(args) => {
            let client = FlowClient::from_config(&config)?;
            (
                FlowKind::AdCopyVariations,
                generate::cmd_ad_copy(&client, args).await?,
            )
        }
        Command::Summarize(args) => {
            let client = FlowClient::from_config(&config)?;
            (
                FlowKind::AdResults,
                generate::cmd_summarize(&client, args).await?,
            )
        }
    };

    println!("{}", Envelope::new(kind.name(), output).to_pretty_json()?);
    Ok(())
}

/// Execute the `stratlify flows` command.
fn cmd_flows() {
    print!("{}", flows_listing());
}

fn flows_listing() -> String {
    let mut out = String::new();
    for kind in FlowKind::all() {
        out.push_str(&format!(
            "{:<12} {:<26} {}\n",
            kind.command(),
            kind.name(),
            kind.description()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use stratlify::error::StratlifyError;
    use stratlify::exit_codes;

    #[test]
    fn flows_listing_names_every_flow() {
        let listing = flows_listing();
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.contains("suggestMechanismIdeas"));
        assert!(listing.contains("generateAdCopyVariations"));
        assert!(listing.contains("summarizeAdResults"));
    }

    #[tokio::test]
    #[serial]
    async fn generation_without_api_key_is_user_error() {
        let cli = Cli::try_parse_from([
            "stratlify",
            "--config",
            "/nonexistent/stratlify.yaml",
            "mechanisms",
            "--product-description",
            "A serum",
        ])
        .unwrap();
        // SAFETY: serialized with other env-mutating tests.
        unsafe { std::env::remove_var("GEMINI_API_KEY") };

        let err = dispatch(cli).await.unwrap_err();

        assert!(matches!(err, StratlifyError::UserError(_)));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn invalid_config_file_is_user_error() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limits:\n  max_variations: 0").unwrap();
        let config = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["stratlify", "--config", config.as_str(), "flows"]).unwrap();

        let err = dispatch(cli).await.unwrap_err();
        assert!(err.to_string().contains("max_variations"));
    }
}
