//! CLI argument parsing for stratlify.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stratlify: AI-assisted copywriting flows.
///
/// Each command runs one generation flow against the configured backend
/// and prints a JSON envelope on stdout:
/// - mechanisms: unique mechanism ideas for a product
/// - ad-copy: headline/body/call-to-action variations
/// - summarize: a summary of ad performance data with suggestions
#[derive(Parser, Debug)]
#[command(name = "stratlify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (missing file means defaults).
    #[arg(long, global = true, default_value = stratlify::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log flow activity to stderr at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stratlify.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available flows.
    Flows,

    /// Suggest unique mechanism ideas for a product.
    Mechanisms(MechanismsArgs),

    /// Generate ad copy variations for an ad concept.
    AdCopy(AdCopyArgs),

    /// Summarize ad performance data and suggest improvements.
    Summarize(SummarizeArgs),

    /// Validate input and print a flow's rendered prompt.
    ///
    /// Does not contact the backend and needs no API key.
    Render(RenderArgs),
}

/// Arguments for the `mechanisms` command.
#[derive(Parser, Debug)]
pub struct MechanismsArgs {
    /// What the product is and what it does.
    #[arg(long, required_unless_present = "input")]
    pub product_description: Option<String>,

    /// JSON file holding the whole input record.
    #[arg(long, conflicts_with = "product_description")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `ad-copy` command.
#[derive(Parser, Debug)]
pub struct AdCopyArgs {
    /// The core idea of the ad.
    #[arg(long, required_unless_present = "input")]
    pub ad_concept: Option<String>,

    /// What is being advertised.
    #[arg(long, required_unless_present = "input")]
    pub product_description: Option<String>,

    /// Emotion the ad should evoke.
    #[arg(long, required_unless_present = "input")]
    pub desired_emotion: Option<String>,

    /// Who the ad is for.
    #[arg(long, required_unless_present = "input")]
    pub target_audience: Option<String>,

    /// Number of variations to request (default 3).
    #[arg(short = 'n', long)]
    pub variations: Option<u32>,

    /// JSON file holding the whole input record.
    #[arg(
        long,
        conflicts_with_all = ["ad_concept", "product_description", "desired_emotion", "target_audience", "variations"]
    )]
    pub input: Option<PathBuf>,
}

/// Arguments for the `summarize` command.
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Ad performance data as text.
    #[arg(long, required_unless_present_any = ["data_file", "input"])]
    pub data: Option<String>,

    /// File holding ad performance data (CSV, notes, exports).
    #[arg(long, conflicts_with = "data")]
    pub data_file: Option<PathBuf>,

    /// JSON file holding the whole input record.
    #[arg(long, conflicts_with_all = ["data", "data_file"])]
    pub input: Option<PathBuf>,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Flow to render, by name or command (e.g. ad-copy).
    pub flow: String,

    /// JSON file holding the input record.
    #[arg(long)]
    pub input: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
