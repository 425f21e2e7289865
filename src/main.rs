//! Proficiency Chart - renders the "Programming proficiency" bar chart
//!
//! With no arguments it reads the site's skills CSV and writes a PNG next to
//! the working directory.

use anyhow::Context;
use clap::Parser;
use proficiency_chart::config::{ChartConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "proficiency-chart")]
#[command(about = "Render a programming proficiency bar chart from a skills CSV")]
#[command(version)]
struct Cli {
    /// Skills CSV with Skill, Name and Proficiency columns
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON chart configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open the chart in the default viewer after writing it
    #[arg(long)]
    show: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    debug!(?config, "chart configuration");

    let summary = proficiency_chart::generate_chart(&config, &cli.input, &cli.output)
        .with_context(|| format!("rendering chart from {}", cli.input.display()))?;

    if cli.show {
        open::that(&summary.output)
            .with_context(|| format!("opening {}", summary.output.display()))?;
    }

    Ok(())
}
