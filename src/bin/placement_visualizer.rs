//! placement_visualizer - plot cell and I/O pad placements.
//!
//! Prints the number of placed coordinates (and how many fall inside the validity
//! region), then shows the placement as a scatter plot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use placement_viz::config::PlotConfig;
use placement_viz::logging::configure_tracing;
use placement_viz::output::TerminalMode;
use placement_viz::placement::Classifier;
use placement_viz::plotter::{Plotter, Target};
use tracing::debug;

const USAGE: &str = "Usage: placement_visualizer [kiaPad file]";

/// Plot cell and I/O pad placements from a `<id> <x> <y>` coordinate file.
#[derive(Parser, Debug)]
#[command(name = "placement_visualizer")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Placement file, one `<id> <x> <y>` record per line
    #[arg(value_name = "kiaPad file")]
    files: Vec<PathBuf>,

    /// Draw every record as one series instead of splitting out I/O pads
    #[arg(long)]
    single: bool,

    /// Write the figure to a .png or .svg file instead of opening the viewer
    #[arg(short, long, value_name = "PATH", conflicts_with = "terminal")]
    output: Option<PathBuf>,

    /// Print a text preview instead of opening the viewer [possible values: ascii, half-block, truecolor]
    #[arg(long, value_name = "MODE", value_parser = parse_terminal_mode)]
    terminal: Option<TerminalMode>,

    /// YAML file with figure size, validity region and series styles
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Figure width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Figure height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    trace_file: Option<PathBuf>,
}

fn parse_terminal_mode(s: &str) -> std::result::Result<TerminalMode, String> {
    s.parse().map_err(|e: placement_viz::Error| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_tracing(cli.trace_file.clone(), &cli.verbosity)?;

    let [path] = cli.files.as_slice() else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(config_path) => PlotConfig::load(config_path)
            .with_context(|| format!("loading config '{}'", config_path.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    config.validate()?;

    let classifier = if cli.single { Classifier::Single } else { Classifier::PadPrefix };
    let target = match (cli.output, cli.terminal) {
        (Some(output), _) => Target::File(output),
        (None, Some(mode)) => Target::Terminal(mode),
        (None, None) => Target::Viewer,
    };
    debug!(?classifier, ?target, "plotting {}", path.display());

    Plotter::new(classifier).config(config).target(target).plot(path)?;
    Ok(())
}
