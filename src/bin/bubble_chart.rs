//! bubble-chart: render YAML chart documents to SVG.
//!
//! Run: `bubble-chart render chart.yaml -o chart.svg`

use anyhow::{Context, Result};
use bubble_chart::chart::{self, BubbleChart};
use bubble_chart::config::ChartDocument;
use bubble_chart::registry::Registry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, EnvFilter};

/// bubble-chart: packed bubble charts as SVG
#[derive(Parser, Debug)]
#[command(name = "bubble-chart")]
#[command(version)]
#[command(about = "Render packed bubble charts to SVG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart document
    Render {
        /// Chart document (YAML)
        chart: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the SVG in a standalone HTML page
        #[arg(long)]
        html: bool,
    },
    /// Print the bubble chart descriptor as YAML
    Describe,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { chart: path, output, html } => {
            let mut registry = Registry::new();
            chart::register(&mut registry)?;

            let document = ChartDocument::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let mount = document.render(&registry).context("failed to render chart")?;

            let rendered = if html {
                let title = path.file_stem().map_or_else(
                    || document.visualization.clone(),
                    |stem| stem.to_string_lossy().into_owned(),
                );
                mount.to_html_page(&title)
            } else {
                mount.to_svg()
            };

            match output {
                Some(out) => {
                    std::fs::write(&out, rendered)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    tracing::info!(path = %out.display(), "wrote chart");
                }
                None => print!("{rendered}"),
            }
        }
        Command::Describe => {
            print!("{}", BubbleChart::meta().to_yaml()?);
        }
    }

    Ok(())
}
