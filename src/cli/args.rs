//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate derivation-graph reports for on-chain IP portfolios
#[derive(Parser, Debug)]
#[command(name = "ipfolio")]
#[command(about = "Generate derivation-graph reports for on-chain IP portfolios")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a full HTML report for a portfolio
    Report {
        /// Path to the portfolio JSON file
        path: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Graph layout direction (td, lr)
        #[arg(long)]
        direction: Option<String>,

        /// Graph rendering mode (auto, mermaid, svg, html)
        #[arg(long)]
        mode: Option<String>,

        /// SVG canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// SVG canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Show untruncated asset ids
        #[arg(long)]
        full_ids: bool,

        /// Skip the graph section
        #[arg(long)]
        no_graph: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print portfolio statistics
    Stats {
        /// Path to the portfolio JSON file
        path: PathBuf,

        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit a single graph rendering
    Graph {
        /// Path to the portfolio JSON file
        path: PathBuf,

        /// Rendering format (mermaid, svg, html, json)
        #[arg(long, default_value = "mermaid")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Graph layout direction (td, lr)
        #[arg(long)]
        direction: Option<String>,

        /// SVG canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// SVG canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Show version information
    Version,
}
