//! CLI for ipfolio

mod args;

pub use args::{Args, Command};

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{
    render_outline, select_rendering, MermaidGenerator, ReportOptions, ReportRenderer, SvgRenderer,
};
use crate::portfolio::{analyze, CycleWarning, Portfolio};

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Report {
            path,
            output,
            config,
            direction,
            mode,
            width,
            height,
            full_ids,
            no_graph,
            verbose,
        } => {
            // Load config file if it exists
            let mut cfg = if let Some(config_path) = &config {
                Config::load_or_default(config_path)
            } else {
                Config::load_or_default(Path::new("ipfolio.toml"))
            };

            // Merge CLI arguments (CLI takes precedence)
            cfg.merge_cli(direction, mode, width, height, full_ids, no_graph);
            cfg.validate()?;

            if verbose {
                println!("Portfolio: {}", path.display());
                println!("Output: {}", output.display());
                println!(
                    "Graph: {}",
                    if cfg.graph.enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
                println!("Mode: {:?}", cfg.graph.mode);
                println!("Direction: {}", cfg.graph.direction.as_str());
                println!("Canvas: {}x{}", cfg.svg.width, cfg.svg.height);
            }

            let portfolio = Portfolio::load(&path)?;
            let analysis = analyze(portfolio);

            println!(
                "Analyzed {} assets: {} roots, {} derivatives",
                analysis.statistics.total_assets,
                analysis.statistics.root_assets,
                analysis.statistics.derivatives
            );

            print_cycle_warnings(&analysis.cycles);

            let rendering = select_rendering(&analysis.graph, &cfg);
            let renderer = ReportRenderer::new(ReportOptions::from_config(&cfg))?;
            let html = renderer.render(&analysis, rendering.as_ref())?;

            write_output(&output, &html)?;
            println!("Report written to: {}", output.display());

            Ok(())
        }

        Command::Stats { path, json } => {
            let portfolio = Portfolio::load(&path)?;
            let analysis = analyze(portfolio);

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis.statistics)?);
            } else {
                let stats = &analysis.statistics;
                println!("Total assets:     {}", stats.total_assets);
                println!("Original works:   {}", stats.root_assets);
                println!("Derivatives:      {}", stats.derivatives);
                println!("Licenses issued:  {}", stats.licenses_issued);
                println!("Royalties earned: {:.2}", stats.total_royalties);
            }

            print_cycle_warnings(&analysis.cycles);

            Ok(())
        }

        Command::Graph {
            path,
            format,
            output,
            direction,
            width,
            height,
        } => {
            let mut cfg = Config::load_or_default(Path::new("ipfolio.toml"));
            cfg.merge_cli(direction, None, width, height, false, false);
            cfg.validate()?;

            let portfolio = Portfolio::load(&path)?;
            let analysis = analyze(portfolio);

            let content = match format.as_str() {
                "mermaid" => MermaidGenerator::new()
                    .with_direction(cfg.graph.direction)
                    .generate(&analysis.graph),
                "svg" => SvgRenderer::new()
                    .with_size(cfg.svg.width, cfg.svg.height)
                    .render(&analysis.graph),
                "html" => render_outline(&analysis.graph),
                "json" => serde_json::to_string_pretty(&analysis.graph)?,
                _ => {
                    return Err(Error::other(format!("Unknown format: {}", format)));
                }
            };

            match output {
                Some(out_path) => {
                    write_output(&out_path, &content)?;
                    println!("Graph written to: {}", out_path.display());
                }
                None => println!("{}", content),
            }

            Ok(())
        }

        Command::Version => {
            println!("ipfolio {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Print collected cycle warnings, truncating past the first five.
fn print_cycle_warnings(cycles: &[CycleWarning]) {
    if cycles.is_empty() {
        return;
    }

    println!("\nCycle warnings ({}):", cycles.len());
    for warning in cycles.iter().take(5) {
        println!("  {}", warning);
    }
    if cycles.len() > 5 {
        println!("  ... and {} more", cycles.len() - 5);
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
