//! Ipfolio - Generate derivation-graph reports for on-chain IP portfolios
//!
//! Loads a portfolio of IP asset records, rebuilds the derivation
//! forest from the parent references, computes aggregate statistics,
//! and renders a self-contained HTML report with a Mermaid, SVG, or
//! nested-list view of the graph.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod portfolio;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{build_graph_data, GraphData, NodeRole};
pub use portfolio::{analyze, Portfolio, PortfolioAnalysis};
