// Portfolio data model, loading, and the analysis pipeline

pub mod relations;
pub mod stats;

pub use relations::*;
pub use stats::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::{build_graph_data, GraphData};

/// A single IP asset as exported by the chain indexer.
///
/// Field names follow the camelCase JSON export. `child_ids` and
/// `derivative_count` are derived: every linking pass rebuilds them
/// from the parent pointers, so values arriving in the input are
/// discarded rather than trusted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// On-chain asset id
    pub id: String,
    /// Id of the asset this one derives from; absent or empty for originals
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// License attached to the asset
    #[serde(default)]
    pub license_type: String,
    /// Registration timestamp, rendered as-is
    #[serde(default)]
    pub created_at: String,
    /// Licenses issued against this asset
    #[serde(default)]
    pub licenses_issued: Option<u64>,
    /// Royalties earned by this asset
    #[serde(default)]
    pub royalties_earned: Option<f64>,
    /// Direct derivatives, rebuilt by `link_derivatives`
    #[serde(default)]
    pub child_ids: Vec<String>,
    /// Number of direct derivatives
    #[serde(default)]
    pub derivative_count: usize,
}

impl Asset {
    /// Create an asset with the fields the graph algorithms care about.
    pub fn new(id: &str, name: &str, parent: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            parent_id: parent.map(|p| p.to_string()),
            name: name.to_string(),
            license_type: String::new(),
            created_at: String::new(),
            licenses_issued: None,
            royalties_earned: None,
            child_ids: Vec::new(),
            derivative_count: 0,
        }
    }

    /// The parent id, when present and non-empty.
    pub fn parent_ref(&self) -> Option<&str> {
        match &self.parent_id {
            Some(parent) if !parent.is_empty() => Some(parent.as_str()),
            _ => None,
        }
    }

    /// Whether this asset derives from another asset.
    pub fn has_parent(&self) -> bool {
        self.parent_ref().is_some()
    }
}

/// A creator's portfolio: identity labels plus the flat asset list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Wallet or identity label of the portfolio owner
    #[serde(default)]
    pub owner: String,
    /// Chain or network the assets live on
    #[serde(default)]
    pub network: String,
    /// Asset list, assumed already deduplicated by id
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Portfolio {
    pub fn new(owner: &str, network: &str) -> Self {
        Self {
            owner: owner.to_string(),
            network: network.to_string(),
            assets: Vec::new(),
        }
    }

    /// Parse a portfolio from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a portfolio from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Everything derived from one portfolio: the relinked assets, the
/// aggregate statistics, the node/edge model, and any cycle warnings.
#[derive(Debug)]
pub struct PortfolioAnalysis {
    /// The portfolio with child links rebuilt
    pub portfolio: Portfolio,
    /// Aggregate totals
    pub statistics: PortfolioStatistics,
    /// Node/edge model consumed by the renderers
    pub graph: GraphData,
    /// Derivation cycles found while linking
    pub cycles: Vec<CycleWarning>,
}

impl PortfolioAnalysis {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Run the full analysis pipeline over a portfolio.
///
/// Takes the portfolio by value: linking rewrites the child lists in
/// place, and handing ownership in keeps that mutation invisible to
/// the caller. Statistics and the graph model are computed over the
/// relinked list, and the portfolio comes back inside the result.
pub fn analyze(mut portfolio: Portfolio) -> PortfolioAnalysis {
    let report = link_derivatives(&mut portfolio.assets);
    let statistics = calculate_statistics(&portfolio.assets);
    let graph = build_graph_data(&portfolio.assets);

    PortfolioAnalysis {
        portfolio,
        statistics,
        graph,
        cycles: report.cycles,
    }
}
