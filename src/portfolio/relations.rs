// Parent/child relationship assembly for portfolio assets

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::portfolio::Asset;

/// A derivation cycle discovered while walking the asset graph.
///
/// `asset_id` names the asset at which the walk re-entered its own
/// ancestry. Cycles are reported as warnings rather than errors: the
/// rest of the portfolio still links and renders normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWarning {
    pub asset_id: String,
}

impl fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "derivation cycle detected at asset {}", self.asset_id)
    }
}

/// Outcome of a linking pass over a portfolio.
#[derive(Debug, Default)]
pub struct RelationReport {
    pub cycles: Vec<CycleWarning>,
}

impl RelationReport {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Rebuild the child lists of every asset from the parent pointers.
///
/// Each asset declares at most one parent; this pass inverts those
/// pointers into `child_ids` and `derivative_count`, preserving input
/// order among siblings. Any previously stored child lists are
/// discarded first, so the pass is safe to run repeatedly. Parent ids
/// that match no asset in the slice are left as dangling references.
pub fn link_derivatives(assets: &mut [Asset]) -> RelationReport {
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for asset in assets.iter() {
        if let Some(parent) = asset.parent_ref() {
            children
                .entry(parent.to_string())
                .or_default()
                .push(asset.id.clone());
        }
    }

    for asset in assets.iter_mut() {
        asset.child_ids = children.remove(&asset.id).unwrap_or_default();
        asset.derivative_count = asset.child_ids.len();
    }

    RelationReport {
        cycles: detect_cycles(assets),
    }
}

/// Walk every derivation tree and report where a path closes on itself.
///
/// The walk starts from the roots, then sweeps any asset the root pass
/// never reached. Detached cycles (including self-references) have no
/// root above them, so the sweep is what finds those.
pub fn detect_cycles(assets: &[Asset]) -> Vec<CycleWarning> {
    let by_id: HashMap<&str, &Asset> = assets.iter().map(|a| (a.id.as_str(), a)).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles = Vec::new();

    for asset in assets.iter().filter(|a| !a.has_parent()) {
        let mut path = HashSet::new();
        walk(asset.id.as_str(), &by_id, &mut path, &mut visited, &mut cycles);
    }

    for asset in assets.iter() {
        if !visited.contains(asset.id.as_str()) {
            let mut path = HashSet::new();
            walk(asset.id.as_str(), &by_id, &mut path, &mut visited, &mut cycles);
        }
    }

    cycles
}

fn walk<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a Asset>,
    path: &mut HashSet<&'a str>,
    visited: &mut HashSet<&'a str>,
    cycles: &mut Vec<CycleWarning>,
) {
    if path.contains(id) {
        cycles.push(CycleWarning {
            asset_id: id.to_string(),
        });
        return;
    }
    if !visited.insert(id) {
        return;
    }
    let asset = match by_id.get(id) {
        Some(asset) => *asset,
        None => return,
    };

    path.insert(id);
    for child in &asset.child_ids {
        walk(child.as_str(), by_id, path, visited, cycles);
    }
    path.remove(id);
}
