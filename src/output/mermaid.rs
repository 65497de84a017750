// Mermaid flowchart generation for derivation graphs

use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use crate::config::Direction;
use crate::graph::{GraphData, NodeRole};

/// Generator for Mermaid flowchart markup.
///
/// Output is line-oriented and stable across calls for identical
/// input: a `graph TD`/`graph LR` header, one declaration per node,
/// one `-->` line per edge, and a trailing block of three class
/// styles (one per role).
pub struct MermaidGenerator {
    direction: Direction,
}

impl MermaidGenerator {
    pub fn new() -> Self {
        Self {
            direction: Direction::Td,
        }
    }

    /// Set the flowchart layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Render the graph as Mermaid markup.
    pub fn generate(&self, graph: &GraphData) -> String {
        let mut lines = Vec::new();
        lines.push(format!("graph {}", self.direction.as_str()));

        let mut refs = RefTable::new();
        for node in &graph.nodes {
            let node_ref = refs.claim(&node.id);
            lines.push(format!(
                "    {}[\"{}\"]:::{}",
                node_ref,
                escape_label(&node.label),
                node.role.as_str()
            ));
        }

        for edge in &graph.edges {
            let source = refs.claim(&edge.source);
            let target = refs.claim(&edge.target);
            lines.push(format!("    {} --> {}", source, target));
        }

        for role in [NodeRole::Root, NodeRole::Derivative, NodeRole::Leaf] {
            lines.push(format!(
                "    classDef {} fill:{},stroke:{},stroke-width:2px",
                role.as_str(),
                role.fill(),
                role.stroke()
            ));
        }

        lines.join("\n")
    }
}

impl Default for MermaidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier assignment for one diagram.
///
/// The short sanitized form can collide for ids sharing a prefix, so
/// the table remembers what is taken and moves later claimants onto a
/// hash-derived identifier. Claim order is the emit order, which keeps
/// the assignment deterministic.
struct RefTable {
    by_id: HashMap<String, String>,
    taken: HashSet<String>,
}

impl RefTable {
    fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            taken: HashSet::new(),
        }
    }

    fn claim(&mut self, id: &str) -> String {
        if let Some(existing) = self.by_id.get(id) {
            return existing.clone();
        }
        let mut node_ref = sanitize_ref(id);
        if !self.taken.insert(node_ref.clone()) {
            node_ref = hashed_ref(id);
            self.taken.insert(node_ref.clone());
        }
        self.by_id.insert(id.to_string(), node_ref.clone());
        node_ref
    }
}

/// Sanitized Mermaid node identifier: strip a leading `0x`, keep the
/// first eight characters with non-alphanumerics mapped to `_`, and
/// prefix `ip_`.
fn sanitize_ref(id: &str) -> String {
    let stripped = id.strip_prefix("0x").unwrap_or(id);
    let short: String = stripped
        .chars()
        .take(8)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("ip_{}", short)
}

/// Collision fallback: first twelve hex characters of the id's SHA-256.
fn hashed_ref(id: &str) -> String {
    let hex = format!("{:x}", Sha256::digest(id.as_bytes()));
    format!("ip_{}", &hex[..12])
}

/// Escape label text for a quoted Mermaid node declaration.
fn escape_label(label: &str) -> String {
    label
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
