// Node/edge model for the derivation graph
//
// Built fresh from a linked asset list; consumed by the Mermaid, SVG,
// and outline renderers as well as the JSON graph export.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::portfolio::Asset;

/// Role of a node within the derivation forest.
///
/// Roles are computed from the parent pointers alone: no parent makes
/// a root (isolated assets included), a parented asset that others
/// derive from is a derivative, and a parented asset nobody derives
/// from is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Root,
    Derivative,
    Leaf,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Root => "root",
            NodeRole::Derivative => "derivative",
            NodeRole::Leaf => "leaf",
        }
    }

    /// Fill color, shared by the Mermaid class styles and the SVG nodes.
    pub fn fill(&self) -> &'static str {
        match self {
            NodeRole::Root => "#e8f5e9",
            NodeRole::Derivative => "#e3f2fd",
            NodeRole::Leaf => "#fff3e0",
        }
    }

    /// Stroke color paired with `fill`.
    pub fn stroke(&self) -> &'static str {
        match self {
            NodeRole::Root => "#2e7d32",
            NodeRole::Derivative => "#1565c0",
            NodeRole::Leaf => "#ef6c00",
        }
    }
}

/// A single node of the rendered graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Full asset id
    pub id: String,
    /// Shortened display label
    pub label: String,
    /// Position in the derivation forest
    pub role: NodeRole,
    /// Style class name, mirrors the role
    pub style_class: String,
    /// Asset name, for tooltips
    pub name: String,
    /// License, for tooltips and the outline rendering
    pub license_type: String,
    /// Registration timestamp, for tooltips
    pub created_at: String,
}

/// A directed parent → child edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// The full node/edge model handed to the renderers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the node/edge model for an asset list.
///
/// Node order mirrors input order. One edge is produced per parented
/// asset, in input order, always directed parent → child; a parent id
/// that matches no asset still yields its edge, and the renderers
/// decide what to do with the dangling end.
pub fn build_graph_data(assets: &[Asset]) -> GraphData {
    let parent_ids: HashSet<&str> = assets.iter().filter_map(|a| a.parent_ref()).collect();

    let nodes = assets
        .iter()
        .map(|asset| {
            let role = classify(asset, &parent_ids);
            GraphNode {
                id: asset.id.clone(),
                label: short_label(&asset.id),
                role,
                style_class: role.as_str().to_string(),
                name: asset.name.clone(),
                license_type: asset.license_type.clone(),
                created_at: asset.created_at.clone(),
            }
        })
        .collect();

    let edges = assets
        .iter()
        .filter_map(|asset| {
            asset.parent_ref().map(|parent| GraphEdge {
                source: parent.to_string(),
                target: asset.id.clone(),
            })
        })
        .collect();

    GraphData { nodes, edges }
}

fn classify(asset: &Asset, parent_ids: &HashSet<&str>) -> NodeRole {
    let has_derivatives = parent_ids.contains(asset.id.as_str());
    if !asset.has_parent() {
        NodeRole::Root
    } else if has_derivatives {
        NodeRole::Derivative
    } else {
        NodeRole::Leaf
    }
}

/// Graph label for an id: 12 characters or fewer pass through, longer
/// ids shrink to first six + "..." + last four.
pub fn short_label(id: &str) -> String {
    truncate_middle(id, 12)
}

/// Middle-truncate `s` when it exceeds `max_chars`, keeping the first
/// six and last four characters. Counts characters, not bytes.
pub fn truncate_middle(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_chars {
        return s.to_string();
    }
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::link_derivatives;

    fn asset(id: &str, parent: Option<&str>) -> Asset {
        Asset::new(id, &format!("Asset {}", id), parent)
    }

    #[test]
    fn test_root_and_child_fixture() {
        let assets = vec![asset("root", None), asset("child", Some("root"))];
        let graph = build_graph_data(&assets);

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "root");
        assert_eq!(graph.edges[0].target, "child");
        assert_eq!(graph.nodes[0].role, NodeRole::Root);
        assert_eq!(graph.nodes[1].role, NodeRole::Leaf);
    }

    #[test]
    fn test_three_level_chain() {
        let assets = vec![
            asset("a", None),
            asset("b", Some("a")),
            asset("c", Some("b")),
        ];
        let graph = build_graph_data(&assets);

        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.nodes[0].role, NodeRole::Root);
        assert_eq!(graph.nodes[1].role, NodeRole::Derivative);
        assert_eq!(graph.nodes[2].role, NodeRole::Leaf);
    }

    #[test]
    fn test_ten_direct_children() {
        let mut assets = vec![asset("hub", None)];
        for i in 0..10 {
            assets.push(asset(&format!("d{}", i), Some("hub")));
        }
        let graph = build_graph_data(&assets);

        assert_eq!(graph.edges.len(), 10);
        assert!(graph.edges.iter().all(|e| e.source == "hub"));
    }

    #[test]
    fn test_isolated_asset_is_root() {
        let graph = build_graph_data(&[asset("alone", None)]);
        assert_eq!(graph.nodes[0].role, NodeRole::Root);
    }

    #[test]
    fn test_roles_agree_with_linked_children() {
        let mut assets = vec![
            asset("r", None),
            asset("mid", Some("r")),
            asset("end", Some("mid")),
            asset("solo", None),
        ];
        link_derivatives(&mut assets);
        let graph = build_graph_data(&assets);

        for node in &graph.nodes {
            let linked = assets.iter().find(|a| a.id == node.id).unwrap();
            match node.role {
                NodeRole::Root => assert!(!linked.has_parent()),
                NodeRole::Leaf => assert!(linked.child_ids.is_empty()),
                NodeRole::Derivative => {
                    assert!(linked.has_parent());
                    assert!(!linked.child_ids.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_node_order_mirrors_input() {
        let assets = vec![asset("z", None), asset("a", None), asset("m", Some("z"))];
        let graph = build_graph_data(&assets);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_dangling_parent_still_yields_edge() {
        let graph = build_graph_data(&[asset("orphan", Some("missing"))]);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "missing");
        assert_eq!(graph.nodes[0].role, NodeRole::Leaf);
    }

    #[test]
    fn test_label_of_12_chars_unchanged() {
        assert_eq!(short_label("123456789012"), "123456789012");
    }

    #[test]
    fn test_label_of_13_chars_truncated() {
        assert_eq!(short_label("abcdefghijklm"), "abcdef...jklm");
    }

    #[test]
    fn test_label_counts_chars_not_bytes() {
        // 13 two-byte characters
        assert_eq!(short_label("αβγδεζηθικλμν"), "αβγδεζ...κλμν");
    }

    #[test]
    fn test_display_truncation_threshold() {
        assert_eq!(truncate_middle("12345678901234", 14), "12345678901234");
        assert_eq!(truncate_middle("123456789012345", 14), "123456...2345");
    }

    #[test]
    fn test_graph_data_serializes_camel_case() {
        let graph = build_graph_data(&[asset("0xlongidentifier", None)]);
        let json = serde_json::to_string(&graph).unwrap();

        assert!(json.contains("\"styleClass\":\"root\""));
        assert!(json.contains("\"licenseType\""));
        assert!(json.contains("\"role\":\"root\""));
    }

    #[test]
    fn test_empty_graph() {
        let graph = build_graph_data(&[]);
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }
}
