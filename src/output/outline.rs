// Nested-list rendering of the derivation forest
//
// Last-resort representation: plain semantic markup, no script, no
// graphics. Works in anything that can show a list.

use std::collections::{HashMap, HashSet};

use crate::graph::{GraphData, GraphNode};
use crate::output::escape_html;

/// Render the graph as nested `<ul>`/`<li>` markup.
///
/// The forest structure comes from the edges alone: a node with no
/// incoming edge is a root, and each root's subtree is emitted
/// depth-first. Every node inside a cycle has an incoming edge, so
/// the walk never enters a cycle and termination needs no extra
/// bookkeeping; such nodes simply stay unrendered. All text is
/// escaped here, at interpolation, and the block embeds verbatim.
pub fn render_outline(graph: &GraphData) -> String {
    if graph.nodes.is_empty() {
        return "<p class=\"no-data\">No asset data to display</p>".to_string();
    }

    let nodes_by_id: HashMap<&str, &GraphNode> =
        graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut has_incoming: HashSet<&str> = HashSet::new();
    for edge in &graph.edges {
        children
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        has_incoming.insert(edge.target.as_str());
    }

    let mut out = String::from("<ul class=\"asset-outline\">\n");
    for node in &graph.nodes {
        if !has_incoming.contains(node.id.as_str()) {
            render_item(node, &nodes_by_id, &children, 1, &mut out);
        }
    }
    out.push_str("</ul>");
    out
}

fn render_item(
    node: &GraphNode,
    nodes_by_id: &HashMap<&str, &GraphNode>,
    children: &HashMap<&str, Vec<&str>>,
    depth: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{}<li><span class=\"outline-label\">{}</span> <span class=\"outline-license\">{}</span>",
        indent,
        escape_html(&node.label),
        escape_html(&node.license_type)
    ));

    if let Some(child_ids) = children.get(node.id.as_str()) {
        out.push('\n');
        out.push_str(&format!("{}<ul>\n", indent));
        for child_id in child_ids {
            if let Some(child) = nodes_by_id.get(child_id) {
                render_item(child, nodes_by_id, children, depth + 1, out);
            }
        }
        out.push_str(&format!("{}</ul>\n", indent));
        out.push_str(&format!("{}</li>\n", indent));
    } else {
        out.push_str("</li>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph_data;
    use crate::portfolio::Asset;

    fn asset(id: &str, parent: Option<&str>) -> Asset {
        let mut a = Asset::new(id, &format!("Asset {}", id), parent);
        a.license_type = "CC-BY-4.0".to_string();
        a
    }

    #[test]
    fn test_empty_graph_renders_no_data_paragraph() {
        let outline = render_outline(&GraphData::default());
        assert_eq!(outline, "<p class=\"no-data\">No asset data to display</p>");
    }

    #[test]
    fn test_single_root_item() {
        let graph = build_graph_data(&[asset("solo", None)]);
        let outline = render_outline(&graph);

        assert!(outline.starts_with("<ul class=\"asset-outline\">"));
        assert!(outline.contains("<span class=\"outline-label\">solo</span>"));
        assert!(outline.contains("<span class=\"outline-license\">CC-BY-4.0</span>"));
        assert!(outline.ends_with("</ul>"));
    }

    #[test]
    fn test_children_nest_under_parent() {
        let graph = build_graph_data(&[asset("root", None), asset("child", Some("root"))]);
        let outline = render_outline(&graph);

        let root_at = outline.find(">root<").unwrap();
        let nested_ul_at = outline.find("  <ul>").unwrap();
        let child_at = outline.find(">child<").unwrap();
        assert!(root_at < nested_ul_at && nested_ul_at < child_at);
    }

    #[test]
    fn test_forest_emits_one_item_per_root() {
        let graph = build_graph_data(&[
            asset("tree-a", None),
            asset("tree-b", None),
            asset("leaf", Some("tree-a")),
        ]);
        let outline = render_outline(&graph);

        assert_eq!(outline.matches("\n  <li>").count(), 2);
    }

    #[test]
    fn test_depth_first_subtree_order() {
        let graph = build_graph_data(&[
            asset("r", None),
            asset("c1", Some("r")),
            asset("c2", Some("r")),
            asset("g1", Some("c1")),
        ]);
        let outline = render_outline(&graph);

        let c1_at = outline.find(">c1<").unwrap();
        let g1_at = outline.find(">g1<").unwrap();
        let c2_at = outline.find(">c2<").unwrap();
        assert!(c1_at < g1_at && g1_at < c2_at);
    }

    #[test]
    fn test_text_escaped_at_interpolation() {
        let mut bad = asset("safe-id", None);
        bad.license_type = "<b>viral</b>".to_string();
        let graph = build_graph_data(&[bad]);
        let outline = render_outline(&graph);

        assert!(outline.contains("&lt;b&gt;viral&lt;/b&gt;"));
        assert!(!outline.contains("<b>viral</b>"));
    }

    #[test]
    fn test_self_loop_terminates_and_stays_unrendered() {
        let graph = build_graph_data(&[asset("x", Some("x"))]);
        let outline = render_outline(&graph);

        // Its own edge gives the node an incoming edge, so no root exists.
        assert!(!outline.contains(">x<"));
        assert!(outline.starts_with("<ul class=\"asset-outline\">"));
    }

    #[test]
    fn test_detached_cycle_leaves_healthy_tree_rendered() {
        let graph = build_graph_data(&[
            asset("a", Some("b")),
            asset("b", Some("a")),
            asset("root", None),
        ]);
        let outline = render_outline(&graph);

        assert!(outline.contains(">root<"));
        assert!(!outline.contains(">a<"));
        assert!(!outline.contains(">b<"));
    }
}
