// Inline SVG rendering of the derivation graph
//
// A fixed layered layout rather than a general graph layout: nodes
// fall into up to three horizontal bands by role (roots on top,
// derivatives in the middle, leaves at the bottom), evenly spaced
// within each band. Good enough to read a derivation forest at a
// glance without any client-side rendering library.

use std::collections::HashMap;

use crate::graph::{GraphData, GraphNode, NodeRole};
use crate::output::escape_html;

const PADDING: f64 = 40.0;
const NODE_RADIUS: f64 = 18.0;
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Renderer producing a self-contained SVG document.
pub struct SvgRenderer {
    width: u32,
    height: u32,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }

    /// Set the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Render the graph; all coordinates are deterministic functions
    /// of the input and the canvas size.
    pub fn render(&self, graph: &GraphData) -> String {
        let width = self.width;
        let height = self.height;
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        ));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

        if graph.nodes.is_empty() {
            let x = f64::from(width) / 2.0;
            let y = f64::from(height) / 2.0;
            svg.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"14\" fill=\"#78909c\">No asset data to display</text>"
            ));
            svg.push_str("</svg>");
            return svg;
        }

        let centers = self.centers(graph);

        // Edges first so the circles paint over the line ends.
        for edge in &graph.edges {
            if let (Some(&(x1, y1)), Some(&(x2, y2))) = (
                centers.get(edge.source.as_str()),
                centers.get(edge.target.as_str()),
            ) {
                svg.push_str(&format!(
                    "<line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"#90a4ae\" stroke-width=\"1.5\"/>"
                ));
            }
        }

        for node in &graph.nodes {
            if let Some(&(x, y)) = centers.get(node.id.as_str()) {
                let label_y = y + NODE_RADIUS + 14.0;
                svg.push_str("<g>");
                svg.push_str(&format!(
                    "<title>{}</title>",
                    escape_html(&tooltip_for(node))
                ));
                svg.push_str(&format!(
                    "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{NODE_RADIUS:.1}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
                    node.role.fill(),
                    node.role.stroke()
                ));
                svg.push_str(&format!(
                    "<text x=\"{x:.1}\" y=\"{label_y:.1}\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"11\" fill=\"#37474f\">{}</text>",
                    escape_html(&node.label)
                ));
                svg.push_str("</g>");
            }
        }

        svg.push_str("</svg>");
        svg
    }

    /// Node centers for the band layout. Only non-empty bands take
    /// vertical space; slots spread evenly across the padded canvas.
    fn centers<'a>(&self, graph: &'a GraphData) -> HashMap<&'a str, (f64, f64)> {
        let mut bands: Vec<Vec<&GraphNode>> = Vec::new();
        for role in [NodeRole::Root, NodeRole::Derivative, NodeRole::Leaf] {
            let band: Vec<&GraphNode> = graph.nodes.iter().filter(|n| n.role == role).collect();
            if !band.is_empty() {
                bands.push(band);
            }
        }

        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let mut centers = HashMap::new();

        for (row, band) in bands.iter().enumerate() {
            let y = PADDING + (height - 2.0 * PADDING) * (row as f64 + 0.5) / bands.len() as f64;
            for (slot, node) in band.iter().enumerate() {
                let x =
                    PADDING + (width - 2.0 * PADDING) * (slot as f64 + 0.5) / band.len() as f64;
                centers.insert(node.id.as_str(), (x, y));
            }
        }

        centers
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn tooltip_for(node: &GraphNode) -> String {
    let mut parts = Vec::new();
    for value in [&node.name, &node.license_type, &node.created_at] {
        if !value.is_empty() {
            parts.push(value.as_str());
        }
    }
    if parts.is_empty() {
        node.id.clone()
    } else {
        parts.join(" | ")
    }
}
