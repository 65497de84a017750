// Rendering back-ends and the report document

pub mod mermaid;
pub mod outline;
pub mod report;
pub mod svg;

pub use mermaid::*;
pub use outline::*;
pub use report::*;
pub use svg::*;

use crate::config::{Config, GraphMode};
use crate::graph::GraphData;

/// One graph rendering, tagged by back-end.
///
/// The report pattern-matches on this instead of sniffing strings:
/// Mermaid markup needs escaping and a script include, the other two
/// embed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphRendering {
    /// Mermaid flowchart markup
    Mermaid(String),
    /// Self-contained inline SVG
    Svg(String),
    /// Nested semantic list markup
    Html(String),
}

/// Escape a string for embedding in HTML (or SVG) text content and
/// attribute values.
///
/// Replacement order is fixed: `&` first, so already-plain text comes
/// through without artifacts.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Pick the graph rendering for a report, or `None` when the graph
/// section is disabled.
///
/// An explicit mode forces that back-end. `auto` prefers Mermaid and
/// degrades to SVG once the node count passes `max_nodes`, where a
/// client-side diagram renderer stops being practical; the outline is
/// only ever chosen explicitly.
pub fn select_rendering(graph: &GraphData, config: &Config) -> Option<GraphRendering> {
    if !config.graph.enabled {
        return None;
    }

    let rendering = match config.graph.mode {
        GraphMode::Mermaid => mermaid_rendering(graph, config),
        GraphMode::Svg => svg_rendering(graph, config),
        GraphMode::Html => GraphRendering::Html(render_outline(graph)),
        GraphMode::Auto => {
            if graph.nodes.len() > config.graph.max_nodes {
                svg_rendering(graph, config)
            } else {
                mermaid_rendering(graph, config)
            }
        }
    };

    Some(rendering)
}

fn mermaid_rendering(graph: &GraphData, config: &Config) -> GraphRendering {
    let generator = MermaidGenerator::new().with_direction(config.graph.direction);
    GraphRendering::Mermaid(generator.generate(graph))
}

fn svg_rendering(graph: &GraphData, config: &Config) -> GraphRendering {
    let renderer = SvgRenderer::new()
        .with_size(config.svg.width, config.svg.height);
    GraphRendering::Svg(renderer.render(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph_data;
    use crate::portfolio::Asset;

    fn sample_graph() -> GraphData {
        let assets = vec![
            Asset::new("root", "Root", None),
            Asset::new("child", "Child", Some("root")),
        ];
        build_graph_data(&assets)
    }

    #[test]
    fn test_escape_html_script_tag() {
        let escaped = escape_html("<script>alert(1)</script>");
        assert!(!escaped.contains("<script>"));
        assert!(escaped.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escape_html_quotes_and_ampersand() {
        assert_eq!(
            escape_html("it's \"quoted\" & more"),
            "it&#39;s &quot;quoted&quot; &amp; more"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Plain Asset 42"), "Plain Asset 42");
    }

    #[test]
    fn test_escape_html_ampersand_first() {
        // A pre-existing entity gets its ampersand escaped exactly once.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_select_disabled_graph() {
        let mut config = Config::default();
        config.graph.enabled = false;

        assert_eq!(select_rendering(&sample_graph(), &config), None);
    }

    #[test]
    fn test_select_auto_prefers_mermaid() {
        let config = Config::default();
        let rendering = select_rendering(&sample_graph(), &config);

        assert!(matches!(rendering, Some(GraphRendering::Mermaid(_))));
    }

    #[test]
    fn test_select_auto_degrades_to_svg_past_max_nodes() {
        let mut config = Config::default();
        config.graph.max_nodes = 1;
        let rendering = select_rendering(&sample_graph(), &config);

        assert!(matches!(rendering, Some(GraphRendering::Svg(_))));
    }

    #[test]
    fn test_select_explicit_modes() {
        let mut config = Config::default();

        config.graph.mode = GraphMode::Svg;
        assert!(matches!(
            select_rendering(&sample_graph(), &config),
            Some(GraphRendering::Svg(_))
        ));

        config.graph.mode = GraphMode::Html;
        assert!(matches!(
            select_rendering(&sample_graph(), &config),
            Some(GraphRendering::Html(_))
        ));

        // Explicit Mermaid sticks even past the auto threshold.
        config.graph.mode = GraphMode::Mermaid;
        config.graph.max_nodes = 1;
        assert!(matches!(
            select_rendering(&sample_graph(), &config),
            Some(GraphRendering::Mermaid(_))
        ));
    }
}
