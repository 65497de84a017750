// Report document assembly
//
// Produces one self-contained HTML document: embedded style and
// script, no external reference beyond the Mermaid CDN module (and
// that only when a Mermaid rendering was chosen). Every value drawn
// from asset data passes through `escape_html` before it reaches the
// template; Tera autoescaping stays off so escaping happens in
// exactly one place.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::config::Config;
use crate::error::Result;
use crate::graph::truncate_middle;
use crate::output::{escape_html, GraphRendering};
use crate::portfolio::PortfolioAnalysis;

const DISPLAY_ID_MAX: usize = 14;

/// Options that shape the rendered document.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Document title
    pub title: String,
    /// Show untruncated ids everywhere
    pub show_full_ids: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "IP Portfolio".to_string(),
            show_full_ids: false,
        }
    }
}

impl ReportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.report.title.clone(),
            show_full_ids: config.report.show_full_ids,
        }
    }
}

/// One pre-escaped table row. Everything here is ready for verbatim
/// interpolation.
#[derive(Debug, Serialize)]
struct AssetRow {
    id_full: String,
    id_display: String,
    name: String,
    license_type: String,
    created_at: String,
    parent_display: String,
    role: String,
    derivative_count: usize,
    licenses_issued: u64,
    royalties: String,
}

/// Renderer for the portfolio report document.
pub struct ReportRenderer {
    tera: Tera,
    options: ReportOptions,
}

impl ReportRenderer {
    /// Create a renderer with the embedded template.
    pub fn new(options: ReportOptions) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![(
            "report.html",
            include_str!("../../templates/report.html.tera"),
        )])?;
        tera.register_filter("pluralize", pluralize);

        Ok(Self { tera, options })
    }

    /// Render the complete document for an analysis and the chosen
    /// graph rendering.
    pub fn render(
        &self,
        analysis: &PortfolioAnalysis,
        rendering: Option<&GraphRendering>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", &escape_html(&self.options.title));
        context.insert("owner", &escape_html(&analysis.portfolio.owner));
        context.insert("network", &escape_html(&analysis.portfolio.network));
        context.insert("stats", &analysis.statistics);
        context.insert(
            "royalties_display",
            &format!("{:.2}", analysis.statistics.total_royalties),
        );
        context.insert("rows", &self.asset_rows(analysis));

        match rendering {
            Some(GraphRendering::Mermaid(markup)) => {
                // The browser decodes the entities back to markup before
                // the Mermaid runtime reads the element's text content.
                context.insert("graph_kind", "mermaid");
                context.insert("graph_block", &escape_html(markup));
            }
            Some(GraphRendering::Svg(svg)) => {
                context.insert("graph_kind", "svg");
                context.insert("graph_block", svg);
            }
            Some(GraphRendering::Html(outline)) => {
                context.insert("graph_kind", "outline");
                context.insert("graph_block", outline);
            }
            None => {
                context.insert("graph_kind", "none");
                context.insert("graph_block", "");
            }
        }

        context.insert("styles", include_str!("../../assets/style.css"));
        context.insert("script", include_str!("../../assets/report.js"));
        context.insert(
            "generated_at",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );

        Ok(self.tera.render("report.html", &context)?)
    }

    fn asset_rows(&self, analysis: &PortfolioAnalysis) -> Vec<AssetRow> {
        let roles: HashMap<&str, &str> = analysis
            .graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.style_class.as_str()))
            .collect();

        analysis
            .portfolio
            .assets
            .iter()
            .map(|asset| AssetRow {
                id_full: escape_html(&asset.id),
                id_display: escape_html(&self.display_id(&asset.id)),
                name: escape_html(&asset.name),
                license_type: escape_html(&asset.license_type),
                created_at: escape_html(&asset.created_at),
                parent_display: asset
                    .parent_ref()
                    .map(|p| escape_html(&self.display_id(p)))
                    .unwrap_or_default(),
                role: roles.get(asset.id.as_str()).unwrap_or(&"root").to_string(),
                derivative_count: asset.derivative_count,
                licenses_issued: asset.licenses_issued.unwrap_or(0),
                royalties: format!("{:.2}", asset.royalties_earned.unwrap_or(0.0)),
            })
            .collect()
    }

    /// Truncation happens on the raw id, before escaping.
    fn display_id(&self, id: &str) -> String {
        if self.options.show_full_ids {
            id.to_string()
        } else {
            truncate_middle(id, DISPLAY_ID_MAX)
        }
    }
}

/// Pluralize a noun based on a count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}
