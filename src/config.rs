use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub graph: GraphConfig,
    pub svg: SvgConfig,
}

/// Report document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Document title shown in the header
    pub title: String,
    /// Disable identifier truncation everywhere in the document
    pub show_full_ids: bool,
}

/// Graph rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub enabled: bool,
    pub mode: GraphMode,
    pub direction: Direction,
    /// Node count above which auto mode falls back from Mermaid to SVG
    pub max_nodes: usize,
}

/// SVG fallback dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub width: u32,
    pub height: u32,
}

/// Which graph rendering back-end to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    #[default]
    Auto,
    Mermaid,
    Svg,
    Html,
}

/// Flowchart layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Td,
    Lr,
}

impl Direction {
    /// The Mermaid header token for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Td => "TD",
            Direction::Lr => "LR",
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "IP Portfolio".to_string(),
            show_full_ids: false,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: GraphMode::default(),
            direction: Direction::default(),
            max_nodes: 100,
        }
    }
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        direction: Option<String>,
        mode: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        full_ids: bool,
        no_graph: bool,
    ) {
        if let Some(dir) = direction {
            self.graph.direction = match dir.as_str() {
                "lr" | "LR" => Direction::Lr,
                _ => Direction::Td,
            };
        }

        if let Some(m) = mode {
            self.graph.mode = match m.as_str() {
                "mermaid" => GraphMode::Mermaid,
                "svg" => GraphMode::Svg,
                "html" => GraphMode::Html,
                _ => GraphMode::Auto,
            };
        }

        if let Some(w) = width {
            self.svg.width = w;
        }

        if let Some(h) = height {
            self.svg.height = h;
        }

        if full_ids {
            self.report.show_full_ids = true;
        }

        if no_graph {
            self.graph.enabled = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.svg.width < 100 || self.svg.width > 8000 {
            return Err(Error::config_validation(
                "svg width must be between 100 and 8000",
            ));
        }

        if self.svg.height < 100 || self.svg.height > 8000 {
            return Err(Error::config_validation(
                "svg height must be between 100 and 8000",
            ));
        }

        if self.graph.max_nodes == 0 {
            return Err(Error::config_validation("graph max_nodes must be at least 1"));
        }

        Ok(())
    }
}
