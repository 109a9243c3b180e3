//! Canvas configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::constants::{DEFAULT_EDGE_SHAPE, DEFAULT_SHAPE_KIND};
use crate::layout::LayoutConfig;
use crate::types::{Point, Size};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Wheel zoom enabled
    pub zoomable: bool,
    /// Canvas panning enabled
    pub moveable: bool,
    /// Node and group dragging enabled
    pub draggable: bool,
    /// Endpoint link drawing enabled
    pub linkable: bool,
    /// Pressing a connected target endpoint detaches its edge for re-linking
    pub dis_linkable: bool,
    pub container: ContainerConfig,
    pub theme: ThemeConfig,
    pub layout: Option<LayoutConfig>,
}

/// Root element geometry in pointer-space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub offset: Point,
    pub size: Size,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub edge: EdgeTheme,
    pub endpoint: EndpointTheme,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeTheme {
    /// Path family used when an edge spec does not name one
    pub shape_type: String,
    /// Registry tag of the edge shape factory
    pub kind: String,
    pub arrow: bool,
}

impl Default for EdgeTheme {
    fn default() -> Self {
        Self {
            shape_type: DEFAULT_EDGE_SHAPE.to_string(),
            kind: DEFAULT_SHAPE_KIND.to_string(),
            arrow: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointTheme {
    /// Orientation limit handed to edge shapes
    pub position: Option<String>,
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid canvas config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// A config with every interaction enabled.
    pub fn interactive(size: Size) -> Self {
        Self {
            zoomable: true,
            moveable: true,
            draggable: true,
            linkable: true,
            container: ContainerConfig {
                offset: Point::ZERO,
                size,
            },
            ..Self::default()
        }
    }
}
