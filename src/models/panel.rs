//! Core-facing boundary types: `Panel` (demand or stock entry), `Edge`
//! (edge-banding tags) and `ClientInfo` (spec.md §3 supplement, §6).

use crate::models::enums::Orientation;
use crate::models::tile::TileDimensions;
use crate::types::DEFAULT_MATERIAL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub top: Option<String>,
    pub left: Option<String>,
    pub bottom: Option<String>,
    pub right: Option<String>,
}

impl Edge {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }
}

/// The request-facing demand/stock entry; widths and heights are decimal
/// strings (scaled to integers at the boundary — see `utils::scale`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub id: i32,
    pub width: String,
    pub height: String,
    pub count: i32,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub edge: Option<Edge>,
}

fn default_enabled() -> bool {
    true
}

impl Panel {
    pub fn new(id: i32, width: impl Into<String>, height: impl Into<String>, count: i32) -> Self {
        Self {
            id,
            width: width.into(),
            height: height.into(),
            count,
            material: None,
            orientation: Orientation::Any,
            label: None,
            enabled: true,
            edge: None,
        }
    }

    pub fn material(&self) -> &str {
        self.material.as_deref().unwrap_or(DEFAULT_MATERIAL)
    }

    pub fn width_as_f64(&self) -> Option<f64> {
        self.width.parse().ok()
    }

    pub fn height_as_f64(&self) -> Option<f64> {
        self.height.parse().ok()
    }

    /// A panel is valid iff enabled, count > 0, and width/height parse as
    /// positive doubles (spec.md §6).
    pub fn is_valid(&self) -> bool {
        self.enabled
            && self.count > 0
            && self.width_as_f64().is_some_and(|v| v > 0.0)
            && self.height_as_f64().is_some_and(|v| v > 0.0)
    }

    /// Expand into one `TileDimensions` per unit of `count`, scaling
    /// decimal width/height to integer coordinates via `factor`. The first
    /// unit reuses `self.id`; the engine does not need per-unit identity
    /// beyond `self.id`, so every unit shares it (matching the source
    /// demand-multiset semantics in spec.md §8 invariant 3).
    pub fn expand(&self, factor: i64) -> Vec<TileDimensions> {
        let width = crate::utils::scale::scale(self.width_as_f64().unwrap_or(0.0), factor);
        let height = crate::utils::scale::scale(self.height_as_f64().unwrap_or(0.0), factor);
        (0..self.count)
            .map(|_| TileDimensions {
                id: self.id,
                width,
                height,
                material: self.material().to_string(),
                orientation: self.orientation,
                label: self.label.clone(),
                is_rotated: false,
            })
            .collect()
    }
}

/// Opaque client identity; only `id` is read by the core (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_when_disabled_or_non_positive() {
        let mut panel = Panel::new(1, "100", "50", 1);
        assert!(panel.is_valid());
        panel.enabled = false;
        assert!(!panel.is_valid());
        panel.enabled = true;
        panel.count = 0;
        assert!(!panel.is_valid());
        panel.count = 1;
        panel.width = "0".to_string();
        assert!(!panel.is_valid());
    }

    #[test]
    fn expand_produces_one_tile_per_count() {
        let panel = Panel::new(5, "100.5", "50", 3);
        let tiles = panel.expand(10);
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|t| t.width == 1005 && t.height == 500));
    }
}
