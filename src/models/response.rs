//! `CalculationResponse` and its nested shapes — the flattened, scaled-back
//! output of the response builder (spec.md §4.7, §6).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatTile {
    pub id: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Option<String>,
    pub has_children: bool,
    pub external_id: Option<i32>,
    pub is_final: bool,
    pub is_rotated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatCut {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub is_horizontal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSummary {
    pub id: i32,
    pub width: f64,
    pub height: f64,
    pub count: i32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicResult {
    pub stock_label: Option<String>,
    pub material: Option<String>,
    pub used_area: f64,
    pub wasted_area: f64,
    pub used_area_ratio: f64,
    pub nbr_final_panels: usize,
    pub nbr_wasted_panels: usize,
    pub cut_length: f64,
    pub panels: Vec<PanelSummary>,
    pub tiles: Vec<FlatTile>,
    pub cuts: Vec<FlatCut>,
    pub edge_bands: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub version: String,
    pub id: String,
    pub task_id: String,
    pub elapsed_time_ms: u128,
    pub solution_elapsed_time_ms: u128,
    pub total_used_area: f64,
    pub total_wasted_area: f64,
    pub total_used_area_ratio: f64,
    pub total_nbr_cuts: usize,
    pub total_cut_length: f64,
    pub panels: Vec<PanelSummary>,
    pub used_stock_panels: Vec<PanelSummary>,
    pub mosaics: Vec<MosaicResult>,
    pub no_fit_panels: Vec<PanelSummary>,
    pub edge_bands: HashMap<String, f64>,
    pub is_min_trim_dimension_influenced: bool,
}

pub const RESPONSE_VERSION: &str = "1.2";
