//! Builds the public `CalculationResponse` from a task's best per-material
//! solutions (spec.md §4.7). A pure function: no locking beyond what
//! `Task`'s own accessors already do.

use crate::models::panel::Panel;
use crate::models::response::{
    CalculationResponse, FlatCut, FlatTile, MosaicResult, PanelSummary, RESPONSE_VERSION,
};
use crate::models::task::Task;
use crate::models::tile::{TileDimensions, TileNode};
use crate::types::DEFAULT_MATERIAL;
use std::collections::HashMap;

struct PanelLookup {
    labels: HashMap<i32, Option<String>>,
    edges: HashMap<i32, crate::models::panel::Edge>,
}

impl PanelLookup {
    fn build(panels: &[Panel]) -> Self {
        let mut labels = HashMap::new();
        let mut edges = HashMap::new();
        for p in panels {
            labels.insert(p.id, p.label.clone());
            if let Some(edge) = &p.edge {
                if !edge.is_empty() {
                    edges.insert(p.id, edge.clone());
                }
            }
        }
        Self { labels, edges }
    }

    fn label(&self, id: i32) -> Option<String> {
        self.labels.get(&id).cloned().flatten()
    }
}

fn unscale_len(v: i32, factor: i64) -> f64 {
    crate::utils::scale::unscale(v as i64, factor)
}

fn unscale_area(raw: i64, factor: i64) -> f64 {
    raw as f64 / (factor as f64 * factor as f64)
}

fn material_or_null(material: &str) -> Option<String> {
    if material == DEFAULT_MATERIAL {
        None
    } else {
        Some(material.to_string())
    }
}

/// Pre-order flatten of a mosaic's tree, one `FlatTile` per node (final
/// and intermediate), each tagged with `has_children` (spec.md §4.7).
fn flatten_tree(node: &TileNode, factor: i64, out: &mut Vec<FlatTile>, labels: &PanelLookup) {
    out.push(FlatTile {
        id: node.id,
        x: unscale_len(node.tile.x1, factor),
        y: unscale_len(node.tile.y1, factor),
        width: unscale_len(node.width(), factor),
        height: unscale_len(node.height(), factor),
        label: node.external_id.and_then(|id| labels.label(id)),
        has_children: node.has_children(),
        external_id: node.external_id,
        is_final: node.is_final,
        is_rotated: node.is_rotated,
    });
    if let Some(c) = &node.child1 {
        flatten_tree(c, factor, out, labels);
    }
    if let Some(c) = &node.child2 {
        flatten_tree(c, factor, out, labels);
    }
}

struct PanelAgg {
    width: f64,
    height: f64,
    count: i32,
    label: Option<String>,
}

fn bump_panel_agg(map: &mut HashMap<i32, PanelAgg>, id: i32, width: f64, height: f64, label: Option<String>) {
    map.entry(id)
        .and_modify(|a| a.count += 1)
        .or_insert(PanelAgg {
            width,
            height,
            count: 1,
            label,
        });
}

fn into_panel_summaries(map: HashMap<i32, PanelAgg>) -> Vec<PanelSummary> {
    let mut out: Vec<PanelSummary> = map
        .into_iter()
        .map(|(id, agg)| PanelSummary {
            id,
            width: agg.width,
            height: agg.height,
            count: agg.count,
            label: agg.label,
        })
        .collect();
    out.sort_by_key(|p| p.id);
    out
}

/// Build the final response for `task`. Can be called repeatedly (the
/// task replaces its cached response on every call) since a task in
/// RUNNING state keeps improving its beams until it reaches FINISHED.
pub fn build_response(task: &Task) -> CalculationResponse {
    let factor = task.factor;
    let labels = PanelLookup::build(&task.request.panels);
    let stock_labels = PanelLookup::build(&task.request.stock_panels);

    let mut mosaics_out = Vec::new();
    let mut global_panels: HashMap<i32, PanelAgg> = HashMap::new();
    let mut used_stock: HashMap<i32, PanelAgg> = HashMap::new();
    let mut no_fit: HashMap<i32, PanelAgg> = HashMap::new();
    let mut global_edges: HashMap<String, f64> = HashMap::new();

    let mut total_used_area = 0.0;
    let mut total_wasted_area = 0.0;
    let mut total_cuts = 0usize;
    let mut total_cut_length = 0.0;

    for material in task.request.materials() {
        let Some(solution) = task.best_solution(&material) else {
            continue;
        };

        for mosaic in &solution.mosaics {
            let mut tiles = Vec::new();
            flatten_tree(&mosaic.root, factor, &mut tiles, &labels);

            let mut panels: HashMap<i32, PanelAgg> = HashMap::new();
            let mut edge_bands: HashMap<String, f64> = HashMap::new();

            for leaf in mosaic.root.final_leaves() {
                let Some(external_id) = leaf.external_id else {
                    continue;
                };
                let w = unscale_len(leaf.width(), factor);
                let h = unscale_len(leaf.height(), factor);
                let label = labels.label(external_id);
                bump_panel_agg(&mut panels, external_id, w, h, label.clone());
                bump_panel_agg(&mut global_panels, external_id, w, h, label);

                if let Some(edge) = labels.edges.get(&external_id) {
                    let (top_len, side_len) = if leaf.is_rotated { (h, w) } else { (w, h) };
                    if let Some(tag) = &edge.top {
                        *edge_bands.entry(tag.clone()).or_insert(0.0) += top_len;
                        *global_edges.entry(tag.clone()).or_insert(0.0) += top_len;
                    }
                    if let Some(tag) = &edge.bottom {
                        *edge_bands.entry(tag.clone()).or_insert(0.0) += top_len;
                        *global_edges.entry(tag.clone()).or_insert(0.0) += top_len;
                    }
                    if let Some(tag) = &edge.left {
                        *edge_bands.entry(tag.clone()).or_insert(0.0) += side_len;
                        *global_edges.entry(tag.clone()).or_insert(0.0) += side_len;
                    }
                    if let Some(tag) = &edge.right {
                        *edge_bands.entry(tag.clone()).or_insert(0.0) += side_len;
                        *global_edges.entry(tag.clone()).or_insert(0.0) += side_len;
                    }
                }
            }

            let used_area = unscale_area(mosaic.used_area(), factor);
            let wasted_area = unscale_area(mosaic.unused_area(), factor);
            let cut_length = mosaic.cut_length() as f64 / factor as f64;

            total_used_area += used_area;
            total_wasted_area += wasted_area;
            total_cuts += mosaic.cuts.len();
            total_cut_length += cut_length;

            bump_panel_agg(
                &mut used_stock,
                mosaic.stock_id,
                unscale_len(mosaic.root.width(), factor),
                unscale_len(mosaic.root.height(), factor),
                stock_labels.label(mosaic.stock_id),
            );

            mosaics_out.push(MosaicResult {
                stock_label: stock_labels.label(mosaic.stock_id),
                material: material_or_null(&mosaic.material),
                used_area,
                wasted_area,
                used_area_ratio: mosaic.used_area_ratio(),
                nbr_final_panels: mosaic.root.nbr_final_tiles(),
                nbr_wasted_panels: mosaic.root.nbr_unused_tiles(),
                cut_length,
                panels: into_panel_summaries(panels),
                tiles,
                cuts: mosaic
                    .cuts
                    .iter()
                    .map(|c| FlatCut {
                        x1: unscale_len(c.x1, factor),
                        y1: unscale_len(c.y1, factor),
                        x2: unscale_len(c.x2, factor),
                        y2: unscale_len(c.y2, factor),
                        is_horizontal: c.is_horizontal,
                    })
                    .collect(),
                edge_bands,
            });
        }

        for t in &solution.no_fit_panels {
            bump_no_fit(&mut no_fit, t, factor, &labels);
        }
    }

    let total_used_area_ratio = if total_used_area + total_wasted_area > 0.0 {
        total_used_area / (total_used_area + total_wasted_area)
    } else {
        0.0
    };

    CalculationResponse {
        version: RESPONSE_VERSION.to_string(),
        id: task.id.clone(),
        task_id: task.id.clone(),
        elapsed_time_ms: task.elapsed().as_millis(),
        solution_elapsed_time_ms: task.solution_elapsed().as_millis(),
        total_used_area,
        total_wasted_area,
        total_used_area_ratio,
        total_nbr_cuts: total_cuts,
        total_cut_length,
        panels: into_panel_summaries(global_panels),
        used_stock_panels: into_panel_summaries(used_stock),
        mosaics: mosaics_out,
        no_fit_panels: into_panel_summaries(no_fit),
        edge_bands: global_edges,
        is_min_trim_dimension_influenced: task
            .is_min_trim_dimension_influenced
            .load(std::sync::atomic::Ordering::Relaxed),
    }
}

fn bump_no_fit(map: &mut HashMap<i32, PanelAgg>, t: &TileDimensions, factor: i64, labels: &PanelLookup) {
    let w = unscale_len(t.width, factor);
    let h = unscale_len(t.height, factor);
    bump_panel_agg(map, t.id, w, h, labels.label(t.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::Configuration;
    use crate::models::request::CalculationRequest;

    #[test]
    fn empty_task_yields_a_zeroed_response() {
        let request = CalculationRequest {
            panels: vec![],
            stock_panels: vec![],
            configuration: Configuration::default(),
            client_info: None,
        };
        let task = Task::new("t1".to_string(), request, 1);
        let response = build_response(&task);
        assert_eq!(response.total_used_area, 0.0);
        assert!(response.mosaics.is_empty());
    }
}
