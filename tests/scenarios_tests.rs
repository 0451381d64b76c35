//! End-to-end scenarios run through the public `Service` facade, covering
//! the fixed layouts and boundary rejections enumerated alongside the
//! engine's component design (perfect fit, a single cut, rotation, kerf
//! consumption and a `minTrimDimension` block).

use cutlist_optimizer_cli::models::configuration::Configuration;
use cutlist_optimizer_cli::models::enums::StatusCode;
use cutlist_optimizer_cli::models::panel::Panel;
use cutlist_optimizer_cli::models::request::CalculationRequest;
use cutlist_optimizer_cli::models::response::CalculationResponse;
use cutlist_optimizer_cli::Service;
use std::time::{Duration, Instant};

fn request(demand: Vec<Panel>, stock: Vec<Panel>, configuration: Configuration) -> CalculationRequest {
    CalculationRequest {
        panels: demand,
        stock_panels: stock,
        configuration,
        client_info: None,
    }
}

/// Submits `req` and polls until the task reaches a terminal state,
/// returning its last cached solution. Panics if it doesn't finish within
/// a few seconds, since every scenario here is a single small mosaic.
fn run(req: CalculationRequest) -> CalculationResponse {
    let service = Service::init(Some(2));
    let submission = service.submit_task(req);
    assert_eq!(submission.status_code, StatusCode::Ok);
    let task_id = submission.task_id.unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let status = service.get_task_status(&task_id).unwrap();
        if status.status.is_terminal() {
            return status.solution.expect("terminal task always carries a cached solution");
        }
        assert!(Instant::now() < deadline, "task did not finish in time");
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn scenario_a_perfect_fit_one_sheet() {
    let demand = vec![Panel::new(2, "100", "50", 1)];
    let stock = vec![Panel::new(1, "100", "50", 1)];
    let response = run(request(demand, stock, Configuration::default()));

    assert_eq!(response.mosaics.len(), 1);
    let mosaic = &response.mosaics[0];
    assert_eq!(mosaic.tiles.iter().filter(|t| t.is_final).count(), 1);
    let tile = mosaic.tiles.iter().find(|t| t.is_final).unwrap();
    assert_eq!((tile.x, tile.y, tile.width, tile.height), (0.0, 0.0, 100.0, 50.0));
    assert_eq!(mosaic.cuts.len(), 0);
    assert!((response.total_used_area_ratio - 1.0).abs() < 1e-9);
    assert!(response.no_fit_panels.is_empty());
}

#[test]
fn scenario_b_one_cut_leaves_an_offcut() {
    let mut config = Configuration::default();
    config.cut_thickness = 0;
    let demand = vec![Panel::new(2, "60", "50", 1)];
    let stock = vec![Panel::new(1, "100", "50", 1)];
    let response = run(request(demand, stock, config));

    assert_eq!(response.mosaics.len(), 1);
    let mosaic = &response.mosaics[0];
    assert_eq!(mosaic.cuts.len(), 1);
    let final_tile = mosaic.tiles.iter().find(|t| t.is_final).unwrap();
    assert_eq!((final_tile.x, final_tile.y, final_tile.width, final_tile.height), (0.0, 0.0, 60.0, 50.0));
    assert!((mosaic.used_area_ratio - 0.6).abs() < 1e-9);
}

#[test]
fn scenario_d_rotation_needed_for_exact_fit() {
    let mut config = Configuration::default();
    config.consider_orientation = false;
    let demand = vec![Panel::new(2, "100", "50", 1)];
    let stock = vec![Panel::new(1, "50", "100", 1)];
    let response = run(request(demand, stock, config));

    assert_eq!(response.mosaics.len(), 1);
    let mosaic = &response.mosaics[0];
    assert_eq!(mosaic.cuts.len(), 0);
    let final_tile = mosaic.tiles.iter().find(|t| t.is_final).unwrap();
    assert!(final_tile.is_rotated);
    assert!((mosaic.used_area_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn scenario_e_kerf_is_consumed_as_waste() {
    let mut config = Configuration::default();
    config.cut_thickness = 10;
    let demand = vec![Panel::new(2, "45", "10", 2)];
    let stock = vec![Panel::new(1, "100", "10", 1)];
    let response = run(request(demand, stock, config));

    assert_eq!(response.mosaics.len(), 1);
    let mosaic = &response.mosaics[0];
    let finals: Vec<_> = mosaic.tiles.iter().filter(|t| t.is_final).collect();
    assert_eq!(finals.len(), 2);
    assert!((response.total_used_area - 900.0).abs() < 1e-6);
    assert!(response.total_used_area_ratio < 1.0);
}

#[test]
fn scenario_f_min_trim_dimension_blocks_placement() {
    let mut config = Configuration::default();
    config.min_trim_dimension = 10;
    config.cut_thickness = 0;
    let demand = vec![Panel::new(2, "95", "100", 1)];
    let stock = vec![Panel::new(1, "100", "100", 1)];
    let response = run(request(demand, stock, config));

    assert_eq!(response.no_fit_panels.len(), 1);
    assert_eq!(response.no_fit_panels[0].id, 2);
    assert!(response.is_min_trim_dimension_influenced);
}

#[test]
fn zero_valid_demand_panels_is_rejected_at_submission() {
    let service = Service::init(Some(1));
    let demand = vec![Panel::new(2, "100", "50", 0)];
    let stock = vec![Panel::new(1, "100", "50", 1)];
    let submission = service.submit_task(request(demand, stock, Configuration::default()));
    assert_eq!(submission.status_code, StatusCode::InvalidTiles);
    assert!(submission.task_id.is_none());
}

#[test]
fn demand_exceeding_stock_area_finishes_with_every_panel_unfit() {
    let demand = vec![Panel::new(2, "1000", "1000", 1)];
    let stock = vec![Panel::new(1, "10", "10", 1)];
    let response = run(request(demand, stock, Configuration::default()));

    assert!(response.mosaics.is_empty());
    assert_eq!(response.no_fit_panels.len(), 1);
    assert_eq!(response.no_fit_panels[0].id, 2);
}
