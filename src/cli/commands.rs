//! CLI command implementations: build a `CalculationRequest` from the
//! input file, submit it to the engine, and report the result.

use crate::cli::progress::task_progress_bar;
use crate::engine::Service;
use crate::error::{OptimizerError, Result};
use crate::models::configuration::Configuration;
use crate::models::panel::Panel;
use crate::models::request::CalculationRequest;
use crate::{log_operation_error, log_operation_start, log_operation_success};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(serde::Deserialize)]
struct PanelRow {
    width: String,
    height: String,
    quantity: i32,
    #[serde(default)]
    label: Option<String>,
}

fn read_panels_csv(path: &Path) -> Result<Vec<Panel>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut panels = Vec::new();
    for (i, row) in reader.deserialize::<PanelRow>().enumerate() {
        let row = row?;
        let mut panel = Panel::new((i + 1) as i32, row.width, row.height, row.quantity);
        panel.label = row.label;
        panels.push(panel);
    }
    Ok(panels)
}

/// A JSON input file carries a full `CalculationRequest`; a CSV input
/// file carries only the demand panels, paired with `--stock` (also CSV)
/// and the `--cut-thickness`/`--min-trim`/`--accuracy` overrides.
fn load_request(
    input: &Path,
    stock: Option<&Path>,
    config_override: Option<&Path>,
    cut_thickness: i32,
    min_trim: i32,
    accuracy: i32,
) -> Result<CalculationRequest> {
    let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension.eq_ignore_ascii_case("json") {
        let body = std::fs::read_to_string(input)?;
        let request: CalculationRequest = serde_json::from_str(&body)?;
        return Ok(request);
    }

    let panels = read_panels_csv(input)?;
    let stock_path = stock
        .ok_or_else(|| OptimizerError::InvalidInput("CSV input requires --stock".to_string()))?;
    let stock_panels = read_panels_csv(stock_path)?;

    let mut configuration = match config_override {
        Some(path) => {
            let body = std::fs::read_to_string(path)?;
            serde_json::from_str(&body)?
        }
        None => Configuration::default(),
    };
    configuration.cut_thickness = cut_thickness;
    configuration.min_trim_dimension = min_trim;
    configuration.optimization_factor = accuracy;
    configuration.validate()?;

    Ok(CalculationRequest {
        panels,
        stock_panels,
        configuration,
        client_info: None,
    })
}

/// Execute the optimize command: submit the request and block until the
/// task reaches a terminal state, then write the response to `output`
/// (stdout if none given).
#[allow(clippy::too_many_arguments)]
pub async fn optimize_command(
    input: PathBuf,
    stock: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    cut_thickness: i32,
    min_trim: i32,
    accuracy: i32,
    threads: usize,
) -> Result<()> {
    log_operation_start!("optimizing {}", input.display());

    let mut request = load_request(
        &input,
        stock.as_deref(),
        config.as_deref(),
        cut_thickness,
        min_trim,
        accuracy,
    )
    .map_err(|e| {
        log_operation_error!("loading input", e);
        e
    })?;

    // CLI submissions never name a client; tag each run with a throwaway id
    // so its log lines and per-client concurrency accounting have something
    // to key on.
    if request.client_info.is_none() {
        request.client_info = Some(crate::models::panel::ClientInfo {
            id: uuid::Uuid::new_v4().to_string(),
            extra: serde_json::Map::new(),
        });
    }

    let service = Service::init(Some(threads));
    let submission = service.submit_task(request);
    if submission.status_code.is_error() {
        let err = OptimizerError::Validation(submission.status_code.description().to_string());
        log_operation_error!("submitting task", err);
        return Err(err);
    }
    let task_id = submission.task_id.expect("an Ok submission always carries a task id");

    // Ctrl+C stops the task on the engine side rather than just killing the
    // CLI process, so the watchdog's terminal-task bookkeeping still runs.
    let cancel = tokio_util::sync::CancellationToken::new();
    let ctrlc_task_id = task_id.clone();
    let ctrlc_service = service.clone();
    let ctrlc_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrlc_service.stop_task(&ctrlc_task_id);
            ctrlc_cancel.cancel();
        }
    });

    let bar = task_progress_bar();
    let response = loop {
        if cancel.is_cancelled() {
            bar.finish_with_message("cancelled");
            break None;
        }
        let status = service.get_task_status(&task_id)?;
        bar.set_position(status.percentage_done as u64);
        if status.status.is_terminal() {
            bar.finish_with_message(format!("{}", status.status));
            break status.solution;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    };

    let Some(response) = response else {
        let err = OptimizerError::Internal("task finished without a solution".to_string());
        log_operation_error!("optimizing", err);
        return Err(err);
    };

    let json = serde_json::to_string_pretty(&response)?;
    match output {
        Some(path) => std::fs::write(&path, json)?,
        None => println!("{json}"),
    }

    log_operation_success!(
        "optimization finished: {:.1}% material used",
        response.total_used_area_ratio * 100.0
    );
    Ok(())
}

/// Execute the validate command: parse the input without running the
/// optimizer, reporting panel/material counts.
pub async fn validate_command(input: PathBuf, stock: Option<PathBuf>) -> Result<()> {
    log_operation_start!("validating {}", input.display());

    let request = load_request(&input, stock.as_deref(), None, 3, 10, 5)?;
    request.configuration.validate()?;

    println!(
        "{} demand panel(s), {} stock panel(s), {} material(s)",
        request.enabled_panel_count(),
        request.enabled_stock_count(),
        request.materials().len()
    );

    log_operation_success!("input file is valid");
    Ok(())
}

/// Execute the example command: print a starter input file.
pub async fn example_command(format: String) -> Result<()> {
    match format.as_str() {
        "csv" => {
            println!("width,height,quantity,label");
            println!("1200,800,5,Panel A");
            println!("600,400,10,Panel B");
            println!("300,200,15,Panel C");
            println!("\nSave as demand.csv, pair with a stock.csv of the same shape, then:");
            println!("cutlist optimize -i demand.csv --stock stock.csv -o output.json");
        }
        "json" => {
            println!(
                r#"{{
  "panels": [
    {{ "id": 1, "width": "1200", "height": "800", "count": 5, "label": "Panel A" }},
    {{ "id": 2, "width": "600", "height": "400", "count": 10, "label": "Panel B" }}
  ],
  "stock_panels": [
    {{ "id": 10, "width": "2440", "height": "1220", "count": 20 }}
  ],
  "configuration": {{
    "cut_thickness": 3,
    "min_trim_dimension": 10,
    "consider_orientation": true,
    "optimization_factor": 5,
    "optimization_priority": "LeastWastedArea",
    "cut_orientation_preference": "Both",
    "use_single_stock_unit": false,
    "allow_multiple_tasks_per_client": false,
    "units": "mm",
    "performance_thresholds": {{
      "max_simultaneous_threads": 5,
      "max_simultaneous_tasks": 1,
      "thread_check_interval_ms": 1000
    }}
  }}
}}"#
            );
            println!("\nSave as input.json, then:");
            println!("cutlist optimize -i input.json -o output.json");
        }
        other => {
            return Err(OptimizerError::InvalidInput(format!(
                "unsupported format: {other}. use 'csv' or 'json'"
            )));
        }
    }

    Ok(())
}
