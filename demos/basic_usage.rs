//! Minimal end-to-end use of the library: submit one material's demand
//! and stock, poll until the task finishes, print the layout.

use cutlist_optimizer_cli::prelude::*;
use std::thread::sleep;
use std::time::Duration;

fn main() -> Result<()> {
    let request = CalculationRequest {
        panels: vec![Panel::new(1, "600", "400", 4)],
        stock_panels: vec![Panel::new(10, "2440", "1220", 1)],
        configuration: Configuration::default(),
        client_info: None,
    };

    let service = Service::init(Some(2));
    let submission = service.submit_task(request);
    if submission.status_code != cutlist_optimizer_cli::models::enums::StatusCode::Ok {
        println!("rejected: {}", submission.status_code.description());
        return Ok(());
    }
    let task_id = submission.task_id.unwrap();

    let response = loop {
        let status = service.get_task_status(&task_id)?;
        if status.status.is_terminal() {
            break status.solution.expect("terminal task carries a solution");
        }
        sleep(Duration::from_millis(100));
    };

    println!(
        "{} mosaic(s), {:.1}% of stock used, {} panel(s) unplaced",
        response.mosaics.len(),
        response.total_used_area_ratio * 100.0,
        response.no_fit_panels.len()
    );
    Ok(())
}
