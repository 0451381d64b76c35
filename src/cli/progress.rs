//! Progress display for the CLI's `optimize` command, built on indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A bounded bar showing a task's `percentage_done` (spec.md §4.1).
pub fn task_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .expect("static template")
            .progress_chars("=>-"),
    );
    bar
}

/// An indeterminate spinner for steps without a percentage (file loading,
/// validation).
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
            .expect("static template"),
    );
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
