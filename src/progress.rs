//! Progress indicators for condactl.
//!
//! Thin spinner helpers over indicatif; each finish variant clears the
//! spinner line and hands the message to the matching ui printer.

use indicatif::ProgressBar;
use std::time::Duration;

use crate::ui;

/// Start a spinner with a message.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(msg.to_string());
    pb
}

/// Clear the spinner and print a success message.
pub fn finish_success(pb: &ProgressBar, msg: &str) {
    pb.finish_and_clear();
    ui::success(msg);
}

/// Clear the spinner and print an error message.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    pb.finish_and_clear();
    ui::error(msg);
}

/// Clear the spinner without printing anything.
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
