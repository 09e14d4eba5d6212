//! Progress reporting functionality
//!
//! A spinner shown while waiting on the model. Quiet mode, and stderr that
//! is not a terminal, get no spinner at all.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner around one long-running step
pub struct Spinner {
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl Spinner {
    /// Start spinning with `message`
    pub fn start(message: &str, quiet: bool, verbose: bool) -> Self {
        if verbose {
            eprintln!("Starting: {}", message);
        }
        if quiet {
            return Self { bar: None, verbose };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar: Some(bar),
            verbose,
        }
    }

    /// Replace the message while still spinning
    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Stop and leave `message` on the line
    pub fn finish(self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
        if self.verbose {
            eprintln!("Finished: {}", message);
        }
    }

    /// Stop and erase the spinner line
    pub fn abandon(self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.as_ref().map(ProgressBar::is_hidden).unwrap_or(true)
    }
}
