//! Terminal progress for solve attempts

use crate::algorithm::executor::SolveObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per solve attempt
///
/// The bar tracks decided cells. A failed attempt leaves its bar behind with
/// the contradiction position so retries stay visible.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    hidden: bool,
    attempts_failed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub const fn new() -> Self {
        Self {
            bar: None,
            hidden: false,
            attempts_failed: 0,
        }
    }

    /// Create a progress manager that tracks state without drawing
    pub const fn hidden() -> Self {
        Self {
            bar: None,
            hidden: true,
            attempts_failed: 0,
        }
    }

    /// Number of attempts that ended in a contradiction so far
    pub const fn attempts_failed(&self) -> usize {
        self.attempts_failed
    }

    /// Current position of the active bar
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    fn new_bar(&self) -> ProgressBar {
        let bar = ProgressBar::new(0);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(ATTEMPT_STYLE.clone());
        bar
    }
}

impl SolveObserver for ProgressManager {
    fn attempt_started(&mut self, attempt: usize, max_attempts: usize) {
        let bar = self.new_bar();
        bar.set_prefix(format!("Attempt {attempt}/{max_attempts}"));
        self.bar = Some(bar);
    }

    fn cell_collapsed(&mut self, decided: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(decided as u64);
        }
    }

    fn attempt_failed(&mut self, _attempt: usize, position: [usize; 2]) {
        self.attempts_failed += 1;
        if let Some(bar) = self.bar.take() {
            bar.abandon_with_message(format!(
                "contradiction at ({}, {})",
                position[0], position[1]
            ));
        }
    }

    fn smoothing_applied(&mut self, reassigned: usize) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("smoothed {reassigned}"));
        }
    }

    fn solved(&mut self, _attempt: usize) {
        if let Some(bar) = &self.bar {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
            bar.finish();
        }
    }
}
