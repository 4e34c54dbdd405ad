//! Terminal progress over generation attempts

use crate::generation::{AttemptState, GenerationProgress};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Generating [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar counting collected images against the target count
///
/// The message shows attempts used out of the budget.
pub struct ProgressManager {
    bar: ProgressBar,
    max_attempts: usize,
}

impl ProgressManager {
    /// Visible progress bar for a generation run
    pub fn new(target_count: usize, max_attempts: usize) -> Self {
        let bar = ProgressBar::new(target_count as u64);
        bar.set_style(ATTEMPT_STYLE.clone());
        Self { bar, max_attempts }
    }

    /// Progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            max_attempts: 0,
        }
    }

    /// Images counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl GenerationProgress for ProgressManager {
    fn on_attempt(&mut self, attempt: usize, state: &AttemptState, collected: usize) {
        self.bar.set_position(collected as u64);
        let max_attempts = self.max_attempts;
        let message = match state {
            AttemptState::Pending => format!("attempt {attempt}/{max_attempts}"),
            AttemptState::Success(_) => format!("attempt {attempt}/{max_attempts} ✓"),
            AttemptState::Skipped(reason) => {
                format!("attempt {attempt}/{max_attempts} skipped: {reason}")
            }
            AttemptState::Exhausted => format!("budget of {max_attempts} attempts spent"),
        };
        self.bar.set_message(message);
    }
}
