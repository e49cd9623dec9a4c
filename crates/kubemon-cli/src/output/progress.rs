use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::time::Duration;

/// A spinner shown while a one-shot command waits on the backend
#[derive(Debug)]
pub struct Spinner {
    bar: IndicatifBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = IndicatifBar::new_spinner();

        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]))
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// A spinner that draws nothing, for JSON output and non-terminals
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
