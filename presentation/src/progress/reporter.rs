//! Progress reporting while waiting for a reply

use indicatif::{ProgressBar, ProgressStyle};
use revchat_application::ExchangeProgressNotifier;
use revchat_domain::{ExchangeState, Model};
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner from request start until the first chunk arrives.
///
/// The spinner draws on stderr and is cleared before any reply text reaches
/// stdout.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeProgressNotifier for ProgressReporter {
    fn on_request_started(&self, model: &Model) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("Waiting for {}...", model));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_first_chunk(&self) {
        self.clear();
    }

    fn on_finished(&self, _state: ExchangeState) {
        self.clear();
    }
}
