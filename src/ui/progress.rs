//! Progress indicators with cron fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress for an artifact download.
///
/// Shows an indicatif bar in interactive mode and nothing otherwise,
/// so scheduled runs keep their logs clean.
pub struct DownloadProgress {
    bar: Option<ProgressBar>,
}

impl DownloadProgress {
    /// Create a progress indicator for a download of `total` bytes, if known
    pub fn new(ctx: &UiContext, label: &str, total: Option<u64>) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = match total {
                Some(len) => ProgressBar::new(len),
                None => ProgressBar::no_length(),
            };
            if let Ok(style) = ProgressStyle::default_bar()
                .template("  {spinner:.cyan} {prefix}  {bar:24.cyan/dim} {bytes}/{total_bytes}  {elapsed:.dim}")
            {
                bar.set_style(style.progress_chars("━╸─"));
            }
            bar.set_prefix(label.to_string());
            Some(bar)
        } else {
            None
        };
        Self { bar }
    }

    /// Record `n` more bytes received
    pub fn inc(&self, n: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(n);
        }
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
