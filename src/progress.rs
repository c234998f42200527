/*!
 * Progress reporting.
 *
 * The controller reports what it does through `ProgressObserver` and never
 * draws anything itself. `NoopObserver` is the library default; the binary
 * plugs in `ProgressBarObserver`, which renders indicatif bars.
 */

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;

use crate::app_controller::RunSummary;
use crate::errors::FileTranslationError;

/// How a single document ended
#[derive(Debug)]
pub enum FileOutcome<'a> {
    /// Output written to the given path
    Translated { output: &'a Path },
    /// Not processed (already a translation output)
    Skipped,
    /// Abandoned; nothing was written
    Failed { error: &'a FileTranslationError },
}

/// Callbacks invoked by the controller. All methods default to doing nothing.
pub trait ProgressObserver: Send + Sync {
    fn on_files_discovered(&self, _total: usize) {}

    /// `index` is 0-based within the discovered files
    fn on_file_started(&self, _path: &Path, _index: usize, _total: usize) {}

    fn on_chunks_planned(&self, _path: &Path, _chunk_count: usize) {}

    fn on_chunk_translated(&self, _path: &Path, _ordinal: usize, _chunk_count: usize, _elapsed: Duration) {}

    fn on_file_finished(&self, _path: &Path, _outcome: &FileOutcome<'_>) {}

    fn on_run_finished(&self, _summary: &RunSummary) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Terminal progress bars: one for files, one for the chunks of the current file
pub struct ProgressBarObserver {
    multi_progress: MultiProgress,
    files_bar: Mutex<Option<ProgressBar>>,
    chunks_bar: Mutex<Option<ProgressBar>>,
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarObserver {
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            files_bar: Mutex::new(None),
            chunks_bar: Mutex::new(None),
        }
    }

    fn style(unit: &str) -> ProgressStyle {
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        );
        ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_files_discovered(&self, total: usize) {
        let bar = self.multi_progress.add(ProgressBar::new(total as u64));
        bar.set_style(Self::style("files"));
        bar.set_message("Processing files");
        *self.files_bar.lock() = Some(bar);
    }

    fn on_file_started(&self, path: &Path, _index: usize, _total: usize) {
        if let Some(bar) = self.files_bar.lock().as_ref() {
            bar.set_message(format!("Processing: {}", Self::file_name(path)));
        }
    }

    fn on_chunks_planned(&self, _path: &Path, chunk_count: usize) {
        let bar = self.multi_progress.add(ProgressBar::new(chunk_count as u64));
        bar.set_style(Self::style("chunks"));
        bar.set_message("Translating");
        *self.chunks_bar.lock() = Some(bar);
    }

    fn on_chunk_translated(&self, _path: &Path, ordinal: usize, _chunk_count: usize, _elapsed: Duration) {
        if let Some(bar) = self.chunks_bar.lock().as_ref() {
            bar.set_position(ordinal as u64 + 1);
        }
    }

    fn on_file_finished(&self, _path: &Path, _outcome: &FileOutcome<'_>) {
        // Clear the chunk bar so only the files bar stays on screen
        if let Some(bar) = self.chunks_bar.lock().take() {
            bar.finish_and_clear();
            self.multi_progress.remove(&bar);
        }
        if let Some(bar) = self.files_bar.lock().as_ref() {
            bar.inc(1);
        }
    }

    fn on_run_finished(&self, summary: &RunSummary) {
        if let Some(bar) = self.files_bar.lock().take() {
            bar.finish_with_message(format!("Done: {} translated, {} failed", summary.translated.len(), summary.failure_count()));
        }
    }
}
