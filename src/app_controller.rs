/*!
 * Application controller for Markdown translation.
 *
 * `Controller::translate_file` turns one document into its translation, all or
 * nothing. `Controller::run_folder` and `Controller::run` drive it over a tree or
 * a single file and collect the outcome in a `RunSummary`.
 */

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{AppError, FileTranslationError, ValidationError};
use crate::file_utils::FileManager;
use crate::progress::{FileOutcome, NoopObserver, ProgressObserver};
use crate::providers::Provider;
use crate::translation::chunker::{reassemble, split_into_chunks};
use crate::translation::{Document, LanguagePair, TranslationService};

/// A document that could not be translated
#[derive(Debug)]
pub struct FileFailure {
    /// Input document
    pub input: PathBuf,
    /// What went wrong
    pub error: FileTranslationError,
}

/// Outcome of a run over one file or a directory tree
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of Markdown files found
    pub discovered: usize,
    /// (input, output) pairs that were written
    pub translated: Vec<(PathBuf, PathBuf)>,
    /// Inputs skipped because they already are translation outputs
    pub skipped: Vec<PathBuf>,
    /// Inputs that failed; nothing was written for them
    pub failures: Vec<FileFailure>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when no file failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main application controller for Markdown translation
///
/// Files are processed one at a time and chunks strictly in order. A failure
/// on one file is recorded and the run moves on to the next file.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation client shared by every request of the run
    service: TranslationService,
    // @field: Progress callbacks
    observer: Arc<dyn ProgressObserver>,
}

impl Controller {
    // @method: Create a new controller talking to the configured HTTP service
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let service = TranslationService::new(config.translation.clone())
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            service,
            observer: Arc::new(NoopObserver),
        })
    }

    // @method: Create a controller over any provider (test doubles, custom transports)
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Self {
        let service = TranslationService::with_provider(config.translation.clone(), provider);
        Self {
            config,
            service,
            observer: Arc::new(NoopObserver),
        }
    }

    // @method: Replace the progress observer
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Validated language pair from the configuration
    pub fn language_pair(&self) -> Result<LanguagePair, ValidationError> {
        LanguagePair::new(&self.config.source_language, &self.config.target_language)
    }

    /// Translate one document: read, split, translate every chunk in order, write.
    ///
    /// If any chunk fails the whole document is abandoned and nothing is written.
    pub async fn translate_file(&self, input_file: &Path, output_file: &Path, languages: &LanguagePair) -> Result<PathBuf, FileTranslationError> {
        let document = Document::load(input_file)?;

        let chunks = split_into_chunks(&document.content, self.service.max_tokens());
        debug!("{}: {} line(s) split into {} chunk(s)",
            input_file.display(),
            document.content.lines().count(),
            chunks.len());
        self.observer.on_chunks_planned(input_file, chunks.len());

        let mut translated_chunks = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let output = self.service
                .translate_text_with_usage(&chunk.text, languages)
                .await
                .map_err(|source| FileTranslationError::Translation {
                    path: input_file.to_path_buf(),
                    ordinal: chunk.ordinal,
                    source,
                })?;

            self.observer.on_chunk_translated(input_file, chunk.ordinal, chunks.len(), output.duration);
            translated_chunks.push(output.text);
        }

        let translated_text = reassemble(translated_chunks.iter().map(String::as_str));

        FileManager::write_to_file(output_file, &translated_text).map_err(|source| FileTranslationError::Write {
            path: output_file.to_path_buf(),
            source,
        })?;

        info!("Translation saved to {}", output_file.display());
        Ok(output_file.to_path_buf())
    }

    /// Translate a single file. `output_dir` of `None` writes beside the source.
    pub async fn run(&self, input_file: &Path, output_dir: Option<&Path>) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();
        let languages = self.preflight()?;

        let input_root = input_file.parent().unwrap_or(Path::new("")).to_path_buf();
        let files = vec![input_file.to_path_buf()];

        let summary = self.process_files(&files, &input_root, output_dir, &languages, start_time).await;
        Ok(summary)
    }

    /// Translate every Markdown file under `input_dir`.
    ///
    /// With `output_dir` the tree layout is mirrored below it; without it each
    /// translation is written beside its source.
    pub async fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, recursive: bool) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();
        let languages = self.preflight()?;

        let files = FileManager::find_markdown_files(input_dir, recursive)?;
        info!("Total markdown files found: {}", files.len());

        let summary = self.process_files(&files, input_dir, output_dir, &languages, start_time).await;
        Ok(summary)
    }

    /// Checks that must pass before any file is touched
    fn preflight(&self) -> Result<LanguagePair, AppError> {
        self.config.validate()?;
        Ok(self.language_pair()?)
    }

    async fn process_files(
        &self,
        files: &[PathBuf],
        input_root: &Path,
        output_root: Option<&Path>,
        languages: &LanguagePair,
        start_time: Instant,
    ) -> RunSummary {
        let mut summary = RunSummary {
            discovered: files.len(),
            ..RunSummary::default()
        };
        self.observer.on_files_discovered(files.len());

        for (index, input_file) in files.iter().enumerate() {
            self.observer.on_file_started(input_file, index, files.len());

            if FileManager::is_translation_output(input_file, &languages.target) {
                debug!("Skipping {}, already a '{}' translation", input_file.display(), languages.target);
                self.observer.on_file_finished(input_file, &FileOutcome::Skipped);
                summary.skipped.push(input_file.clone());
                continue;
            }

            let output_file = FileManager::map_output_path(input_file, input_root, output_root, &languages.target);
            info!("Processing file: {}", input_file.display());

            match self.translate_file(input_file, &output_file, languages).await {
                Ok(output) => {
                    self.observer.on_file_finished(input_file, &FileOutcome::Translated { output: &output });
                    summary.translated.push((input_file.clone(), output));
                }
                Err(error) => {
                    error!("{}", error);
                    self.observer.on_file_finished(input_file, &FileOutcome::Failed { error: &error });
                    summary.failures.push(FileFailure {
                        input: input_file.clone(),
                        error,
                    });
                }
            }
        }

        summary.elapsed = start_time.elapsed();

        info!("All files processed: {} translated, {} skipped, {} errors in {}",
            summary.translated.len(),
            summary.skipped.len(),
            summary.failure_count(),
            Self::format_duration(summary.elapsed));

        let usage = self.service.token_usage();
        if usage.requests > 0 {
            info!("{}", usage.summary());
        }

        self.observer.on_run_finished(&summary);
        summary
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
