use log::warn;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::AppError;

// @module: File and directory utilities

/// Extension of the documents the tool translates
pub const MARKDOWN_EXTENSION: &str = "md";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed; succeeds when it already exists
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(path)
    }

    /// Write a string to a file, creating parent directories and overwriting any existing file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content)
    }

    // @checks: Markdown extension (case-insensitive)
    pub fn is_markdown_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
    }

    /// True when the file already is a translation output for `target_language` (`name.<target>.md`)
    pub fn is_translation_output<P: AsRef<Path>>(path: P, target_language: &str) -> bool {
        let path = path.as_ref();
        if !Self::is_markdown_file(path) {
            return false;
        }
        path.file_stem()
            .and_then(OsStr::to_str)
            .and_then(|stem| stem.rsplit_once('.'))
            .is_some_and(|(_, suffix)| suffix == target_language)
    }

    /// Find Markdown files under `dir`.
    ///
    /// Only direct children are listed unless `recursive` is set. Order follows the
    /// filesystem enumeration and is not sorted. Unreadable entries are logged and skipped.
    pub fn find_markdown_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>, AppError> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(AppError::Discovery {
                path: dir.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut walker = WalkDir::new(dir).min_depth(1).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut result = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && Self::is_markdown_file(entry.path()) {
                        result.push(entry.into_path());
                    }
                }
                Err(e) => warn!("Skipping unreadable directory entry: {}", e),
            }
        }

        Ok(result)
    }

    // @generates: Output path for a translated document
    // @params: input_file, input_root, output_root (None = beside the source), target_language
    //
    // Pure: never touches the filesystem.
    pub fn map_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        input_root: P2,
        output_root: Option<&Path>,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();

        let base = match output_root {
            Some(output_root) => {
                let relative = match input_file.strip_prefix(input_root.as_ref()) {
                    Ok(relative) => relative.to_path_buf(),
                    // Not under the root: keep only the file name
                    Err(_) => input_file.file_name().map(PathBuf::from).unwrap_or_default(),
                };
                output_root.join(relative)
            }
            None => input_file.to_path_buf(),
        };

        let stem = base.file_stem().unwrap_or_default().to_string_lossy();
        let mut output_filename = stem.to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push('.');
        output_filename.push_str(MARKDOWN_EXTENSION);

        base.with_file_name(output_filename)
    }
}
