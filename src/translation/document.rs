/*!
 * Document and language pair model.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{FileTranslationError, ValidationError};
use crate::language_utils;

/// A Markdown document loaded into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the document was read from
    pub path: PathBuf,
    /// Full UTF-8 content
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk. Missing files and non UTF-8 content are read errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FileTranslationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FileTranslationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, content))
    }
}

/// Declared source and target languages of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    /// Build a pair, rejecting target codes outside the supported table
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Result<Self, ValidationError> {
        let source = source.into();
        let target = target.into();

        if source.trim().is_empty() {
            return Err(ValidationError::InvalidConfig("Source language must not be empty".to_string()));
        }
        language_utils::validate_target_language(&target)?;

        Ok(Self { source, target })
    }

    /// Descriptive source language name for prompts
    pub fn source_name(&self) -> &str {
        language_utils::get_language_name(&self.source)
    }

    /// Descriptive target language name for prompts
    pub fn target_name(&self) -> &str {
        language_utils::get_language_name(&self.target)
    }
}
