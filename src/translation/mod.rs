/*!
 * Translation of Markdown documents using AI providers.
 *
 * It is split into several submodules:
 *
 * - `estimator`: Approximate token accounting
 * - `chunker`: Splitting documents into size-bounded chunks
 * - `document`: Document and language pair model
 * - `prompts`: Prompt templates and builders for translation
 * - `core`: Core translation functionality and service definition
 */

// Re-export main types for easier usage
pub use self::chunker::{Chunk, split_into_chunks};
pub use self::core::{TokenUsageStats, TranslationOutput, TranslationService};
pub use self::document::{Document, LanguagePair};
pub use self::estimator::estimate_tokens;
pub use self::prompts::{PromptTemplate, TranslationPromptBuilder};

// Submodules
pub mod chunker;
pub mod core;
pub mod document;
pub mod estimator;
pub mod prompts;
