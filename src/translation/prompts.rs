/*!
 * Prompt templates for Markdown translation.
 *
 * A request is always three role-tagged messages, in this order:
 * 1. system: the translator role, declared languages and document format
 * 2. system: the Markdown rules the output must follow
 * 3. user: the chunk text
 *
 * Construction is deterministic for a given (text, languages) input.
 */

use crate::providers::openai::OpenAIMessage;
use crate::translation::document::LanguagePair;

/// System prompt template with placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Translator role, languages and format.
    pub const MARKDOWN_TRANSLATOR: &'static str = "You are a translation tool. You receive a snippet of a file \
written in {format}. The snippet is written in {source_language}. Return the same snippet translated into \
{target_language}, and nothing else. Do not add commentary, explanations or notes. Keep the original structure, \
content, writing style and tone.";

    /// Rules that apply to every snippet.
    pub const MARKDOWN_RULES: &'static str = "Follow these rules strictly:
- Do not translate code: leave fenced code blocks and inline code spans exactly as they are.
- Do not translate image source paths (the URL inside ![...](...) or the src attribute of <img> tags).
- Do translate image alt text (the text inside ![...] or the alt attribute of <img> tags).
- Preserve all Markdown syntax and structure: headings, lists, tables, links, emphasis, blank lines and line breaks.
- Do not add, remove or reorder any content.";

    /// Document format named in the prompt
    pub const FORMAT: &'static str = "Markdown";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default translator template.
    pub fn markdown_translator() -> Self {
        Self::new(Self::MARKDOWN_TRANSLATOR)
    }

    /// Render the template with the given variables.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{format}", Self::FORMAT)
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::markdown_translator()
    }
}

/// Builder for the messages of one translation request.
#[derive(Debug, Clone)]
pub struct TranslationPromptBuilder {
    source_name: String,
    target_name: String,
    template: PromptTemplate,
}

impl TranslationPromptBuilder {
    /// Create a builder for the given languages; codes are resolved to descriptive names.
    pub fn new(languages: &LanguagePair) -> Self {
        Self {
            source_name: languages.source_name().to_string(),
            target_name: languages.target_name().to_string(),
            template: PromptTemplate::default(),
        }
    }

    /// Use a different translator template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Rendered translator instruction
    pub fn system_prompt(&self) -> String {
        self.template.render(&self.source_name, &self.target_name)
    }

    /// Build the ordered messages for a chunk.
    pub fn build_messages(&self, chunk_text: &str) -> Vec<OpenAIMessage> {
        vec![
            OpenAIMessage::new("system", self.system_prompt()),
            OpenAIMessage::new("system", PromptTemplate::MARKDOWN_RULES),
            OpenAIMessage::new("user", chunk_text),
        ]
    }
}
