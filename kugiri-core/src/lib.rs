//! Multilingual rule-based sentence boundary detection
//!
//! Given a language code and a text, kugiri finds where each sentence ends.
//! It is deterministic and driven by per-language rule sets; supporting a
//! new language means writing data, not code.
//!
//! # Architecture
//!
//! One left-to-right pass over the text:
//! - **Scanner**: emits candidate breaks (terminal punctuation runs and
//!   paragraph breaks) and quote/bracket marks
//! - **Enclosure tracking**: holds back candidates inside open quotes and
//!   brackets until they close
//! - **Classifier**: accepts or rejects each candidate from its local
//!   context (abbreviations, numbers, initials, continuation words)
//! - **Assembler**: turns accepted breaks into exact, ordered spans
//!
//! # Example
//!
//! ```rust
//! let sentences = kugiri_core::segment("en", "Dr. Smith arrived. He sat down.").unwrap();
//! assert_eq!(sentences, vec!["Dr. Smith arrived.", "He sat down."]);
//!
//! let text = "First. Second.";
//! let boundaries = kugiri_core::get_sentence_boundaries("en", text).unwrap();
//! assert_eq!(boundaries[0].start_index, 0);
//! assert!(boundaries[1].start_index >= boundaries[0].end_index);
//! ```

pub mod assembler;
pub mod character_window;
pub mod classifier;
pub mod enclosure;
pub mod error;
#[cfg(feature = "html")]
pub mod html;
pub mod input;
pub mod language;
pub mod scanner;
pub mod segmenter;
pub mod types;

pub use error::{Error, Result};
#[cfg(feature = "html")]
pub use html::{HtmlConfig, HtmlDocument, HtmlRange, HtmlSegmentation, HtmlSentence};
pub use input::Input;
pub use language::{
    is_supported, supported_languages, FallbackPolicy, LanguageConfig, LanguageInfo, RuleSet,
    RuleSetStats,
};
pub use segmenter::{Segmenter, SegmenterBuilder};
pub use types::{Boundary, BoundaryKind};

/// Split `text` into whitespace-trimmed sentences
///
/// Fails with [`Error::UnsupportedLanguage`] if `language` does not resolve
/// to an embedded rule set.
pub fn segment(language: &str, text: &str) -> Result<Vec<String>> {
    Ok(Segmenter::new(language)?.segment(text))
}

/// Sentence spans with exact codepoint offsets and untrimmed text
pub fn get_sentence_boundaries<'a>(language: &str, text: &'a str) -> Result<Vec<Boundary<'a>>> {
    Ok(Segmenter::new(language)?.boundaries(text))
}

/// Segment the visible text of an HTML document
///
/// Sentences carry the byte ranges of the text nodes they cover; see
/// [`Segmenter::segment_html`].
#[cfg(feature = "html")]
pub fn segment_html(language: &str, html: &str, config: &HtmlConfig) -> Result<HtmlSegmentation> {
    Segmenter::new(language)?.segment_html(html, config)
}
