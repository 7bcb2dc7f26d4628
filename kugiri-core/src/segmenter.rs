//! Segmenter: the pipeline from text to sentence spans

use std::sync::Arc;

use crate::assembler::assemble;
use crate::classifier::{classify, Context};
use crate::enclosure::EnclosureTracker;
use crate::error::Result;
use crate::input::Input;
use crate::language::{self, FallbackPolicy, RuleSet};
use crate::scanner::scan;
use crate::types::{Boundary, Candidate};

/// Sentence segmenter bound to one language
///
/// Cheap to clone and safe to share between threads; every call is
/// independent.
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Arc<RuleSet>,
}

impl Segmenter {
    /// Segmenter for an embedded language, failing on unknown codes
    pub fn new(language: &str) -> Result<Self> {
        Self::builder().language(language).build()
    }

    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::default()
    }

    /// Segmenter using a caller-compiled rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// The rule set in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Sentence boundaries in text order
    pub fn boundaries<'a>(&self, text: &'a str) -> Vec<Boundary<'a>> {
        let rules = self.rules.as_ref();
        let context = Context::new(text);
        let mut tracker = EnclosureTracker::new();
        let mut ready: Vec<Candidate> = Vec::new();
        let mut accepted: Vec<Candidate> = Vec::new();

        for event in scan(text, rules) {
            tracker.observe(event, &mut ready);
            accept_ready(&mut ready, &mut accepted, &context, rules);
        }
        tracker.finish(&mut ready);
        accept_ready(&mut ready, &mut accepted, &context, rules);

        assemble(text, &accepted)
    }

    /// Whitespace-trimmed sentences in text order
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.boundaries(text)
            .iter()
            .map(|boundary| boundary.sentence().to_string())
            .collect()
    }

    /// Read an input and segment it
    pub fn segment_input(&self, input: Input) -> Result<Vec<String>> {
        let text = input.into_text()?;
        Ok(self.segment(&text))
    }

    /// Segment the visible text of an HTML document
    #[cfg(feature = "html")]
    pub fn segment_html(
        &self,
        html: &str,
        config: &crate::html::HtmlConfig,
    ) -> Result<crate::html::HtmlSegmentation> {
        let document = crate::html::HtmlDocument::parse(html, &config.exclude_elements)?;
        let boundaries = self.boundaries(document.text());
        let sentences = document.sentences(&boundaries);
        let marked_html = config.add_marks.then(|| document.mark(&sentences));
        Ok(crate::html::HtmlSegmentation {
            sentences,
            marked_html,
        })
    }
}

fn accept_ready(
    ready: &mut Vec<Candidate>,
    accepted: &mut Vec<Candidate>,
    context: &Context<'_>,
    rules: &RuleSet,
) {
    accepted.extend(
        ready
            .drain(..)
            .filter(|candidate| classify(candidate, context, rules).is_accept()),
    );
}

/// Builder for [`Segmenter`]
#[derive(Debug, Clone)]
pub struct SegmenterBuilder {
    language: String,
    fallback: FallbackPolicy,
}

impl Default for SegmenterBuilder {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            fallback: FallbackPolicy::Strict,
        }
    }
}

impl SegmenterBuilder {
    /// Language code; defaults to `en`
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = code.into();
        self
    }

    /// What to do when the language code is not supported
    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    pub fn build(self) -> Result<Segmenter> {
        let rules = language::lookup_with(&self.language, &self.fallback)?;
        Ok(Segmenter { rules })
    }
}
