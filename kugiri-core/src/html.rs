//! Sentence segmentation over HTML documents
//!
//! The document is parsed with tree-sitter, its visible text is joined into
//! one plain string, and the plain-text segmenter runs over that string.
//! Every sentence is then mapped back to the byte ranges of the HTML text
//! nodes it covers, so callers can highlight sentences in place.
//!
//! Text nodes under different block elements are joined with a paragraph
//! break, so a heading never runs into the paragraph after it. Inline
//! elements (`<em>`, `<a>`, ...) keep their text in the same sentence.

use std::ops::Range;

use serde::Serialize;
use tree_sitter::{Node, Parser};

use crate::error::{Error, Result};
use crate::types::{Boundary, BoundaryKind};

/// Elements whose content is never segmented by default
pub const DEFAULT_EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "math", "pre", "code", "textarea", "title",
    "meta", "link", "base", "head",
];

/// Elements that flow within a line of text
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u",
    "var", "wbr",
];

const BLOCK_SEPARATOR: &str = "\n\n";

/// HTML segmentation options
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Produce a copy of the document with `<mark data-sent="N">` around
    /// each sentence fragment
    pub add_marks: bool,
    /// Lowercase tag names whose content is skipped
    pub exclude_elements: Vec<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            add_marks: true,
            exclude_elements: DEFAULT_EXCLUDED_ELEMENTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Byte range of one sentence fragment in the HTML source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HtmlRange {
    pub start_byte: usize,
    pub end_byte: usize,
}

/// One sentence found in an HTML document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlSentence {
    /// Position of the sentence in document order, from 0
    pub id: usize,
    /// The whitespace-trimmed sentence with entities decoded
    pub text: String,
    /// What ended the sentence
    pub kind: BoundaryKind,
    /// Codepoint offsets in the extracted text
    pub start_index: usize,
    pub end_index: usize,
    /// Source fragments, one per text node the sentence touches
    pub ranges: Vec<HtmlRange>,
}

/// Result of segmenting an HTML document
#[derive(Debug, Clone, Serialize)]
pub struct HtmlSegmentation {
    pub sentences: Vec<HtmlSentence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_html: Option<String>,
}

/// A run of extracted text and where it came from
#[derive(Debug, Clone)]
struct TextSpan {
    /// Bytes in the HTML source
    html: Range<usize>,
    /// Bytes in the extracted text
    text: Range<usize>,
    /// Extracted text equals the source bytes; false for decoded entities
    verbatim: bool,
}

/// Visible text of an HTML document with a map back to the source
#[derive(Debug, Clone)]
pub struct HtmlDocument<'h> {
    html: &'h str,
    text: String,
    spans: Vec<TextSpan>,
}

impl<'h> HtmlDocument<'h> {
    /// Parse `html` and extract the text outside `exclude` elements
    pub fn parse(html: &'h str, exclude: &[String]) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_html::LANGUAGE.into())
            .map_err(|e| Error::Html {
                reason: format!("failed to load HTML grammar: {e}"),
            })?;
        let tree = parser.parse(html, None).ok_or_else(|| Error::Html {
            reason: "parser produced no tree".to_string(),
        })?;

        let mut extractor = Extractor {
            html,
            exclude,
            text: String::with_capacity(html.len()),
            spans: Vec::new(),
            block: None,
        };
        extractor.walk(tree.root_node());

        log::debug!(
            "extracted {} text nodes ({} bytes) from {} bytes of HTML",
            extractor.spans.len(),
            extractor.text.len(),
            html.len()
        );
        Ok(Self {
            html,
            text: extractor.text,
            spans: extractor.spans,
        })
    }

    /// The extracted plain text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map boundaries found in [`text`](Self::text) back onto the source
    pub fn sentences(&self, boundaries: &[Boundary<'_>]) -> Vec<HtmlSentence> {
        let mut first = 0;
        boundaries
            .iter()
            .filter(|boundary| !boundary.sentence().is_empty())
            .enumerate()
            .map(|(id, boundary)| {
                while first < self.spans.len() && self.spans[first].text.end <= boundary.byte_start
                {
                    first += 1;
                }
                let window = boundary.byte_start..boundary.byte_end;
                let ranges = self.spans[first..]
                    .iter()
                    .take_while(|span| span.text.start < window.end)
                    .filter_map(|span| self.source_range(span, &window))
                    .collect();
                HtmlSentence {
                    id,
                    text: boundary.sentence().to_string(),
                    kind: boundary.kind,
                    start_index: boundary.start_index,
                    end_index: boundary.end_index,
                    ranges,
                }
            })
            .collect()
    }

    /// The source with every sentence fragment wrapped in a `<mark>`
    pub fn mark(&self, sentences: &[HtmlSentence]) -> String {
        let mut marked = String::with_capacity(self.html.len() + sentences.len() * 32);
        let mut cursor = 0;
        for sentence in sentences {
            let id = sentence.id.to_string();
            for range in &sentence.ranges {
                if range.start_byte < cursor {
                    continue;
                }
                marked.push_str(&self.html[cursor..range.start_byte]);
                marked.push_str("<mark data-sent=\"");
                marked.push_str(&id);
                marked.push_str("\">");
                marked.push_str(&self.html[range.start_byte..range.end_byte]);
                marked.push_str("</mark>");
                cursor = range.end_byte;
            }
        }
        marked.push_str(&self.html[cursor..]);
        marked
    }

    /// Source bytes of the part of `span` inside `window`, whitespace trimmed
    fn source_range(&self, span: &TextSpan, window: &Range<usize>) -> Option<HtmlRange> {
        let start = span.text.start.max(window.start);
        let end = span.text.end.min(window.end);
        if start >= end {
            return None;
        }
        let slice = &self.text[start..end];
        let trimmed = slice.trim();
        if trimmed.is_empty() {
            return None;
        }
        if !span.verbatim {
            return Some(HtmlRange {
                start_byte: span.html.start,
                end_byte: span.html.end,
            });
        }
        let lead = slice.len() - slice.trim_start().len();
        let start_byte = span.html.start + (start - span.text.start) + lead;
        Some(HtmlRange {
            start_byte,
            end_byte: start_byte + trimmed.len(),
        })
    }
}

struct Extractor<'h, 'x> {
    html: &'h str,
    exclude: &'x [String],
    text: String,
    spans: Vec<TextSpan>,
    /// Block element of the last text pushed
    block: Option<usize>,
}

impl Extractor<'_, '_> {
    fn walk(&mut self, root: Node<'_>) {
        let mut stack = vec![(root, root.id())];
        while let Some((node, mut block)) = stack.pop() {
            match node.kind() {
                "text" => {
                    self.push(node.byte_range(), None, block);
                    continue;
                }
                "entity" => {
                    let decoded = self.html.get(node.byte_range()).and_then(decode_entity);
                    self.push(node.byte_range(), decoded, block);
                    continue;
                }
                "script_element" | "style_element" | "comment" | "doctype" => continue,
                "element" => {
                    let name = tag_name(node, self.html)
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    if self.exclude.iter().any(|excluded| *excluded == name) {
                        continue;
                    }
                    if !INLINE_ELEMENTS.contains(&name.as_str()) {
                        block = node.id();
                    }
                }
                _ => {}
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, block)));
        }
    }

    /// Append one node's text; `decoded` replaces the source for entities
    fn push(&mut self, html: Range<usize>, decoded: Option<char>, block: usize) {
        let Some(raw) = self.html.get(html.clone()) else {
            return;
        };
        if let (Some(last), Some(previous)) = (self.spans.last(), self.block) {
            if previous != block {
                self.text.push_str(BLOCK_SEPARATOR);
            } else if !self.text.ends_with(char::is_whitespace)
                && !raw.starts_with(char::is_whitespace)
                && separated(&self.html[last.html.end..html.start])
            {
                self.text.push(' ');
            }
        }
        self.block = Some(block);

        let start = self.text.len();
        let verbatim = match decoded {
            Some(ch) => {
                self.text.push(ch);
                false
            }
            None => {
                self.text.push_str(raw);
                true
            }
        };
        self.spans.push(TextSpan {
            html,
            text: start..self.text.len(),
            verbatim,
        });
    }
}

/// Whether the markup between two text nodes renders as a space
fn separated(gap: &str) -> bool {
    let mut in_tag = false;
    let mut tag_start = 0;
    for (i, ch) in gap.char_indices() {
        match ch {
            '<' => {
                in_tag = true;
                tag_start = i;
            }
            '>' if in_tag => {
                in_tag = false;
                let tag = gap[tag_start + 1..i].trim_start_matches('/');
                if tag.get(..2).is_some_and(|name| name.eq_ignore_ascii_case("br")) {
                    return true;
                }
            }
            ch if !in_tag && ch.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

fn tag_name<'h>(element: Node<'_>, html: &'h str) -> Option<&'h str> {
    let mut cursor = element.walk();
    let tag = element
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "start_tag" | "self_closing_tag"))?;
    let mut cursor = tag.walk();
    let name = tag
        .children(&mut cursor)
        .find(|child| child.kind() == "tag_name")?;
    html.get(name.byte_range())
}

/// Decode a character reference such as `&amp;` or `&#8230;`
fn decode_entity(raw: &str) -> Option<char> {
    let body = raw.strip_prefix('&')?;
    let body = body.strip_suffix(';').unwrap_or(body);
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> String {
        HtmlDocument::parse(html, &HtmlConfig::default().exclude_elements)
            .unwrap()
            .text()
            .to_string()
    }

    #[test]
    fn test_inline_elements_stay_in_line() {
        assert_eq!(
            extract("<p>This is a <em>bold statement</em> here.</p>"),
            "This is a bold statement here."
        );
        assert_eq!(extract("<p>un<b>believ</b>able</p>"), "unbelievable");
    }

    #[test]
    fn test_blocks_are_separated() {
        assert_eq!(
            extract("<h1>Title</h1><p>Body text</p>"),
            "Title\n\nBody text"
        );
        assert_eq!(extract("<p>One<br>Two</p>"), "One Two");
    }

    #[test]
    fn test_excluded_elements_are_skipped() {
        let text = extract(
            "<html><head><title>T</title></head><body><p>Shown.</p>\
             <script>var x = 1;</script><pre>Hidden. Text.</pre></body></html>",
        );
        assert_eq!(text, "Shown.");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(extract("<p>AT&amp;T &#8230; done</p>"), "AT&T … done");
        assert_eq!(decode_entity("&#x41;"), Some('A'));
        assert_eq!(decode_entity("&unknown;"), None);
    }

    #[test]
    fn test_separated() {
        assert!(separated(" "));
        assert!(separated("</em> <b>"));
        assert!(separated("<br/>"));
        assert!(!separated("</b>"));
        assert!(!separated("<span class=\"a b\">"));
    }
}
