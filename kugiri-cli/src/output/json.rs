//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use kugiri_core::{Boundary, BoundaryKind};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs sentences as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sentences: Vec<SentenceData>,
}

/// One sentence in the JSON output
#[derive(Debug, Serialize)]
pub struct SentenceData {
    /// Sentence text with surrounding whitespace removed
    pub text: String,
    /// Codepoint offset where the boundary span starts
    pub offset: usize,
    /// Codepoint offset one past the end of the span
    pub end: usize,
    /// Span length in codepoints
    pub length: usize,
    pub kind: BoundaryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, boundary: &Boundary<'_>, source: Option<&str>) -> Result<()> {
        self.sentences.push(SentenceData {
            text: boundary.sentence().to_string(),
            offset: boundary.start_index,
            end: boundary.end_index,
            length: boundary.char_len(),
            kind: boundary.kind,
            source: source.map(str::to_string),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.sentences)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
