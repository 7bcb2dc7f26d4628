//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use kugiri_core::Boundary;
use std::io::Write;

/// Markdown formatter - outputs sentences as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sentence_count: usize,
    current_source: Option<String>,
}

impl<W: Write> MarkdownFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentence_count: 0,
            current_source: None,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_sentence(&mut self, boundary: &Boundary<'_>, source: Option<&str>) -> Result<()> {
        if let Some(source) = source {
            if self.current_source.as_deref() != Some(source) {
                if self.current_source.is_some() {
                    writeln!(self.writer)?;
                }
                writeln!(self.writer, "## {source}")?;
                writeln!(self.writer)?;
                self.current_source = Some(source.to_string());
            }
        }

        self.sentence_count += 1;
        writeln!(self.writer, "{}. {}", self.sentence_count, boundary.sentence())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
