//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use kugiri_core::Boundary;
use std::io::Write;

/// Text formatter - outputs one sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, boundary: &Boundary<'_>, _source: Option<&str>) -> Result<()> {
        writeln!(self.writer, "{}", boundary.sentence())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
