//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::Result;
use std::path::PathBuf;

/// Pattern that selects standard input
pub const STDIN_PATTERN: &str = "-";

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Name shown in progress output and JSON records
    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => FileReader::read_stdin(),
            InputSource::File(path) => FileReader::read_text(path),
        }
    }
}

/// Resolve command-line patterns into sources
///
/// `-` selects standard input once, ahead of any files.
pub fn resolve_sources(patterns: &[String]) -> Result<Vec<InputSource>> {
    let (stdin, files): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.as_str() == STDIN_PATTERN);

    let mut sources = Vec::new();
    if !stdin.is_empty() {
        sources.push(InputSource::Stdin);
    }
    if !files.is_empty() || sources.is_empty() {
        let files: Vec<String> = files.into_iter().cloned().collect();
        sources.extend(resolve_patterns(&files)?.into_iter().map(InputSource::File));
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stdin_only() {
        let sources = resolve_sources(&["-".to_string(), "-".to_string()]).unwrap();
        assert_eq!(sources, vec![InputSource::Stdin]);
        assert_eq!(sources[0].label(), "<stdin>");
    }

    #[test]
    fn test_stdin_comes_before_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "One.").unwrap();

        let patterns = vec![file.display().to_string(), "-".to_string()];
        let sources = resolve_sources(&patterns).unwrap();
        assert_eq!(sources, vec![InputSource::Stdin, InputSource::File(file)]);
    }

    #[test]
    fn test_no_patterns_is_an_error() {
        assert!(resolve_sources(&[]).is_err());
    }
}
