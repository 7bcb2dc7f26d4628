//! Input sources for segmentation

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Text to segment, from any of several sources
///
/// Conversion to text happens before segmentation starts, so a read or
/// decoding failure never produces partial output.
pub enum Input {
    /// Owned text
    Text(String),
    /// File path, read as UTF-8
    File(PathBuf),
    /// Raw bytes, decoded as UTF-8
    Bytes(Vec<u8>),
    /// Stream such as stdin
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl Input {
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read and decode the input
    pub fn into_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => decode(fs::read(&path)?, || path.display().to_string()),
            Input::Bytes(bytes) => decode(bytes, || "byte input".to_string()),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer)?;
                decode(buffer, || "stream".to_string())
            }
        }
    }
}

fn decode(bytes: Vec<u8>, source: impl FnOnce() -> String) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::InvalidInput {
        reason: format!(
            "{} is not valid UTF-8 (at byte {})",
            source(),
            e.utf8_error().valid_up_to()
        ),
    })
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}
