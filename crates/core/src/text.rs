//! Encoding-aware loading of line-oriented text files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid {encoding} (line {line})")]
    Decode { path: PathBuf, encoding: TextEncoding, line: usize },

    #[error("Unknown text encoding '{0}'. Allowed: utf-8, ascii, latin-1")]
    UnknownEncoding(String),
}

/// Supported input encodings.
///
/// Deserialization goes through [`FromStr`], so config files accept the same
/// spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode one line of raw bytes; `None` if the bytes are not valid in
    /// this encoding.
    pub fn decode_line(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            TextEncoding::Ascii => {
                bytes.is_ascii().then(|| bytes.iter().map(|&b| char::from(b)).collect())
            }
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = TextError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Ok(match normalized.as_str() {
            "utf-8" | "utf8" => Self::Utf8,
            "ascii" | "us-ascii" => Self::Ascii,
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Self::Latin1,
            _ => return Err(TextError::UnknownEncoding(value.to_string())),
        })
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Split raw bytes into lines. `\n`, `\r\n` and a lone `\r` each end a
/// line; a final unterminated line still counts.
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\n' => {
                lines.push(&bytes[start..index]);
                index += 1;
                start = index;
            }
            b'\r' => {
                lines.push(&bytes[start..index]);
                index += if bytes.get(index + 1) == Some(&b'\n') { 2 } else { 1 };
                start = index;
            }
            _ => index += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

/// Read all lines of `path` using `encoding`.
pub fn read_lines(path: &Path, encoding: TextEncoding) -> Result<Vec<String>, TextError> {
    let bytes =
        fs::read(path).map_err(|source| TextError::Io { path: path.to_path_buf(), source })?;

    split_lines(&bytes)
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            encoding.decode_line(raw).ok_or_else(|| TextError::Decode {
                path: path.to_path_buf(),
                encoding,
                line: index + 1,
            })
        })
        .collect()
}
