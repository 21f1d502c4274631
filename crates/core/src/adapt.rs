//! Adapters that turn third-party structural predictions into
//! space-delimited hex lines the scorer can read.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdaptError {
    #[error("Rule file has no non-blank line")]
    EmptyRule,

    #[error("Invalid log pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Normalize a hyphen/space separated hex line: drop every `-`, collapse
/// whitespace to single spaces and uppercase each token.
pub fn normalize_line(line: &str) -> String {
    line.replace('-', "")
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed field widths (in hex characters) applied to every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRule {
    pub widths: Vec<usize>,
}

impl SegmentRule {
    /// Build from rule text. The first non-blank line is used; `|` and
    /// whitespace both separate fields and each field's length becomes a
    /// width.
    pub fn parse(text: &str) -> Result<Self, AdaptError> {
        let line =
            text.lines().map(str::trim).find(|l| !l.is_empty()).ok_or(AdaptError::EmptyRule)?;
        let widths = line.replace('|', " ").split_whitespace().map(|t| t.chars().count()).collect();
        Ok(Self { widths })
    }

    /// Cut `line` into fields of the rule's widths.
    ///
    /// A field that would reach or pass the end of the line takes everything
    /// left; characters remaining after the last width form one more field.
    pub fn apply(&self, line: &str) -> String {
        let chars: Vec<char> = line.trim().chars().collect();
        let mut parts: Vec<String> = Vec::new();
        let mut index = 0;

        for &width in &self.widths {
            if index >= chars.len() {
                break;
            }
            if chars.len() - index <= width {
                parts.push(chars[index..].iter().collect());
                index = chars.len();
                break;
            }
            parts.push(chars[index..index + width].iter().collect());
            index += width;
        }
        if index < chars.len() {
            parts.push(chars[index..].iter().collect());
        }

        parts.join(" ")
    }
}

/// Pulls predicted lines out of a model inference log.
#[derive(Debug, Clone)]
pub struct LogExtractor {
    pattern: Regex,
}

impl LogExtractor {
    pub const PATTERN: &'static str = r"ByteF\s+\d+:\s*(.*)";

    pub fn new() -> Result<Self, AdaptError> {
        Ok(Self { pattern: Regex::new(Self::PATTERN)? })
    }

    /// The prediction carried by `line`, if it is a `ByteF <n>: ...` entry.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str().trim())
    }
}
