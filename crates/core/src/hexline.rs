//! Hex-line codec.
//!
//! Captured datagrams travel between tools as text: one datagram per line,
//! written as hex digit pairs with optional whitespace in between. Dissection
//! output uses the same alphabet, uppercase, with a single space between
//! segments.

use thiserror::Error;

use crate::model::{Datagram, Segment};

/// A line that cannot be read as a sequence of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("Odd number of hex digits ({digits})")]
    OddLength { digits: usize },

    #[error("Invalid hex character {character:?} at digit {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("Line is not valid UTF-8 (byte {index})")]
    InvalidUtf8 { index: usize },
}

/// Decode one text line into a datagram.
///
/// All whitespace is removed first; the remaining digits are grouped in
/// pairs, most-significant nibble first. Blank input yields an empty
/// datagram.
pub fn decode(line: &str) -> Result<Datagram, HexError> {
    let digits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let count = digits.chars().count();
    if count % 2 != 0 {
        return Err(HexError::OddLength { digits: count });
    }
    if let Some((index, character)) =
        digits.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HexError::InvalidCharacter { character, index });
    }
    let bytes = hex::decode(&digits).map_err(|_| HexError::OddLength { digits: count })?;
    Ok(Datagram::new(bytes))
}

/// Decode one raw input line. Bytes that are not UTF-8 are a malformed line,
/// like any other non-hex character.
pub fn decode_bytes(raw: &[u8]) -> Result<Datagram, HexError> {
    let line = std::str::from_utf8(raw)
        .map_err(|err| HexError::InvalidUtf8 { index: err.valid_up_to() })?;
    decode(line)
}

/// Render a byte run as contiguous uppercase hex.
pub fn encode_bytes(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Render a segment sequence as a dissection line: each segment as
/// uppercase hex, segments joined by a single space.
pub fn encode(segments: &[Segment<'_>]) -> String {
    segments.iter().map(|segment| encode_bytes(segment.bytes)).collect::<Vec<_>>().join(" ")
}
