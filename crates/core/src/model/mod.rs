//! Core data model: datagrams, segments and the protocols they are read as.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::hexline;

/// Wire formats a datagram can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Stun,
    Dtls,
    Srtcp,
    Srtp,
}

impl Protocol {
    pub const ALL: [Protocol; 4] =
        [Protocol::Stun, Protocol::Dtls, Protocol::Srtcp, Protocol::Srtp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Stun => "stun",
            Protocol::Dtls => "dtls",
            Protocol::Srtcp => "srtcp",
            Protocol::Srtp => "srtp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One UDP payload. Never mutated after decoding, only sliced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Datagram {
    bytes: Vec<u8>,
}

impl Datagram {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Datagram {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Datagram {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

/// A labeled, non-empty byte span borrowed from a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Field name, e.g. `rtp.ssrc` or `opaque`.
    pub label: &'static str,
    /// Offset of the first byte within the datagram.
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn to_hex(&self) -> String {
        hexline::encode_bytes(self.bytes)
    }
}

/// Result of running one dissector over one datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dissection<'a> {
    pub protocol: Protocol,
    pub segments: Vec<Segment<'a>>,
}

impl<'a> Dissection<'a> {
    /// Render as a dissection line (space-separated uppercase hex).
    pub fn to_line(&self) -> String {
        hexline::encode(&self.segments)
    }

    /// Total number of bytes covered by the segments.
    pub fn covered_len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}
