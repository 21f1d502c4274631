//! Ground-truth emitter: drives classification and dissection over a file of
//! hex-encoded datagrams, writing one output line per retained input line.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dissect::dissect;
use crate::hexline::{self, HexError};
use crate::model::{Dissection, Protocol};

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize dissection: {0}")]
    Json(#[from] serde_json::Error),
}

/// How each dissected datagram is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-separated uppercase hex segments.
    #[default]
    Text,
    /// One JSON object per datagram with labeled segments.
    Json,
    /// Only the chosen protocol name.
    Protocol,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Protocol => "protocol",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "text" => Self::Text,
            "json" => Self::Json,
            "protocol" => Self::Protocol,
            _ => return Err(format!("unknown output format: {value}")),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Stop after this many non-blank input lines (malformed ones included).
    pub count: Option<usize>,
    pub format: OutputFormat,
}

/// An input line that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    /// 1-based physical line number in the input.
    pub line: usize,
    pub error: String,
}

/// Counters for one emitter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    pub lines_read: usize,
    pub emitted: usize,
    pub blank_skipped: usize,
    pub malformed: Vec<MalformedLine>,
    pub by_protocol: BTreeMap<Protocol, usize>,
}

/// Per-SSRC observations for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub srtp_packets: usize,
    pub srtcp_packets: usize,
    /// RTP payload types (marker bit cleared) seen on this SSRC.
    pub payload_types: BTreeSet<u8>,
}

/// SSRC-keyed stream table, owned by the caller and threaded through a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamTable {
    streams: BTreeMap<String, StreamStats>,
}

impl StreamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified datagram. Only SRTP and SRTCP carry an SSRC in
    /// the clear.
    pub fn observe(&mut self, protocol: Protocol, payload: &[u8]) {
        match protocol {
            Protocol::Srtp if payload.len() >= 12 => {
                let stats = self.streams.entry(hexline::encode_bytes(&payload[8..12])).or_default();
                stats.srtp_packets += 1;
                stats.payload_types.insert(payload[1] & 0x7F);
            }
            Protocol::Srtcp if payload.len() >= 8 => {
                let stats = self.streams.entry(hexline::encode_bytes(&payload[4..8])).or_default();
                stats.srtcp_packets += 1;
            }
            _ => {}
        }
    }

    /// Stats for an SSRC given as uppercase hex (e.g. `"DEADBEEF"`).
    pub fn get(&self, ssrc: &str) -> Option<&StreamStats> {
        self.streams.get(ssrc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StreamStats)> {
        self.streams.iter()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct SegmentRecord<'a> {
    label: &'a str,
    offset: usize,
    hex: String,
}

#[derive(Debug, Serialize)]
struct DissectionRecord<'a> {
    line: usize,
    protocol: Protocol,
    segments: Vec<SegmentRecord<'a>>,
}

/// Read datagrams from `reader` and write one dissection per retained line
/// to `writer`, in input order.
///
/// Blank lines are skipped silently. Lines that fail to decode are logged,
/// recorded in the summary and skipped; they never produce output. The stream
/// table is taken by value and handed back updated.
pub fn emit<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    options: &EmitOptions,
    mut streams: StreamTable,
) -> Result<(EmitSummary, StreamTable), EmitError> {
    let mut summary = EmitSummary::default();
    let mut retained = 0usize;

    for (index, raw) in reader.split(b'\n').enumerate() {
        if options.count.is_some_and(|cap| retained >= cap) {
            break;
        }
        let raw = raw?;
        let line_no = index + 1;
        summary.lines_read += 1;

        if is_blank(&raw) {
            summary.blank_skipped += 1;
            continue;
        }
        retained += 1;

        let datagram = match hexline::decode_bytes(&raw) {
            Ok(datagram) => datagram,
            Err(err) => {
                report_malformed(&mut summary, line_no, &err);
                continue;
            }
        };

        let dissection = dissect(&datagram);
        streams.observe(dissection.protocol, datagram.as_bytes());
        *summary.by_protocol.entry(dissection.protocol).or_default() += 1;

        write_dissection(writer, line_no, &dissection, options.format)?;
        summary.emitted += 1;
    }

    writer.flush()?;
    log::info!(
        "Emitted {} dissections from {} lines ({} blank, {} malformed)",
        summary.emitted,
        summary.lines_read,
        summary.blank_skipped,
        summary.malformed.len()
    );
    Ok((summary, streams))
}

/// Whitespace-only lines, judged on the text when it is UTF-8.
fn is_blank(raw: &[u8]) -> bool {
    match std::str::from_utf8(raw) {
        Ok(line) => line.trim().is_empty(),
        Err(_) => false,
    }
}

fn report_malformed(summary: &mut EmitSummary, line_no: usize, err: &HexError) {
    log::warn!("Failed to parse line {}: {}", line_no, err);
    summary.malformed.push(MalformedLine { line: line_no, error: err.to_string() });
}

fn write_dissection<W: Write>(
    writer: &mut W,
    line_no: usize,
    dissection: &Dissection<'_>,
    format: OutputFormat,
) -> Result<(), EmitError> {
    match format {
        OutputFormat::Text => writeln!(writer, "{}", dissection.to_line())?,
        OutputFormat::Protocol => writeln!(writer, "{}", dissection.protocol)?,
        OutputFormat::Json => {
            let record = DissectionRecord {
                line: line_no,
                protocol: dissection.protocol,
                segments: dissection
                    .segments
                    .iter()
                    .map(|segment| SegmentRecord {
                        label: segment.label,
                        offset: segment.offset,
                        hex: segment.to_hex(),
                    })
                    .collect(),
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
