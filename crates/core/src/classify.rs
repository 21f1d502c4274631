//! Header-heuristic protocol classification.
//!
//! Rules are tried in a fixed priority order and the first match wins; there is
//! no backtracking and no error on ambiguity. Anything that matches no rule is
//! read as SRTP.

use crate::model::Protocol;

/// STUN magic cookie (RFC 5389).
pub const STUN_MAGIC_COOKIE: [u8; 4] = [0x21, 0x12, 0xA4, 0x42];

pub const STUN_HEADER_LEN: usize = 20;
pub const DTLS_RECORD_HEADER_LEN: usize = 13;
pub const SRTCP_MIN_LEN: usize = 2;

/// A classification rule: the protocol it selects and the predicate deciding it.
pub struct Rule {
    pub protocol: Protocol,
    pub matches: fn(&[u8]) -> bool,
}

/// Rules in priority order. SRTP is the fallback and has no rule.
pub const RULES: [Rule; 3] = [
    Rule { protocol: Protocol::Stun, matches: is_stun },
    Rule { protocol: Protocol::Dtls, matches: is_dtls },
    Rule { protocol: Protocol::Srtcp, matches: is_srtcp },
];

/// Pick the dissector to apply to `payload`.
pub fn classify(payload: &[u8]) -> Protocol {
    RULES
        .iter()
        .find(|rule| (rule.matches)(payload))
        .map(|rule| rule.protocol)
        .unwrap_or(Protocol::Srtp)
}

/// Magic cookie present and the two most significant bits of the message
/// type are zero.
pub fn is_stun(payload: &[u8]) -> bool {
    payload.len() >= STUN_HEADER_LEN
        && payload[4..8] == STUN_MAGIC_COOKIE
        && payload[0] & 0xC0 == 0
}

/// Content type 20..=23, major version 0xFE and a non-zero record length.
///
/// The record is not required to fit in the datagram.
pub fn is_dtls(payload: &[u8]) -> bool {
    if payload.len() < DTLS_RECORD_HEADER_LEN {
        return false;
    }
    let length = u16::from_be_bytes([payload[11], payload[12]]);
    (20..=23).contains(&payload[0]) && payload[1] == 0xFE && length > 0
}

/// Second byte in the RTCP packet type range 192..=223.
pub fn is_srtcp(payload: &[u8]) -> bool {
    payload.len() >= SRTCP_MIN_LEN && (192..=223).contains(&payload[1])
}
