//! dissect-core
//!
//! Core library for building ground-truth structural annotations of
//! encrypted real-time media datagrams (SRTP, SRTCP, STUN, DTLS) and scoring
//! predicted segmentations against them.
//!
//! All substantive logic lives here so it is fully testable and reusable
//! from multiple frontends; the `media-dissect` CLI is a thin wrapper.

pub mod adapt;
pub mod boundary;
pub mod classify;
pub mod config;
pub mod dissect;
pub mod emit;
pub mod hexline;
pub mod model;
pub mod score;
pub mod text;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
