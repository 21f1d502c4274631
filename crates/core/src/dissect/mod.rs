//! Structural dissectors, one per wire format.
//!
//! Dissectors never fail: when a declared length runs past the end of the
//! datagram, whatever bytes remain are emitted as one opaque segment and
//! dissection stops. The returned segments always cover the whole input in
//! order.

mod cursor;
pub mod dtls;
pub mod srtcp;
pub mod srtp;
pub mod stun;

pub use cursor::{Cursor, Step, OPAQUE};
pub use dtls::DtlsDissector;
pub use srtcp::SrtcpDissector;
pub use srtp::SrtpDissector;
pub use stun::StunDissector;

use crate::classify::classify;
use crate::model::{Datagram, Dissection, Protocol, Segment};

/// A structural parser for one wire format.
pub trait Dissector: Send + Sync {
    fn protocol(&self) -> Protocol;
    fn dissect<'a>(&self, payload: &'a [u8]) -> Vec<Segment<'a>>;
}

/// The dissector responsible for `protocol`.
pub fn dissector_for(protocol: Protocol) -> &'static dyn Dissector {
    match protocol {
        Protocol::Stun => &StunDissector,
        Protocol::Dtls => &DtlsDissector,
        Protocol::Srtcp => &SrtcpDissector,
        Protocol::Srtp => &SrtpDissector,
    }
}

/// Classify `datagram` and split it with the matching dissector.
pub fn dissect(datagram: &Datagram) -> Dissection<'_> {
    let protocol = classify(datagram.as_bytes());
    dissect_as(protocol, datagram)
}

/// Split `datagram` as `protocol`, bypassing classification.
pub fn dissect_as(protocol: Protocol, datagram: &Datagram) -> Dissection<'_> {
    let segments = dissector_for(protocol).dissect(datagram.as_bytes());
    log::debug!(
        "{} bytes dissected as {} into {} segments",
        datagram.len(),
        protocol,
        segments.len()
    );
    Dissection { protocol, segments }
}
