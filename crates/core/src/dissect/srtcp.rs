//! SRTCP: the first eight bytes of an RTCP packet stay in the clear; the
//! rest (encrypted body, SRTCP index, authentication tag) is opaque.

use super::{Cursor, Dissector, OPAQUE};
use crate::model::{Protocol, Segment};

pub const SRTCP_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct SrtcpDissector;

impl Dissector for SrtcpDissector {
    fn protocol(&self) -> Protocol {
        Protocol::Srtcp
    }

    fn dissect<'a>(&self, payload: &'a [u8]) -> Vec<Segment<'a>> {
        let mut cursor = Cursor::new(payload);
        if payload.len() < SRTCP_HEADER_LEN {
            cursor.rest(OPAQUE);
            return cursor.finish();
        }

        cursor.field("rtcp.vprc", 1);
        cursor.field("rtcp.packet_type", 1);
        cursor.field("rtcp.length", 2);
        cursor.field("rtcp.ssrc", 4);
        cursor.rest("srtcp.encrypted");
        cursor.finish()
    }
}
