//! SRTP: cleartext RTP header (RFC 3550) followed by the encrypted payload.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |V=2|P|X|  CC   |M|     PT      |       sequence number         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           synchronization source (SSRC) identifier            |
//! +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
//! |            contributing source (CSRC) identifiers             |
//! |                             ....                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      defined by profile       |           length              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        header extension                       |
//! |                             ....                              |
//! ```

use super::{Cursor, Dissector, OPAQUE};
use crate::model::{Protocol, Segment};

pub const RTP_HEADER_LEN: usize = 12;

/// Profile marker for RFC 5285 one-byte header extensions.
pub const ONE_BYTE_EXTENSION_PROFILE: u16 = 0xBEDE;

const CSRC_LEN: usize = 4;
const EXTENSION_HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct SrtpDissector;

impl Dissector for SrtpDissector {
    fn protocol(&self) -> Protocol {
        Protocol::Srtp
    }

    fn dissect<'a>(&self, payload: &'a [u8]) -> Vec<Segment<'a>> {
        let mut cursor = Cursor::new(payload);
        if payload.len() < RTP_HEADER_LEN {
            cursor.rest(OPAQUE);
            return cursor.finish();
        }

        let csrc_count = usize::from(payload[0] & 0x0F);
        let has_extension = payload[0] & 0x10 != 0;

        cursor.field("rtp.vpxcc", 1);
        cursor.field("rtp.mpt", 1);
        cursor.field("rtp.sequence", 2);
        cursor.field("rtp.timestamp", 4);
        cursor.field("rtp.ssrc", 4);

        // The CSRC list is all-or-nothing.
        if cursor.require(csrc_count * CSRC_LEN, OPAQUE).is_truncated() {
            return cursor.finish();
        }
        for _ in 0..csrc_count {
            cursor.field("rtp.csrc", CSRC_LEN);
        }

        if has_extension && !header_extension(&mut cursor) {
            return cursor.finish();
        }

        cursor.rest("srtp.payload");
        cursor.finish()
    }
}

/// Emit the header extension. Returns `false` when the datagram ended inside
/// it and dissection must stop.
fn header_extension(cursor: &mut Cursor<'_>) -> bool {
    if cursor.require(EXTENSION_HEADER_LEN, OPAQUE).is_truncated() {
        return false;
    }
    let (Some(profile), Some(words)) = (cursor.u16_at(0), cursor.u16_at(2)) else {
        return false;
    };
    cursor.field("rtp.ext.profile", 2);
    cursor.field("rtp.ext.length", 2);

    let data_len = usize::from(words) * 4;
    if cursor.require(data_len, OPAQUE).is_truncated() {
        return false;
    }

    if profile == ONE_BYTE_EXTENSION_PROFILE {
        one_byte_elements(cursor, data_len);
    } else {
        cursor.field("rtp.ext.data", data_len);
    }
    true
}

/// Split `len` bytes of RFC 5285 one-byte extension data.
///
/// Each run of zero bytes is one padding segment. Otherwise the header byte
/// carries the id in its high nibble and `value length - 1` in its low nibble;
/// an element whose value would overrun the extension block is emitted whole
/// together with everything after it.
fn one_byte_elements(cursor: &mut Cursor<'_>, len: usize) {
    let end = cursor.offset() + len;
    while cursor.offset() < end {
        let Some(header) = cursor.byte_at(0) else {
            return;
        };

        if header == 0 {
            let mut run = 1;
            while cursor.offset() + run < end && cursor.byte_at(run) == Some(0) {
                run += 1;
            }
            cursor.field("rtp.ext.padding", run);
            continue;
        }

        let value_len = usize::from(header & 0x0F) + 1;
        if cursor.offset() + 1 + value_len > end {
            cursor.field("rtp.ext.element", end - cursor.offset());
            return;
        }
        cursor.field("rtp.ext.id", 1);
        cursor.field("rtp.ext.value", value_len);
    }
}
