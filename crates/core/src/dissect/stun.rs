//! STUN (RFC 5389): 20-byte header followed by TLV attributes padded to
//! four-byte boundaries.

use super::{Cursor, Dissector, OPAQUE};
use crate::classify::STUN_HEADER_LEN;
use crate::model::{Protocol, Segment};

const ATTRIBUTE_HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct StunDissector;

impl Dissector for StunDissector {
    fn protocol(&self) -> Protocol {
        Protocol::Stun
    }

    fn dissect<'a>(&self, payload: &'a [u8]) -> Vec<Segment<'a>> {
        let mut cursor = Cursor::new(payload);
        if payload.len() < STUN_HEADER_LEN {
            cursor.rest(OPAQUE);
            return cursor.finish();
        }

        let declared = usize::from(u16::from_be_bytes([payload[2], payload[3]]));
        cursor.field("stun.type", 2);
        cursor.field("stun.length", 2);
        cursor.field("stun.cookie", 4);
        cursor.field("stun.transaction_id", 12);

        let region_end = payload.len().min(STUN_HEADER_LEN + declared);
        while cursor.offset() + ATTRIBUTE_HEADER_LEN <= region_end {
            let Some(attr_len) = cursor.u16_at(2).map(usize::from) else {
                break;
            };
            if cursor.offset() + ATTRIBUTE_HEADER_LEN + attr_len > region_end {
                // Declared length overruns the attribute region.
                cursor.field(OPAQUE, region_end - cursor.offset());
                break;
            }

            cursor.field("stun.attr.type", 2);
            cursor.field("stun.attr.length", 2);
            cursor.field("stun.attr.value", attr_len);
            cursor.take_up_to("stun.attr.padding", (4 - attr_len % 4) % 4);
        }

        cursor.rest(OPAQUE);
        cursor.finish()
    }
}
