//! DTLS: one or more records per datagram, each a 13-byte header and a
//! fragment of the declared length.

use super::{Cursor, Dissector, OPAQUE};
use crate::classify::DTLS_RECORD_HEADER_LEN;
use crate::model::{Protocol, Segment};

#[derive(Debug, Clone, Copy, Default)]
pub struct DtlsDissector;

impl Dissector for DtlsDissector {
    fn protocol(&self) -> Protocol {
        Protocol::Dtls
    }

    fn dissect<'a>(&self, payload: &'a [u8]) -> Vec<Segment<'a>> {
        let mut cursor = Cursor::new(payload);

        while cursor.remaining() >= DTLS_RECORD_HEADER_LEN {
            let Some(length) = cursor.u16_at(11).map(usize::from) else {
                break;
            };
            cursor.field("dtls.content_type", 1);
            cursor.field("dtls.version", 2);
            cursor.field("dtls.epoch", 2);
            cursor.field("dtls.sequence", 6);
            cursor.field("dtls.length", 2);

            if cursor.remaining() < length {
                // Truncated record: keep what is there as its fragment.
                cursor.rest("dtls.fragment");
                break;
            }
            cursor.field("dtls.fragment", length);
        }

        cursor.rest(OPAQUE);
        cursor.finish()
    }
}
