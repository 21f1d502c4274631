use crate::model::Segment;

/// Label for spans whose structure is unknown or encrypted.
pub const OPAQUE: &str = "opaque";

/// Outcome of one dissection step.
///
/// A truncated step has already emitted whatever bytes were left as a single
/// opaque segment, so the caller only has to decide whether to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Complete,
    Truncated,
}

impl Step {
    pub fn is_truncated(self) -> bool {
        self == Step::Truncated
    }
}

/// Forward-only reader that turns a payload into contiguous segments.
///
/// Every byte handed out is recorded exactly once, so the segments returned
/// by [`Cursor::finish`] always cover the consumed prefix without gaps.
#[derive(Debug)]
pub struct Cursor<'a> {
    payload: &'a [u8],
    offset: usize,
    segments: Vec<Segment<'a>>,
}

impl<'a> Cursor<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0, segments: Vec::new() }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    /// Big-endian u16 at `offset() + at`, if present.
    pub fn u16_at(&self, at: usize) -> Option<u16> {
        let start = self.offset + at;
        let bytes = self.payload.get(start..start + 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn byte_at(&self, at: usize) -> Option<u8> {
        self.payload.get(self.offset + at).copied()
    }

    /// Emit a `len`-byte field, or the remainder as one opaque segment when
    /// fewer than `len` bytes are left.
    pub fn field(&mut self, label: &'static str, len: usize) -> Step {
        if self.remaining() < len {
            self.rest(OPAQUE);
            return Step::Truncated;
        }
        self.push(label, len);
        Step::Complete
    }

    /// Check that `len` bytes are available without consuming them; on
    /// shortfall the remainder is emitted as `label`.
    pub fn require(&mut self, len: usize, label: &'static str) -> Step {
        if self.remaining() < len {
            self.rest(label);
            return Step::Truncated;
        }
        Step::Complete
    }

    /// Emit up to `len` bytes, clamped to what is left.
    pub fn take_up_to(&mut self, label: &'static str, len: usize) {
        let len = len.min(self.remaining());
        self.push(label, len);
    }

    /// Emit everything that is left as one segment (nothing if empty).
    pub fn rest(&mut self, label: &'static str) {
        let len = self.remaining();
        self.push(label, len);
    }

    pub fn finish(self) -> Vec<Segment<'a>> {
        self.segments
    }

    fn push(&mut self, label: &'static str, len: usize) {
        if len == 0 {
            return;
        }
        let end = self.offset + len;
        let bytes = &self.payload[self.offset..end];
        self.segments.push(Segment { label, offset: self.offset, bytes });
        self.offset = end;
    }
}
