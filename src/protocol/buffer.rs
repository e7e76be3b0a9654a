use std::fmt;

/// Bytes reserved ahead of the payload for transport framing.
pub const PRE_PADDING: usize = 12;

/// Bytes reserved after the payload for transport framing.
pub const POST_PADDING: usize = 1;

/// Appending past the buffer's payload capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferFull;

impl fmt::Display for BufferFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "padded buffer payload capacity exceeded")
    }
}

impl std::error::Error for BufferFull {}

/// A write buffer with reserved framing margins.
///
/// The transport prepends and appends protocol framing around the payload
/// without copying it, so every buffer handed to the host's write primitive
/// must keep [`PRE_PADDING`] bytes valid before the payload and
/// [`POST_PADDING`] bytes valid after it. This type makes that contract part
/// of the API: callers only ever touch the payload region, and the host
/// reaches the margins through [`reserved_prefix`](Self::reserved_prefix)
/// and [`reserved_suffix`](Self::reserved_suffix).
#[derive(Debug)]
pub struct PaddedBuffer {
    buf: Vec<u8>,
    len: usize,
    capacity: usize,
}

impl PaddedBuffer {
    /// Allocate a buffer able to hold `capacity` payload bytes plus the
    /// framing margins.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; PRE_PADDING + capacity + POST_PADDING],
            len: 0,
            capacity,
        }
    }

    /// Append payload bytes, failing without partial writes if the payload
    /// region cannot hold them.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferFull> {
        if self.len + bytes.len() > self.capacity {
            return Err(BufferFull);
        }
        let start = PRE_PADDING + self.len;
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    pub fn payload(&self) -> &[u8] {
        &self.buf[PRE_PADDING..PRE_PADDING + self.len]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buf[PRE_PADDING..PRE_PADDING + self.len]
    }

    /// Framing margin ahead of the payload; written by the host, never by
    /// the extension.
    pub fn reserved_prefix(&mut self) -> &mut [u8] {
        &mut self.buf[..PRE_PADDING]
    }

    /// Framing margin after the payload.
    pub fn reserved_suffix(&mut self) -> &mut [u8] {
        let start = PRE_PADDING + self.len;
        &mut self.buf[start..start + POST_PADDING]
    }

    /// The framed wire region: prefix, payload and suffix as one slice.
    pub fn framed(&self) -> &[u8] {
        &self.buf[..PRE_PADDING + self.len + POST_PADDING]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_respects_capacity() {
        let mut buf = PaddedBuffer::new(4);
        buf.append(b"abcd").unwrap();
        assert_eq!(buf.append(b"e"), Err(BufferFull));
        assert_eq!(buf.payload(), b"abcd");
    }

    #[test]
    fn margins_do_not_alias_payload() {
        let mut buf = PaddedBuffer::new(8);
        buf.append(b"payload").unwrap();
        buf.reserved_prefix().fill(0xff);
        buf.reserved_suffix().fill(0xff);
        assert_eq!(buf.payload(), b"payload");
        assert_eq!(buf.framed().len(), PRE_PADDING + 7 + POST_PADDING);
    }
}
