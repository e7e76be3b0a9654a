use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::protocol::{HostActions, PaddedBuffer, WriteKind};

/// Collects everything the dispatcher writes during one HTTP transaction,
/// then flushes it to the client in one pass.
///
/// This is the harness-side implementation of [`HostActions`]: HTTP writes
/// carry no live-session framing, so only the payload region of each
/// buffer is taken. A real live-session transport would frame `Text` and
/// `Binary` writes in place through the buffer's reserved margins.
pub struct ResponseSink {
    buffer: Vec<u8>,
    written: usize,
    completed: bool,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            written: 0,
            completed: false,
        }
    }

    /// Whether the extension signalled transaction completion, meaning the
    /// connection may be reused.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}

impl Default for ResponseSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HostActions for ResponseSink {
    fn write(&mut self, _kind: WriteKind, buf: &mut PaddedBuffer) -> anyhow::Result<usize> {
        self.buffer.extend_from_slice(buf.payload());
        Ok(buf.len())
    }

    fn transaction_completed(&mut self) -> bool {
        self.completed = true;
        true
    }
}
