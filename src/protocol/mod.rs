//! Extension protocol surface shared between the host harness and the
//! message-board dispatcher.
//!
//! The host delivers one [`Event`] at a time per connection, strictly in
//! arrival order and never concurrently for the same connection. Handlers
//! answer with a [`Disposition`] and perform writes through the host's
//! [`HostActions`] capability.

pub mod auth;
pub mod buffer;

pub use auth::{AuthExtension, ExtensionRegistry, SessionInfo};
pub use buffer::PaddedBuffer;

/// Result of handling one event: keep servicing the connection, or drop it.
///
/// Maps onto the host's integer callback convention (0 = continue,
/// nonzero = close the connection).
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Continue,
    Close,
}

impl Disposition {
    pub fn is_close(self) -> bool {
        self == Disposition::Close
    }
}

/// Events delivered by the host runtime.
///
/// The named variants are the ones the message board owns. Everything else
/// arrives as [`Event::Other`] with the host's raw reason code and payload,
/// and is forwarded verbatim to the sibling session extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A live session finished its handshake on this connection.
    Established,
    /// A new HTTP transaction started; `path` is the request target.
    HttpRequest { path: &'a str },
    /// A slice of the HTTP request body arrived.
    HttpBodyChunk { data: &'a [u8] },
    /// The HTTP request body is complete.
    HttpBodyComplete,
    /// The connection (or its protocol binding) is going away.
    ProtocolDrop,
    /// Any event this extension does not own.
    Other { reason: u32, payload: &'a [u8] },
}

/// Classification of an outgoing write, mirroring the host's write primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Text,
    Binary,
    HttpHeaders,
    HttpBody,
}

/// Capabilities the host lends to an extension for the duration of one
/// event callback.
pub trait HostActions {
    /// Write one buffer to the connection. For `Text`/`Binary` writes the
    /// host frames the payload in place using the buffer's reserved padding
    /// regions, which is why the buffer is taken mutably. Returns the number
    /// of payload bytes accepted.
    fn write(&mut self, kind: WriteKind, buf: &mut PaddedBuffer) -> anyhow::Result<usize>;

    /// Signal that the current HTTP transaction is complete. Returns `false`
    /// if the connection cannot be kept for another transaction.
    fn transaction_completed(&mut self) -> bool;
}
