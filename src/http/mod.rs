//! HTTP front end for the message-board extension.
//!
//! A thin HTTP/1.1 harness that turns wire traffic into the typed events
//! the dispatcher consumes:
//!
//! - **`parser`**: parses the request head (request line + headers) from a
//!   byte buffer, leaving body bytes in place for streaming
//! - **`request`**: the parsed head and its accessors
//! - **`connection`**: per-connection loop delivering `HttpRequest`,
//!   `HttpBodyChunk`, `HttpBodyComplete` and `ProtocolDrop` events in
//!   arrival order, with keep-alive reuse when a transaction completes
//! - **`response`**: response assembly into padded write buffers
//! - **`writer`**: the harness-side `HostActions` sink that collects
//!   extension writes and flushes them to the client
//!
//! Each transaction flow:
//!
//! ```text
//! read head ── HttpRequest ──> dispatcher (or sibling passthrough)
//!    body bytes ── HttpBodyChunk ──> accumulator
//!    end of body ── HttpBodyComplete ──> commit + response
//! flush sink ──> client, then reuse connection or ProtocolDrop
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
