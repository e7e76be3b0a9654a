use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::board::MessageBoard;
use crate::http::parser::{ParseError, parse_request_head};
use crate::http::request::RequestHead;
use crate::http::writer::ResponseSink;
use crate::protocol::{Disposition, Event};

const READ_CHUNK: usize = 1024;

/// One accepted connection, driven through the message-board dispatcher.
///
/// Each HTTP transaction walks the same sequence: read the request head,
/// deliver `HttpRequest`, stream body bytes as `HttpBodyChunk`s, deliver
/// `HttpBodyComplete`, flush whatever the extension wrote, then either
/// reuse the connection or tear it down with `ProtocolDrop`.
pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    board: MessageBoard,
}

impl Connection {
    pub fn new(stream: TcpStream, board: MessageBoard) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            board,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let peer = self.stream.peer_addr()?.ip().to_string();
        let mut session = self.board.open_connection(peer);

        loop {
            let head = match self.read_head().await? {
                Some(head) => head,
                None => {
                    let mut drop_sink = ResponseSink::new();
                    let _ =
                        self.board
                            .handle_event(&mut session, &Event::ProtocolDrop, &mut drop_sink);
                    break;
                }
            };

            let mut sink = ResponseSink::new();
            let keep_alive = head.keep_alive();
            let has_body = head.content_length() > 0;

            let mut disposition = self.board.handle_event(
                &mut session,
                &Event::HttpRequest { path: &head.path },
                &mut sink,
            );

            let mut remaining = head.content_length();
            while remaining > 0 && !disposition.is_close() {
                let chunk = self.read_body_chunk(remaining).await?;
                if chunk.is_empty() {
                    anyhow::bail!("connection closed mid body");
                }
                remaining -= chunk.len();
                disposition = self.board.handle_event(
                    &mut session,
                    &Event::HttpBodyChunk { data: &chunk },
                    &mut sink,
                );
            }

            if has_body && !disposition.is_close() {
                disposition =
                    self.board
                        .handle_event(&mut session, &Event::HttpBodyComplete, &mut sink);
            }

            sink.write_to_stream(&mut self.stream).await?;

            if disposition.is_close() || !sink.is_completed() || !keep_alive {
                let mut drop_sink = ResponseSink::new();
                let _ = self
                    .board
                    .handle_event(&mut session, &Event::ProtocolDrop, &mut drop_sink);
                break;
            }
        }

        Ok(())
    }

    async fn read_head(&mut self) -> anyhow::Result<Option<RequestHead>> {
        loop {
            match parse_request_head(&self.buffer) {
                Ok((head, consumed)) => {
                    self.buffer.drain(..consumed);
                    return Ok(Some(head));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data.
                }

                Err(e) => {
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            let mut temp = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client closed between transactions.
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    /// Take up to `remaining` body bytes, preferring whatever is already
    /// buffered behind the request head. Returns empty only on EOF.
    async fn read_body_chunk(&mut self, remaining: usize) -> anyhow::Result<Vec<u8>> {
        if !self.buffer.is_empty() {
            let take = self.buffer.len().min(remaining);
            return Ok(self.buffer.drain(..take).collect());
        }

        let mut temp = [0u8; READ_CHUNK];
        let n = self.stream.read(&mut temp[..READ_CHUNK.min(remaining)]).await?;
        Ok(temp[..n].to_vec())
    }
}
