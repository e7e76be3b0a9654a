//! HTTP response assembly into padded write buffers.
//!
//! Response bytes are built directly inside the payload region of a
//! [`PaddedBuffer`] so the transport can frame them without copying. The
//! helpers mirror the host's low-level header-encoding routines: status
//! line first, then headers, then the terminator, each failing cleanly if
//! the buffer cannot hold it.

use anyhow::bail;

use crate::protocol::buffer::{BufferFull, PaddedBuffer};
use crate::protocol::{HostActions, WriteKind};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status codes this extension emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Append the status line.
pub fn add_status(buf: &mut PaddedBuffer, status: StatusCode) -> Result<(), BufferFull> {
    let line = format!(
        "{HTTP_VERSION} {} {}\r\n",
        status.as_u16(),
        status.reason_phrase()
    );
    buf.append(line.as_bytes())
}

/// Append one header line.
pub fn add_header(buf: &mut PaddedBuffer, name: &str, value: &str) -> Result<(), BufferFull> {
    buf.append(name.as_bytes())?;
    buf.append(b": ")?;
    buf.append(value.as_bytes())?;
    buf.append(b"\r\n")
}

pub fn add_content_length(buf: &mut PaddedBuffer, len: usize) -> Result<(), BufferFull> {
    add_header(buf, "content-length", &len.to_string())
}

/// Append the header/body separator, completing the header block.
pub fn finalize_headers(buf: &mut PaddedBuffer) -> Result<(), BufferFull> {
    buf.append(b"\r\n")
}

/// Assemble and write a complete plain-text response through the host's
/// write primitive. The caller still signals transaction completion.
pub fn send_plain_text(
    actions: &mut dyn HostActions,
    status: StatusCode,
    body: &[u8],
) -> anyhow::Result<()> {
    let mut headers = PaddedBuffer::new(256);
    add_status(&mut headers, status)?;
    add_header(&mut headers, "content-type", "text/plain")?;
    add_content_length(&mut headers, body.len())?;
    finalize_headers(&mut headers)?;
    let header_len = headers.len();
    let n = actions.write(WriteKind::HttpHeaders, &mut headers)?;
    if n != header_len {
        bail!("header write returned {n} of {header_len}");
    }

    let mut out = PaddedBuffer::new(body.len());
    out.append(body)?;
    let n = actions.write(WriteKind::HttpBody, &mut out)?;
    if n != body.len() {
        bail!("body write returned {n} of {}", body.len());
    }
    Ok(())
}
