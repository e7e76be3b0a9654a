use crate::http::request::{Method, RequestHead};
use std::collections::HashMap;

#[derive(Debug)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
    InvalidContentLength,
    Incomplete,
}

/// Parse the request head: request line plus headers, up to and including
/// the blank line. Body bytes are left untouched in the buffer so the
/// connection can stream them to the dispatcher as they arrive.
///
/// Returns the head and the number of bytes consumed through the blank
/// line.
pub fn parse_request_head(buf: &[u8]) -> Result<(RequestHead, usize), ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];

    let headers_str = std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    // Reject a declared length we cannot count down from.
    if let Some(v) = headers.get("Content-Length") {
        v.parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength)?;
    }

    let head = RequestHead {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
    };

    Ok((head, headers_end + 4))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
