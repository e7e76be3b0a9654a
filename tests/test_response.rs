use noticeboard::http::response::{self, StatusCode};
use noticeboard::protocol::{HostActions, PaddedBuffer, WriteKind};

#[derive(Default)]
struct CollectingActions {
    writes: Vec<(WriteKind, Vec<u8>)>,
}

impl HostActions for CollectingActions {
    fn write(&mut self, kind: WriteKind, buf: &mut PaddedBuffer) -> anyhow::Result<usize> {
        self.writes.push((kind, buf.payload().to_vec()));
        Ok(buf.len())
    }

    fn transaction_completed(&mut self) -> bool {
        true
    }
}

#[test]
fn test_status_codes() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_header_assembly() {
    let mut buf = PaddedBuffer::new(256);
    response::add_status(&mut buf, StatusCode::Ok).unwrap();
    response::add_header(&mut buf, "content-type", "text/plain").unwrap();
    response::add_content_length(&mut buf, 1).unwrap();
    response::finalize_headers(&mut buf).unwrap();

    assert_eq!(
        buf.payload(),
        b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 1\r\n\r\n"
    );
}

#[test]
fn test_header_assembly_overflow() {
    let mut buf = PaddedBuffer::new(8);
    let result = response::add_status(&mut buf, StatusCode::Ok);

    assert!(result.is_err());
    // Failed appends leave nothing behind.
    assert!(buf.is_empty());
}

#[test]
fn test_send_plain_text_writes_headers_then_body() {
    let mut actions = CollectingActions::default();
    response::send_plain_text(&mut actions, StatusCode::NotFound, b"404 Not Found").unwrap();

    assert_eq!(actions.writes.len(), 2);
    assert_eq!(actions.writes[0].0, WriteKind::HttpHeaders);
    assert_eq!(
        actions.writes[0].1,
        b"HTTP/1.1 404 Not Found\r\ncontent-type: text/plain\r\ncontent-length: 13\r\n\r\n"
    );
    assert_eq!(actions.writes[1].0, WriteKind::HttpBody);
    assert_eq!(actions.writes[1].1, b"404 Not Found");
}

#[test]
fn test_send_plain_text_empty_body() {
    let mut actions = CollectingActions::default();
    response::send_plain_text(&mut actions, StatusCode::Ok, b"").unwrap();

    assert_eq!(actions.writes[1].1, b"");
}
