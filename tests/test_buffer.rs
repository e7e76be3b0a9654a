use noticeboard::protocol::buffer::{POST_PADDING, PRE_PADDING, PaddedBuffer};

#[test]
fn test_margins_have_reserved_sizes() {
    let mut buf = PaddedBuffer::new(32);
    buf.append(b"hello").unwrap();

    assert_eq!(buf.reserved_prefix().len(), PRE_PADDING);
    assert_eq!(buf.reserved_suffix().len(), POST_PADDING);
}

#[test]
fn test_framed_region_wraps_payload() {
    let mut buf = PaddedBuffer::new(32);
    buf.append(b"hello").unwrap();
    buf.reserved_prefix().fill(0xaa);
    buf.reserved_suffix().fill(0xbb);

    let framed = buf.framed();
    assert_eq!(framed.len(), PRE_PADDING + 5 + POST_PADDING);
    assert_eq!(&framed[..PRE_PADDING], &[0xaa; PRE_PADDING]);
    assert_eq!(&framed[PRE_PADDING..PRE_PADDING + 5], b"hello");
    assert_eq!(&framed[PRE_PADDING + 5..], &[0xbb; POST_PADDING]);
}

#[test]
fn test_host_framing_does_not_touch_payload() {
    let mut buf = PaddedBuffer::new(16);
    buf.append(b"payload").unwrap();
    buf.reserved_prefix().fill(0xff);
    buf.reserved_suffix().fill(0xff);

    assert_eq!(buf.payload(), b"payload");
}

#[test]
fn test_append_tracks_remaining_capacity() {
    let mut buf = PaddedBuffer::new(10);
    assert!(buf.is_empty());
    assert_eq!(buf.remaining(), 10);

    buf.append(b"1234").unwrap();
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.remaining(), 6);
}

#[test]
fn test_overflowing_append_is_all_or_nothing() {
    let mut buf = PaddedBuffer::new(6);
    buf.append(b"1234").unwrap();

    assert!(buf.append(b"56789").is_err());
    assert_eq!(buf.payload(), b"1234");
    assert_eq!(buf.remaining(), 2);
}

#[test]
fn test_payload_mut_edits_in_place() {
    let mut buf = PaddedBuffer::new(4);
    buf.append(b"abcd").unwrap();
    buf.payload_mut()[0] = b'x';

    assert_eq!(buf.payload(), b"xbcd");
}
