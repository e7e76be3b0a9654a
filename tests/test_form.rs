use noticeboard::board::form::{FIELD_NAMES, FormAccumulator, FormError, FormField};

#[test]
fn test_parse_single_chunk() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"submit=Post&msg=Hello").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Submit.index()), b"Post");
    assert_eq!(fields.get(FormField::Msg.index()), b"Hello");
}

#[test]
fn test_parse_byte_by_byte() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    for b in b"submit=Post&msg=Hello" {
        acc.feed(std::slice::from_ref(b)).unwrap();
    }

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Submit.index()), b"Post");
    assert_eq!(fields.get(FormField::Msg.index()), b"Hello");
}

#[test]
fn test_percent_decoding() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"msg=Hello%20world%21").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"Hello world!");
}

#[test]
fn test_escape_split_across_chunks() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"msg=a%").unwrap();
    acc.feed(b"2").unwrap();
    acc.feed(b"0b").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"a b");
}

#[test]
fn test_plus_decodes_to_space() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"msg=one+two").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"one two");
}

#[test]
fn test_unknown_field_is_discarded() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"other=zzz&msg=hi").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"hi");
    assert_eq!(fields.get(FormField::Submit.index()), b"");
}

#[test]
fn test_unknown_field_does_not_consume_capacity() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 2);
    acc.feed(b"other=aaaaaaaaaa&msg=hi").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"hi");
}

#[test]
fn test_capacity_exceeded_is_an_error() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 4);
    let result = acc.feed(b"msg=hello");

    assert_eq!(result, Err(FormError::CapacityExceeded));
}

#[test]
fn test_capacity_spans_all_fields() {
    // 4 bytes in one field plus 1 in the other crosses a 4-byte cap.
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 4);
    acc.feed(b"submit=Post").unwrap();
    let result = acc.feed(b"&msg=x");

    assert_eq!(result, Err(FormError::CapacityExceeded));
}

#[test]
fn test_exactly_at_capacity_is_fine() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 5);
    acc.feed(b"msg=hello").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"hello");
}

#[test]
fn test_bad_escape_is_an_error() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    let result = acc.feed(b"msg=%zz");

    assert_eq!(result, Err(FormError::BadEscape(b'z')));
}

#[test]
fn test_empty_body_finalizes_to_empty_fields() {
    let acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    let fields = acc.finalize();

    assert_eq!(fields.get(FormField::Submit.index()), b"");
    assert_eq!(fields.get(FormField::Msg.index()), b"");
}

#[test]
fn test_value_may_contain_equals() {
    let mut acc = FormAccumulator::new(&FIELD_NAMES, 1024);
    acc.feed(b"msg=a=b").unwrap();

    let fields = acc.finalize();
    assert_eq!(fields.get(FormField::Msg.index()), b"a=b");
}
