use dissect_core::dissect::dissect;
use dissect_core::hexline::{decode, decode_bytes, encode, encode_bytes, HexError};
use dissect_core::model::Segment;

#[test]
fn decode_accepts_spaced_and_unspaced_digits() {
    let spaced = decode("90 78 eb 1b").expect("spaced");
    let packed = decode("9078EB1B").expect("packed");
    assert_eq!(spaced.as_bytes(), &[0x90, 0x78, 0xEB, 0x1B]);
    assert_eq!(spaced, packed);
}

#[test]
fn decode_strips_tabs_and_surrounding_whitespace() {
    let datagram = decode("  00\t01 \r\n").expect("decode");
    assert_eq!(datagram.as_bytes(), &[0x00, 0x01]);
}

#[test]
fn decode_blank_line_is_empty_datagram() {
    assert!(decode("   ").expect("blank").is_empty());
}

#[test]
fn decode_rejects_odd_digit_count() {
    let err = decode("90 7").unwrap_err();
    assert_eq!(err, HexError::OddLength { digits: 3 });
    assert!(err.to_string().contains("Odd number"));
}

#[test]
fn decode_rejects_non_hex_characters() {
    let err = decode("90 zz").unwrap_err();
    assert_eq!(err, HexError::InvalidCharacter { character: 'z', index: 2 });
}

#[test]
fn encode_joins_segments_with_single_spaces() {
    let bytes = [0x90u8, 0x78, 0xEB, 0x1B];
    let segments = vec![
        Segment { label: "a", offset: 0, bytes: &bytes[0..1] },
        Segment { label: "b", offset: 1, bytes: &bytes[1..2] },
        Segment { label: "c", offset: 2, bytes: &bytes[2..4] },
    ];
    assert_eq!(encode(&segments), "90 78 EB1B");
}

#[test]
fn encode_empty_sequence_is_empty_string() {
    assert_eq!(encode(&[]), "");
    assert_eq!(encode_bytes(&[]), "");
}

#[test]
fn empty_datagram_dissects_to_empty_line() {
    let datagram = decode("").expect("empty");
    assert_eq!(dissect(&datagram).to_line(), "");
}

#[test]
fn decode_bytes_rejects_non_utf8() {
    assert_eq!(decode_bytes(b"AB\xFFCD"), Err(HexError::InvalidUtf8 { index: 2 }));
    assert_eq!(decode_bytes(b"AB CD\r").expect("crlf line").as_bytes(), &[0xAB, 0xCD]);
}
