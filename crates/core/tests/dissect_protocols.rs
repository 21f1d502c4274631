use dissect_core::dissect::{dissect, dissect_as, Dissector, DtlsDissector, StunDissector};
use dissect_core::hexline::decode;
use dissect_core::model::Protocol;

fn line_as(protocol: Protocol, hex: &str) -> String {
    let datagram = decode(hex).expect("valid hex");
    dissect_as(protocol, &datagram).to_line()
}

const TID: &str = "000102030405060708090A0B";

#[test]
fn srtcp_header_and_encrypted_body() {
    assert_eq!(line_as(Protocol::Srtcp, "80C80006DEADBEEF010203"), "80 C8 0006 DEADBEEF 010203");
}

#[test]
fn srtcp_header_only() {
    assert_eq!(line_as(Protocol::Srtcp, "80C80006DEADBEEF"), "80 C8 0006 DEADBEEF");
}

#[test]
fn srtcp_shorter_than_header_is_opaque() {
    assert_eq!(line_as(Protocol::Srtcp, "80C80006"), "80C80006");
}

#[test]
fn stun_header_without_attributes() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0000 2112A442 {TID}")),
        format!("0001 0000 2112A442 {TID}")
    );
}

#[test]
fn stun_attribute_value_and_padding_are_separate() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 000C 2112A442 {TID} 0006 0005 6162636465 000000")),
        format!("0001 000C 2112A442 {TID} 0006 0005 6162636465 000000")
    );
}

#[test]
fn stun_zero_length_attribute_has_no_value_segment() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0008 2112A442 {TID} 0025 0000 8028 0000")),
        format!("0001 0008 2112A442 {TID} 0025 0000 8028 0000")
    );
}

#[test]
fn stun_overrunning_attribute_dumps_attribute_region() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0008 2112A442 {TID} 0006 0010 61626364")),
        format!("0001 0008 2112A442 {TID} 0006001061626364")
    );
}

#[test]
fn stun_bytes_past_declared_length_are_one_trailer() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0000 2112A442 {TID} CAFEBABE 01")),
        format!("0001 0000 2112A442 {TID} CAFEBABE01")
    );
}

#[test]
fn stun_padding_is_clipped_at_end_of_datagram() {
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0008 2112A442 {TID} 0006 0003 616263")),
        format!("0001 0008 2112A442 {TID} 0006 0003 616263")
    );
}

#[test]
fn stun_short_attribute_tail_joins_trailer() {
    // Two bytes remain in the attribute region: too short for a header.
    assert_eq!(
        line_as(Protocol::Stun, &format!("0001 0006 2112A442 {TID} 0025 0000 AABB CC")),
        format!("0001 0006 2112A442 {TID} 0025 0000 AABBCC")
    );
}

#[test]
fn stun_dissector_labels_attribute_fields() {
    let datagram =
        decode(&format!("0001 000C 2112A442 {TID} 0006 0005 6162636465 000000")).expect("hex");
    let labels: Vec<&str> =
        StunDissector.dissect(datagram.as_bytes()).iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        vec![
            "stun.type",
            "stun.length",
            "stun.cookie",
            "stun.transaction_id",
            "stun.attr.type",
            "stun.attr.length",
            "stun.attr.value",
            "stun.attr.padding",
        ]
    );
}

#[test]
fn dtls_single_record() {
    assert_eq!(
        line_as(Protocol::Dtls, "16 FEFD 0000 000000000001 0003 AABBCC"),
        "16 FEFD 0000 000000000001 0003 AABBCC"
    );
}

#[test]
fn dtls_multiple_records_in_one_datagram() {
    assert_eq!(
        line_as(
            Protocol::Dtls,
            "16 FEFD 0000 000000000001 0001 AA 14 FEFD 0000 000000000002 0001 01"
        ),
        "16 FEFD 0000 000000000001 0001 AA 14 FEFD 0000 000000000002 0001 01"
    );
}

#[test]
fn dtls_truncated_fragment_keeps_remaining_bytes() {
    assert_eq!(
        line_as(Protocol::Dtls, "17 FEFD 0001 000000000009 0010 AABBCC"),
        "17 FEFD 0001 000000000009 0010 AABBCC"
    );
}

#[test]
fn dtls_leftover_shorter_than_header_is_opaque() {
    assert_eq!(
        line_as(Protocol::Dtls, "16 FEFD 0000 000000000001 0001 AA 0102"),
        "16 FEFD 0000 000000000001 0001 AA 0102"
    );
}

#[test]
fn dtls_short_input_is_one_opaque_segment() {
    let datagram = decode("16FEFD0000").expect("hex");
    let segments = DtlsDissector.dissect(datagram.as_bytes());
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].label, "opaque");
}

#[test]
fn dissect_picks_the_classified_protocol() {
    let datagram = decode("16 FEFD 0000 000000000001 0003 AABBCC").expect("hex");
    let dissection = dissect(&datagram);
    assert_eq!(dissection.protocol, Protocol::Dtls);
    assert_eq!(dissection.covered_len(), datagram.len());
}
