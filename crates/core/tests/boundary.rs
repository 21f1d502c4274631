use dissect_core::boundary::extract;

#[test]
fn extracts_base_and_boundaries() {
    let line = extract("90 78 EB1B");
    assert_eq!(line.base, "9078EB1B");
    assert_eq!(line.boundaries.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn trailing_newlines_are_not_structural() {
    let line = extract("90 78 EB1B\r\n");
    assert_eq!(line.base, "9078EB1B");
    assert_eq!(line.boundaries.len(), 2);
}

#[test]
fn empty_line_has_no_base_and_no_boundaries() {
    let line = extract("\n");
    assert!(line.base.is_empty());
    assert!(line.boundaries.is_empty());
}

#[test]
fn single_token_has_no_boundaries() {
    let line = extract("9078EB1B");
    assert_eq!(line.base, "9078EB1B");
    assert!(line.boundaries.is_empty());
}

#[test]
fn whitespace_runs_count_as_one_boundary() {
    let line = extract("90  78\tEB");
    assert_eq!(line.base, "9078EB");
    assert_eq!(line.boundaries.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn render_round_trips_dissection_lines() {
    for original in [
        "90 78 EB1B",
        "80 C8 0006 DEADBEEF 010203",
        "0001 0000 2112A442 000102030405060708090A0B",
        "ABCDEF",
        "",
    ] {
        assert_eq!(extract(original).render(), original);
    }
}

#[test]
fn boundaries_up_to_is_inclusive() {
    let line = extract("90 78 EB1B");
    assert_eq!(line.boundaries_up_to(4).len(), 2);
    assert_eq!(line.boundaries_up_to(3).len(), 1);
    assert!(line.boundaries_up_to(1).is_empty());
}
