use super::*;

#[test]
fn test_offset_containment_is_half_open() {
    let range = TextRange::new(10, 20);
    assert!(range.contains(10));
    assert!(range.contains(19));
    assert!(!range.contains(20));
    assert!(!range.contains(9));
}

#[test]
fn test_line_containment_is_inclusive() {
    let range = TextRange::new(3, 7);
    assert!(range.contains_line(3));
    assert!(range.contains_line(7));
    assert!(!range.contains_line(8));
    assert!(range.overlaps_lines(7, 9));
    assert!(range.overlaps_lines(0, 3));
    assert!(!range.overlaps_lines(8, 12));
}

#[test]
fn test_unbounded_contains_everything() {
    let range = TextRange::unbounded();
    assert!(range.is_unbounded());
    assert!(range.contains(0));
    assert!(range.contains(u32::MAX - 1));
}
