mod common;

use common::{grid_2x5, layout, resolve_default, row, KeyBuilder};
use rstest::rstest;
use softkeys::geometry::{key_at, key_at_px, key_by_code, key_by_id};

#[rstest]
#[case(0.0, 0.0, Some(0))]
#[case(19.99, 9.99, Some(0))]
#[case(20.0, 0.0, Some(1))] // right edge belongs to the next key
#[case(0.0, 10.0, Some(5))] // bottom edge belongs to the next row
#[case(99.9, 19.9, Some(9))]
#[case(100.0, 5.0, None)]
#[case(50.0, 20.0, None)]
#[case(-0.1, 5.0, None)]
fn test_half_open_boxes(#[case] x: f32, #[case] y: f32, #[case] expected: Option<usize>) {
    let resolved = resolve_default(&grid_2x5());
    assert_eq!(key_at(&resolved, x, y).map(|k| k.id), expected);
}

#[test]
fn test_gap_is_not_part_of_a_key() {
    let def = layout(vec![row(vec![
        KeyBuilder::text("a").width(20.0).gap(5.0),
        KeyBuilder::text("b").width(20.0),
    ])]);
    let resolved = resolve_default(&def);
    assert!(key_at(&resolved, 22.0, 5.0).is_none());
    assert_eq!(key_at(&resolved, 25.0, 5.0).map(|k| k.id), Some(1));
}

#[test]
fn test_overlap_resolves_to_first_key() {
    let def = layout(vec![row(vec![
        KeyBuilder::text("a").width(30.0).gap(-10.0),
        KeyBuilder::text("b").width(30.0),
    ])]);
    let resolved = resolve_default(&def);
    assert_eq!(key_at(&resolved, 25.0, 5.0).map(|k| k.id), Some(0));
    assert_eq!(key_at(&resolved, 30.0, 5.0).map(|k| k.id), Some(1));
}

#[test]
fn test_short_row_leaves_empty_space() {
    let def = layout(vec![
        row(vec![KeyBuilder::text("a").height(10.0)]),
        row(vec![KeyBuilder::text("b").height(5.0), KeyBuilder::text("c").height(10.0)]),
    ]);
    let resolved = resolve_default(&def);
    // "b" is shorter than its row; the space below it is empty.
    assert!(key_at(&resolved, 5.0, 17.0).is_none());
    assert_eq!(key_at(&resolved, 15.0, 17.0).map(|k| k.id), Some(2));
}

#[test]
fn test_pixel_mapping() {
    let resolved = resolve_default(&grid_2x5());
    // 1000x200 px view: 10 px per logical unit on both axes.
    assert_eq!(key_at_px(&resolved, 450.0, 150.0, 1000.0, 200.0).map(|k| k.id), Some(7));
    assert_eq!(key_at_px(&resolved, 199.0, 99.0, 1000.0, 200.0).map(|k| k.id), Some(0));
    assert!(key_at_px(&resolved, 10.0, 10.0, 0.0, 200.0).is_none());
    assert!(key_at_px(&resolved, 10.0, 10.0, 1000.0, -1.0).is_none());
}

#[test]
fn test_lookup_by_code_and_id() {
    let def = layout(vec![row(vec![
        KeyBuilder::text("a"),
        KeyBuilder::code(67),
        KeyBuilder::text("b").long_code(112),
    ])]);
    let resolved = resolve_default(&def);

    assert_eq!(key_by_code(&resolved, 67).map(|k| k.id), Some(1));
    assert_eq!(key_by_code(&resolved, 112).map(|k| k.id), Some(2));
    assert!(key_by_code(&resolved, 66).is_none());
    assert_eq!(key_by_id(&resolved, 0).map(|k| k.label.as_str()), Some("a"));
    assert!(key_by_id(&resolved, 3).is_none());
}
