mod common;

use common::ring_with;
use softkeys::clipboard::ClipboardRing;

fn values(ring: &ClipboardRing) -> Vec<Option<&str>> {
    ring.values().collect()
}

#[test]
fn test_most_recent_first_with_eviction() {
    let mut ring = ClipboardRing::with_slots(&[10, 11, 12]);
    for text in ["a", "b", "c", "d"] {
        assert!(ring.add_entry(text));
    }
    assert_eq!(values(&ring), vec![Some("d"), Some("c"), Some("b")]);
    assert_eq!(ring.get_entry(10), Some("d"));
    assert_eq!(ring.get_entry(12), Some("b"));
}

#[test]
fn test_duplicate_is_a_no_op() {
    let mut ring = ring_with(&[0, 1, 2], &["x", "y"]);
    assert!(!ring.add_entry("y"));
    assert_eq!(values(&ring), vec![Some("x"), Some("y"), None]);
    // Dedupe is exact: case and whitespace count.
    assert!(ring.add_entry("Y"));
    assert_eq!(values(&ring), vec![Some("Y"), Some("x"), Some("y")]);
}

#[test]
fn test_ring_without_slots_stores_nothing() {
    let mut ring = ClipboardRing::new();
    assert!(!ring.add_entry("a"));
    assert_eq!(ring.capacity(), 0);
    assert!(!ring.contains("a"));
}

#[test]
fn test_empty_slots_stay_empty_until_filled() {
    let mut ring = ClipboardRing::with_slots(&[4, 5, 6]);
    ring.add_entry("only");
    assert_eq!(ring.get_entry(4), Some("only"));
    assert_eq!(ring.get_entry(5), None);
    assert_eq!(ring.get_entry(99), None);
}

#[test]
fn test_initialize_keeps_values_by_id() {
    let mut ring = ring_with(&[3, 4, 5], &["a", "b", "c"]);
    ring.initialize_slots(&[5, 3]);
    assert_eq!(ring.get_entry(5), Some("c"));
    assert_eq!(ring.get_entry(3), Some("a"));
    assert_eq!(ring.capacity(), 2);
}

#[test]
fn test_initialize_backfills_new_ids_by_position() {
    let mut ring = ring_with(&[3, 4, 5], &["a", "b", "c"]);
    ring.initialize_slots(&[20, 21, 22, 23]);
    assert_eq!(values(&ring), vec![Some("a"), Some("b"), Some("c"), None]);
    assert_eq!(ring.get_entry(22), Some("c"));
}

#[test]
fn test_initialize_mixes_id_match_and_backfill() {
    let mut ring = ring_with(&[3, 4, 5], &["a", "b", "c"]);
    // 4 keeps "b"; 9 is new at position 1 and takes the old slot 1 value.
    ring.initialize_slots(&[4, 9]);
    assert_eq!(ring.get_entry(4), Some("b"));
    assert_eq!(ring.get_entry(9), Some("b"));
}

#[test]
fn test_ensure_capacity_pads_and_never_shrinks() {
    let mut ring = ring_with(&[1, 2], &["a", "b"]);
    ring.ensure_capacity(4);
    assert_eq!(ring.capacity(), 4);
    assert!(ring.slots()[2].key_id.is_none());

    ring.add_entry("c");
    ring.add_entry("d");
    assert_eq!(values(&ring), vec![Some("d"), Some("c"), Some("a"), Some("b")]);

    ring.ensure_capacity(1);
    assert_eq!(ring.capacity(), 4);
}

#[test]
fn test_clear_keeps_bindings() {
    let mut ring = ring_with(&[7, 8], &["a", "b"]);
    ring.clear();
    assert_eq!(values(&ring), vec![None, None]);
    assert_eq!(ring.slots()[1].key_id, Some(8));
    assert!(ring.add_entry("a"));
}

#[test]
fn test_rebind_pads_with_old_values() {
    let mut ring = ring_with(&[0, 1, 2], &["a", "b", "c"]);
    ring.rebind(&[], 3);
    assert_eq!(values(&ring), vec![Some("a"), Some("b"), Some("c")]);
    assert!(ring.slots().iter().all(|s| s.key_id.is_none()));

    ring.rebind(&[7], 3);
    assert_eq!(ring.get_entry(7), Some("a"));
    assert_eq!(values(&ring), vec![Some("a"), Some("b"), Some("c")]);
}

#[test]
fn test_rebind_without_minimum_matches_initialize() {
    let mut rebound = ring_with(&[3, 4, 5], &["a", "b", "c"]);
    let mut initialized = rebound.clone();
    rebound.rebind(&[5, 9], 0);
    initialized.initialize_slots(&[5, 9]);
    assert_eq!(rebound.slots(), initialized.slots());
}
