use proptest::prelude::*;
use softkeys::clipboard::ClipboardRing;
use softkeys::config::LayoutDefaults;
use softkeys::floating::{clamp_position, clamp_width};
use softkeys::geometry::{key_at, resolve, KeyDef, LayoutDef, RowDef};

// --- STRATEGIES ---

prop_compose! {
    fn arb_key()(
        width in proptest::option::of(1.0..40.0f32),
        height in proptest::option::of(1.0..20.0f32),
        gap in proptest::option::of(0.0..5.0f32),
    ) -> KeyDef {
        KeyDef {
            key_width: width,
            key_height: height,
            logical_key_gap: gap,
            label: Some("k".to_string()),
            ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_row()(
        keys in proptest::collection::vec(arb_key(), 0..8),
        row_gap in proptest::option::of(0.0..5.0f32),
        height in proptest::option::of(1.0..20.0f32),
    ) -> RowDef {
        RowDef {
            keys,
            logical_row_gap: row_gap,
            default_key_height: height,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_layout()(
        rows in proptest::collection::vec(arb_row(), 1..6),
        width in proptest::option::of(5.0..25.0f32),
    ) -> LayoutDef {
        LayoutDef {
            rows,
            default_key_width: width,
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn prop_ids_are_dense_and_row_major(def in arb_layout()) {
        let resolved = resolve(&def, &LayoutDefaults::default()).unwrap();
        let expected: usize = def.rows.iter().map(|r| r.keys.len()).sum();
        prop_assert_eq!(resolved.keys.len(), expected);

        for (i, key) in resolved.keys.iter().enumerate() {
            prop_assert_eq!(key.id, i);
        }
        for pair in resolved.keys.windows(2) {
            prop_assert!(pair[0].row <= pair[1].row);
            if pair[0].row == pair[1].row {
                prop_assert!(pair[1].x > pair[0].x);
            }
        }
    }

    #[test]
    fn prop_total_height_is_sum_of_rows(def in arb_layout()) {
        let resolved = resolve(&def, &LayoutDefaults::default()).unwrap();
        let sum: f32 = resolved.rows.iter().map(|r| r.height + r.gap).sum();
        prop_assert!((resolved.total_height - sum).abs() < 1e-3);
        for row in &resolved.rows {
            for key in resolved.row_keys(row.index) {
                prop_assert_eq!(key.y, row.y);
                prop_assert!(key.height <= row.height);
            }
        }
    }

    #[test]
    fn prop_hit_returns_key_containing_point(def in arb_layout(), x in 0.0..100.0f32, y in 0.0..150.0f32) {
        let resolved = resolve(&def, &LayoutDefaults::default()).unwrap();
        if let Some(key) = key_at(&resolved, x, y) {
            prop_assert!(x >= key.x && x < key.x + key.width);
            prop_assert!(y >= key.y && y < key.y + key.height);
            // Nothing laid out earlier also contains it.
            prop_assert!(resolved.keys[..key.id].iter().all(|k| !k.contains(x, y)));
        } else {
            prop_assert!(resolved.keys.iter().all(|k| !k.contains(x, y)));
        }
    }

    #[test]
    fn prop_ring_is_bounded_and_unique(
        capacity in 0usize..8,
        entries in proptest::collection::vec("[a-d]{1,2}", 0..30),
    ) {
        let ids: Vec<usize> = (0..capacity).collect();
        let mut ring = ClipboardRing::with_slots(&ids);
        for e in &entries {
            ring.add_entry(e);
        }
        prop_assert_eq!(ring.capacity(), capacity);

        let stored: Vec<&str> = ring.values().flatten().collect();
        let mut dedup = stored.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), stored.len());
        if let (Some(last), true) = (entries.last(), capacity > 0) {
            prop_assert!(ring.contains(last));
        }
    }

    #[test]
    fn prop_clamped_window_stays_on_screen(
        x in -5000.0..5000.0f32,
        y in -5000.0..5000.0f32,
        width in 100.0..900.0f32,
        height in 100.0..900.0f32,
        bottom in 0.0..100.0f32,
    ) {
        let (sw, sh) = (1000.0f32, 2000.0f32);
        let (cx, cy) = clamp_position(x, y, width, height, sw, sh, bottom);
        prop_assert!(cx - width / 2.0 >= -sw / 2.0 - 1e-3);
        prop_assert!(cx + width / 2.0 <= sw / 2.0 + 1e-3);
        prop_assert!(cy - height / 2.0 >= -sh / 2.0 - 1e-3);
        prop_assert!(cy + height / 2.0 <= sh / 2.0 - bottom + 1e-3);
    }

    #[test]
    fn prop_width_within_bounds(width in 0.0..3000.0f32, inc in -200.0..200.0f32) {
        let w = clamp_width(width, inc, 1000.0, 300.0);
        prop_assert!((300.0..=1000.0).contains(&w));
    }
}
