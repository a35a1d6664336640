mod common;

use common::{layout, resolve_default, row, KeyBuilder};
use rstest::rstest;
use softkeys::keycodes::{Modifier, KEYCODE_CAPS_LOCK, KEYCODE_SHIFT_LEFT, KEYCODE_SHIFT_RIGHT};
use softkeys::modifiers::{display_labels, ModifierMask, ModifierState};

#[rstest]
#[case(Modifier::Shift, ModifierMask::SHIFT)]
#[case(Modifier::Ctrl, ModifierMask::CTRL)]
#[case(Modifier::Alt, ModifierMask::ALT)]
fn test_momentary_modifier_applies_once(#[case] modifier: Modifier, #[case] bit: ModifierMask) {
    let mut state = ModifierState::new();
    state.toggle(modifier);
    assert!(modifier.is_momentary());
    assert_eq!(state.consume(), bit);
    assert_eq!(state.consume(), ModifierMask::empty());
    assert!(!state.is_active(modifier));
}

#[test]
fn test_caps_persists_across_actions() {
    let mut state = ModifierState::new();
    state.toggle(Modifier::Caps);
    assert_eq!(state.consume(), ModifierMask::CAPS);
    assert_eq!(state.consume(), ModifierMask::CAPS);
    state.toggle(Modifier::Caps);
    assert_eq!(state.consume(), ModifierMask::empty());
}

#[test]
fn test_mask_combines_and_reset_momentary_keeps_caps() {
    let mut state = ModifierState::new();
    state.toggle(Modifier::Shift);
    state.toggle(Modifier::Ctrl);
    state.toggle(Modifier::Caps);
    assert_eq!(state.mask().bits(), 0x0010_1001);

    state.reset_momentary();
    assert_eq!(state.mask(), ModifierMask::CAPS);

    state.reset();
    assert_eq!(state, ModifierState::new());
}

#[test]
fn test_double_toggle_disengages() {
    let mut state = ModifierState::new();
    state.toggle(Modifier::Shift);
    state.toggle(Modifier::Shift);
    assert_eq!(state.mask(), ModifierMask::empty());
}

#[test]
fn test_is_latched_by_code() {
    let mut state = ModifierState::new();
    state.toggle(Modifier::Shift);
    assert!(state.is_latched(KEYCODE_SHIFT_LEFT));
    assert!(state.is_latched(KEYCODE_SHIFT_RIGHT));
    assert!(!state.is_latched(KEYCODE_CAPS_LOCK));
    assert!(!state.is_latched(29));
}

#[test]
fn test_text_casing() {
    let mut state = ModifierState::new();
    assert_eq!(state.commit_text("Hello", false), "hello");
    assert_eq!(state.commit_text("Hello", true), "Hello");

    state.toggle(Modifier::Shift);
    assert_eq!(state.commit_text("hello", false), "HELLO");
    // Shift was spent on the previous commit.
    assert_eq!(state.commit_text("hello", false), "hello");

    state.toggle(Modifier::Caps);
    assert_eq!(state.commit_text("abc", false), "ABC");
    assert_eq!(state.commit_text("abc", false), "ABC");
}

#[test]
fn test_display_labels_follow_state() {
    let def = layout(vec![row(vec![
        KeyBuilder::text("q").long_text("Ω"),
        KeyBuilder::code(KEYCODE_SHIFT_LEFT).modifier(),
    ])]);
    let resolved = resolve_default(&def);
    let mut keys = resolved.keys.into_iter();
    let mut q = keys.next().unwrap();
    let shift = keys.next().unwrap();
    q.preserve_small_label_case = true;

    let mut state = ModifierState::new();
    assert_eq!(display_labels(&q, &state), ("q".to_string(), "Ω".to_string()));

    state.toggle(Modifier::Shift);
    assert_eq!(display_labels(&q, &state), ("Q".to_string(), "Ω".to_string()));
    // Named keys keep their label as written.
    assert_eq!(display_labels(&shift, &state).0, "k59");
}

#[test]
fn test_mask_serializes_as_flags() {
    let json = serde_json::to_string(&ModifierMask::SHIFT).unwrap();
    let back: ModifierMask = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ModifierMask::SHIFT);
}
