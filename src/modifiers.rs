use crate::geometry::ResolvedKey;
use crate::keycodes::{KeyCode, Modifier};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

bitflags! {
    /// Meta bits attached to an emitted key event (Android `META_*_ON` values).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModifierMask: u32 {
        const SHIFT = 0x0000_0001;
        const ALT = 0x0000_0002;
        const CTRL = 0x0000_1000;
        const CAPS = 0x0010_0000;
    }
}

/// Shift, Ctrl and Alt apply to the next action only; Caps Lock stays on
/// until toggled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ModifierState {
    shift: bool,
    ctrl: bool,
    alt: bool,
    caps: bool,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the modifier. Every press of a modifier key is a toggle.
    pub fn toggle(&mut self, modifier: Modifier) {
        let flag = self.flag_mut(modifier);
        *flag = !*flag;
    }

    pub fn is_active(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Caps => self.caps,
        }
    }

    /// True when `code` is a modifier key that is currently engaged.
    pub fn is_latched(&self, code: KeyCode) -> bool {
        Modifier::from_code(code).is_some_and(|m| self.is_active(m))
    }

    /// Mask the next action would carry. Does not change state.
    pub fn mask(&self) -> ModifierMask {
        let mut mask = ModifierMask::empty();
        mask.set(ModifierMask::SHIFT, self.shift);
        mask.set(ModifierMask::CTRL, self.ctrl);
        mask.set(ModifierMask::ALT, self.alt);
        mask.set(ModifierMask::CAPS, self.caps);
        mask
    }

    /// Mask for the action being emitted now; momentary modifiers reset.
    pub fn consume(&mut self) -> ModifierMask {
        let mask = self.mask();
        self.reset_momentary();
        mask
    }

    pub fn reset_momentary(&mut self) {
        for modifier in Modifier::iter().filter(|m| m.is_momentary()) {
            *self.flag_mut(modifier) = false;
        }
    }

    /// Full reset, used at session boundaries only.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_upper(&self) -> bool {
        self.shift || self.caps
    }

    /// Casing for raw text: upper when shift or caps is on, lower otherwise.
    pub fn apply_case(&self, label: &str, preserve: bool) -> String {
        if preserve {
            label.to_string()
        } else if self.is_upper() {
            label.to_uppercase()
        } else {
            label.to_lowercase()
        }
    }

    /// Cases `label` for a text commit and resets the momentary modifiers.
    pub fn commit_text(&mut self, label: &str, preserve: bool) -> String {
        let text = self.apply_case(label, preserve);
        self.reset_momentary();
        text
    }

    fn flag_mut(&mut self, modifier: Modifier) -> &mut bool {
        match modifier {
            Modifier::Shift => &mut self.shift,
            Modifier::Ctrl => &mut self.ctrl,
            Modifier::Alt => &mut self.alt,
            Modifier::Caps => &mut self.caps,
        }
    }
}

/// Labels as the renderer should draw them: (primary, long-press).
pub fn display_labels(key: &ResolvedKey, state: &ModifierState) -> (String, String) {
    (
        state.apply_case(&key.label, key.preserve_label_case),
        state.apply_case(&key.long_press_label, key.preserve_small_label_case),
    )
}
