use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Key codes follow the Android `KeyEvent` numbering. Custom commands use
/// small negative numbers and never reach the input sink as key events.
pub type KeyCode = i32;

pub const KEYCODE_DPAD_UP: KeyCode = 19;
pub const KEYCODE_DPAD_DOWN: KeyCode = 20;
pub const KEYCODE_DPAD_LEFT: KeyCode = 21;
pub const KEYCODE_DPAD_RIGHT: KeyCode = 22;
pub const KEYCODE_ALT_LEFT: KeyCode = 57;
pub const KEYCODE_ALT_RIGHT: KeyCode = 58;
pub const KEYCODE_SHIFT_LEFT: KeyCode = 59;
pub const KEYCODE_SHIFT_RIGHT: KeyCode = 60;
pub const KEYCODE_TAB: KeyCode = 61;
pub const KEYCODE_SPACE: KeyCode = 62;
pub const KEYCODE_ENTER: KeyCode = 66;
pub const KEYCODE_DEL: KeyCode = 67;
pub const KEYCODE_ESCAPE: KeyCode = 111;
pub const KEYCODE_FORWARD_DEL: KeyCode = 112;
pub const KEYCODE_CTRL_LEFT: KeyCode = 113;
pub const KEYCODE_CTRL_RIGHT: KeyCode = 114;
pub const KEYCODE_CAPS_LOCK: KeyCode = 115;

/// The fixed set of codes the keyboard handles itself.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomCommand {
    OpenFloating,
    CloseFloating,
    GrowFloating,
    ShrinkFloating,
    MoveFloating,
    CycleLayout,
    OpenClipboard,
    EraseClipboard,
    ClipboardEntry,
}

impl CustomCommand {
    pub fn code(self) -> KeyCode {
        match self {
            Self::OpenFloating => -1,
            Self::CloseFloating => -2,
            Self::GrowFloating => -3,
            Self::ShrinkFloating => -4,
            Self::MoveFloating => -5,
            Self::CycleLayout => -6,
            Self::OpenClipboard => -7,
            Self::EraseClipboard => -8,
            Self::ClipboardEntry => -9,
        }
    }

    /// Unrecognised codes, negative or not, are ordinary key actions.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        Self::iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Caps,
}

impl Modifier {
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KEYCODE_SHIFT_LEFT | KEYCODE_SHIFT_RIGHT => Some(Self::Shift),
            KEYCODE_CTRL_LEFT | KEYCODE_CTRL_RIGHT => Some(Self::Ctrl),
            KEYCODE_ALT_LEFT | KEYCODE_ALT_RIGHT => Some(Self::Alt),
            KEYCODE_CAPS_LOCK => Some(Self::Caps),
            _ => None,
        }
    }

    /// Momentary modifiers reset after one action; caps lock persists.
    pub fn is_momentary(self) -> bool {
        !matches!(self, Self::Caps)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycodeDefinition {
    pub code: KeyCode,
    pub id: String,
    pub label: String,
    pub aliases: Vec<String>,
}

/// Token <-> code lookup used to spell layouts compactly (`[SHIFT]`, `[BSPC]`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeycodeRegistry {
    #[serde(skip)]
    name_to_code: HashMap<String, KeyCode>,

    #[serde(skip)]
    code_to_label: HashMap<KeyCode, String>,

    pub definitions: Vec<KeycodeDefinition>,
}

impl KeycodeRegistry {
    pub fn new_with_defaults() -> Self {
        let mut reg = Self::default();

        let defaults = vec![
            (KEYCODE_TAB, "KC_TAB", "Tab", vec!["TAB"]),
            (KEYCODE_ENTER, "KC_ENT", "Enter", vec!["ENT", "ENTER", "RET"]),
            (KEYCODE_ESCAPE, "KC_ESC", "Esc", vec!["ESC", "ESCAPE"]),
            (KEYCODE_DEL, "KC_BSPC", "⌫", vec!["BSPC", "BACKSPACE"]),
            (KEYCODE_FORWARD_DEL, "KC_DEL", "Del", vec!["DEL", "DELETE"]),
            (KEYCODE_SPACE, "KC_SPC", "Space", vec!["SPC", "SPACE"]),
            (KEYCODE_DPAD_UP, "KC_UP", "↑", vec!["UP"]),
            (KEYCODE_DPAD_DOWN, "KC_DOWN", "↓", vec!["DOWN"]),
            (KEYCODE_DPAD_LEFT, "KC_LEFT", "←", vec!["LEFT"]),
            (KEYCODE_DPAD_RIGHT, "KC_RIGHT", "→", vec!["RIGHT"]),
            (KEYCODE_SHIFT_LEFT, "KC_LSFT", "Shift", vec!["SHIFT", "LSHIFT"]),
            (KEYCODE_SHIFT_RIGHT, "KC_RSFT", "Shift", vec!["RSHIFT"]),
            (KEYCODE_CTRL_LEFT, "KC_LCTL", "Ctrl", vec!["CTRL", "LCTRL"]),
            (KEYCODE_CTRL_RIGHT, "KC_RCTL", "Ctrl", vec!["RCTRL"]),
            (KEYCODE_ALT_LEFT, "KC_LALT", "Alt", vec!["ALT", "LALT"]),
            (KEYCODE_ALT_RIGHT, "KC_RALT", "AltGr", vec!["RALT", "ALTGR"]),
            (KEYCODE_CAPS_LOCK, "KC_CAPS", "Caps", vec!["CAPS", "CAPSLOCK"]),
            (CustomCommand::OpenFloating.code(), "CMD_FLOAT", "Float", vec!["FLOAT"]),
            (CustomCommand::CloseFloating.code(), "CMD_DOCK", "Dock", vec!["DOCK"]),
            (CustomCommand::GrowFloating.code(), "CMD_GROW", "+", vec!["GROW"]),
            (CustomCommand::ShrinkFloating.code(), "CMD_SHRINK", "-", vec!["SHRINK"]),
            (CustomCommand::MoveFloating.code(), "CMD_MOVE", "✥", vec!["MOVE"]),
            (CustomCommand::CycleLayout.code(), "CMD_NEXT", "🌐", vec!["NEXT", "CYCLE"]),
            (CustomCommand::OpenClipboard.code(), "CMD_CLIPBOARD", "📋", vec!["CLIPBOARD"]),
            (CustomCommand::EraseClipboard.code(), "CMD_ERASE", "Clear", vec!["ERASE"]),
            (CustomCommand::ClipboardEntry.code(), "CMD_CLIP", "", vec!["CLIP"]),
        ];

        for (code, id, label, aliases) in defaults {
            reg.definitions.push(KeycodeDefinition {
                code,
                id: id.to_string(),
                label: label.to_string(),
                aliases: aliases.iter().map(|s| s.to_string()).collect(),
            });
        }

        reg.rebuild_maps();
        reg
    }

    fn rebuild_maps(&mut self) {
        self.name_to_code.clear();
        self.code_to_label.clear();

        for def in &self.definitions {
            self.code_to_label
                .entry(def.code)
                .or_insert_with(|| def.label.clone());
            self.name_to_code.insert(def.id.to_uppercase(), def.code);

            for alias in &def.aliases {
                self.name_to_code.insert(alias.to_uppercase(), def.code);
            }
        }
    }

    pub fn get_code(&self, token: &str) -> Option<KeyCode> {
        self.name_to_code.get(&token.to_uppercase()).copied()
    }

    pub fn get_label(&self, code: KeyCode) -> Option<&str> {
        self.code_to_label.get(&code).map(String::as_str)
    }
}
