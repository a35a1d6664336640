use crate::consts::CLIPBOARD_LAYOUT_NAME;
use crate::error::{SkResult, SoftKeysError};
use crate::geometry::{KeyDef, LayoutDef, RowDef};
use crate::keycodes::{CustomCommand, KeycodeRegistry, Modifier, KEYCODE_DEL, KEYCODE_FORWARD_DEL, KEYCODE_SPACE};
use crate::keycodes::{KEYCODE_DPAD_DOWN, KEYCODE_DPAD_LEFT, KEYCODE_DPAD_RIGHT, KEYCODE_DPAD_UP};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Symbols,
    Numpad,
    Clipboard,
}

impl KnownLayout {
    /// The layout substituted when a loaded layout is structurally broken.
    pub fn fallback() -> Self {
        Self::Qwerty
    }

    // Row grammar: `label[/long_press][:width]`, `[NAME]` looks up a keycode.
    pub fn rows(&self) -> &'static [&'static str] {
        match self {
            Self::Qwerty => &[
                "q/1 w/2 e/3 r/4 t/5 y/6 u/7 i/8 o/9 p/0",
                "a/@ s/# d/$ f/_ g/& h/- j/+ k/( l/)",
                "[SHIFT]:15 z/* x/\" c/' v/: b/; n/! m/? [BSPC]:15",
                "[NEXT]:15 [CLIPBOARD] , [SPACE]:40 . [ENTER]:15",
            ],
            Self::Symbols => &[
                "1 2 3 4 5 6 7 8 9 0",
                "! @ # $ % ^ & * ( )",
                "[CTRL]:15 [ALT]:15 - + = ? [BSPC]:30",
                "[NEXT]:15 [TAB]:15 [LEFT] [SPACE]:30 [RIGHT] [ENTER]:20",
            ],
            Self::Numpad => &[
                "1:25 2:25 3:25 [BSPC]:25",
                "4:25 5:25 6:25 [ENTER]:25",
                "7:25 8:25 9:25 [UP]:25",
                ",:25 0:25 .:25 [NEXT]:25",
            ],
            Self::Clipboard => &[
                "[CLIP]:50 [CLIP]:50",
                "[CLIP]:50 [CLIP]:50",
                "[CLIP]:50 [CLIP]:50",
                "[NEXT]:20 [ERASE]:20 [FLOAT]:15 [DOCK]:15 [GROW]:15 [SHRINK]:15",
            ],
        }
    }

    pub fn definition(&self) -> LayoutDef {
        let registry = KeycodeRegistry::new_with_defaults();
        parse_layout_rows(self.rows(), &registry)
    }
}

pub fn parse_layout_rows(rows: &[&str], registry: &KeycodeRegistry) -> LayoutDef {
    LayoutDef::new(
        rows.iter()
            .map(|row| {
                RowDef::new(
                    row.split_whitespace()
                        .map(|token| parse_key_token(token, registry))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Parses one row token. Unknown `[NAME]` tokens become plain text keys.
pub fn parse_key_token(token: &str, registry: &KeycodeRegistry) -> KeyDef {
    let (body, width) = match token.rsplit_once(':') {
        Some((left, right)) if !left.is_empty() => match right.parse::<f32>() {
            Ok(w) => (left, Some(w)),
            Err(_) => (token, None),
        },
        _ => (token, None),
    };

    let mut key = if let Some(name) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        match registry.get_code(name) {
            Some(code) => KeyDef {
                key_code: Some(code),
                label: registry.get_label(code).map(str::to_string),
                is_repeatable: matches!(
                    code,
                    KEYCODE_DEL
                        | KEYCODE_FORWARD_DEL
                        | KEYCODE_SPACE
                        | KEYCODE_DPAD_UP
                        | KEYCODE_DPAD_DOWN
                        | KEYCODE_DPAD_LEFT
                        | KEYCODE_DPAD_RIGHT
                ),
                is_modifier: Modifier::from_code(code).is_some(),
                preserve_label_case: true,
                ..Default::default()
            },
            None => text_key(name, None),
        }
    } else {
        match body.split_once('/') {
            Some((label, long)) if !label.is_empty() && !long.is_empty() => {
                text_key(label, Some(long))
            }
            _ => text_key(body, None),
        }
    };
    key.key_width = width;
    key
}

fn text_key(label: &str, long_press: Option<&str>) -> KeyDef {
    KeyDef {
        label: Some(label.to_string()),
        label_long_press: long_press.map(str::to_string),
        preserve_small_label_case: true,
        ..Default::default()
    }
}

/// Named layouts the keyboard can cycle through.
#[derive(Debug, Clone)]
pub struct LayoutSet {
    entries: Vec<(String, LayoutDef)>,
    active: usize,
}

impl LayoutSet {
    pub fn new(entries: Vec<(String, LayoutDef)>) -> SkResult<Self> {
        if entries.is_empty() {
            return Err(SoftKeysError::Config(
                "a layout set needs at least one layout".to_string(),
            ));
        }
        Ok(Self { entries, active: 0 })
    }

    pub fn builtin() -> Self {
        Self {
            entries: KnownLayout::iter()
                .map(|l| (l.to_string(), l.definition()))
                .collect(),
            active: 0,
        }
    }

    pub fn from_names(names: &[&str]) -> SkResult<Self> {
        let entries = names
            .iter()
            .map(|name| {
                KnownLayout::from_str(name)
                    .map(|l| (l.to_string(), l.definition()))
                    .map_err(|_| SoftKeysError::UnknownLayout(name.to_string()))
            })
            .collect::<SkResult<Vec<_>>>()?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_name(&self) -> &str {
        &self.entries[self.active].0
    }

    pub fn active(&self) -> &LayoutDef {
        &self.entries[self.active].1
    }

    pub fn get(&self, index: usize) -> Option<(&str, &LayoutDef)> {
        self.entries.get(index).map(|(n, d)| (n.as_str(), d))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn clipboard_index(&self) -> Option<usize> {
        self.position(CLIPBOARD_LAYOUT_NAME)
    }

    /// Most clipboard-entry keys any layout of the set has. The session keeps
    /// at least this many history slots whichever layout is active.
    pub fn max_clipboard_keys(&self) -> usize {
        let entry = CustomCommand::ClipboardEntry.code();
        self.entries
            .iter()
            .map(|(_, def)| {
                def.rows
                    .iter()
                    .flat_map(|r| &r.keys)
                    .filter(|k| k.key_code == Some(entry))
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    /// Index that follows the active one, wrapping around.
    pub fn next_index(&self) -> usize {
        (self.active + 1) % self.entries.len()
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = index;
            true
        } else {
            false
        }
    }
}
