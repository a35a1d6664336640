#![allow(dead_code)]

use softkeys::clipboard::ClipboardRing;
use softkeys::config::{LayoutDefaults, Settings};
use softkeys::floating::ScreenSize;
use softkeys::geometry::{resolve, KeyDef, LayoutDef, ResolvedLayout, RowDef};
use softkeys::keycodes::{CustomCommand, KeyCode};
use softkeys::layouts::LayoutSet;
use softkeys::session::KeyboardSession;
use std::time::{Duration, Instant};

/// Builder for KeyDef to keep layouts in tests short.
pub struct KeyBuilder {
    key: KeyDef,
}

impl KeyBuilder {
    pub fn text(label: &str) -> Self {
        Self {
            key: KeyDef {
                label: Some(label.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn code(code: KeyCode) -> Self {
        Self {
            key: KeyDef {
                key_code: Some(code),
                label: Some(format!("k{}", code)),
                preserve_label_case: true,
                ..Default::default()
            },
        }
    }

    pub fn command(command: CustomCommand) -> Self {
        Self::code(command.code())
    }

    pub fn width(mut self, w: f32) -> Self {
        self.key.key_width = Some(w);
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.key.key_height = Some(h);
        self
    }

    pub fn gap(mut self, g: f32) -> Self {
        self.key.logical_key_gap = Some(g);
        self
    }

    pub fn long_text(mut self, label: &str) -> Self {
        self.key.label_long_press = Some(label.to_string());
        self
    }

    pub fn long_code(mut self, code: KeyCode) -> Self {
        self.key.key_code_long_press = Some(code);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.key.is_repeatable = true;
        self
    }

    pub fn modifier(mut self) -> Self {
        self.key.is_modifier = true;
        self
    }

    pub fn build(self) -> KeyDef {
        self.key
    }
}

pub fn row(keys: Vec<KeyBuilder>) -> RowDef {
    RowDef::new(keys.into_iter().map(KeyBuilder::build).collect())
}

pub fn layout(rows: Vec<RowDef>) -> LayoutDef {
    LayoutDef::new(rows)
}

pub fn resolve_default(def: &LayoutDef) -> ResolvedLayout {
    resolve(def, &LayoutDefaults::default()).expect("layout should resolve")
}

/// Two rows of five 20-unit keys, 10 units high: ids 0..5 then 5..10.
pub fn grid_2x5() -> LayoutDef {
    let rows = (0..2)
        .map(|r| {
            row((0..5)
                .map(|c| KeyBuilder::text(&format!("k{}{}", r, c)).width(20.0))
                .collect())
        })
        .collect();
    layout(rows)
}

/// A ring bound to `ids`, filled oldest first so `values` reads
/// most-recent-first.
pub fn ring_with(ids: &[usize], values: &[&str]) -> ClipboardRing {
    let mut ring = ClipboardRing::with_slots(ids);
    for v in values.iter().rev() {
        ring.add_entry(v);
    }
    ring
}

pub fn session_with(layouts: LayoutSet) -> KeyboardSession {
    KeyboardSession::new(Settings::default(), layouts, ScreenSize::new(1080.0, 1920.0))
        .expect("session should start")
}

pub fn single_layout_session(def: LayoutDef) -> KeyboardSession {
    let layouts = LayoutSet::new(vec![("test".to_string(), def)]).expect("non-empty set");
    session_with(layouts)
}

pub fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}
