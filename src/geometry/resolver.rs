use super::{KeyDef, LayoutDef, RowDef};
use crate::clipboard::ClipboardRing;
use crate::config::LayoutDefaults;
use crate::consts::{
    BUILTIN_KEY_GAP, BUILTIN_KEY_HEIGHT, BUILTIN_KEY_WIDTH, BUILTIN_ROW_GAP,
    CLIPBOARD_LABEL_MAX_CHARS, LOGICAL_WIDTH,
};
use crate::error::{SkResult, SoftKeysError};
use crate::keycodes::{CustomCommand, KeyCode};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Rows may end slightly past the logical width from float accumulation.
const OVERFLOW_EPSILON: f32 = 1e-3;

/// Nearest non-null layer wins; layers are ordered most specific first.
pub fn cascade(layers: &[Option<f32>], builtin: f32) -> f32 {
    layers.iter().flatten().copied().next().unwrap_or(builtin)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedKey {
    pub id: usize,
    pub row: usize,
    pub code: Option<KeyCode>,
    pub long_press_code: Option<KeyCode>,
    pub label: String,
    pub long_press_label: String,
    pub icon: Option<String>,
    pub width: f32,
    pub height: f32,
    pub gap: f32,
    pub x: f32,
    pub y: f32,
    pub is_repeatable: bool,
    pub is_modifier: bool,
    pub preserve_label_case: bool,
    pub preserve_small_label_case: bool,
}

impl ResolvedKey {
    /// Half-open box: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn has_long_press(&self) -> bool {
        self.long_press_code.is_some() || !self.long_press_label.is_empty()
    }

    pub fn command(&self) -> Option<CustomCommand> {
        self.code.and_then(CustomCommand::from_code)
    }

    pub fn is_clipboard_entry(&self) -> bool {
        self.command() == Some(CustomCommand::ClipboardEntry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRow {
    pub index: usize,
    pub y: f32,
    pub height: f32,
    pub gap: f32,
    /// Indices into [`ResolvedLayout::keys`], which are also the key ids.
    pub keys: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    Negative,
    ZeroSize,
    RowOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningScope {
    Row(usize),
    Key(usize),
}

impl fmt::Display for WarningScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningScope::Row(i) => write!(f, "row {}", i),
            WarningScope::Key(id) => write!(f, "key {}", id),
        }
    }
}

/// A value that was accepted as given but looks suspicious.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionWarning {
    pub scope: WarningScope,
    pub field: &'static str,
    pub value: f32,
    pub kind: WarningKind,
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            WarningKind::Negative => "is negative",
            WarningKind::ZeroSize => "is zero",
            WarningKind::RowOverflow => "extends past the logical width",
        };
        write!(f, "{} {} {} ({})", self.scope, self.field, what, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLayout {
    pub rows: Vec<ResolvedRow>,
    pub keys: Vec<ResolvedKey>,
    pub total_height: f32,
    pub warnings: Vec<ResolutionWarning>,
}

impl ResolvedLayout {
    pub fn total_width(&self) -> f32 {
        LOGICAL_WIDTH
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.total_height / LOGICAL_WIDTH
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn row_keys(&self, row: usize) -> &[ResolvedKey] {
        match self.rows.get(row) {
            Some(r) => &self.keys[r.keys.clone()],
            None => &[],
        }
    }

    /// Ids of clipboard-entry keys in row-major order.
    pub fn clipboard_key_ids(&self) -> Vec<usize> {
        self.keys
            .iter()
            .filter(|k| k.is_clipboard_entry())
            .map(|k| k.id)
            .collect()
    }

    /// Overwrites the labels of clipboard-entry keys with their history text.
    /// This is the only mutation a resolved layout ever sees.
    pub fn sync_clipboard_labels(&mut self, ring: &ClipboardRing) {
        for key in self.keys.iter_mut().filter(|k| k.is_clipboard_entry()) {
            key.label = ring
                .get_entry(key.id)
                .map(clipboard_label)
                .unwrap_or_default();
        }
    }
}

fn clipboard_label(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(CLIPBOARD_LABEL_MAX_CHARS)
        .collect()
}

/// Resolves cascading geometry and assigns ids and coordinates in one pass.
///
/// Identical input always yields identical output. Negative and zero sizes
/// are kept as given and reported in [`ResolvedLayout::warnings`].
pub fn resolve(layout: &LayoutDef, defaults: &LayoutDefaults) -> SkResult<ResolvedLayout> {
    if layout.rows.is_empty() {
        return Err(SoftKeysError::EmptyLayout);
    }
    check_finite(layout, defaults)?;

    let mut rows = Vec::with_capacity(layout.rows.len());
    let mut keys = Vec::with_capacity(layout.rows.iter().map(|r| r.keys.len()).sum());
    let mut warnings = Vec::new();
    let mut y = 0.0f32;

    for (row_index, row) in layout.rows.iter().enumerate() {
        let row_height_default = [
            row.default_key_height,
            layout.default_key_height,
            defaults.default_key_height,
        ];
        let row_width_default = [
            row.default_key_width,
            layout.default_key_width,
            defaults.default_key_width,
        ];
        let row_key_gap_default = [
            row.default_logical_key_gap,
            layout.default_logical_key_gap,
            defaults.default_key_gap,
        ];
        let row_gap = cascade(
            &[
                row.logical_row_gap,
                layout.default_logical_row_gap,
                defaults.default_row_gap,
            ],
            BUILTIN_ROW_GAP,
        );
        if row_gap < 0.0 {
            warnings.push(ResolutionWarning {
                scope: WarningScope::Row(row_index),
                field: "rowGap",
                value: row_gap,
                kind: WarningKind::Negative,
            });
        }

        let first_id = keys.len();
        let mut x = 0.0f32;
        let mut row_height: Option<f32> = None;
        let mut right_edge = 0.0f32;

        for key in &row.keys {
            let id = keys.len();
            let width = cascade(&with_key(key.key_width, row_width_default), BUILTIN_KEY_WIDTH);
            let height = cascade(
                &with_key(key.key_height, row_height_default),
                BUILTIN_KEY_HEIGHT,
            );
            let gap = cascade(
                &with_key(key.logical_key_gap, row_key_gap_default),
                BUILTIN_KEY_GAP,
            );

            flag_size(&mut warnings, id, "width", width);
            flag_size(&mut warnings, id, "height", height);
            if gap < 0.0 {
                warnings.push(ResolutionWarning {
                    scope: WarningScope::Key(id),
                    field: "gap",
                    value: gap,
                    kind: WarningKind::Negative,
                });
            }

            keys.push(resolved_key(key, id, row_index, width, height, gap, x, y));

            right_edge = right_edge.max(x + width);
            row_height = Some(row_height.map_or(height, |h| h.max(height)));
            x += width + gap;
        }

        if right_edge > LOGICAL_WIDTH + OVERFLOW_EPSILON {
            warnings.push(ResolutionWarning {
                scope: WarningScope::Row(row_index),
                field: "width",
                value: right_edge,
                kind: WarningKind::RowOverflow,
            });
        }

        let height = row_height.unwrap_or_else(|| cascade(&row_height_default, BUILTIN_KEY_HEIGHT));
        rows.push(ResolvedRow {
            index: row_index,
            y,
            height,
            gap: row_gap,
            keys: first_id..keys.len(),
        });
        y += height + row_gap;
    }

    Ok(ResolvedLayout {
        rows,
        keys,
        total_height: y,
        warnings,
    })
}

fn with_key(key_value: Option<f32>, rest: [Option<f32>; 3]) -> [Option<f32>; 4] {
    [key_value, rest[0], rest[1], rest[2]]
}

fn flag_size(warnings: &mut Vec<ResolutionWarning>, id: usize, field: &'static str, value: f32) {
    let kind = if value < 0.0 {
        WarningKind::Negative
    } else if value == 0.0 {
        WarningKind::ZeroSize
    } else {
        return;
    };
    warnings.push(ResolutionWarning {
        scope: WarningScope::Key(id),
        field,
        value,
        kind,
    });
}

#[allow(clippy::too_many_arguments)]
fn resolved_key(
    key: &KeyDef,
    id: usize,
    row: usize,
    width: f32,
    height: f32,
    gap: f32,
    x: f32,
    y: f32,
) -> ResolvedKey {
    ResolvedKey {
        id,
        row,
        code: key.key_code,
        long_press_code: key.key_code_long_press,
        label: key.label.clone().unwrap_or_default(),
        long_press_label: key.label_long_press.clone().unwrap_or_default(),
        icon: key.icon.clone(),
        width,
        height,
        gap,
        x,
        y,
        is_repeatable: key.is_repeatable,
        is_modifier: key.is_modifier,
        preserve_label_case: key.preserve_label_case,
        preserve_small_label_case: key.preserve_small_label_case,
    }
}

/// NaN or infinite values make the geometry unusable.
fn check_finite(layout: &LayoutDef, defaults: &LayoutDefaults) -> SkResult<()> {
    check_fields(
        "settings",
        [
            ("defaultKeyHeight", defaults.default_key_height),
            ("defaultKeyWidth", defaults.default_key_width),
            ("defaultRowGap", defaults.default_row_gap),
            ("defaultKeyGap", defaults.default_key_gap),
        ],
    )?;
    check_fields(
        "layout",
        [
            ("defaultKeyHeight", layout.default_key_height),
            ("defaultKeyWidth", layout.default_key_width),
            ("defaultLogicalRowGap", layout.default_logical_row_gap),
            ("defaultLogicalKeyGap", layout.default_logical_key_gap),
        ],
    )?;

    let mut id = 0usize;
    for (index, row) in layout.rows.iter().enumerate() {
        check_row(row, index)?;
        for key in &row.keys {
            check_fields(
                &format!("key {}", id),
                [
                    ("keyWidth", key.key_width),
                    ("keyHeight", key.key_height),
                    ("logicalKeyGap", key.logical_key_gap),
                ],
            )?;
            id += 1;
        }
    }
    Ok(())
}

fn check_row(row: &RowDef, index: usize) -> SkResult<()> {
    check_fields(
        &format!("row {}", index),
        [
            ("logicalRowGap", row.logical_row_gap),
            ("defaultKeyHeight", row.default_key_height),
            ("defaultKeyWidth", row.default_key_width),
            ("defaultLogicalKeyGap", row.default_logical_key_gap),
        ],
    )
}

fn check_fields<const N: usize>(
    scope: &str,
    fields: [(&'static str, Option<f32>); N],
) -> SkResult<()> {
    for (field, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_finite()) {
            return Err(SoftKeysError::InvalidGeometry {
                scope: scope.to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}
