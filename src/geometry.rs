// Layout definitions as they arrive from JSON, plus the resolved form.
pub use self::hit::{key_at, key_at_px, key_by_code, key_by_id};
pub use self::resolver::{
    cascade, resolve, ResolutionWarning, ResolvedKey, ResolvedLayout, ResolvedRow, WarningKind,
    WarningScope,
};

use crate::error::SkResult;
use crate::keycodes::KeyCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use typed_builder::TypedBuilder;

pub mod hit;
pub mod resolver;

/// A layout description. Consumers never mutate it; resolution builds a
/// separate [`ResolvedLayout`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDef {
    pub rows: Vec<RowDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_logical_row_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_logical_key_gap: Option<f32>,
}

impl LayoutDef {
    pub fn new(rows: Vec<RowDef>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDef {
    pub keys: Vec<KeyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_row_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_logical_key_gap: Option<f32>,
}

impl RowDef {
    pub fn new(keys: Vec<KeyDef>) -> Self {
        Self {
            keys,
            ..Default::default()
        }
    }
}

/// A single key. A missing `key_code` means "commit the label as text".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct KeyDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub key_code: Option<KeyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub key_code_long_press: Option<KeyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub label_long_press: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub key_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub key_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub logical_key_gap: Option<f32>,
    #[serde(default)]
    #[builder(default)]
    pub is_repeatable: bool,
    #[serde(default)]
    #[builder(default)]
    pub is_modifier: bool,
    #[serde(default)]
    #[builder(default)]
    pub preserve_label_case: bool,
    #[serde(default)]
    #[builder(default)]
    pub preserve_small_label_case: bool,
}

/// Trait to keep file IO out of the data types themselves.
pub trait LayoutLoader: Sized {
    fn load_from_file<P: AsRef<Path>>(path: P) -> SkResult<Self>;
    fn from_json_str(content: &str) -> SkResult<Self>;
}

impl LayoutLoader for LayoutDef {
    fn load_from_file<P: AsRef<Path>>(path: P) -> SkResult<Self> {
        let content = fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    fn from_json_str(content: &str) -> SkResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
