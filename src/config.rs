use crate::consts::{
    DEFAULT_INITIAL_WIDTH_RATIO, DEFAULT_LONG_PRESS_MS, DEFAULT_MINIMAL_WIDTH_PX,
    DEFAULT_REPEAT_INTERVAL_MS, DEFAULT_REPEAT_START_MS, DEFAULT_RESIZE_INCREMENT_PX,
};
use crate::error::{SkResult, SoftKeysError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[command(flatten)]
    pub layout: LayoutDefaults,
    #[command(flatten)]
    pub timing: TouchTimings,
    #[command(flatten)]
    pub floating: FloatingParams,
    #[command(flatten)]
    pub clipboard: ClipboardParams,
}

/// Global layer of the geometry cascade. `None` defers to the built-in constant.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutDefaults {
    #[arg(long)]
    pub default_key_height: Option<f32>,
    #[arg(long)]
    pub default_key_width: Option<f32>,
    #[arg(long)]
    pub default_row_gap: Option<f32>,
    #[arg(long)]
    pub default_key_gap: Option<f32>,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TouchTimings {
    #[arg(long, default_value_t = DEFAULT_LONG_PRESS_MS)]
    pub long_press_ms: u64,
    #[arg(long, default_value_t = DEFAULT_REPEAT_START_MS)]
    pub repeat_start_ms: u64,
    #[arg(long, default_value_t = DEFAULT_REPEAT_INTERVAL_MS)]
    pub repeat_interval_ms: u64,
}

impl Default for TouchTimings {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            repeat_start_ms: DEFAULT_REPEAT_START_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl TouchTimings {
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn repeat_start(&self) -> Duration {
        Duration::from_millis(self.repeat_start_ms)
    }

    /// Never zero, so a repeating key always makes progress in time.
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms.max(1))
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FloatingParams {
    #[arg(long, default_value_t = DEFAULT_MINIMAL_WIDTH_PX)]
    pub minimal_width_px: f32,
    #[arg(long, default_value_t = DEFAULT_RESIZE_INCREMENT_PX)]
    pub resize_increment_px: f32,
    #[arg(long, default_value_t = 0.0)]
    pub bottom_offset_px: f32,
    #[arg(long, default_value_t = DEFAULT_INITIAL_WIDTH_RATIO)]
    pub initial_width_ratio: f32,
}

impl Default for FloatingParams {
    fn default() -> Self {
        Self {
            minimal_width_px: DEFAULT_MINIMAL_WIDTH_PX,
            resize_increment_px: DEFAULT_RESIZE_INCREMENT_PX,
            bottom_offset_px: 0.0,
            initial_width_ratio: DEFAULT_INITIAL_WIDTH_RATIO,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipboardParams {
    /// Minimum number of history slots, padded beyond the key-bound ones.
    #[arg(long = "clipboard-capacity", default_value_t = 0)]
    pub capacity: usize,
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SkResult<Self> {
        let content = fs::read_to_string(&path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SkResult<()> {
        if self.timing.repeat_interval_ms == 0 {
            return Err(SoftKeysError::Config(
                "repeat_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.floating.minimal_width_px.is_finite() || self.floating.minimal_width_px < 0.0 {
            return Err(SoftKeysError::Config(format!(
                "minimal_width_px must be a non-negative number, got {}",
                self.floating.minimal_width_px
            )));
        }
        if !(0.0..=1.0).contains(&self.floating.initial_width_ratio) {
            return Err(SoftKeysError::Config(format!(
                "initial_width_ratio must be within 0..=1, got {}",
                self.floating.initial_width_ratio
            )));
        }
        Ok(())
    }

    /// Copies every value the user typed on the command line over `self`,
    /// leaving file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &Settings, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(layout.default_key_height, "default_key_height");
        update_if_present!(layout.default_key_width, "default_key_width");
        update_if_present!(layout.default_row_gap, "default_row_gap");
        update_if_present!(layout.default_key_gap, "default_key_gap");

        update_if_present!(timing.long_press_ms, "long_press_ms");
        update_if_present!(timing.repeat_start_ms, "repeat_start_ms");
        update_if_present!(timing.repeat_interval_ms, "repeat_interval_ms");

        update_if_present!(floating.minimal_width_px, "minimal_width_px");
        update_if_present!(floating.resize_increment_px, "resize_increment_px");
        update_if_present!(floating.bottom_offset_px, "bottom_offset_px");
        update_if_present!(floating.initial_width_ratio, "initial_width_ratio");

        update_if_present!(clipboard.capacity, "capacity");
    }
}
