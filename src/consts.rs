/// Total logical width of every layout. Key widths are percentages of it.
pub const LOGICAL_WIDTH: f32 = 100.0;

/// Last layer of the geometry cascade (key < row < layout < settings < these).
pub const BUILTIN_KEY_HEIGHT: f32 = 10.0;
pub const BUILTIN_KEY_WIDTH: f32 = 10.0;
pub const BUILTIN_ROW_GAP: f32 = 0.0;
pub const BUILTIN_KEY_GAP: f32 = 0.0;

/// Touch timing defaults, in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u64 = 250;
pub const DEFAULT_REPEAT_START_MS: u64 = 250;
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 50;

/// Floating window defaults, in screen pixels.
pub const DEFAULT_MINIMAL_WIDTH_PX: f32 = 300.0;
pub const DEFAULT_RESIZE_INCREMENT_PX: f32 = 50.0;
pub const DEFAULT_INITIAL_WIDTH_RATIO: f32 = 0.8;

/// Clipboard-entry key labels are cut to this many characters.
pub const CLIPBOARD_LABEL_MAX_CHARS: usize = 20;

/// Name under which the clipboard layout is registered in a layout set.
pub const CLIPBOARD_LAYOUT_NAME: &str = "clipboard";
