use super::{ResolvedKey, ResolvedLayout};
use crate::keycodes::KeyCode;

/// First key in row-major order whose half-open box contains the point.
/// Overlapping keys resolve to whichever was laid out first.
pub fn key_at(layout: &ResolvedLayout, x: f32, y: f32) -> Option<&ResolvedKey> {
    layout.keys.iter().find(|k| k.contains(x, y))
}

/// Same as [`key_at`] for a point in view pixels. The view maps the full
/// logical width and height onto `view_width` x `view_height` pixels.
pub fn key_at_px(
    layout: &ResolvedLayout,
    px: f32,
    py: f32,
    view_width: f32,
    view_height: f32,
) -> Option<&ResolvedKey> {
    if view_width <= 0.0 || view_height <= 0.0 {
        return None;
    }
    let x = px * layout.total_width() / view_width;
    let y = py * layout.total_height / view_height;
    key_at(layout, x, y)
}

/// First key whose primary or long-press code matches.
pub fn key_by_code(layout: &ResolvedLayout, code: KeyCode) -> Option<&ResolvedKey> {
    layout
        .keys
        .iter()
        .find(|k| k.code == Some(code) || k.long_press_code == Some(code))
}

pub fn key_by_id(layout: &ResolvedLayout, id: usize) -> Option<&ResolvedKey> {
    layout.keys.get(id)
}
