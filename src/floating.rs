use crate::config::FloatingParams;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Clamps `v` into `[lo, hi]`. An inverted range (window larger than the
/// screen) collapses to its midpoint.
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo <= hi {
        v.clamp(lo, hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Keeps a center-relative window position on screen. The bottom bound
/// reserves `bottom_offset_px`; the top bound does not.
pub fn clamp_position(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    screen_width: f32,
    screen_height: f32,
    bottom_offset_px: f32,
) -> (f32, f32) {
    let half_x = screen_width / 2.0 - width / 2.0;
    let top = -(screen_height / 2.0 - height / 2.0);
    let bottom = screen_height / 2.0 - bottom_offset_px - height / 2.0;
    (clamp_axis(x, -half_x, half_x), clamp_axis(y, top, bottom))
}

/// Applies `increment` and clamps to `[minimal_width, screen_width]`.
/// The minimum wins on screens narrower than it.
pub fn clamp_width(width: f32, increment: f32, screen_width: f32, minimal_width: f32) -> f32 {
    (width + increment).min(screen_width).max(minimal_width)
}

/// Geometry of the floating keyboard window, in screen pixels. The
/// position is the window center's offset from the screen center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingWindow {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    aspect_ratio: f32,
    params: FloatingParams,
}

impl FloatingWindow {
    /// Opens centered, at the configured share of the screen width. Height
    /// follows the layout's aspect ratio.
    pub fn open(params: FloatingParams, screen: ScreenSize, aspect_ratio: f32) -> Self {
        let initial = screen.width * params.initial_width_ratio;
        let width = clamp_width(initial, 0.0, screen.width, params.minimal_width_px);
        let mut window = Self {
            width,
            height: width * aspect_ratio,
            x: 0.0,
            y: 0.0,
            aspect_ratio,
            params,
        };
        window.constrain(screen);
        debug!(
            "Floating window opened: {}x{} on {}x{}",
            window.width, window.height, screen.width, screen.height
        );
        window
    }

    pub fn move_by(&mut self, dx: f32, dy: f32, screen: ScreenSize) {
        self.x += dx;
        self.y += dy;
        self.constrain(screen);
    }

    /// Grows (positive) or shrinks (negative) by one resize increment.
    pub fn resize_step(&mut self, grow: bool, screen: ScreenSize) {
        let step = if grow {
            self.params.resize_increment_px
        } else {
            -self.params.resize_increment_px
        };
        self.width = clamp_width(self.width, step, screen.width, self.params.minimal_width_px);
        self.height = self.width * self.aspect_ratio;
        self.constrain(screen);
    }

    /// Content changed (new layout): recompute height and re-clamp.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32, screen: ScreenSize) {
        self.aspect_ratio = aspect_ratio;
        self.height = self.width * aspect_ratio;
        self.constrain(screen);
    }

    /// Must run after every rotation with the new screen size.
    pub fn constrain(&mut self, screen: ScreenSize) {
        self.width = clamp_width(self.width, 0.0, screen.width, self.params.minimal_width_px);
        self.height = self.width * self.aspect_ratio;
        let (x, y) = clamp_position(
            self.x,
            self.y,
            self.width,
            self.height,
            screen.width,
            screen.height,
            self.params.bottom_offset_px,
        );
        self.x = x;
        self.y = y;
    }
}
