//! Viewport geometry and coordinate mapping.
//!
//! Three coordinate spaces are involved when cropping in a browser:
//!
//! - **client space**: pointer positions as the host reports them, in CSS pixels
//! - **viewport space**: the canvas pixel buffer the image is drawn into
//! - **source space**: pixel coordinates of the working bitmap
//!
//! The canvas element may be rendered at a CSS size that differs from its
//! pixel buffer, so client-to-viewport mapping scales by the ratio between
//! the two. All functions here are pure and deterministic; the resize, move
//! and pan math depends on repeatable deltas.

use serde::{Deserialize, Serialize};

/// Maximum viewport width in pixels.
pub const MAX_VIEWPORT_WIDTH: f64 = 800.0;
/// Maximum viewport height in pixels.
pub const MAX_VIEWPORT_HEIGHT: f64 = 600.0;

/// A position in a 2D pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The canvas element's bounding box in client coordinates (CSS pixels),
/// as reported by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The display surface the working bitmap is rendered into.
///
/// Created once per loaded image, sized to fit the bitmap within
/// 800x600 while preserving its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pixel-buffer width.
    pub width: f64,
    /// Pixel-buffer height.
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size a viewport to fit a bitmap within the 800x600 maximum bound,
    /// preserving the bitmap's aspect ratio. Bitmaps that already fit are
    /// displayed at their native size.
    pub fn fit(bitmap_width: u32, bitmap_height: u32) -> Self {
        let mut width = f64::from(bitmap_width);
        let mut height = f64::from(bitmap_height);

        if width > MAX_VIEWPORT_WIDTH || height > MAX_VIEWPORT_HEIGHT {
            let ratio = (MAX_VIEWPORT_WIDTH / width).min(MAX_VIEWPORT_HEIGHT / height);
            width = (width * ratio).round();
            height = (height * ratio).round();
        }

        Self { width, height }
    }

    /// The viewport's center point, where a freshly loaded image is placed.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MAX_VIEWPORT_WIDTH,
            height: MAX_VIEWPORT_HEIGHT,
        }
    }
}

/// Map a client-space pointer position into viewport pixel space.
///
/// Subtracts the bounding-box origin and scales by the ratio between the
/// viewport's pixel buffer and the element's CSS-rendered size. Touch input
/// is normalized upstream to a single client position (the first active
/// touch point); the mapping itself is input-agnostic.
///
/// A degenerate bounding box (zero width or height) falls back to a scale
/// factor of 1 instead of producing non-finite coordinates.
pub fn to_viewport_space(client: Point, bounds: &BoundingRect, viewport: &Viewport) -> Point {
    Point::new(
        (client.x - bounds.left) * scale_factor(viewport.width, bounds.width),
        (client.y - bounds.top) * scale_factor(viewport.height, bounds.height),
    )
}

/// Inverse of [`to_viewport_space`]: map a viewport-space position back to
/// client coordinates using the same scale factors.
pub fn to_client_space(position: Point, bounds: &BoundingRect, viewport: &Viewport) -> Point {
    Point::new(
        position.x / scale_factor(viewport.width, bounds.width) + bounds.left,
        position.y / scale_factor(viewport.height, bounds.height) + bounds.top,
    )
}

fn scale_factor(viewport_dimension: f64, bounds_dimension: f64) -> f64 {
    if bounds_dimension > 0.0 {
        viewport_dimension / bounds_dimension
    } else {
        1.0
    }
}
