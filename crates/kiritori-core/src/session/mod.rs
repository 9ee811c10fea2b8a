//! Editor session: interaction state machine and geometry ownership.
//!
//! An [`EditorSession`] owns everything the cropping UI mutates: the working
//! bitmap, the image transform, the crop rectangle, and the current
//! interaction mode. It is an explicit, instantiable object - multiple
//! sessions can coexist - and is driven entirely through
//! [`EditorSession::handle_event`] plus a handful of configuration setters,
//! so it is testable without any rendering surface.
//!
//! # State Machine
//!
//! The initial mode is `Idle`. Pointer-down enters `Panning`, `Resizing` or
//! `MovingCrop` depending on what the pointer hit; pointer-move updates the
//! active drag; pointer-up and pointer-cancel unconditionally return to
//! `Idle`. A pointer-down while a resize is in progress is ignored, so
//! panning can never steal an active resize.
//!
//! # Readiness
//!
//! All geometry mutators are silent no-ops while no bitmap is loaded.
//! Operations that must produce a value (`commit_crop`, `export_png`)
//! return [`SessionError::NotReady`] instead.

mod input;
mod resize;

pub use input::{HitTarget, InputEvent, InteractionMode, ResizeAnchor, ResizeHandle};
pub use resize::{
    clamp_offset, constrain_crop_size, resolve_resize, CROP_BOUND_MARGIN, MIN_CROP_SIZE,
    OFFSET_MARGIN,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitmap::{extract_region, Bitmap, BitmapError};
use crate::crop::compute_crop_plan;
use crate::encode::EncodeError;
use crate::export::ExportSettings;
use crate::geometry::{Point, Rect, Size, Viewport};
use crate::{AspectRatio, ZoomScale};

/// Default crop-box edge length for a fresh session.
pub const DEFAULT_CROP_SIZE: f64 = 300.0;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No bitmap is loaded (or no crop has been committed yet, for export).
    #[error("No image loaded")]
    NotReady,

    /// Crop extraction failed.
    #[error("Crop extraction failed: {0}")]
    Extraction(#[from] BitmapError),

    /// Export encoding failed.
    #[error("Export encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Viewport-space placement of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Viewport-space position of the image *center*.
    pub position: Point,
    /// Uniform scale multiplier applied to both axes. Always positive.
    pub scale: f64,
}

impl ImageTransform {
    fn centered_in(viewport: &Viewport) -> Self {
        Self {
            position: viewport.center(),
            scale: 1.0,
        }
    }
}

/// The user-positioned crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Rectangle dimensions in viewport pixels.
    pub size: Size,
    /// Displacement of the rectangle's center from the viewport's center.
    pub offset: Point,
    /// Current aspect-ratio constraint.
    pub aspect: AspectRatio,
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            size: Size::new(DEFAULT_CROP_SIZE, DEFAULT_CROP_SIZE),
            offset: Point::default(),
            aspect: AspectRatio::Free,
        }
    }
}

/// One image-cropping editing session.
#[derive(Debug, Default)]
pub struct EditorSession {
    /// The bitmap as originally loaded, kept so `reset` can discard crops.
    original: Option<Bitmap>,
    /// The most recent crop result, if any. The displayed (working) bitmap
    /// is `cropped` when present, `original` otherwise.
    cropped: Option<Bitmap>,
    viewport: Viewport,
    transform: Option<ImageTransform>,
    crop: CropRect,
    zoom: ZoomScale,
    mode: InteractionMode,
}

impl EditorSession {
    /// Create a session with no image loaded. The crop box starts at its
    /// default size; geometry operations stay inert until [`Self::load`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly decoded bitmap as both the original and the
    /// working image. Fits the viewport to the bitmap, centers the image at
    /// scale 1, and zeroes the crop offset.
    pub fn load(&mut self, bitmap: Bitmap) {
        self.viewport = Viewport::fit(bitmap.width, bitmap.height);
        self.transform = Some(ImageTransform::centered_in(&self.viewport));
        self.zoom = ZoomScale::default();
        self.crop.offset = Point::default();
        self.crop.size = constrain_crop_size(self.crop.size, self.crop.aspect.ratio(), &self.viewport);
        self.cropped = None;
        self.original = Some(bitmap);
        self.mode = InteractionMode::Idle;
    }

    /// Whether a bitmap is loaded and geometry operations are live.
    pub fn is_ready(&self) -> bool {
        self.original.is_some()
    }

    /// The currently displayed bitmap: the latest crop result if one
    /// exists, otherwise the original load.
    pub fn working_bitmap(&self) -> Option<&Bitmap> {
        self.cropped.as_ref().or(self.original.as_ref())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn crop_rect(&self) -> &CropRect {
        &self.crop
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn zoom(&self) -> ZoomScale {
        self.zoom
    }

    /// The image transform, present once a bitmap is loaded.
    pub fn transform(&self) -> Option<&ImageTransform> {
        self.transform.as_ref()
    }

    /// Feed one normalized pointer event through the state machine.
    /// Positions must already be in viewport space. No-op until a bitmap
    /// is loaded.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.is_ready() {
            return;
        }

        match event {
            InputEvent::PointerDown { position, target } => self.pointer_down(position, target),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            // Ending an already-idle machine is a no-op.
            InputEvent::PointerUp | InputEvent::PointerCancel => {
                self.mode = InteractionMode::Idle;
            }
        }
    }

    fn pointer_down(&mut self, position: Point, target: HitTarget) {
        // An active resize keeps the pointer: it suppresses pan/move starts
        // until the drag ends.
        if self.mode.is_resizing() {
            return;
        }

        self.mode = match target {
            HitTarget::Handle(handle) => InteractionMode::Resizing {
                handle,
                anchor: ResizeAnchor {
                    pointer: position,
                    size: self.crop.size,
                },
            },
            HitTarget::CropInterior => InteractionMode::MovingCrop {
                grab: Point::new(
                    position.x - self.crop.offset.x,
                    position.y - self.crop.offset.y,
                ),
            },
            HitTarget::Image => {
                let center = self
                    .transform
                    .map(|t| t.position)
                    .unwrap_or_else(|| self.viewport.center());
                InteractionMode::Panning {
                    grab: Point::new(position.x - center.x, position.y - center.y),
                }
            }
        };
    }

    fn pointer_move(&mut self, position: Point) {
        match self.mode {
            InteractionMode::Idle => {}
            InteractionMode::Panning { grab } => {
                // Free positioning: the image may be dragged fully out of
                // view, so no clamping here.
                if let Some(transform) = self.transform.as_mut() {
                    transform.position = Point::new(position.x - grab.x, position.y - grab.y);
                }
            }
            InteractionMode::Resizing { handle, anchor } => {
                self.crop.size = resolve_resize(
                    &anchor,
                    handle,
                    position,
                    self.crop.aspect.ratio(),
                    &self.viewport,
                );
            }
            InteractionMode::MovingCrop { grab } => {
                let offset = Point::new(position.x - grab.x, position.y - grab.y);
                self.crop.offset = clamp_offset(offset, &self.viewport);
            }
        }
    }

    /// Set the image scale from the zoom slider's integer percentage.
    pub fn set_zoom_percent(&mut self, percent: u32) {
        if !self.is_ready() {
            return;
        }
        self.zoom = ZoomScale::new(percent);
        if let Some(transform) = self.transform.as_mut() {
            transform.scale = self.zoom.as_factor();
        }
    }

    /// Change the aspect-ratio constraint. When a ratio is locked, the crop
    /// height is re-derived from the current width.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        if !self.is_ready() {
            return;
        }
        self.crop.aspect = aspect;
        let size = match aspect.ratio() {
            Some(ratio) => Size::new(self.crop.size.width, self.crop.size.width / ratio),
            None => self.crop.size,
        };
        self.crop.size = constrain_crop_size(size, aspect.ratio(), &self.viewport);
    }

    /// Apply the UI's numeric width/height fields to the canonical crop
    /// rectangle. Missing fields fall back to the default edge length; when
    /// a ratio is locked, the width drives the height.
    pub fn apply_size_inputs(&mut self, width: Option<f64>, height: Option<f64>) {
        if !self.is_ready() {
            return;
        }
        let width = width.unwrap_or(DEFAULT_CROP_SIZE);
        let height = match self.crop.aspect.ratio() {
            Some(ratio) => width / ratio,
            None => height.unwrap_or(DEFAULT_CROP_SIZE),
        };
        self.crop.size =
            constrain_crop_size(Size::new(width, height), self.crop.aspect.ratio(), &self.viewport);
    }

    /// Viewport-space rectangle where the renderer should draw the working
    /// bitmap, honoring the current pan position and scale.
    pub fn image_draw_rect(&self) -> Option<Rect> {
        let bitmap = self.working_bitmap()?;
        let transform = self.transform?;

        let width = f64::from(bitmap.width) * transform.scale;
        let height = f64::from(bitmap.height) * transform.scale;
        Some(Rect::new(
            transform.position.x - width / 2.0,
            transform.position.y - height / 2.0,
            width,
            height,
        ))
    }

    /// Viewport-space rectangle of the crop box.
    pub fn crop_box_rect(&self) -> Rect {
        let center = self.viewport.center();
        Rect::new(
            center.x + self.crop.offset.x - self.crop.size.width / 2.0,
            center.y + self.crop.offset.y - self.crop.size.height / 2.0,
            self.crop.size.width,
            self.crop.size.height,
        )
    }

    /// Extract the crop region from the working bitmap and make the result
    /// the new working bitmap.
    ///
    /// On success the session is re-baselined for a further crop pass: the
    /// scale resets to 1, the image recenters, and the crop offset zeroes.
    /// Returns the new working dimensions.
    pub fn commit_crop(&mut self) -> Result<(u32, u32), SessionError> {
        let transform = self.transform.ok_or(SessionError::NotReady)?;
        let bitmap = self.working_bitmap().ok_or(SessionError::NotReady)?;

        let plan = compute_crop_plan(&transform, &self.crop, &self.viewport, bitmap.width, bitmap.height);
        let result = extract_region(bitmap, &plan.source, plan.output_width, plan.output_height)?;
        let dimensions = (result.width, result.height);

        self.cropped = Some(result);
        self.transform = Some(ImageTransform::centered_in(&self.viewport));
        self.zoom = ZoomScale::default();
        self.crop.offset = Point::default();
        self.mode = InteractionMode::Idle;

        Ok(dimensions)
    }

    /// Whether a committed crop result exists (enables export).
    pub fn has_crop_result(&self) -> bool {
        self.cropped.is_some()
    }

    /// Encode the committed crop result as PNG bytes, resampled to the
    /// resolved output size.
    pub fn export_png(&self, settings: &ExportSettings) -> Result<Vec<u8>, SessionError> {
        let bitmap = self.cropped.as_ref().ok_or(SessionError::NotReady)?;
        let (width, height) = settings.resolve_output_size(self.crop.size);

        let output = crate::bitmap::resize_to(bitmap, width, height)?;
        Ok(crate::encode::encode_png(
            &output.pixels,
            output.width,
            output.height,
        )?)
    }

    /// Discard crop results and return the original image to its loaded
    /// baseline: centered, scale 1, zero crop offset.
    pub fn reset(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.cropped = None;
        self.transform = Some(ImageTransform::centered_in(&self.viewport));
        self.zoom = ZoomScale::default();
        self.crop.offset = Point::default();
        self.mode = InteractionMode::Idle;
    }

    /// Drop all bitmaps and return to the unloaded state.
    pub fn clear(&mut self) {
        *self = Self {
            crop: CropRect {
                aspect: self.crop.aspect,
                ..CropRect::default()
            },
            ..Self::default()
        };
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
