//! Editor session WASM bindings.
//!
//! [`JsEditorSession`] wraps the core `EditorSession` and owns the
//! client-to-viewport coordinate mapping, so the host can forward raw
//! `PointerEvent` client coordinates without doing any geometry itself.
//! The host's responsibilities shrink to: paint `image_draw_rect` /
//! `crop_box_rect`, forward pointer events with a hit-target string, and
//! wire up the toolbar controls.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditorSession();
//! session.load_image(bytes);
//!
//! canvas.addEventListener('pointermove', (e) => {
//!   const r = canvas.getBoundingClientRect();
//!   session.set_canvas_bounds(r.left, r.top, r.width, r.height);
//!   session.pointer_move(e.clientX, e.clientY);
//!   draw();
//! });
//! ```

use kiritori_core::geometry::to_viewport_space;
use kiritori_core::{
    AspectRatio, BoundingRect, EditorSession, ExportSettings, HitTarget, InputEvent, Point,
    ResizeHandle,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsBitmap;

/// Dimensions of a committed crop, handed back to JavaScript as
/// `{ width, height }`.
#[derive(Serialize)]
struct CropOutcome {
    width: u32,
    height: u32,
}

/// Parse a hit-target string from the host's hit testing.
///
/// `"image"` and `"crop"` name the two draggable surfaces; anything else is
/// tried as a resize-handle compass direction (`"n"`, `"ne"`, `"e"`, ...).
fn parse_target(value: &str) -> Option<HitTarget> {
    match value {
        "image" => Some(HitTarget::Image),
        "crop" => Some(HitTarget::CropInterior),
        direction => ResizeHandle::from_direction(direction).map(HitTarget::Handle),
    }
}

/// An image-cropping editor session for JavaScript.
///
/// Construct one per editor instance, call `load_image` with the raw file
/// bytes, then stream pointer events through `pointer_down` /
/// `pointer_move` / `pointer_up`. All geometry state lives on the Rust
/// side; the getters expose plain data for rendering.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
    bounds: BoundingRect,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session with no image loaded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditorSession {
        let inner = EditorSession::new();
        let bounds = BoundingRect::new(0.0, 0.0, inner.viewport().width, inner.viewport().height);
        JsEditorSession { inner, bounds }
    }

    /// Decode image bytes and load them as the session's original image.
    ///
    /// Resets the canvas-bounds mapping to identity; call
    /// `set_canvas_bounds` afterwards if the canvas is CSS-scaled.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable image.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let bitmap =
            kiritori_core::decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.load(bitmap);
        self.bounds =
            BoundingRect::new(0.0, 0.0, self.inner.viewport().width, self.inner.viewport().height);
        Ok(())
    }

    /// Record the canvas element's current bounding box in client
    /// coordinates, from `canvas.getBoundingClientRect()`. Pointer
    /// positions are mapped through this box into viewport pixels.
    pub fn set_canvas_bounds(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.bounds = BoundingRect::new(left, top, width, height);
    }

    /// Forward a pointer-down event.
    ///
    /// `target` is the host's hit-test result: `"image"`, `"crop"`, or a
    /// resize-handle direction (`"n"`, `"ne"`, `"e"`, `"se"`, `"s"`,
    /// `"sw"`, `"w"`, `"nw"`). Unknown targets are logged and ignored.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, target: &str) {
        let Some(target) = parse_target(target) else {
            web_sys::console::warn_1(&format!("kiritori: unknown hit target '{target}'").into());
            return;
        };
        self.inner.handle_event(InputEvent::PointerDown {
            position: self.to_viewport(client_x, client_y),
            target,
        });
    }

    /// Forward a pointer-move event.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.inner.handle_event(InputEvent::PointerMove {
            position: self.to_viewport(client_x, client_y),
        });
    }

    /// Forward a pointer-up event. Ends any active drag.
    pub fn pointer_up(&mut self) {
        self.inner.handle_event(InputEvent::PointerUp);
    }

    /// Forward a pointer-cancel event (e.g. `pointerleave`). Ends any
    /// active drag.
    pub fn pointer_cancel(&mut self) {
        self.inner.handle_event(InputEvent::PointerCancel);
    }

    /// Set the image scale from the zoom slider (10-300, percent).
    pub fn set_zoom_percent(&mut self, percent: u32) {
        self.inner.set_zoom_percent(percent);
    }

    /// Set the aspect-ratio constraint from its UI label (`"free"`,
    /// `"1:1"`, `"4:3"`, `"16:9"`, `"3:4"`, `"9:16"`). Unknown labels
    /// select `"free"`.
    pub fn set_aspect_ratio(&mut self, label: &str) {
        self.inner.set_aspect(AspectRatio::from_label(label));
    }

    /// Apply the toolbar's numeric width/height fields to the crop box.
    /// Pass `undefined` for an empty field.
    pub fn set_size_inputs(&mut self, width: Option<f64>, height: Option<f64>) {
        self.inner.apply_size_inputs(width, height);
    }

    /// Whether an image is loaded.
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Viewport (canvas pixel-buffer) width.
    pub fn viewport_width(&self) -> f64 {
        self.inner.viewport().width
    }

    /// Viewport (canvas pixel-buffer) height.
    pub fn viewport_height(&self) -> f64 {
        self.inner.viewport().height
    }

    /// Current crop-box width in viewport pixels, for the numeric field.
    pub fn crop_width(&self) -> u32 {
        self.inner.crop_rect().size.width.round() as u32
    }

    /// Current crop-box height in viewport pixels, for the numeric field.
    pub fn crop_height(&self) -> u32 {
        self.inner.crop_rect().size.height.round() as u32
    }

    /// Current zoom slider value (10-300, percent).
    pub fn zoom_percent(&self) -> u32 {
        self.inner.zoom().percent()
    }

    /// The current aspect-ratio label (`"free"`, `"1:1"`, ...).
    pub fn aspect_ratio(&self) -> String {
        self.inner.crop_rect().aspect.label().to_string()
    }

    /// Whether a committed crop result exists (enables the download
    /// button).
    pub fn has_crop_result(&self) -> bool {
        self.inner.has_crop_result()
    }

    /// The currently displayed bitmap (latest crop result, or the
    /// original), or `undefined` before an image is loaded. Copies the
    /// pixel data.
    pub fn working_bitmap(&self) -> Option<JsBitmap> {
        self.inner
            .working_bitmap()
            .map(|bitmap| JsBitmap::from_bitmap(bitmap.clone()))
    }

    /// Viewport-space rectangle to draw the working bitmap into, as
    /// `{ x, y, width, height }`, or `null` before an image is loaded.
    pub fn image_draw_rect(&self) -> Result<JsValue, JsValue> {
        match self.inner.image_draw_rect() {
            Some(rect) => {
                serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Viewport-space rectangle of the crop box, as
    /// `{ x, y, width, height }`.
    pub fn crop_box_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_box_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract the crop region and make the result the new working image.
    ///
    /// Returns the new working dimensions as `{ width, height }`.
    ///
    /// # Errors
    ///
    /// Returns an error if no image is loaded or extraction fails.
    pub fn commit_crop(&mut self) -> Result<JsValue, JsValue> {
        let (width, height) = self
            .inner
            .commit_crop()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&CropOutcome { width, height })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode the committed crop result as PNG bytes for download.
    ///
    /// Width and height overrides only take effect when both are supplied
    /// and non-zero; otherwise the crop box's own size is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no crop has been committed or encoding fails.
    pub fn export_png(
        &self,
        width_override: Option<u32>,
        height_override: Option<u32>,
    ) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_png(&ExportSettings::new(width_override, height_override))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Download file name for an export right now, e.g.
    /// `"kiritori-1700000000000.png"`.
    pub fn export_file_name(&self) -> String {
        kiritori_core::export_file_name(js_sys::Date::now().max(0.0) as u64)
    }

    /// Discard crop results and restore the original image at its loaded
    /// baseline.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Drop all image data and return to the unloaded state. The selected
    /// aspect ratio is kept.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for JsEditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl JsEditorSession {
    fn to_viewport(&self, client_x: f64, client_y: f64) -> Point {
        to_viewport_space(
            Point::new(client_x, client_y),
            &self.bounds,
            self.inner.viewport(),
        )
    }
}

/// Tests for the session bindings.
///
/// Methods returning `JsValue` only work on wasm32 targets; everything
/// else is exercised here with decoded PNG fixtures.
#[cfg(test)]
mod tests {
    use super::*;

    /// PNG bytes for a flat gray image of the given size.
    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![128u8; (width * height * 3) as usize];
        kiritori_core::encode_png(&pixels, width, height).unwrap()
    }

    fn loaded_session() -> JsEditorSession {
        let mut session = JsEditorSession::new();
        session.load_image(&png_fixture(1000, 800)).unwrap();
        session
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("image"), Some(HitTarget::Image));
        assert_eq!(parse_target("crop"), Some(HitTarget::CropInterior));
        assert_eq!(
            parse_target("ne"),
            Some(HitTarget::Handle(ResizeHandle::NorthEast))
        );
        assert_eq!(parse_target("w"), Some(HitTarget::Handle(ResizeHandle::West)));
        assert_eq!(parse_target("bogus"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn test_load_image_fits_viewport() {
        let session = loaded_session();
        assert!(session.is_ready());
        assert_eq!(session.viewport_width(), 750.0);
        assert_eq!(session.viewport_height(), 600.0);
    }

    #[test]
    fn test_pointer_drag_resizes_crop() {
        let mut session = loaded_session();

        session.pointer_down(525.0, 300.0, "e");
        session.pointer_move(625.0, 300.0);
        session.pointer_up();

        assert_eq!(session.crop_width(), 400);
        assert_eq!(session.crop_height(), 300);
    }

    #[test]
    fn test_pointer_positions_map_through_canvas_bounds() {
        let mut session = loaded_session();

        // The 750x600 canvas rendered at half size, offset by (100, 50).
        session.set_canvas_bounds(100.0, 50.0, 375.0, 300.0);

        // Client (362.5, 200) -> viewport (525, 300): the east handle.
        session.pointer_down(362.5, 200.0, "e");
        session.pointer_move(412.5, 200.0); // viewport x 625
        session.pointer_up();

        assert_eq!(session.crop_width(), 400);
    }

    #[test]
    fn test_aspect_ratio_label_round_trip() {
        let mut session = loaded_session();
        assert_eq!(session.aspect_ratio(), "free");

        session.set_aspect_ratio("16:9");
        assert_eq!(session.aspect_ratio(), "16:9");
        assert_eq!(session.crop_width(), 300);
        assert_eq!(session.crop_height(), 169);
    }

    #[test]
    fn test_size_inputs() {
        let mut session = loaded_session();
        session.set_size_inputs(Some(400.0), Some(200.0));
        assert_eq!(session.crop_width(), 400);
        assert_eq!(session.crop_height(), 200);

        // Empty fields fall back to the default edge length.
        session.set_size_inputs(None, None);
        assert_eq!(session.crop_width(), 300);
        assert_eq!(session.crop_height(), 300);
    }

    #[test]
    fn test_zoom_percent_clamps() {
        let mut session = loaded_session();
        session.set_zoom_percent(150);
        assert_eq!(session.zoom_percent(), 150);

        session.set_zoom_percent(5000);
        assert_eq!(session.zoom_percent(), 300);
    }

    #[test]
    fn test_working_bitmap_exposed() {
        let session = loaded_session();
        let bitmap = session.working_bitmap().unwrap();
        assert_eq!(bitmap.width(), 1000);
        assert_eq!(bitmap.height(), 800);

        let empty = JsEditorSession::new();
        assert!(empty.working_bitmap().is_none());
    }

    #[test]
    fn test_export_flow() {
        let mut session = loaded_session();
        assert!(!session.has_crop_result());

        let (width, height) = session.inner.commit_crop().unwrap();
        assert_eq!((width, height), (300, 300));
        assert!(session.has_crop_result());

        let bytes = session.export_png(None, None).unwrap();
        assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);

        // Both overrides present win over the crop size.
        let bytes = session.export_png(Some(10), Some(10)).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_reset_and_clear() {
        let mut session = loaded_session();
        session.inner.commit_crop().unwrap();

        session.reset();
        assert!(!session.has_crop_result());
        assert!(session.is_ready());

        session.clear();
        assert!(!session.is_ready());
        assert!(session.working_bitmap().is_none());
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![128u8; (width * height * 3) as usize];
        kiritori_core::encode_png(&pixels, width, height).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_load_image_invalid_bytes() {
        let mut session = JsEditorSession::new();
        assert!(session.load_image(&[0, 1, 2, 3]).is_err());
        assert!(!session.is_ready());
    }

    #[wasm_bindgen_test]
    fn test_rect_getters_serialize() {
        let mut session = JsEditorSession::new();
        session.load_image(&png_fixture(1000, 800)).unwrap();

        let draw = session.image_draw_rect().unwrap();
        assert!(!draw.is_null());

        let crop = session.crop_box_rect().unwrap();
        assert!(crop.is_object());
    }

    #[wasm_bindgen_test]
    fn test_image_draw_rect_null_before_load() {
        let session = JsEditorSession::new();
        assert!(session.image_draw_rect().unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_commit_crop_returns_dimensions() {
        let mut session = JsEditorSession::new();
        session.load_image(&png_fixture(1000, 800)).unwrap();

        let outcome = session.commit_crop().unwrap();
        assert!(outcome.is_object());
    }

    #[wasm_bindgen_test]
    fn test_commit_crop_not_ready_errors() {
        let mut session = JsEditorSession::new();
        assert!(session.commit_crop().is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_file_name_extension() {
        let mut session = JsEditorSession::new();
        session.load_image(&png_fixture(100, 100)).unwrap();
        assert!(session.export_file_name().ends_with(".png"));
    }

    #[wasm_bindgen_test]
    fn test_unknown_hit_target_ignored() {
        let mut session = JsEditorSession::new();
        session.load_image(&png_fixture(1000, 800)).unwrap();

        session.pointer_down(400.0, 300.0, "nonsense");
        session.pointer_move(600.0, 300.0);

        // Nothing grabbed, nothing moved.
        assert_eq!(session.crop_width(), 300);
    }
}
