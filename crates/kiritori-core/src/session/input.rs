//! Input events, hit targets, and resize handles.
//!
//! The session consumes normalized pointer events: the host layer performs
//! DOM hit-testing (which widget the pointer went down on) and coordinate
//! mapping, then delivers an [`InputEvent`] with positions already in
//! viewport pixel space.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// One of the eight crop-box resize handles, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeHandle {
    /// Whether this handle moves the east edge (width grows with positive
    /// pointer delta).
    pub fn affects_east(self) -> bool {
        matches!(
            self,
            ResizeHandle::East | ResizeHandle::NorthEast | ResizeHandle::SouthEast
        )
    }

    /// Whether this handle moves the west edge (width grows with negative
    /// pointer delta).
    pub fn affects_west(self) -> bool {
        matches!(
            self,
            ResizeHandle::West | ResizeHandle::NorthWest | ResizeHandle::SouthWest
        )
    }

    /// Whether this handle moves the south edge.
    pub fn affects_south(self) -> bool {
        matches!(
            self,
            ResizeHandle::South | ResizeHandle::SouthEast | ResizeHandle::SouthWest
        )
    }

    /// Whether this handle moves the north edge.
    pub fn affects_north(self) -> bool {
        matches!(
            self,
            ResizeHandle::North | ResizeHandle::NorthEast | ResizeHandle::NorthWest
        )
    }

    /// Whether this handle has a horizontal component. Corner handles
    /// resolve aspect-locked resizing through this.
    pub fn is_horizontal(self) -> bool {
        self.affects_east() || self.affects_west()
    }

    /// Parse a DOM `data-direction` attribute value ("n", "ne", "e", ...).
    pub fn from_direction(direction: &str) -> Option<Self> {
        match direction {
            "n" => Some(ResizeHandle::North),
            "s" => Some(ResizeHandle::South),
            "e" => Some(ResizeHandle::East),
            "w" => Some(ResizeHandle::West),
            "ne" => Some(ResizeHandle::NorthEast),
            "nw" => Some(ResizeHandle::NorthWest),
            "se" => Some(ResizeHandle::SouthEast),
            "sw" => Some(ResizeHandle::SouthWest),
            _ => None,
        }
    }
}

/// What the pointer went down on, as hit-tested by the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// The image area (outside the crop box and its handles).
    Image,
    /// The crop rectangle's interior, not on a handle.
    CropInterior,
    /// A specific resize handle.
    Handle(ResizeHandle),
}

/// A normalized pointer event, positions in viewport pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point, target: HitTarget },
    PointerMove { position: Point },
    PointerUp,
    /// Pointer left the surface or the touch was cancelled. Treated like
    /// `PointerUp`: any in-progress drag is discarded.
    PointerCancel,
}

/// Geometry snapshot captured when a resize drag starts. Deltas are always
/// computed against this snapshot rather than accumulated, so repeated
/// moves cannot drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAnchor {
    /// Pointer position at drag start.
    pub pointer: Point,
    /// Crop-box size at drag start.
    pub size: Size,
}

/// The current interaction mode. Exactly one is active at a time.
///
/// Each dragging variant carries its anchor, so the anchor is created on
/// pointer-down and dropped on pointer-up with no separate lifetime to
/// manage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Dragging the image. `grab` is the pointer position minus the image
    /// center at drag start.
    Panning { grab: Point },
    /// Dragging a resize handle of the crop box.
    Resizing {
        handle: ResizeHandle,
        anchor: ResizeAnchor,
    },
    /// Dragging the crop box itself. `grab` is the pointer position minus
    /// the crop offset at drag start.
    MovingCrop { grab: Point },
}

impl InteractionMode {
    pub fn is_idle(self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    pub fn is_resizing(self) -> bool {
        matches!(self, InteractionMode::Resizing { .. })
    }
}
