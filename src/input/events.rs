//! Normalized pointer events and the per-device adapters that produce them.
//!
//! Mouse and touch sources disagree about coordinate spaces (mouse offsets
//! are already surface-local, touch positions are viewport-global) and about
//! button semantics. Each source gets an adapter that folds those
//! differences into one [`PointerEvent`] variant, so the state machine never
//! sees a raw device event.

use crate::util::Rect;

/// What a pointer did, independent of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary contact began (mouse button pressed, finger down)
    Down,
    /// Pointer moved
    Move,
    /// Primary contact ended
    Up,
    /// Pointer entered the surface area
    Enter,
    /// Pointer left the surface area
    Leave,
    /// Contact was aborted by the platform (e.g. palm rejection)
    Cancel,
}

/// Buttons currently held, decoded from the device bitmask.
///
/// Touch contacts report the primary button held for their whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    /// Primary button (left mouse button / any touch contact)
    pub primary: bool,
    /// Secondary button (right mouse button)
    pub secondary: bool,
    /// Auxiliary button (middle mouse button)
    pub auxiliary: bool,
}

impl Buttons {
    /// No buttons held.
    pub const NONE: Buttons = Buttons {
        primary: false,
        secondary: false,
        auxiliary: false,
    };

    /// Only the primary button held.
    pub const PRIMARY: Buttons = Buttons {
        primary: true,
        secondary: false,
        auxiliary: false,
    };

    /// Decodes a DOM-style `buttons` bitmask (bit 0 = primary,
    /// bit 1 = secondary, bit 2 = auxiliary).
    pub fn from_mask(mask: u32) -> Self {
        Self {
            primary: mask & 0x1 != 0,
            secondary: mask & 0x2 != 0,
            auxiliary: mask & 0x4 != 0,
        }
    }
}

/// One device-independent pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Surface-local X coordinate
    pub x: f64,
    /// Surface-local Y coordinate
    pub y: f64,
    /// Buttons held at the time of the event
    pub buttons: Buttons,
}

impl PointerEvent {
    /// Release observed by the document-level listener rather than the
    /// surface itself (the button came up outside the surface bounds).
    ///
    /// The host registers that listener at mount and removes it at unmount;
    /// it exists to patch the gap where the surface-local up event is never
    /// delivered. Coordinates are meaningless for a release and are zeroed.
    pub fn document_release() -> Self {
        Self {
            kind: PointerKind::Up,
            x: 0.0,
            y: 0.0,
            buttons: Buttons::NONE,
        }
    }
}

/// Phase of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Touch started (finger down)
    Start,
    /// Touch moved (finger dragging)
    Move,
    /// Touch ended (finger up)
    End,
    /// Touch cancelled by the platform
    Cancel,
}

/// Adapter for mouse events.
///
/// Mouse offsets arrive surface-local already, so normalization only decodes
/// the buttons bitmask.
pub struct MouseAdapter;

impl MouseAdapter {
    /// Builds a normalized event from surface-local mouse data.
    pub fn normalize(kind: PointerKind, offset_x: f64, offset_y: f64, buttons_mask: u32) -> PointerEvent {
        PointerEvent {
            kind,
            x: offset_x,
            y: offset_y,
            buttons: Buttons::from_mask(buttons_mask),
        }
    }
}

/// Adapter for touch events.
///
/// Touch positions are viewport-global and must be translated through the
/// surface's on-screen bounding box, which the host refreshes whenever
/// layout or scrolling moves the surface.
#[derive(Debug, Clone, Copy)]
pub struct TouchAdapter {
    bounds: Rect,
}

impl TouchAdapter {
    /// Creates an adapter for a surface at the given viewport bounds.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Updates the cached bounding box after a layout change.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Translates one touch contact into a normalized event.
    ///
    /// A touch contact counts as the primary button for its whole lifetime;
    /// end and cancel report no buttons held, matching a released mouse.
    pub fn normalize(&self, phase: TouchPhase, client_x: f64, client_y: f64) -> PointerEvent {
        let (origin_x, origin_y) = self.bounds.origin();
        let (kind, buttons) = match phase {
            TouchPhase::Start => (PointerKind::Down, Buttons::PRIMARY),
            TouchPhase::Move => (PointerKind::Move, Buttons::PRIMARY),
            TouchPhase::End => (PointerKind::Up, Buttons::NONE),
            TouchPhase::Cancel => (PointerKind::Cancel, Buttons::NONE),
        };
        PointerEvent {
            kind,
            x: client_x - origin_x,
            y: client_y - origin_y,
            buttons,
        }
    }

    /// Hosts must cancel the platform's default gesture handling (page
    /// scroll, pinch zoom) for events fed through this adapter, or the drag
    /// is interrupted mid-stroke.
    pub fn suppresses_default_gesture(&self) -> bool {
        true
    }
}
