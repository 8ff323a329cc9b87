//! Input abstraction layer.
//!
//! Normalizes the host's mouse, touch, and pen events into a single
//! `InputEvent` enum consumed by `SelectionSession::handle`. Coordinates are
//! already in the scene's global space.

use mq_core::Point;

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// A normalized pointer event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the tracked surface.
    PointerDown { x: f64, y: f64, modifiers: Modifiers },

    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released over the tracked surface.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released after leaving the tracked surface. Commits like `PointerUp`.
    PointerUpOutside { x: f64, y: f64, modifiers: Modifiers },

    /// Modifier state changed without pointer motion (key press/release).
    ModifiersChanged(Modifiers),
}

impl InputEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::PointerUpOutside { x, y, .. } => Some(Point::new(*x, *y)),
            Self::ModifiersChanged(_) => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::PointerUpOutside { modifiers, .. }
            | Self::ModifiersChanged(modifiers) => *modifiers,
        }
    }
}
