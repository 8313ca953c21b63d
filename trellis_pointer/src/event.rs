// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event payloads.

use kurbo::Point;

/// The kind of a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Primary button press.
    Down,
    /// Pointer movement.
    Move,
    /// Primary button release.
    Up,
}

/// A pointer event as it travels through a dispatch.
///
/// The event is mutable across an entire delivery sequence: a handler that
/// calls [`PointerEvent::prevent_default`] suppresses the environment's
/// default action (text selection, native drag) without stopping
/// propagation, and later handlers observe the flag.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<N> {
    /// What happened.
    pub kind: PointerEventKind,
    /// Pointer position in world coordinates.
    pub position: Point,
    /// The node the event is targeted at.
    pub target: N,
    /// Whether some handler suppressed the default action.
    pub default_prevented: bool,
}

impl<N> PointerEvent<N> {
    /// Create an event targeted at `target`.
    pub fn new(kind: PointerEventKind, position: Point, target: N) -> Self {
        Self {
            kind,
            position,
            target,
            default_prevented: false,
        }
    }

    /// Suppress the environment's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prevent_default_latches() {
        let mut ev = PointerEvent::new(PointerEventKind::Down, Point::new(1.0, 2.0), 7_u32);
        assert!(!ev.default_prevented);
        ev.prevent_default();
        ev.prevent_default();
        assert!(ev.default_prevented);
        assert_eq!(ev.target, 7);
    }
}
