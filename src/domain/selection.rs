use crate::domain::position::{Point, Span};
use serde::{Deserialize, Serialize};

/// An editor selection: the cursor end (`active`) and the fixed end (`anchor`).
///
/// The two points may arrive in either order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub active: Point,
    pub anchor: Point,
}

impl Selection {
    pub const fn new(active: Point, anchor: Point) -> Self {
        Self { active, anchor }
    }

    /// A collapsed selection (plain cursor).
    pub const fn caret(point: Point) -> Self {
        Self {
            active: point,
            anchor: point,
        }
    }

    /// The covered range `[min(active, anchor), max(active, anchor)]`.
    pub fn range(&self) -> Span {
        Span::new(self.active, self.anchor)
    }
}

/// A selection computed by navigation, always ordered start-before-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: Point,
    pub end: Point,
}

impl SelectionRange {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}
