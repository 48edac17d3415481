//! Vector drawing instructions emitted by the geometry renderer.
//!
//! An instruction list holds absolute pixel coordinates inside a canvas
//! frame and can be replayed by any rendering surface without further
//! interpretation.

use serde::{Deserialize, Serialize};

use super::base::Rgba;
use super::object::MarkerKind;

/// A point in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Line style for paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Horizontal anchoring of a text label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawInstruction {
    /// Connected polyline through `points` in order.
    Polyline {
        points: Vec<Point>,
        color: Rgba,
        width: f32,
        style: LineStyle,
    },
    /// Point markers of a single trade kind, independently styled.
    MarkerGroup {
        kind: MarkerKind,
        points: Vec<Point>,
        color: Rgba,
        size: f32,
    },
    /// Horizontal guide line across the inner rectangle.
    GuideLine {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    /// Text label anchored at `position`.
    Label {
        position: Point,
        text: String,
        align: Align,
        color: Rgba,
        size: f32,
    },
}

impl DrawInstruction {
    /// True when every coordinate in the instruction is a finite number.
    pub fn is_finite(&self) -> bool {
        match self {
            DrawInstruction::Polyline { points, .. }
            | DrawInstruction::MarkerGroup { points, .. } => {
                points.iter().all(Point::is_finite)
            }
            DrawInstruction::GuideLine { from, to, .. } => from.is_finite() && to.is_finite(),
            DrawInstruction::Label { position, .. } => position.is_finite(),
        }
    }
}
