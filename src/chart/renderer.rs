//! Chart geometry renderer.
//!
//! Transforms an ordered price series, optional overlay series, and trade
//! markers into a list of drawing instructions with absolute pixel
//! coordinates inside a canvas frame. The renderer is a pure function of
//! its arguments: no I/O, no shared state, deterministic output.

use super::base::{
    format_price, Rgba, BUY_COLOR, GUIDE_COLOR, GUIDE_PEN_WIDTH, LABEL_COLOR, LABEL_FONT_SIZE,
    LABEL_GAP, MARKER_SIZE, PEN_WIDTH, PRICE_COLOR, SELL_COLOR,
};
use super::instruction::{Align, DrawInstruction, LineStyle, Point};
use super::object::{CanvasFrame, MarkerKind, OverlaySeries, Sample, TradeMarker, ValueRange};

// Coordinates stay finite even for values far outside the visible range
const COORD_LIMIT: f64 = 1.0e9;

/// Geometry renderer holding style options only; all series data is passed
/// per render call.
pub struct ChartRenderer {
    pub price_color: Rgba,
    pub price_width: f32,
    pub buy_color: Rgba,
    pub sell_color: Rgba,
    pub marker_size: f32,
    pub guide_color: Rgba,
    pub guide_width: f32,
    pub label_color: Rgba,
    pub label_size: f32,
    pub price_decimals: usize,
    pub show_guides: bool,
    pub show_labels: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            price_color: PRICE_COLOR,
            price_width: PEN_WIDTH,
            buy_color: BUY_COLOR,
            sell_color: SELL_COLOR,
            marker_size: MARKER_SIZE,
            guide_color: GUIDE_COLOR,
            guide_width: GUIDE_PEN_WIDTH,
            label_color: LABEL_COLOR,
            label_size: LABEL_FONT_SIZE,
            price_decimals: 2,
            show_guides: true,
            show_labels: true,
        }
    }

    /// Convert a sequence index to canvas X coordinate.
    ///
    /// A single-point series maps to the left edge.
    fn index_to_x(&self, frame: CanvasFrame, ix: usize, len: usize) -> f32 {
        let divisor = len.saturating_sub(1).max(1) as f32;
        frame.inner_left() + (ix as f32 / divisor) * frame.inner_width()
    }

    /// Convert a value to canvas Y coordinate (canvas y grows downward).
    ///
    /// A degenerate range maps every value to the vertical center of the
    /// inner rectangle.
    fn value_to_y(&self, frame: CanvasFrame, value: f64, range: Option<ValueRange>) -> f32 {
        let Some(range) = range else {
            return frame.inner_center_y();
        };
        if !value.is_finite() {
            return frame.inner_center_y();
        }

        let normalized = (range.max - value) / range.span();
        let y = frame.inner_top() as f64 + normalized * frame.inner_height() as f64;
        y.clamp(-COORD_LIMIT, COORD_LIMIT) as f32
    }

    /// Render the full instruction list for one frame.
    ///
    /// Never fails: empty, constant, and out-of-domain inputs degrade to
    /// the fallbacks described on the individual steps below.
    pub fn render(
        &self,
        samples: &[Sample],
        overlays: &[OverlaySeries],
        markers: &[TradeMarker],
        frame: CanvasFrame,
    ) -> Vec<DrawInstruction> {
        let mut instructions = Vec::new();
        let len = samples.len();

        // Scaling is anchored to the price series only; overlays and
        // markers never widen the visible range.
        let range = ValueRange::from_values(samples.iter().map(|s| s.value));

        // Fixed horizontal guides at top/middle/bottom of the inner rect
        if self.show_guides {
            for frac in [0.0_f32, 0.5, 1.0] {
                let y = frame.inner_top() + frame.inner_height() * frac;
                instructions.push(DrawInstruction::GuideLine {
                    from: Point::new(frame.inner_left(), y),
                    to: Point::new(frame.inner_right(), y),
                    color: self.guide_color,
                    width: self.guide_width,
                });
            }
        }

        // Price path: connected polyline in input order. With a degenerate
        // range the path renders at the vertical center.
        if len > 0 {
            let points: Vec<Point> = samples
                .iter()
                .enumerate()
                .map(|(ix, sample)| {
                    Point::new(
                        self.index_to_x(frame, ix, len),
                        self.value_to_y(frame, sample.value, range),
                    )
                })
                .collect();

            instructions.push(DrawInstruction::Polyline {
                points,
                color: self.price_color,
                width: self.price_width,
                style: LineStyle::Solid,
            });
        }

        // Overlay paths share the price series' coordinate mappings and
        // draw only over their own defined index range. Points outside the
        // price domain land outside the frame rather than failing.
        for overlay in overlays {
            if overlay.is_empty() {
                continue;
            }

            let points: Vec<Point> = overlay
                .points
                .iter()
                .map(|p| {
                    Point::new(
                        self.index_to_x(frame, p.index, len),
                        self.value_to_y(frame, p.value, range),
                    )
                })
                .collect();

            instructions.push(DrawInstruction::Polyline {
                points,
                color: overlay.color,
                width: overlay.width,
                style: overlay.style,
            });
        }

        // Trade markers, one independently styled group per kind present.
        // Indices beyond the price domain are clamped horizontally.
        for kind in MarkerKind::all() {
            let color = match kind {
                MarkerKind::Buy => self.buy_color,
                MarkerKind::Sell => self.sell_color,
            };

            let points: Vec<Point> = markers
                .iter()
                .filter(|m| m.kind == kind)
                .map(|m| {
                    let ix = m.index.min(len.saturating_sub(1));
                    Point::new(
                        self.index_to_x(frame, ix, len),
                        self.value_to_y(frame, m.value, range),
                    )
                })
                .collect();

            if points.is_empty() {
                continue;
            }

            instructions.push(DrawInstruction::MarkerGroup {
                kind,
                points,
                color,
                size: self.marker_size,
            });
        }

        // Y-axis labels at max/mid/min, skipped for a degenerate range
        if self.show_labels {
            if let Some(range) = range {
                for (frac, value) in [
                    (0.0_f32, range.max),
                    (0.5, range.mid()),
                    (1.0, range.min),
                ] {
                    let y = frame.inner_top() + frame.inner_height() * frac;
                    instructions.push(DrawInstruction::Label {
                        position: Point::new(frame.inner_left() - LABEL_GAP, y),
                        text: format_price(value, self.price_decimals),
                        align: Align::Right,
                        color: self.label_color,
                        size: self.label_size,
                    });
                }
            }
        }

        instructions
    }
}
