//! Data objects consumed by the chart geometry renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::base::{Rgba, VALUE_MARGIN_HIGH, VALUE_MARGIN_LOW};
use super::instruction::LineStyle;

/// One point of the price series.
///
/// `index` is the ordinal position of the sample within the ordered input,
/// not a timestamp-derived coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(index: usize, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            index,
            value,
            timestamp,
        }
    }
}

/// One point of an overlay series, aligned to the price index domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPoint {
    pub index: usize,
    pub value: f64,
}

/// A derived indicator series drawn atop the price series.
///
/// May be shorter than the price series; indicators typically have a
/// warm-up period with no defined value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySeries {
    pub name: String,
    pub points: Vec<OverlayPoint>,
    pub color: Rgba,
    pub width: f32,
    pub style: LineStyle,
}

impl OverlaySeries {
    pub fn new(name: impl Into<String>, color: Rgba, width: f32) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            color,
            width,
            style: LineStyle::Solid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trade marker kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Buy,
    Sell,
}

impl MarkerKind {
    pub fn all() -> [MarkerKind; 2] {
        [MarkerKind::Buy, MarkerKind::Sell]
    }
}

/// A discrete trade event rendered as a point overlay.
///
/// `value` positions the marker on the chart's value axis; `price` is the
/// executed trade price carried along for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    pub index: usize,
    pub value: f64,
    pub kind: MarkerKind,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub annotation: Option<String>,
}

impl TradeMarker {
    pub fn new(
        index: usize,
        value: f64,
        kind: MarkerKind,
        timestamp: DateTime<Utc>,
        price: f64,
    ) -> Self {
        Self {
            index,
            value,
            kind,
            timestamp,
            price,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Error raised when a canvas frame has no drawable inner rectangle.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("inner width is not positive: width {width} with padding {padding}")]
    InnerWidth { width: f32, padding: f32 },
    #[error("inner height is not positive: height {height} with padding {padding}")]
    InnerHeight { height: f32, padding: f32 },
}

/// Fixed pixel canvas the renderer draws into.
///
/// Invariant: `inner_width > 0` and `inner_height > 0`, enforced at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasFrame {
    width: f32,
    height: f32,
    padding: f32,
}

impl CanvasFrame {
    pub fn new(width: f32, height: f32, padding: f32) -> Result<Self, FrameError> {
        if width - 2.0 * padding <= 0.0 {
            return Err(FrameError::InnerWidth { width, padding });
        }
        if height - 2.0 * padding <= 0.0 {
            return Err(FrameError::InnerHeight { height, padding });
        }
        Ok(Self {
            width,
            height,
            padding,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn inner_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    pub fn inner_height(&self) -> f32 {
        self.height - 2.0 * self.padding
    }

    pub fn inner_left(&self) -> f32 {
        self.padding
    }

    pub fn inner_right(&self) -> f32 {
        self.width - self.padding
    }

    pub fn inner_top(&self) -> f32 {
        self.padding
    }

    pub fn inner_bottom(&self) -> f32 {
        self.height - self.padding
    }

    pub fn inner_center_y(&self) -> f32 {
        self.padding + self.inner_height() * 0.5
    }
}

/// Value range of the visible price axis, with the fixed visual margin
/// already applied below the minimum and above the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Derive the visible range from raw series values.
    ///
    /// Returns `None` for an empty iterator or when the widened range
    /// collapses (all-zero series, or inputs whose margins invert), which
    /// callers treat as the degenerate-range edge case.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;

        for value in values {
            if !value.is_finite() {
                continue;
            }
            any = true;
            min = min.min(value);
            max = max.max(value);
        }

        if !any {
            return None;
        }

        let min = min * VALUE_MARGIN_LOW;
        let max = max * VALUE_MARGIN_HIGH;
        if max - min > 0.0 {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_validation() {
        assert!(CanvasFrame::new(340.0, 250.0, 40.0).is_ok());
        assert!(matches!(
            CanvasFrame::new(80.0, 250.0, 40.0),
            Err(FrameError::InnerWidth { .. })
        ));
        assert!(matches!(
            CanvasFrame::new(340.0, 80.0, 40.0),
            Err(FrameError::InnerHeight { .. })
        ));
    }

    #[test]
    fn test_frame_inner_rect() {
        let frame = CanvasFrame::new(340.0, 250.0, 40.0).unwrap();
        assert_eq!(frame.inner_width(), 260.0);
        assert_eq!(frame.inner_height(), 170.0);
        assert_eq!(frame.inner_left(), 40.0);
        assert_eq!(frame.inner_right(), 300.0);
        assert_eq!(frame.inner_bottom(), 210.0);
        assert_eq!(frame.inner_center_y(), 125.0);
    }

    #[test]
    fn test_value_range_margin() {
        let range = ValueRange::from_values([10.0, 20.0, 30.0]).unwrap();
        assert!((range.min - 9.8).abs() < 1e-9);
        assert!((range.max - 30.6).abs() < 1e-9);
        assert!((range.span() - 20.8).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_constant_series() {
        // Multiplicative margin keeps a constant positive series drawable
        let range = ValueRange::from_values([10.0, 10.0]).unwrap();
        assert!(range.span() > 0.0);
    }

    #[test]
    fn test_value_range_degenerate() {
        assert!(ValueRange::from_values([]).is_none());
        assert!(ValueRange::from_values([0.0, 0.0]).is_none());
        assert!(ValueRange::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn test_marker_annotation() {
        let marker = TradeMarker::new(3, 50.0, MarkerKind::Buy, Utc::now(), 50.0)
            .with_annotation("entry");
        assert_eq!(marker.annotation.as_deref(), Some("entry"));
    }
}
