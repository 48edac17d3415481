//! Chart geometry rendering.
//!
//! The renderer turns a price series, overlay series, and trade markers
//! into a drawing-instruction list; the optional egui widget (feature
//! `gui`) replays that list onto a painter.

pub mod base;
pub mod indicator;
pub mod instruction;
pub mod manager;
pub mod object;
pub mod renderer;

#[cfg(feature = "gui")]
pub mod widget;

pub use base::Rgba;
pub use indicator::{Indicator, IndicatorLineConfig, EMA, MA, WMA};
pub use instruction::{Align, DrawInstruction, LineStyle, Point};
pub use manager::SampleManager;
pub use object::{
    CanvasFrame, FrameError, MarkerKind, OverlayPoint, OverlaySeries, Sample, TradeMarker,
    ValueRange,
};
pub use renderer::ChartRenderer;

#[cfg(feature = "gui")]
pub use widget::{ChartConfig, ChartWidget, ConfigError, OverlayConfig, OverlayKind};
