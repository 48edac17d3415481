//! Chart Engine - chart geometry rendering for trading and analysis views
//!
//! This crate turns market data into vector drawing instructions:
//!
//! - Price series, overlay series, and trade-marker data objects
//! - A pure geometry renderer producing an instruction list with absolute
//!   pixel coordinates
//! - Moving-average overlay indicators (MA, EMA, WMA)
//! - Chart widget replaying instructions onto egui (with `gui` feature)
//!
//! # Quick Start
//!
//! ```rust
//! use chart_engine::chart::{CanvasFrame, ChartRenderer, Sample};
//! use chrono::Utc;
//!
//! let renderer = ChartRenderer::new();
//! let frame = CanvasFrame::new(340.0, 250.0, 40.0).unwrap();
//!
//! let now = Utc::now();
//! let samples = vec![
//!     Sample::new(0, 10.0, now),
//!     Sample::new(1, 20.0, now + chrono::Duration::minutes(1)),
//!     Sample::new(2, 30.0, now + chrono::Duration::minutes(2)),
//! ];
//!
//! let instructions = renderer.render(&samples, &[], &[], frame);
//! assert!(!instructions.is_empty());
//! ```

pub mod chart;
pub mod logger;
pub mod setting;
pub mod utility;

// Re-export commonly used types
pub use chart::{
    Align, CanvasFrame, ChartRenderer, DrawInstruction, FrameError, Indicator, LineStyle,
    MarkerKind, OverlayPoint, OverlaySeries, Point, Rgba, Sample, SampleManager, TradeMarker,
    ValueRange, EMA, MA, WMA,
};
pub use setting::{SettingValue, SETTINGS};

#[cfg(feature = "gui")]
pub use chart::{ChartConfig, ChartWidget, OverlayKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
