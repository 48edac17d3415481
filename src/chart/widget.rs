//! Chart widget replaying renderer instructions onto an egui painter.

use egui::{Color32, Pos2, Response, Sense, Stroke, StrokeKind, Ui};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::setting::SETTINGS;
use crate::utility::get_folder_path;

use super::base::{Rgba, DEFAULT_PADDING, GREY_COLOR};
use super::indicator::{Indicator, EMA, MA, WMA};
use super::instruction::{Align, DrawInstruction, Point};
use super::manager::SampleManager;
use super::object::{CanvasFrame, MarkerKind, OverlaySeries, Sample, TradeMarker};
use super::renderer::ChartRenderer;

/// Overlay kinds the widget can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    MA,
    EMA,
    WMA,
}

impl OverlayKind {
    fn build(self, period: usize) -> Box<dyn Indicator> {
        match self {
            OverlayKind::MA => Box::new(MA::new(period)),
            OverlayKind::EMA => Box::new(EMA::new(period)),
            OverlayKind::WMA => Box::new(WMA::new(period)),
        }
    }
}

/// Main chart widget
pub struct ChartWidget {
    /// Data manager
    pub manager: SampleManager,
    /// Geometry renderer
    renderer: ChartRenderer,
    /// Hosted overlays with their construction parameters
    overlays: Vec<(OverlayKind, usize, Box<dyn Indicator>)>,
    /// Trade markers
    markers: Vec<TradeMarker>,
    /// Padding around the inner drawing rectangle
    padding: f32,
}

impl Default for ChartWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartWidget {
    /// Create a new chart widget with display defaults from settings
    pub fn new() -> Self {
        let mut renderer = ChartRenderer::new();
        renderer.price_decimals = SETTINGS.get_int("chart.price_decimals").unwrap_or(2) as usize;
        renderer.show_guides = SETTINGS.get_bool("chart.show_guides").unwrap_or(true);
        renderer.show_labels = SETTINGS.get_bool("chart.show_labels").unwrap_or(true);
        let padding = SETTINGS
            .get_float("chart.padding")
            .unwrap_or(DEFAULT_PADDING as f64) as f32;

        Self {
            manager: SampleManager::new(),
            renderer,
            overlays: Vec::new(),
            markers: Vec::new(),
            padding,
        }
    }

    /// Set the price decimal places
    pub fn set_price_decimals(&mut self, decimals: usize) {
        self.renderer.price_decimals = decimals;
    }

    /// Toggle the horizontal guide lines
    pub fn set_show_guides(&mut self, show: bool) {
        self.renderer.show_guides = show;
    }

    /// Toggle the y-axis labels
    pub fn set_show_labels(&mut self, show: bool) {
        self.renderer.show_labels = show;
    }

    /// Add an overlay of the given kind and period
    pub fn add_overlay(&mut self, kind: OverlayKind, period: usize) {
        let mut indicator = kind.build(period);
        indicator.calculate(self.manager.all_samples());
        self.overlays.push((kind, period, indicator));
    }

    /// Remove all overlays
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    /// Recalculate all overlays
    fn recalculate_overlays(&mut self) {
        let samples = self.manager.all_samples();
        for (_, _, indicator) in &mut self.overlays {
            indicator.calculate(samples);
        }
    }

    /// Update with historical samples
    pub fn update_history(&mut self, history: Vec<Sample>) {
        self.manager.update_history(history);
        self.recalculate_overlays();
    }

    /// Update with a single sample
    pub fn update_sample(&mut self, sample: Sample) {
        self.manager.update_sample(sample);
        self.recalculate_overlays();
    }

    /// Add a trade marker, aligning its index from its timestamp when known
    pub fn add_marker(&mut self, marker: TradeMarker) {
        self.markers.push(self.manager.align_marker(marker));
    }

    /// Clear all data
    pub fn clear_all(&mut self) {
        self.manager.clear_all();
        self.markers.clear();
        self.recalculate_overlays();
    }

    /// Show the chart widget
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::hover());
        let rect = response.rect;

        if self.manager.get_count() == 0 {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No data",
                egui::FontId::proportional(20.0),
                to_color32(GREY_COLOR),
            );
            return response;
        }

        let Ok(frame) = CanvasFrame::new(rect.width(), rect.height(), self.padding) else {
            // Too small to host the inner rectangle; skip the draw pass
            return response;
        };

        let overlay_series: Vec<OverlaySeries> = self
            .overlays
            .iter()
            .map(|(_, _, indicator)| indicator.overlay())
            .collect();

        let instructions = self.renderer.render(
            self.manager.all_samples(),
            &overlay_series,
            &self.markers,
            frame,
        );

        replay(&painter, rect.min, &instructions);

        // Chart border
        painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(1.0, to_color32(GREY_COLOR)),
            StrokeKind::Inside,
        );

        response
    }
}

/// Convert an instruction color into an egui color
fn to_color32(color: Rgba) -> Color32 {
    let [r, g, b, a] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Offset a canvas point into screen space
fn to_pos(origin: Pos2, point: Point) -> Pos2 {
    Pos2::new(origin.x + point.x, origin.y + point.y)
}

/// Replay an instruction list onto a painter, offset by `origin`
fn replay(painter: &egui::Painter, origin: Pos2, instructions: &[DrawInstruction]) {
    for instruction in instructions {
        match instruction {
            DrawInstruction::Polyline {
                points,
                color,
                width,
                ..
            } => {
                // egui has no native dashed/dotted stroke; styles share Solid
                if points.len() > 1 {
                    let screen: Vec<Pos2> = points.iter().map(|p| to_pos(origin, *p)).collect();
                    painter.add(egui::Shape::line(
                        screen,
                        Stroke::new(*width, to_color32(*color)),
                    ));
                } else if let Some(point) = points.first() {
                    painter.circle_filled(to_pos(origin, *point), *width, to_color32(*color));
                }
            }
            DrawInstruction::MarkerGroup {
                kind,
                points,
                color,
                size,
            } => {
                for point in points {
                    let pos = to_pos(origin, *point);
                    let triangle = match kind {
                        MarkerKind::Buy => vec![
                            Pos2::new(pos.x, pos.y - size),
                            Pos2::new(pos.x - size * 0.6, pos.y + size * 0.5),
                            Pos2::new(pos.x + size * 0.6, pos.y + size * 0.5),
                        ],
                        MarkerKind::Sell => vec![
                            Pos2::new(pos.x, pos.y + size),
                            Pos2::new(pos.x - size * 0.6, pos.y - size * 0.5),
                            Pos2::new(pos.x + size * 0.6, pos.y - size * 0.5),
                        ],
                    };
                    painter.add(egui::Shape::convex_polygon(
                        triangle,
                        to_color32(*color),
                        Stroke::NONE,
                    ));
                }
            }
            DrawInstruction::GuideLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [to_pos(origin, *from), to_pos(origin, *to)],
                    Stroke::new(*width, to_color32(*color)),
                );
            }
            DrawInstruction::Label {
                position,
                text,
                align,
                color,
                size,
            } => {
                let anchor = match align {
                    Align::Left => egui::Align2::LEFT_CENTER,
                    Align::Center => egui::Align2::CENTER_CENTER,
                    Align::Right => egui::Align2::RIGHT_CENTER,
                };
                painter.text(
                    to_pos(origin, *position),
                    anchor,
                    text,
                    egui::FontId::proportional(*size),
                    to_color32(*color),
                );
            }
        }
    }
}

/// Error raised by chart configuration persistence
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Serializable overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub kind: OverlayKind,
    pub period: usize,
}

/// Chart display configuration for saving/loading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub overlays: Vec<OverlayConfig>,
    pub show_guides: bool,
    pub show_labels: bool,
    pub price_decimals: usize,
}

impl ChartWidget {
    /// Export current chart configuration
    pub fn export_config(&self) -> ChartConfig {
        ChartConfig {
            overlays: self
                .overlays
                .iter()
                .map(|(kind, period, _)| OverlayConfig {
                    kind: *kind,
                    period: *period,
                })
                .collect(),
            show_guides: self.renderer.show_guides,
            show_labels: self.renderer.show_labels,
            price_decimals: self.renderer.price_decimals,
        }
    }

    /// Import chart configuration
    pub fn import_config(&mut self, config: ChartConfig) {
        self.renderer.show_guides = config.show_guides;
        self.renderer.show_labels = config.show_labels;
        self.renderer.price_decimals = config.price_decimals;

        self.clear_overlays();
        for overlay in config.overlays {
            self.add_overlay(overlay.kind, overlay.period);
        }
    }

    /// Save configuration to an explicit path
    pub fn save_config_to(&self, path: &Path) -> Result<(), ConfigError> {
        let config = self.export_config();
        let json = serde_json::to_string_pretty(&config)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from an explicit path
    pub fn load_config_from(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        let config: ChartConfig = serde_json::from_str(&json)?;
        self.import_config(config);
        Ok(())
    }

    /// Save configuration for a symbol under the app config folder
    pub fn save_config(&self, symbol: &str) -> Result<(), ConfigError> {
        self.save_config_to(&config_file_path(symbol))
    }

    /// Load configuration for a symbol from the app config folder
    pub fn load_config(&mut self, symbol: &str) -> Result<(), ConfigError> {
        self.load_config_from(&config_file_path(symbol))
    }
}

fn config_file_path(symbol: &str) -> PathBuf {
    let folder = get_folder_path("chart_configs");
    folder.join(format!("{}_chart.json", symbol.replace('/', "_")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn widget_with_data() -> ChartWidget {
        let mut widget = ChartWidget::new();
        let start = Utc::now();
        let samples: Vec<Sample> = (0..10)
            .map(|ix| Sample::new(ix, 100.0 + ix as f64, start + Duration::minutes(ix as i64)))
            .collect();
        widget.update_history(samples);
        widget
    }

    #[test]
    fn test_config_roundtrip() {
        let mut widget = widget_with_data();
        widget.add_overlay(OverlayKind::MA, 5);
        widget.add_overlay(OverlayKind::EMA, 3);
        widget.set_price_decimals(4);
        widget.set_show_guides(false);

        let config = widget.export_config();

        let mut other = ChartWidget::new();
        other.import_config(config);

        let exported = other.export_config();
        assert_eq!(exported.overlays.len(), 2);
        assert_eq!(exported.price_decimals, 4);
        assert!(!exported.show_guides);
    }

    #[test]
    fn test_config_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("btc_chart.json");

        let mut widget = widget_with_data();
        widget.add_overlay(OverlayKind::WMA, 7);
        widget.save_config_to(&path).unwrap();

        let mut other = ChartWidget::new();
        other.load_config_from(&path).unwrap();
        let config = other.export_config();
        assert_eq!(config.overlays.len(), 1);
        assert_eq!(config.overlays[0].period, 7);
        assert_eq!(config.overlays[0].kind, OverlayKind::WMA);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let mut widget = ChartWidget::new();
        assert!(matches!(
            widget.load_config_from(&path),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_marker_alignment_on_add() {
        let mut widget = widget_with_data();
        let ts = widget.manager.get_sample(4).unwrap().timestamp;

        widget.add_marker(TradeMarker::new(0, 104.0, MarkerKind::Buy, ts, 104.0));
        assert_eq!(widget.markers[0].index, 4);
    }
}
