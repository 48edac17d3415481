//! Chart demo example showing the geometry renderer through the egui widget.
//!
//! Run with: cargo run --example chart_demo --features gui

use chart_engine::chart::{ChartWidget, MarkerKind, OverlayKind, Sample, TradeMarker};
use chrono::{Duration, Utc};
use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Chart Engine - Chart Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Demo",
        options,
        Box::new(|_cc| Ok(Box::new(ChartDemoApp::new()))),
    )
}

struct ChartDemoApp {
    chart: ChartWidget,
}

impl ChartDemoApp {
    fn new() -> Self {
        let mut chart = ChartWidget::new();
        chart.add_overlay(OverlayKind::MA, 10);
        chart.add_overlay(OverlayKind::EMA, 10);

        let samples = generate_samples(150);

        // Mark a trade pair on the walk
        let entry = samples[40].clone();
        let exit = samples[110].clone();
        chart.update_history(samples);

        chart.add_marker(
            TradeMarker::new(entry.index, entry.value, MarkerKind::Buy, entry.timestamp, entry.value)
                .with_annotation("entry"),
        );
        chart.add_marker(
            TradeMarker::new(exit.index, exit.value, MarkerKind::Sell, exit.timestamp, exit.value)
                .with_annotation("exit"),
        );

        Self { chart }
    }
}

impl eframe::App for ChartDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart.show(ui);
        });
    }
}

/// Generate a random-walk price series
fn generate_samples(count: usize) -> Vec<Sample> {
    let start = Utc::now() - Duration::minutes(count as i64);
    let mut value = 50.0;
    let mut samples = Vec::with_capacity(count);

    for ix in 0..count {
        let change = (rand::random::<f64>() - 0.5) * 1.5;
        value = (value + change).max(1.0);
        samples.push(Sample::new(
            ix,
            value,
            start + Duration::minutes(ix as i64),
        ));
    }

    samples
}
