//! Chart engine demo application.
//!
//! Run with: cargo run --bin chart_engine_app --features gui

use chart_engine::chart::{ChartWidget, MarkerKind, OverlayKind, Sample, TradeMarker};
use chart_engine::logger;
use chrono::{DateTime, Duration, Utc};
use eframe::egui;

fn main() -> eframe::Result<()> {
    logger::init_logger();
    tracing::info!("starting chart engine app v{}", chart_engine::VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Chart Engine"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Engine",
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new()))),
    )
}

struct ChartApp {
    chart: ChartWidget,
    auto_update: bool,
    show_guides: bool,
    last_sample_time: DateTime<Utc>,
}

impl ChartApp {
    fn new() -> Self {
        let mut chart = ChartWidget::new();
        chart.set_price_decimals(2);
        chart.add_overlay(OverlayKind::MA, 20);
        chart.add_overlay(OverlayKind::EMA, 20);

        let samples = generate_samples(200);
        let last_sample_time = samples.last().map(|s| s.timestamp).unwrap_or_else(Utc::now);
        chart.update_history(samples);
        seed_markers(&mut chart);

        Self {
            chart,
            auto_update: false,
            show_guides: true,
            last_sample_time,
        }
    }

    fn add_new_sample(&mut self) {
        let new_time = self.last_sample_time + Duration::minutes(1);
        let count = self.chart.manager.get_count();

        let last_value = if count > 0 {
            self.chart
                .manager
                .get_sample(count - 1)
                .map(|s| s.value)
                .unwrap_or(100.0)
        } else {
            100.0
        };

        let change = (rand::random::<f64>() - 0.5) * 2.0;
        let value = (last_value + change).max(1.0);

        self.chart.update_sample(Sample::new(count, value, new_time));
        self.last_sample_time = new_time;
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.auto_update {
            self.add_new_sample();
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Strategy Chart");
                ui.separator();

                if ui.button("Add sample").clicked() {
                    self.add_new_sample();
                }

                ui.checkbox(&mut self.auto_update, "Auto update");

                ui.separator();

                if ui.checkbox(&mut self.show_guides, "Guides").changed() {
                    self.chart.set_show_guides(self.show_guides);
                }

                if ui.button("Clear").clicked() {
                    self.chart.clear_all();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart.show(ui);
        });
    }
}

/// Generate a random-walk price series
fn generate_samples(count: usize) -> Vec<Sample> {
    let start = Utc::now() - Duration::minutes(count as i64);
    let mut value = 100.0;
    let mut samples = Vec::with_capacity(count);

    for ix in 0..count {
        let change = (rand::random::<f64>() - 0.5) * 2.0;
        value = (value + change).max(1.0);
        samples.push(Sample::new(
            ix,
            value,
            start + Duration::minutes(ix as i64),
        ));
    }

    samples
}

/// Place alternating buy/sell markers along the series
fn seed_markers(chart: &mut ChartWidget) {
    let picks: Vec<Sample> = chart
        .manager
        .all_samples()
        .iter()
        .step_by(25)
        .cloned()
        .collect();

    for (n, sample) in picks.iter().enumerate() {
        let kind = if n % 2 == 0 {
            MarkerKind::Buy
        } else {
            MarkerKind::Sell
        };
        let marker = TradeMarker::new(
            sample.index,
            sample.value,
            kind,
            sample.timestamp,
            sample.value,
        )
        .with_annotation(format!("trade {}", n + 1));
        chart.add_marker(marker);
    }
}
