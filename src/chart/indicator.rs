//! Technical indicators producing overlay series for charting.

use super::base::{Rgba, EMA_COLOR, MA_COLOR, OVERLAY_PEN_WIDTH, WMA_COLOR};
use super::instruction::LineStyle;
use super::object::{OverlayPoint, OverlaySeries, Sample};

/// Configuration for an indicator line
#[derive(Debug, Clone)]
pub struct IndicatorLineConfig {
    pub name: String,
    pub color: Rgba,
    pub style: LineStyle,
    pub width: f32,
}

impl Default for IndicatorLineConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: MA_COLOR,
            style: LineStyle::Solid,
            width: OVERLAY_PEN_WIDTH,
        }
    }
}

/// Base trait for all indicators
pub trait Indicator: Send + Sync {
    /// Get indicator name
    fn name(&self) -> &str;

    /// Calculate indicator values for given samples
    fn calculate(&mut self, samples: &[Sample]);

    /// Get value at a specific sequence index
    fn value(&self, ix: usize) -> Option<f64>;

    /// Get line configuration
    fn line_config(&self) -> &IndicatorLineConfig;

    /// Build the overlay series from the defined values.
    ///
    /// Warm-up indices yield no points, so the overlay may be shorter than
    /// the price series it aligns to.
    fn overlay(&self) -> OverlaySeries;
}

/// Collect `Some` values into an overlay series with the given config.
fn build_overlay(values: &[Option<f64>], config: &IndicatorLineConfig) -> OverlaySeries {
    let mut series = OverlaySeries::new(config.name.clone(), config.color, config.width);
    series.style = config.style;
    series.points = values
        .iter()
        .enumerate()
        .filter_map(|(ix, v)| v.map(|value| OverlayPoint { index: ix, value }))
        .collect();
    series
}

/// Moving Average (MA)
pub struct MA {
    period: usize,
    values: Vec<Option<f64>>,
    config: IndicatorLineConfig,
}

impl MA {
    pub fn new(period: usize) -> Self {
        Self::with_color(period, MA_COLOR)
    }

    pub fn with_color(period: usize, color: Rgba) -> Self {
        Self {
            period,
            values: Vec::new(),
            config: IndicatorLineConfig {
                name: format!("MA{}", period),
                color,
                ..Default::default()
            },
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for MA {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn calculate(&mut self, samples: &[Sample]) {
        self.values.clear();
        self.values.resize(samples.len(), None);

        if samples.is_empty() || samples.len() < self.period || self.period == 0 {
            return;
        }

        for i in (self.period - 1)..samples.len() {
            let start_ix = i.saturating_sub(self.period - 1);
            let sum: f64 = samples[start_ix..=i].iter().map(|s| s.value).sum();
            self.values[i] = Some(sum / self.period as f64);
        }
    }

    fn value(&self, ix: usize) -> Option<f64> {
        self.values.get(ix).and_then(|v| *v)
    }

    fn line_config(&self) -> &IndicatorLineConfig {
        &self.config
    }

    fn overlay(&self) -> OverlaySeries {
        build_overlay(&self.values, &self.config)
    }
}

/// Exponential Moving Average (EMA)
pub struct EMA {
    period: usize,
    values: Vec<Option<f64>>,
    config: IndicatorLineConfig,
}

impl EMA {
    pub fn new(period: usize) -> Self {
        Self::with_color(period, EMA_COLOR)
    }

    pub fn with_color(period: usize, color: Rgba) -> Self {
        Self {
            period,
            values: Vec::new(),
            config: IndicatorLineConfig {
                name: format!("EMA{}", period),
                color,
                ..Default::default()
            },
        }
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn calculate(&mut self, samples: &[Sample]) {
        self.values.clear();
        self.values.resize(samples.len(), None);

        if samples.is_empty() || samples.len() < self.period || self.period == 0 {
            return;
        }

        let multiplier = 2.0 / (self.period as f64 + 1.0);

        // First EMA is a simple average
        let initial_sum: f64 = samples[0..self.period].iter().map(|s| s.value).sum();
        let mut ema = initial_sum / self.period as f64;
        self.values[self.period - 1] = Some(ema);

        // Calculate subsequent EMAs
        for i in self.period..samples.len() {
            ema = (samples[i].value * multiplier) + (ema * (1.0 - multiplier));
            self.values[i] = Some(ema);
        }
    }

    fn value(&self, ix: usize) -> Option<f64> {
        self.values.get(ix).and_then(|v| *v)
    }

    fn line_config(&self) -> &IndicatorLineConfig {
        &self.config
    }

    fn overlay(&self) -> OverlaySeries {
        build_overlay(&self.values, &self.config)
    }
}

/// Weighted Moving Average (WMA)
pub struct WMA {
    period: usize,
    values: Vec<Option<f64>>,
    config: IndicatorLineConfig,
}

impl WMA {
    pub fn new(period: usize) -> Self {
        Self::with_color(period, WMA_COLOR)
    }

    pub fn with_color(period: usize, color: Rgba) -> Self {
        Self {
            period,
            values: Vec::new(),
            config: IndicatorLineConfig {
                name: format!("WMA{}", period),
                color,
                ..Default::default()
            },
        }
    }
}

impl Indicator for WMA {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn calculate(&mut self, samples: &[Sample]) {
        self.values.clear();
        self.values.resize(samples.len(), None);

        if samples.is_empty() || samples.len() < self.period || self.period == 0 {
            return;
        }

        // Weights 1..=period, most recent sample weighted heaviest
        let weight_sum = (self.period * (self.period + 1)) as f64 / 2.0;

        for i in (self.period - 1)..samples.len() {
            let start_ix = i + 1 - self.period;
            let weighted: f64 = samples[start_ix..=i]
                .iter()
                .enumerate()
                .map(|(offset, s)| s.value * (offset + 1) as f64)
                .sum();
            self.values[i] = Some(weighted / weight_sum);
        }
    }

    fn value(&self, ix: usize) -> Option<f64> {
        self.values.get(ix).and_then(|v| *v)
    }

    fn line_config(&self) -> &IndicatorLineConfig {
        &self.config
    }

    fn overlay(&self) -> OverlaySeries {
        build_overlay(&self.values, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_series(values: &[f64]) -> Vec<Sample> {
        let start = Utc::now();
        values
            .iter()
            .enumerate()
            .map(|(ix, &value)| Sample::new(ix, value, start + Duration::minutes(ix as i64)))
            .collect()
    }

    #[test]
    fn test_ma_warm_up() {
        let samples = sample_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut ma = MA::new(3);
        ma.calculate(&samples);

        assert_eq!(ma.value(0), None);
        assert_eq!(ma.value(1), None);
        assert_eq!(ma.value(2), Some(2.0));
        assert_eq!(ma.value(3), Some(3.0));
        assert_eq!(ma.value(4), Some(4.0));
    }

    #[test]
    fn test_ma_overlay_shorter_than_series() {
        let samples = sample_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut ma = MA::new(3);
        ma.calculate(&samples);

        let overlay = ma.overlay();
        assert_eq!(overlay.name, "MA3");
        assert_eq!(overlay.points.len(), 3);
        assert_eq!(overlay.points[0].index, 2);
    }

    #[test]
    fn test_ma_period_longer_than_series() {
        let samples = sample_series(&[1.0, 2.0]);
        let mut ma = MA::new(5);
        ma.calculate(&samples);
        assert!(ma.overlay().is_empty());
    }

    #[test]
    fn test_ema_seeded_with_simple_average() {
        let samples = sample_series(&[2.0, 4.0, 6.0, 8.0]);
        let mut ema = EMA::new(2);
        ema.calculate(&samples);

        assert_eq!(ema.value(0), None);
        assert_eq!(ema.value(1), Some(3.0));

        // multiplier = 2/3: 6*(2/3) + 3*(1/3) = 5
        let v2 = ema.value(2).unwrap();
        assert!((v2 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_wma_weights_recent_samples() {
        let samples = sample_series(&[1.0, 2.0, 3.0]);
        let mut wma = WMA::new(3);
        wma.calculate(&samples);

        // (1*1 + 2*2 + 3*3) / 6
        let v = wma.value(2).unwrap();
        assert!((v - 14.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_period_is_noop() {
        let samples = sample_series(&[1.0, 2.0, 3.0]);
        let mut ma = MA::new(0);
        ma.calculate(&samples);
        assert!(ma.overlay().is_empty());
    }
}
