//! Sample series manager for the chart module.
//!
//! Manages the ordered price series with timestamp indexing and provides
//! efficient lookup and range queries for the renderer and hosting views.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::object::{Sample, TradeMarker};

/// Manages price samples with timestamp-based indexing
pub struct SampleManager {
    /// Samples indexed by timestamp
    samples: HashMap<DateTime<Utc>, Sample>,
    /// Map from timestamp to sequence index
    timestamp_index_map: HashMap<DateTime<Utc>, usize>,
    /// Ordered list of samples, sequence indices rewritten to position
    ordered_samples: Vec<Sample>,
    /// Cached raw value ranges
    value_ranges: HashMap<(usize, usize), (f64, f64)>,
}

impl Default for SampleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleManager {
    /// Create a new SampleManager
    pub fn new() -> Self {
        Self {
            samples: HashMap::new(),
            timestamp_index_map: HashMap::new(),
            ordered_samples: Vec::new(),
            value_ranges: HashMap::new(),
        }
    }

    /// Update with a list of samples
    pub fn update_history(&mut self, history: Vec<Sample>) {
        // Put all new samples into dict
        for sample in history {
            self.samples.insert(sample.timestamp, sample);
        }

        // Sort samples by timestamp
        let mut sorted: Vec<_> = self.samples.values().cloned().collect();
        sorted.sort_by_key(|sample| sample.timestamp);

        // Rewrite sequence indices and update index map
        self.timestamp_index_map.clear();
        for (ix, sample) in sorted.iter_mut().enumerate() {
            sample.index = ix;
            self.timestamp_index_map.insert(sample.timestamp, ix);
        }

        self.ordered_samples = sorted;
        self.clear_cache();
    }

    /// Update with a single sample, replacing any sample at the same timestamp
    pub fn update_sample(&mut self, sample: Sample) {
        let ts = sample.timestamp;

        if let Some(&ix) = self.timestamp_index_map.get(&ts) {
            let mut sample = sample;
            sample.index = ix;
            if ix < self.ordered_samples.len() {
                self.ordered_samples[ix] = sample.clone();
            }
            self.samples.insert(ts, sample);
        } else {
            let ix = self.ordered_samples.len();
            let mut sample = sample;
            sample.index = ix;
            self.timestamp_index_map.insert(ts, ix);
            self.ordered_samples.push(sample.clone());
            self.samples.insert(ts, sample);
        }

        self.clear_cache();
    }

    /// Get total number of samples
    pub fn get_count(&self) -> usize {
        self.ordered_samples.len()
    }

    /// Get sequence index for a timestamp
    pub fn get_index(&self, ts: DateTime<Utc>) -> Option<usize> {
        self.timestamp_index_map.get(&ts).copied()
    }

    /// Get sample at a sequence index
    pub fn get_sample(&self, ix: usize) -> Option<&Sample> {
        self.ordered_samples.get(ix)
    }

    /// Get all samples in sequence order
    pub fn all_samples(&self) -> &[Sample] {
        &self.ordered_samples
    }

    /// Rewrite a marker's sequence index from its timestamp, when known.
    ///
    /// Markers arriving from trade events often carry only a timestamp;
    /// markers whose timestamp is not in the series keep their index as-is.
    pub fn align_marker(&self, mut marker: TradeMarker) -> TradeMarker {
        if let Some(ix) = self.get_index(marker.timestamp) {
            marker.index = ix;
        }
        marker
    }

    /// Get raw value range for given index range (no visual margin applied)
    pub fn get_value_range(&self, min_ix: Option<usize>, max_ix: Option<usize>) -> (f64, f64) {
        if self.ordered_samples.is_empty() {
            return (0.0, 1.0);
        }

        let min_ix = min_ix.unwrap_or(0);
        let max_ix = max_ix.unwrap_or(self.ordered_samples.len().saturating_sub(1));
        let max_ix = max_ix.min(self.ordered_samples.len().saturating_sub(1));

        if min_ix > max_ix {
            return (0.0, 1.0);
        }

        // Check cache
        if let Some(&range) = self.value_ranges.get(&(min_ix, max_ix)) {
            return range;
        }

        let samples = &self.ordered_samples[min_ix..=max_ix];
        let mut min_value = samples[0].value;
        let mut max_value = samples[0].value;

        for sample in samples.iter().skip(1) {
            min_value = min_value.min(sample.value);
            max_value = max_value.max(sample.value);
        }

        (min_value, max_value)
    }

    /// Cache a raw value range
    pub fn cache_value_range(&mut self, min_ix: usize, max_ix: usize, range: (f64, f64)) {
        self.value_ranges.insert((min_ix, max_ix), range);
    }

    /// Clear cached range data
    fn clear_cache(&mut self) {
        self.value_ranges.clear();
    }

    /// Clear all data
    pub fn clear_all(&mut self) {
        self.samples.clear();
        self.timestamp_index_map.clear();
        self.ordered_samples.clear();
        self.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::object::MarkerKind;
    use chrono::Duration;

    fn create_test_sample(timestamp: DateTime<Utc>, value: f64) -> Sample {
        Sample::new(0, value, timestamp)
    }

    #[test]
    fn test_update_history_sorts_and_reindexes() {
        let mut manager = SampleManager::new();
        let now = Utc::now();

        // Inserted out of order
        let samples = vec![
            create_test_sample(now + Duration::minutes(2), 30.0),
            create_test_sample(now, 10.0),
            create_test_sample(now + Duration::minutes(1), 20.0),
        ];

        manager.update_history(samples);
        assert_eq!(manager.get_count(), 3);

        let values: Vec<f64> = manager.all_samples().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);

        for (ix, sample) in manager.all_samples().iter().enumerate() {
            assert_eq!(sample.index, ix);
        }
    }

    #[test]
    fn test_update_sample_replaces_duplicate_timestamp() {
        let mut manager = SampleManager::new();
        let now = Utc::now();

        manager.update_sample(create_test_sample(now, 10.0));
        manager.update_sample(create_test_sample(now, 15.0));

        assert_eq!(manager.get_count(), 1);
        assert_eq!(manager.get_sample(0).map(|s| s.value), Some(15.0));
    }

    #[test]
    fn test_value_range() {
        let mut manager = SampleManager::new();
        let now = Utc::now();

        manager.update_history(vec![
            create_test_sample(now, 10.0),
            create_test_sample(now + Duration::minutes(1), 30.0),
            create_test_sample(now + Duration::minutes(2), 20.0),
        ]);

        let (min, max) = manager.get_value_range(None, None);
        assert_eq!(min, 10.0);
        assert_eq!(max, 30.0);

        let (min, max) = manager.get_value_range(Some(1), Some(2));
        assert_eq!(min, 20.0);
        assert_eq!(max, 30.0);
    }

    #[test]
    fn test_value_range_empty() {
        let manager = SampleManager::new();
        assert_eq!(manager.get_value_range(None, None), (0.0, 1.0));
    }

    #[test]
    fn test_align_marker() {
        let mut manager = SampleManager::new();
        let now = Utc::now();

        manager.update_history(vec![
            create_test_sample(now, 10.0),
            create_test_sample(now + Duration::minutes(1), 20.0),
        ]);

        let marker = TradeMarker::new(
            99,
            20.0,
            MarkerKind::Buy,
            now + Duration::minutes(1),
            20.0,
        );
        let aligned = manager.align_marker(marker);
        assert_eq!(aligned.index, 1);

        // Unknown timestamp keeps the caller-supplied index
        let marker = TradeMarker::new(5, 20.0, MarkerKind::Sell, now + Duration::hours(1), 20.0);
        let aligned = manager.align_marker(marker);
        assert_eq!(aligned.index, 5);
    }
}
