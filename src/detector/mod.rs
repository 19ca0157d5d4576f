//! Sliding-window peak-density anomaly detection.
//!
//! [`AnomalyDetector`] consumes one signed integer sample per call and keeps
//! an alarm flag up to date: the alarm is active when fewer than the
//! configured percentage of the last `window_size` samples were strict local
//! peaks. Per-sample cost is O(1) amortized and space is bounded by the
//! window, so throughput does not degrade with stream length.
//!
//! One instance serves one stream. There is no internal locking; concurrent
//! streams get independent instances.

pub mod classifier;
pub mod window;

pub use classifier::PeakClassifier;
pub use window::PeakWindow;

use crate::config::DetectorConfig;
use crate::error::Result;

/// Streaming peak-density anomaly detector
///
/// # Example
/// ```
/// use peakwatch::{AnomalyDetector, DetectorConfig};
///
/// let mut detector = AnomalyDetector::new(&DetectorConfig::default()).unwrap();
/// for _ in 0..100 {
///     detector.process(7); // a flat stream has no peaks
/// }
/// assert!(detector.alarm_active());
/// ```
#[derive(Debug)]
pub struct AnomalyDetector {
    window_size: u32,
    minimum_peaks: u32,
    classifier: PeakClassifier,
    window: PeakWindow,
    /// Index of the most recently accepted sample; 1-based, renormalized
    /// downward once per counter lifetime (see [`Self::renormalized`]).
    index: u32,
    alarm_active: bool,
    renormalized: bool,
}

impl AnomalyDetector {
    /// Create a detector for one stream
    ///
    /// Fails if the configuration is invalid (zero window, percentage outside
    /// 1-100); after construction, ingestion never fails.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            window_size: config.window_size,
            minimum_peaks: config.minimum_peaks(),
            classifier: PeakClassifier::new(),
            window: PeakWindow::new(config.window_size),
            index: 0,
            alarm_active: false,
            renormalized: false,
        })
    }

    /// Test-only constructor that starts the sample counter at an arbitrary
    /// value, used to exercise the renormalization path without ingesting
    /// four billion samples.
    #[cfg(test)]
    fn with_start_index(config: &DetectorConfig, start_index: u32) -> Result<Self> {
        let mut detector = Self::new(config)?;
        detector.index = start_index;
        Ok(detector)
    }

    /// Ingest the next sample
    ///
    /// Runs the full per-sample cycle: advance the counter, evict aged peaks,
    /// classify the previous sample and record it if it was a peak, then
    /// re-evaluate the alarm. Defined for every `i64`; no failure modes.
    pub fn process(&mut self, sample: i64) {
        self.advance_counter();
        self.window.evict_aged(self.index, self.window_size);

        // Classification consumes the trend flag as it stood before this
        // sample and refreshes it for the next call; the peak, if any, is the
        // previous sample.
        if self.classifier.observe(sample) {
            self.window.record(self.index - 1);
        }

        self.alarm_active = self.index >= self.window_size
            && (self.window.len() as u32) < self.minimum_peaks;
    }

    /// Advance the sample counter, renormalizing at the representable limit
    ///
    /// At `u32::MAX` the counter and every stored peak index are shifted down
    /// by `u32::MAX - window_size`, which preserves each index's distance from
    /// the counter exactly. The event is latched and observable: absolute
    /// sample counts reported by [`Self::samples_accepted`] become window-relative
    /// afterwards, so callers that need an exact lifetime total keep their own
    /// 64-bit tally.
    fn advance_counter(&mut self) {
        if self.index == u32::MAX {
            let offset = u32::MAX - self.window_size;
            self.window.shift_down(offset);
            self.index -= offset;
            self.renormalized = true;
            log::debug!(
                "sample counter renormalized: shifted down by {} at window size {}",
                offset,
                self.window_size
            );
        }
        self.index += 1;
    }

    /// Whether the peak density is currently below the configured minimum
    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    /// Whether the sample counter has ever been renormalized
    pub fn renormalized(&self) -> bool {
        self.renormalized
    }

    /// Samples accepted so far
    ///
    /// Exact until the first renormalization; window-relative afterwards.
    pub fn samples_accepted(&self) -> u32 {
        self.index
    }

    /// Number of peaks inside the current trailing window
    pub fn in_window_peaks(&self) -> usize {
        self.window.len()
    }

    /// Alarm threshold derived from the configuration:
    /// `ceil(window_size * alarm_percentage / 100)`
    pub fn minimum_peaks(&self) -> u32 {
        self.minimum_peaks
    }
}
