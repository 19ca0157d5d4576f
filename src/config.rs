//! Configuration for the peakwatch anomaly detector.
//!
//! The detector itself only needs [`DetectorConfig`]. [`AppConfig`] is the
//! file-loadable superset used by the driver binary, covering the sample
//! source as well:
//!
//! ```toml
//! [detector]
//! window_size = 100
//! alarm_percentage = 25
//!
//! [source]
//! seed = 1673353513
//! samples = [1, 0, 1, 0, 3, 3, 3]
//! ```

use std::path::Path;

use crate::error::{DetectorError, Result};

/// Detector parameters, fixed for the lifetime of a detector instance.
///
/// The defaults encode the stated business requirement: alarm when fewer
/// than 25% of the last 100 samples are local peaks.
///
/// # Example
/// ```
/// use peakwatch::config::DetectorConfig;
///
/// let config = DetectorConfig::new(100, 25).unwrap();
/// assert_eq!(config.minimum_peaks(), 25);
/// ```
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of most recent samples considered (W, 1 to u32::MAX - 1)
    pub window_size: u32,
    /// Minimum peak density as a percentage of the window (P, 1-100)
    pub alarm_percentage: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            alarm_percentage: 25,
        }
    }
}

impl DetectorConfig {
    /// Create a validated configuration
    ///
    /// # Arguments
    /// * `window_size` - Trailing window length in samples (>= 1)
    /// * `alarm_percentage` - Minimum peak density in percent (1-100)
    pub fn new(window_size: u32, alarm_percentage: u32) -> Result<Self> {
        let config = Self {
            window_size,
            alarm_percentage,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the parameter ranges
    ///
    /// Invalid parameters are rejected here, at construction time, so the
    /// per-sample path never has to re-check them. The window must leave the
    /// sample counter room to represent `window_size + 1`, so `u32::MAX`
    /// itself is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size == u32::MAX {
            return Err(DetectorError::InvalidWindowSize(self.window_size));
        }
        if self.alarm_percentage == 0 || self.alarm_percentage > 100 {
            return Err(DetectorError::InvalidAlarmPercentage(
                self.alarm_percentage,
            ));
        }
        Ok(())
    }

    /// Minimum number of in-window peaks before the alarm triggers:
    /// `ceil(window_size * alarm_percentage / 100)`.
    pub fn minimum_peaks(&self) -> u32 {
        let scaled = u64::from(self.window_size) * u64::from(self.alarm_percentage);
        scaled.div_ceil(100) as u32
    }
}

/// Sample source settings for the driver binary
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// RNG seed for the random source (random seed when omitted)
    pub seed: Option<u64>,
    /// Fixed sample list for the replay source
    pub samples: Option<Vec<i64>>,
}

/// Full application configuration: detector plus sample source
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub source: SourceConfig,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DetectorError::Config(format!("{}: {}", path.display(), e)))?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| DetectorError::Config(format!("{}: {}", path.display(), e)))?;
        config.detector.validate()?;
        Ok(config)
    }
}
