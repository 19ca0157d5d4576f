pub mod config;
pub mod detector;
pub mod error;
pub mod source;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{AppConfig, DetectorConfig};
pub use detector::AnomalyDetector;
pub use error::{DetectorError, Result};
pub use source::SampleSource;
