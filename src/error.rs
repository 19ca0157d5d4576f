use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid window size {0}: must be at least 1 and below the counter limit")]
    InvalidWindowSize(u32),

    #[error("Invalid alarm percentage {0}: must be between 1 and 100")]
    InvalidAlarmPercentage(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
