//! Sample sources for the driver loop.
//!
//! The detector core makes no assumptions about where samples come from; a
//! source is anything that yields signed integers one at a time. Exhaustion
//! (`None`) is the driver's concern, never the detector's.

use std::collections::VecDeque;
use std::io::BufRead;

/// A producer of stream samples, pulled one at a time
pub trait SampleSource {
    /// Next sample, or `None` once the source is exhausted
    fn next_sample(&mut self) -> Option<i64>;
}

/// Replays a fixed list of samples, then reports exhaustion
///
/// Useful for reproducing a recorded incident or for demo runs with a known
/// outcome.
pub struct ReplaySource {
    samples: VecDeque<i64>,
}

impl ReplaySource {
    pub fn new(samples: Vec<i64>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// The canonical demo stream: a healthy alternating stretch followed by a
    /// flat stretch that starves the window of peaks.
    pub fn demo() -> Self {
        let mut samples = Vec::with_capacity(130);
        for i in 0..52i64 {
            samples.push(i % 2);
        }
        samples.extend(std::iter::repeat_n(3, 78));
        Self::new(samples)
    }
}

impl SampleSource for ReplaySource {
    fn next_sample(&mut self) -> Option<i64> {
        self.samples.pop_front()
    }
}

/// Reads one integer per line from standard input
///
/// Malformed lines are skipped with a warning rather than ending the stream;
/// EOF or a read error ends it.
pub struct StdinSource;

impl SampleSource for StdinSource {
    fn next_sample(&mut self) -> Option<i64> {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => match line.trim().parse::<i64>() {
                    Ok(value) => return Some(value),
                    Err(_) => {
                        log::warn!("skipping malformed sample line: {:?}", line.trim());
                    }
                },
                Err(e) => {
                    log::warn!("stdin read failed, ending stream: {}", e);
                    return None;
                }
            }
        }
    }
}
