use std::collections::VecDeque;

/// Ordered set of peak sample indices inside the trailing window
///
/// Indices are stored oldest-first, which makes both ends O(1): new peaks are
/// appended at the back in strictly increasing index order, and aged peaks
/// are popped from the front. Strict peaks can never sit on adjacent samples,
/// so the set holds at most `window_size / 2 + 1` entries.
#[derive(Debug)]
pub struct PeakWindow {
    peaks: VecDeque<u32>,
}

impl PeakWindow {
    /// Create an empty window sized for `window_size` samples of history
    ///
    /// The eager allocation is capped; a degenerate huge window grows the
    /// deque on demand instead of reserving gigabytes up front.
    pub fn new(window_size: u32) -> Self {
        let capacity = (window_size as usize / 2 + 1).min(1024);
        Self {
            peaks: VecDeque::with_capacity(capacity),
        }
    }

    /// Append the index of a newly classified peak
    ///
    /// Indices must arrive in strictly increasing order; that ordering is what
    /// makes front-only eviction correct.
    pub fn record(&mut self, index: u32) {
        debug_assert!(
            self.peaks.back().is_none_or(|&newest| newest < index),
            "peak indices must be recorded in increasing order"
        );
        self.peaks.push_back(index);
    }

    /// Drop peaks that have aged out of the trailing window
    ///
    /// A peak at index i is in the window while `i > current_index - window_size`.
    /// Before a full window of samples exists nothing can have aged out, and an
    /// empty set is left untouched; both guards are structural rather than
    /// error paths, since a peak-free window is normal operation.
    pub fn evict_aged(&mut self, current_index: u32, window_size: u32) {
        let Some(cutoff) = current_index.checked_sub(window_size) else {
            return;
        };
        while let Some(&oldest) = self.peaks.front() {
            if oldest > cutoff {
                break;
            }
            self.peaks.pop_front();
        }
    }

    /// Shift every stored index down by `offset`
    ///
    /// Used when the sample counter is renormalized; relative distances
    /// between indices (and to the counter) are preserved exactly. Callers
    /// must guarantee `offset` does not exceed the oldest stored index.
    pub fn shift_down(&mut self, offset: u32) {
        for index in self.peaks.iter_mut() {
            *index -= offset;
        }
    }

    /// Number of peaks currently inside the window
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Oldest stored peak index, if any
    #[cfg(test)]
    pub fn oldest(&self) -> Option<u32> {
        self.peaks.front().copied()
    }
}
