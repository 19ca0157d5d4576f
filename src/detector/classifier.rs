/// Streaming local-peak classifier
///
/// Classifies the *previous* sample as a strict local peak (greater than both
/// its neighbors) as soon as the current sample arrives. Only two pieces of
/// state are carried between calls: the previous sample value and whether the
/// step into it was a strict rise. No lookahead and no sample buffering, so a
/// peak at sample k is reported exactly when sample k+1 arrives.
#[derive(Debug, Default)]
pub struct PeakClassifier {
    prev_sample: Option<i64>,
    ascending: bool,
}

impl PeakClassifier {
    /// Create a classifier with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next sample; returns `true` if the previous sample was a peak
    ///
    /// The verdict uses the trend flag as it stood before this call; the flag
    /// is refreshed afterwards for the next sample. The very first sample has
    /// no predecessor and can never be part of a verdict.
    pub fn observe(&mut self, sample: i64) -> bool {
        let prev_was_peak = match self.prev_sample {
            Some(prev) => self.ascending && sample < prev,
            None => false,
        };

        // The first sample cannot have been ascended into.
        if let Some(prev) = self.prev_sample {
            self.ascending = sample > prev;
        }
        self.prev_sample = Some(sample);

        prev_was_peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdicts(samples: &[i64]) -> Vec<bool> {
        let mut classifier = PeakClassifier::new();
        samples.iter().map(|&s| classifier.observe(s)).collect()
    }

    #[test]
    fn test_first_sample_never_a_peak() {
        let mut classifier = PeakClassifier::new();
        assert!(!classifier.observe(1_000_000));
    }

    #[test]
    fn test_simple_peak() {
        // 5 is greater than both 3 and 4; the verdict lands on the sample after
        assert_eq!(verdicts(&[3, 5, 4]), vec![false, false, true]);
    }

    #[test]
    fn test_alternating_sequence() {
        assert_eq!(
            verdicts(&[1, 0, 1, 0, 1, 0]),
            vec![false, false, false, true, false, true]
        );
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        // Strict comparison on both sides: 3,5,5,3 has no peak
        assert_eq!(verdicts(&[3, 5, 5, 3]), vec![false, false, false, false]);
        // ...and neither does an equal step into a drop
        assert_eq!(verdicts(&[5, 5, 3]), vec![false, false, false]);
    }

    #[test]
    fn test_monotonic_runs_have_no_peaks() {
        assert!(verdicts(&[1, 2, 3, 4, 5]).iter().all(|&v| !v));
        assert!(verdicts(&[5, 4, 3, 2, 1]).iter().all(|&v| !v));
    }

    #[test]
    fn test_negative_values() {
        // Peak entirely below zero
        assert_eq!(verdicts(&[-5, -2, -7]), vec![false, false, true]);
    }

    #[test]
    fn test_extreme_values() {
        assert_eq!(
            verdicts(&[i64::MIN, i64::MAX, i64::MIN]),
            vec![false, false, true]
        );
    }

    #[test]
    fn test_second_sample_classified_when_third_arrives() {
        let mut classifier = PeakClassifier::new();
        assert!(!classifier.observe(0));
        assert!(!classifier.observe(10)); // cannot know yet
        assert!(classifier.observe(2)); // now sample 2 is known to be a peak
    }
}
