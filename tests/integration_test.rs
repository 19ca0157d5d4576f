use peakwatch::simulation::RandomSource;
use peakwatch::source::SampleSource;
use peakwatch::{AnomalyDetector, DetectorConfig};

#[test]
fn test_alarm_never_active_before_full_window() {
    // Regardless of values, the alarm must stay off until W samples arrived.
    for (window, percentage) in [(1u32, 100u32), (5, 1), (50, 25), (100, 100), (200, 60)] {
        let config = DetectorConfig::new(window, percentage).unwrap();

        for stream in [
            vec![0i64; window as usize],
            (0..i64::from(window)).collect(),
            (0..window).map(|i| i64::from(i % 2)).collect(),
        ] {
            let mut detector = AnomalyDetector::new(&config).unwrap();
            for (fed, &sample) in stream.iter().enumerate().take(window as usize - 1) {
                detector.process(sample);
                assert!(
                    !detector.alarm_active(),
                    "alarm with only {} of {} samples (P={})",
                    fed + 1,
                    window,
                    percentage
                );
            }
        }
    }
}

#[test]
fn test_alternating_stream_stays_healthy_at_defaults() {
    let mut detector = AnomalyDetector::new(&DetectorConfig::default()).unwrap();
    for i in 0..5_000u32 {
        detector.process(i64::from(i % 2));
        assert!(!detector.alarm_active(), "alarm at sample {}", i + 1);
    }
    // One peak per two samples, modulo the window boundary
    assert!((49..=50).contains(&detector.in_window_peaks()));
}

#[test]
fn test_constant_stream_alarms_at_sample_100() {
    let mut detector = AnomalyDetector::new(&DetectorConfig::default()).unwrap();
    for i in 1..=100u32 {
        detector.process(3);
        assert_eq!(detector.alarm_active(), i == 100, "at sample {}", i);
    }
    assert_eq!(detector.in_window_peaks(), 0);
    assert_eq!(detector.samples_accepted(), 100);
    assert!(!detector.renormalized());
}

/// Brute-force recount of strict peaks among the last `window` samples.
///
/// A sample counts once its successor has arrived, which matches the
/// no-lookahead classification the detector performs.
fn reference_peak_count(history: &[i64], window: usize) -> usize {
    let n = history.len();
    let start = n.saturating_sub(window);
    (start.max(1)..n.saturating_sub(1))
        .filter(|&i| history[i] > history[i - 1] && history[i] > history[i + 1])
        .count()
}

#[test]
fn test_window_count_matches_brute_force_on_random_stream() {
    let config = DetectorConfig::new(40, 25).unwrap();
    let mut detector = AnomalyDetector::new(&config).unwrap();
    let mut source = RandomSource::uniform(Some(1673353513));

    let mut history = Vec::new();
    for step in 0..3_000 {
        let sample = source.next_sample().unwrap();
        history.push(sample);
        detector.process(sample);

        let expected = reference_peak_count(&history, 40);
        assert_eq!(
            detector.in_window_peaks(),
            expected,
            "peak count diverged at step {}",
            step
        );
        if history.len() >= 40 {
            assert_eq!(
                detector.alarm_active(),
                expected < detector.minimum_peaks() as usize,
                "alarm diverged at step {}",
                step
            );
        }
    }
}

#[test]
fn test_alarm_boundary_is_strictly_below_minimum() {
    // W = 6, P = 50 gives minimum_peaks = 3. An alternating warmup parks
    // exactly 3 classified peaks in the window (a tie, so no alarm); one more
    // sample ages a peak out and drops the count to 2, which must alarm.
    let config = DetectorConfig::new(6, 50).unwrap();
    let mut detector = AnomalyDetector::new(&config).unwrap();

    for i in 0..9u32 {
        detector.process(i64::from(i % 2));
    }
    assert_eq!(detector.in_window_peaks(), 3);
    assert_eq!(detector.minimum_peaks(), 3);
    assert!(!detector.alarm_active(), "tie at the minimum must not alarm");

    detector.process(1);
    assert_eq!(detector.in_window_peaks(), 2);
    assert!(detector.alarm_active(), "one below the minimum must alarm");
}

#[test]
fn test_detector_instances_are_independent() {
    // One detector per stream; feeding one must not disturb the other.
    let config = DetectorConfig::new(10, 40).unwrap();
    let mut healthy = AnomalyDetector::new(&config).unwrap();
    let mut starved = AnomalyDetector::new(&config).unwrap();

    for i in 0..100u32 {
        healthy.process(i64::from(i % 2));
        starved.process(42);
    }
    assert!(!healthy.alarm_active());
    assert!(starved.alarm_active());
    assert_eq!(starved.in_window_peaks(), 0);
    assert!(healthy.in_window_peaks() >= 4);
}

#[test]
fn test_recovery_after_alarm() {
    // The alarm is a live condition, not a latch: peak density returning to
    // health clears it.
    let config = DetectorConfig::new(20, 25).unwrap();
    let mut detector = AnomalyDetector::new(&config).unwrap();

    for _ in 0..40 {
        detector.process(5);
    }
    assert!(detector.alarm_active());

    for i in 0..40u32 {
        detector.process(i64::from(i % 2));
    }
    assert!(!detector.alarm_active());
}
