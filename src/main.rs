use std::path::PathBuf;
use std::thread;

use clap::Parser;
use crossbeam_channel::bounded;

use peakwatch::config::{AppConfig, DetectorConfig};
use peakwatch::simulation::RandomSource;
use peakwatch::source::{ReplaySource, SampleSource, StdinSource};
use peakwatch::AnomalyDetector;

#[derive(Parser, Debug)]
#[command(name = "peakwatch")]
#[command(about = "Watch a sample stream for anomalously low peak density", long_about = None)]
struct Args {
    /// Trailing window length in samples
    #[arg(short = 'w', long)]
    window: Option<u32>,

    /// Minimum peak density in percent of the window
    #[arg(short = 'p', long)]
    percentage: Option<u32>,

    /// Sample source: random, replay, stdin
    #[arg(short = 's', long, value_enum, default_value = "random")]
    source: SourceKind,

    /// RNG seed for the random source (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Random sample distribution: uniform, normal
    #[arg(short = 'd', long, value_enum, default_value = "uniform")]
    distribution: DistributionKind,

    /// Mean of the normal distribution
    #[arg(long, default_value = "0.0")]
    mean: f64,

    /// Standard deviation of the normal distribution
    #[arg(long, default_value = "1000.0")]
    std_dev: f64,

    /// Stop after this many samples even without an alarm
    #[arg(short = 'n', long)]
    max_samples: Option<u64>,

    /// TOML configuration file ([detector] and [source] sections)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SourceKind {
    /// Seeded pseudo-random samples
    Random,
    /// Fixed sample list (from the config file, or a built-in demo stream)
    Replay,
    /// One integer per line on standard input
    Stdin,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DistributionKind {
    Uniform,
    Normal,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(window) = args.window {
        config.detector.window_size = window;
    }
    if let Some(percentage) = args.percentage {
        config.detector.alarm_percentage = percentage;
    }
    let seed = args.seed.or(config.source.seed);

    let detector = AnomalyDetector::new(&config.detector)?;

    println!("=== peakwatch - streaming peak density monitor ===");
    println!("Window size: {} samples", config.detector.window_size);
    println!(
        "Alarm threshold: {}% (fewer than {} peaks per window)",
        config.detector.alarm_percentage,
        detector.minimum_peaks()
    );
    println!("Source: {:?}", args.source);
    if let Some(seed) = seed {
        println!("Seed: {}", seed);
    }
    println!();

    let source = build_source(&args, &config, seed)?;
    run_driver_loop(detector, source, args.max_samples)
}

fn build_source(
    args: &Args,
    config: &AppConfig,
    seed: Option<u64>,
) -> anyhow::Result<Box<dyn SampleSource + Send>> {
    let source: Box<dyn SampleSource + Send> = match args.source {
        SourceKind::Random => match args.distribution {
            DistributionKind::Uniform => Box::new(RandomSource::uniform(seed)),
            DistributionKind::Normal => {
                Box::new(RandomSource::normal(seed, args.mean, args.std_dev)?)
            }
        },
        SourceKind::Replay => match &config.source.samples {
            Some(samples) => Box::new(ReplaySource::new(samples.clone())),
            None => Box::new(ReplaySource::demo()),
        },
        SourceKind::Stdin => Box::new(StdinSource),
    };
    Ok(source)
}

/// Pull samples from the source on a producer thread and feed them to the
/// detector until it alarms, the source runs dry, or the cap is reached.
///
/// The total is tracked separately in 64 bits so the final report stays exact
/// even after the detector's own counter has been renormalized.
fn run_driver_loop(
    mut detector: AnomalyDetector,
    mut source: Box<dyn SampleSource + Send>,
    max_samples: Option<u64>,
) -> anyhow::Result<()> {
    let (sample_tx, sample_rx) = bounded::<i64>(1024);

    let producer = thread::spawn(move || {
        while let Some(sample) = source.next_sample() {
            // Send fails once the driver drops the receiver; stop producing.
            if sample_tx.send(sample).is_err() {
                break;
            }
        }
    });

    let mut total: u64 = 0;
    let mut outcome = Outcome::SourceExhausted;

    for sample in sample_rx.iter() {
        detector.process(sample);
        total += 1;

        if detector.alarm_active() {
            log::info!("alarm raised at sample {}", total);
            outcome = Outcome::Alarm;
            break;
        }
        if max_samples.is_some_and(|cap| total >= cap) {
            outcome = Outcome::CapReached;
            break;
        }
    }

    drop(sample_rx);
    let _ = producer.join();

    match outcome {
        Outcome::Alarm => {
            println!("Anomaly detected after {} data points.", total);
            println!(
                "In-window peaks: {} (minimum {})",
                detector.in_window_peaks(),
                detector.minimum_peaks()
            );
        }
        Outcome::SourceExhausted => {
            println!("Source exhausted after {} data points; no anomaly.", total);
        }
        Outcome::CapReached => {
            println!("Stopped at {} data points; no anomaly.", total);
        }
    }
    if detector.renormalized() {
        println!("Note: sample counter was renormalized during this run.");
    }

    Ok(())
}

enum Outcome {
    Alarm,
    SourceExhausted,
    CapReached,
}
