use anyhow::Context;
use clap::Parser;
use crossguard::counters::Period;
use crossguard::{Config, Frame, Monitor};
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replays recorded detections through the crosswalk monitor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config, defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Detections file, one JSON frame per line
    detections: PathBuf,
}

fn period_index(ts: f64, period: Period) -> i64 {
    let secs = match period {
        Period::Minute => 60.0,
        Period::Hour => 3600.0,
        Period::Day => 86400.0,
    };

    (ts / secs).floor() as i64
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crossguard=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let file = std::fs::File::open(&args.detections)
        .with_context(|| format!("failed to open {}", args.detections.display()))?;

    let mut monitor = Monitor::new(&config);
    let mut current: Option<[i64; 3]> = None;

    for (lineno, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: Frame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(line = lineno + 1, %err, "wrong file format: skipping frame");
                continue;
            }
        };

        let idx = Period::ALL.map(|p| period_index(frame.timestamp, p));
        if let Some(prev) = current {
            for (i, period) in Period::ALL.into_iter().enumerate() {
                if prev[i] != idx[i] {
                    let counters = monitor.counters_mut();
                    if counters.any_counted(period) {
                        let snapshot = serde_json::to_string(&counters.snapshot(period))?;
                        println!("{:?} {}", period, snapshot);
                    }
                    counters.reset(period);
                }
            }
        }
        current = Some(idx);

        let report = monitor.process(&frame)?;

        println!(
            "{:.3} new_vehicles={:?} up={:?} down={:?} peds={} vehicles={} warning={}",
            report.timestamp,
            report.new_vehicles,
            report.going_up,
            report.going_down,
            report.pedestrians_tracked,
            report.vehicles_tracked,
            if report.warning_active { "ON" } else { "off" },
        );
    }

    for period in Period::ALL {
        let counters = monitor.counters();
        if counters.any_counted(period) {
            println!("{:?} {}", period, serde_json::to_string(&counters.snapshot(period))?);
        }
    }

    Ok(())
}
