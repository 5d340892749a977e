//! Replay a recorded brightness trace through the estimator.

use std::path::PathBuf;

use pulsecam_processing_core::{CycleOutcome, PulsePipeline};
use pulsecam_signal_model::parse_records;
use pulsecam_signal_model::Sample;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Analyzing trace: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|_| anyhow::anyhow!("Trace file not found: {}", path.display()))?;
    let records =
        parse_records(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;

    println!("  Loaded {} samples", records.len());

    if records.is_empty() {
        println!("  No samples to analyze.");
        return Ok(());
    }

    let mut pipeline = PulsePipeline::with_defaults();
    let mut readings = 0u64;
    let mut alerts = 0u64;
    let mut last_ns = None;

    for record in &records {
        let dt = match last_ns {
            Some(last) => (record.timestamp_ns.saturating_sub(last)) as f64 / 1e9,
            None => record.timestamp_secs(),
        };
        last_ns = Some(record.timestamp_ns);

        if let CycleOutcome::Evaluated(eval) = pipeline.ingest(Sample::new(record.brightness, dt)) {
            readings += 1;
            if eval.alert_fired {
                alerts += 1;
                println!(
                    "  [{:6.1}s] alert fired at {} BPM",
                    eval.reading.timestamp, eval.reading.bpm
                );
            }
        }
    }

    println!("  Produced {readings} readings ({alerts} alerts)");

    let snapshot = pipeline.snapshot();
    match (snapshot.bpm, snapshot.message) {
        (Some(bpm), Some(message)) => {
            println!();
            println!("Final reading: {bpm} BPM");
            println!("  Status: {message}");
            println!(
                "  History: {}",
                snapshot
                    .history
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        _ => {
            println!("  Trace too short to fill the window; no reading produced.");
        }
    }

    println!("\nAnalysis complete.");

    Ok(())
}
