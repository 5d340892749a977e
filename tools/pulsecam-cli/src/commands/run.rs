//! Run a live monitoring session.

use std::path::PathBuf;
use std::time::Duration;

use pulsecam_monitor_engine::sink::LogAlertSink;
use pulsecam_monitor_engine::source::SyntheticPulseSource;
use pulsecam_monitor_engine::{MonitorSession, SessionConfig};

pub async fn run(
    fps: u32,
    bpm: u32,
    trace: Option<PathBuf>,
    duration: Option<u64>,
) -> anyhow::Result<()> {
    println!("Starting monitoring session");
    println!("  FPS: {fps}");
    println!("  Simulated pulse: {bpm} BPM");
    if let Some(ref path) = trace {
        println!("  Trace: {}", path.display());
    }
    println!();

    let config = SessionConfig {
        fps,
        trace_path: trace,
        ..Default::default()
    };

    let mut session = MonitorSession::new(config);
    session.start(
        Box::new(SyntheticPulseSource::for_bpm(fps, bpm)),
        Box::new(LogAlertSink::new()),
    )?;

    match duration {
        Some(secs) => {
            println!("Monitoring for {secs}s...");
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.tick().await; // first tick completes immediately
            for _ in 0..secs {
                ticker.tick().await;
                print_status(&session);
            }
        }
        None => {
            println!("Press Ctrl+C to stop monitoring...");
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = ticker.tick() => print_status(&session),
                }
            }
        }
    }

    println!();
    let stats = session.stop().await?;
    println!(
        "Session finished: {} samples, {} readings, {} alerts",
        stats.samples, stats.evaluations, stats.alerts
    );

    let snapshot = session.snapshot();
    if let (Some(bpm), Some(message)) = (snapshot.bpm, snapshot.message) {
        println!("Last reading: {bpm} BPM — {message}");
        println!(
            "History: {}",
            snapshot
                .history
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        println!("No reading produced (session too short to fill the window).");
    }

    Ok(())
}

fn print_status(session: &pulsecam_monitor_engine::MonitorSession) {
    let snapshot = session.snapshot();
    match (snapshot.bpm, snapshot.tier) {
        (Some(bpm), Some(tier)) => {
            println!(
                "  [{:6.1}s] {} BPM ({:?})",
                session.elapsed_secs(),
                bpm,
                tier
            );
        }
        _ => println!("  [{:6.1}s] Measuring...", session.elapsed_secs()),
    }
}
