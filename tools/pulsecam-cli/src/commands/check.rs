//! Check configuration and capabilities.

use pulsecam_common::config::AppConfig;
use pulsecam_monitor_engine::source::SyntheticPulseSource;
use pulsecam_monitor_engine::SampleSource;

pub fn run() -> anyhow::Result<()> {
    println!("PulseCam System Check");
    println!("{}", "=".repeat(50));

    let config = AppConfig::load();
    println!("[OK] Traces directory: {}", config.traces_dir.display());
    println!("[OK] Sampling rate: {} Hz", config.monitor.fps);
    println!(
        "[OK] Brightness region: {0}x{0} px",
        config.monitor.roi_size
    );

    let synthetic = SyntheticPulseSource::for_bpm(config.monitor.fps, 72);
    if synthetic.is_available() {
        println!("[OK] Sample source: {}", synthetic.name());
    } else {
        println!("[WARN] Sample source: {} unavailable", synthetic.name());
    }

    println!();
    println!("Estimator window: 60 samples, minimum fill 30, history 10");
    println!("Alert tiers: Normal (<= 100 BPM), Mild (101-120), High (> 120)");
    println!();
    println!("PulseCam is ready.");

    Ok(())
}
