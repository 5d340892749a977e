//! PulseCam Monitor Engine
//!
//! Runs live monitoring sessions: polls a sample source once per frame,
//! drives the processing pipeline, publishes display snapshots, delivers
//! one-shot alerts, and optionally records the brightness trace.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               MonitorSession                   │
//! │  ┌──────────────┐   ┌───────────────────────┐ │
//! │  │ SampleSource │──▶│     PulsePipeline      │ │
//! │  │ (per frame)  │   │ buffer→peaks→bpm→tier  │ │
//! │  └──────────────┘   └──────────┬────────────┘ │
//! │                                │               │
//! │            ┌───────────────────┼─────────────┐ │
//! │            ▼                   ▼             ▼ │
//! │     trace.jsonl         snapshot (UI)   AlertSink│
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The sampling loop is the single writer; display consumers read a
//! copy-on-read snapshot behind a lock.

pub mod roi;
pub mod session;
pub mod sink;
pub mod source;
pub mod writer;

use pulsecam_common::error::PulsecamResult;
use pulsecam_signal_model::Sample;

pub use session::*;

/// Trait for per-frame sample sources.
pub trait SampleSource: Send {
    /// Poll for the next sample. Returns `None` when no frame is ready
    /// this cycle; the cycle is skipped and the buffer left untouched.
    fn poll(&mut self) -> PulsecamResult<Option<Sample>>;

    /// Source name for logging.
    fn name(&self) -> &str;

    /// Check if the source can produce samples on this system.
    fn is_available(&self) -> bool;
}
