//! PulseCam Processing Core — the rPPG estimator
//!
//! Folds a stream of per-frame brightness samples into heart-rate
//! estimates and stress alerts:
//! - **Rolling buffer:** fixed-capacity FIFO of recent samples
//! - **Peak detection:** strict local brightness maxima over the window
//! - **BPM estimation:** peak count over window length, scaled to a minute
//! - **Alert tracking:** tier classification plus an edge-triggered
//!   state machine that fires the spoken alert exactly once per episode
//! - **History:** the last ten accepted readings for trend display
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod alert;
pub mod buffer;
pub mod estimator;
pub mod history;
pub mod peaks;
pub mod pipeline;

pub use alert::{AlertState, AlertStateMachine};
pub use buffer::RollingBuffer;
pub use history::HistoryTracker;
pub use pipeline::{CycleOutcome, Evaluation, PipelineConfig, PipelineSnapshot, PulsePipeline};
