//! BPM estimation from a peak count and window length.

/// Minimum buffer fill before an estimate is produced. Below this the
/// evaluation cycle is skipped entirely — no estimate, not zero.
pub const MIN_SAMPLES: usize = 30;

/// Convert a peak count over a sample window into beats per minute.
///
/// `bpm = round(peak_count / buffer_len * 60)`, where `buffer_len` is the
/// number of samples currently in the window. The sample count stands in
/// for elapsed time under an assumed constant sampling rate; the recorded
/// per-sample `dt` is deliberately not consulted, since switching to true
/// elapsed time would change every value downstream consumers see.
///
/// Callers must hold `buffer_len >= MIN_SAMPLES`, which also makes the
/// division safe. Rounding is half-away-from-zero.
pub fn estimate_bpm(peak_count: usize, buffer_len: usize) -> u32 {
    debug_assert!(buffer_len >= MIN_SAMPLES);
    (peak_count as f64 / buffer_len as f64 * 60.0).round() as u32
}
