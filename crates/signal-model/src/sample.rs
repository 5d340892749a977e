//! Brightness sample types and the trace stream format.
//!
//! Live monitoring consumes [`Sample`] values; recorded traces store
//! [`SampleRecord`] lines in append-only JSONL format for crash safety,
//! with a `#`-prefixed header line carrying stream metadata.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since monitoring start.
pub type TimestampNs = u64;

/// One brightness measurement taken from a single video frame.
///
/// `brightness` is the mean luminance of a fixed sub-region of the frame;
/// `dt` is the elapsed seconds since the previous sample. A sample is
/// immutable after creation and owned by the rolling buffer once pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Mean region brightness for this frame.
    pub brightness: f64,

    /// Seconds elapsed since the previous sample.
    pub dt: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(brightness: f64, dt: f64) -> Self {
        Self { brightness, dt }
    }

    /// Whether the brightness value is usable. Non-finite samples are
    /// discarded before they reach the buffer.
    pub fn is_valid(&self) -> bool {
        self.brightness.is_finite()
    }
}

/// A single recorded brightness sample with timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Monotonic nanoseconds since monitoring start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Mean region brightness for this frame.
    #[serde(rename = "b")]
    pub brightness: f64,
}

impl SampleRecord {
    /// Create a record.
    pub fn new(timestamp_ns: TimestampNs, brightness: f64) -> Self {
        Self {
            timestamp_ns,
            brightness,
        }
    }

    /// Timestamp as fractional seconds since monitoring start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Trace stream metadata written as the header line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at monitoring start (ISO 8601).
    pub epoch_wall: String,

    /// Nominal sampling rate (Hz).
    pub fps: u32,

    /// Brightness region dimensions in pixels.
    pub roi_width: u32,
    pub roi_height: u32,
}

/// Parse records from JSONL content (one JSON object per line).
pub fn parse_records(jsonl: &str) -> Result<Vec<SampleRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize records to JSONL format.
pub fn serialize_records(records: &[SampleRecord]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip() {
        let record = SampleRecord::new(1_000_000_000, 112.4);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: SampleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let records = vec![
            SampleRecord::new(0, 110.0),
            SampleRecord::new(16_666_666, 114.5),
            SampleRecord::new(33_333_333, 109.8),
        ];
        let jsonl = serialize_records(&records).unwrap();
        let parsed = parse_records(&jsonl).unwrap();
        assert_eq!(records, parsed);
    }

    #[test]
    fn test_parse_records_skips_header_comment() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n{\"t\":0,\"b\":120.5}\n";
        let parsed = parse_records(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp_ns, 0);
        assert!((parsed[0].brightness - 120.5).abs() < 1e-9);
    }

    #[test]
    fn test_timestamp_secs() {
        let record = SampleRecord::new(1_500_000_000, 0.0);
        assert!((record.timestamp_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_sample_validity() {
        assert!(Sample::new(128.0, 0.016).is_valid());
        assert!(!Sample::new(f64::NAN, 0.016).is_valid());
        assert!(!Sample::new(f64::INFINITY, 0.016).is_valid());
    }

    #[test]
    fn test_json_format_is_compact() {
        let record = SampleRecord::new(1234567890123, 97.25);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"t\":1234567890123"));
        assert!(json.contains("\"b\":97.25"));
    }
}
