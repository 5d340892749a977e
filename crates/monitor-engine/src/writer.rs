//! Append-only trace writer for crash-safe brightness logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use pulsecam_common::error::{PulsecamError, PulsecamResult};
use pulsecam_signal_model::{SampleRecord, TraceHeader};

/// Writes brightness records to a JSONL file in append-only mode.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
}

impl TraceWriter {
    /// Create a new trace writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: TraceHeader) -> PulsecamResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Write header as a comment line (prefixed with #)
        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| PulsecamError::trace(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Write a single record as a JSONL line.
    pub fn write_record(&mut self, record: &SampleRecord) -> PulsecamResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| PulsecamError::trace(format!("Failed to write record: {e}")))?;
        self.records_written += 1;

        // Flush every 1000 records for crash safety
        if self.records_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> PulsecamResult<()> {
        self.writer
            .flush()
            .map_err(|e| PulsecamError::trace(format!("Failed to flush trace: {e}")))?;
        Ok(())
    }

    /// Number of records written.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
