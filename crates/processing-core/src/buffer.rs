//! Fixed-capacity FIFO buffer of recent brightness samples.

use std::collections::VecDeque;

use pulsecam_signal_model::Sample;

/// Default window size: one second of frames at a 60 Hz display.
pub const DEFAULT_CAPACITY: usize = 60;

/// A sliding window over the most recent samples.
///
/// Insertion order is arrival order; when full, the oldest sample is
/// evicted before the newest is appended. The buffer is mutated only by
/// the sampling loop and read through copy-on-read snapshots downstream.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl RollingBuffer {
    /// Create a buffer with the given capacity. Capacity is fixed for
    /// the life of the buffer.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a buffer with the default one-second window.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Append a sample, evicting the oldest first if the buffer is full.
    /// This operation cannot fail.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Current ordered contents, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Brightness values in arrival order, for peak scanning.
    pub fn brightness_values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.brightness).collect()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(brightness: f64) -> Sample {
        Sample::new(brightness, 1.0 / 60.0)
    }

    #[test]
    fn test_push_below_capacity_keeps_order() {
        let mut buffer = RollingBuffer::new(60);
        for i in 0..10 {
            buffer.push(sample(i as f64));
        }
        assert_eq!(buffer.len(), 10);
        let values = buffer.brightness_values();
        assert_eq!(values[0], 0.0);
        assert_eq!(values[9], 9.0);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut buffer = RollingBuffer::new(60);
        for i in 0..65 {
            buffer.push(sample(i as f64));
            assert!(buffer.len() <= 60, "buffer exceeded capacity mid-sequence");
        }
        assert_eq!(buffer.len(), 60);

        // Exactly the last 60 samples remain, in arrival order.
        let values = buffer.brightness_values();
        assert_eq!(values[0], 5.0);
        assert_eq!(values[59], 64.0);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut buffer = RollingBuffer::new(4);
        buffer.push(sample(1.0));
        buffer.push(sample(2.0));
        let before = buffer.snapshot();
        let after = buffer.snapshot();
        assert_eq!(before, after);
        assert_eq!(buffer.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(brightness in proptest::collection::vec(0.0f64..255.0, 0..200)) {
            let mut buffer = RollingBuffer::new(60);
            for (i, b) in brightness.iter().enumerate() {
                buffer.push(sample(*b));
                prop_assert!(buffer.len() <= 60);
                prop_assert_eq!(buffer.len(), (i + 1).min(60));
            }

            // The retained window is the most recent samples in order.
            let expected: Vec<f64> = brightness
                .iter()
                .copied()
                .skip(brightness.len().saturating_sub(60))
                .collect();
            prop_assert_eq!(buffer.brightness_values(), expected);
        }
    }
}
