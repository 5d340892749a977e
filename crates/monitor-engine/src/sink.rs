//! Alert delivery boundary.
//!
//! The engine fires one [`SpeechAlert`] per High episode; what "speaking"
//! means belongs to the collaborator behind [`AlertSink`] (a TTS engine,
//! a desktop notification, a test double).

/// Payload for the spoken high-heart-rate alert.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechAlert {
    /// Utterance text.
    pub text: String,

    /// Speech rate multiplier.
    pub rate: f64,

    /// Voice pitch.
    pub pitch: f64,

    /// Playback volume in [0.0, 1.0].
    pub volume: f64,
}

impl Default for SpeechAlert {
    fn default() -> Self {
        Self {
            text: "Warning! Your heart rate is high. Try deep breathing. \
                   Inhale... Hold... Exhale."
                .to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Trait for alert delivery collaborators.
pub trait AlertSink: Send {
    /// Deliver a one-shot alert. Called exactly once per High episode.
    fn alert(&mut self, alert: &SpeechAlert);
}

/// Sink that records alerts to the log. Used when no speech collaborator
/// is wired up.
#[derive(Debug, Default)]
pub struct LogAlertSink {
    delivered: u64,
}

impl LogAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl AlertSink for LogAlertSink {
    fn alert(&mut self, alert: &SpeechAlert) {
        self.delivered += 1;
        tracing::warn!(text = %alert.text, "Heart rate alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alert_payload() {
        let alert = SpeechAlert::default();
        assert!(alert.text.starts_with("Warning!"));
        assert!((alert.rate - 0.9).abs() < 1e-9);
        assert!((alert.pitch - 1.0).abs() < 1e-9);
        assert!((alert.volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_sink_counts_deliveries() {
        let mut sink = LogAlertSink::new();
        let alert = SpeechAlert::default();
        sink.alert(&alert);
        sink.alert(&alert);
        assert_eq!(sink.delivered(), 2);
    }
}
