//! Alert severity tiers derived from a heart-rate reading.
//!
//! The mapping is a pure function of the latest BPM value. Thresholds are
//! closed on the lower bound of each higher tier: a reading of exactly 120
//! is [`AlertTier::Mild`] and exactly 100 is [`AlertTier::Normal`].

use serde::{Deserialize, Serialize};

/// Stress severity derived from a BPM value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTier {
    /// BPM at or below 100.
    Normal,
    /// BPM above 100, at or below 120.
    Mild,
    /// BPM above 120.
    High,
}

/// Display color associated with a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertColor {
    Green,
    Orange,
    Red,
}

impl AlertTier {
    /// Classify a BPM value into a tier.
    pub fn from_bpm(bpm: u32) -> Self {
        if bpm > 120 {
            Self::High
        } else if bpm > 100 {
            Self::Mild
        } else {
            Self::Normal
        }
    }

    /// User-facing status message for this tier.
    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "⚠ High heart rate detected! Try deep breathing.",
            Self::Mild => {
                "You're a little stressed. Try closing your eyes and taking slow deep breaths."
            }
            Self::Normal => "You're doing well! Stay relaxed and continue at your own pace.",
        }
    }

    /// Display color for this tier.
    pub fn color(&self) -> AlertColor {
        match self {
            Self::High => AlertColor::Red,
            Self::Mild => AlertColor::Orange,
            Self::Normal => AlertColor::Green,
        }
    }

    /// Coaching text shown alongside the status message.
    pub fn calming_suggestion(&self) -> &'static str {
        match self {
            Self::High => {
                "Your heart rate is high! Try deep breathing: Inhale for 4 seconds... \
                 Hold for 4 seconds... Exhale slowly."
            }
            Self::Mild => {
                "You're a little stressed. Try closing your eyes and taking slow deep breaths."
            }
            Self::Normal => "You're doing well! Stay relaxed and continue at your own pace.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AlertTier::from_bpm(100), AlertTier::Normal);
        assert_eq!(AlertTier::from_bpm(101), AlertTier::Mild);
        assert_eq!(AlertTier::from_bpm(120), AlertTier::Mild);
        assert_eq!(AlertTier::from_bpm(121), AlertTier::High);
    }

    #[test]
    fn test_tier_extremes() {
        assert_eq!(AlertTier::from_bpm(0), AlertTier::Normal);
        assert_eq!(AlertTier::from_bpm(250), AlertTier::High);
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(AlertTier::Normal.color(), AlertColor::Green);
        assert_eq!(AlertTier::Mild.color(), AlertColor::Orange);
        assert_eq!(AlertTier::High.color(), AlertColor::Red);
    }

    #[test]
    fn test_high_message_mentions_breathing() {
        assert!(AlertTier::High.message().contains("deep breathing"));
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&AlertTier::Mild).unwrap();
        assert_eq!(json, "\"mild\"");
        let parsed: AlertTier = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, AlertTier::High);
    }
}
