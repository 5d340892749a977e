//! Edge-triggered alert state machine.
//!
//! The spoken alert fires on the transition into the High tier, not on
//! every High evaluation — a single sustained elevated reading must not
//! re-trigger the alert each cycle.

use pulsecam_signal_model::AlertTier;

/// Whether an alert episode is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// No alert in progress.
    Idle,
    /// The spoken alert has fired for the current High episode.
    Alerted,
}

/// Tracks tier transitions and decides when the one-shot alert fires.
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    state: AlertState,
}

impl AlertStateMachine {
    /// Create a state machine in the idle state.
    pub fn new() -> Self {
        Self {
            state: AlertState::Idle,
        }
    }

    /// Feed the tier from the latest evaluation. Returns `true` exactly
    /// when the spoken alert should fire: on the Idle → Alerted edge.
    ///
    /// The machine re-arms on the first non-High evaluation, with no
    /// cooldown timer.
    pub fn observe(&mut self, tier: AlertTier) -> bool {
        match (self.state, tier) {
            (AlertState::Idle, AlertTier::High) => {
                self.state = AlertState::Alerted;
                true
            }
            (AlertState::Alerted, AlertTier::Normal | AlertTier::Mild) => {
                self.state = AlertState::Idle;
                false
            }
            _ => false,
        }
    }

    /// Current state.
    pub fn state(&self) -> AlertState {
        self.state
    }
}

impl Default for AlertStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
