//! State machine trait for lifecycle status enums.

use thiserror::Error;

/// Rejected lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table; validated transitions and
/// terminal-state detection come for free.
///
/// ```ignore
/// let next = booking.status.transition_to(BookingStatus::Scheduled)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Display {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: self.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
