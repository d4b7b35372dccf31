//! State machine trait for phase-like enums.
//!
//! Declares the allowed phase changes once so that both the live transition
//! policy and snapshot restoration can be checked against the same graph.

use super::ValidationError;

/// Trait for enums whose values move along a declared graph.
///
/// Staying on the current value is a self-loop, not a transition, so
/// `valid_transitions` only lists *other* values. A value with no outgoing
/// edges is terminal.
///
/// ```ignore
/// let next = Phase::Authentication.transition_to(Phase::PlanInquiry)?;
/// assert!(Phase::Conclusion.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all values reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs a checked move, returning an error for undeclared edges.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if the value has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
