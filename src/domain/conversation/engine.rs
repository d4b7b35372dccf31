//! Phase transition policy.
//!
//! Maps the current phase and the accumulated facts to the phase the
//! session should be in after a turn. Pure and deterministic.

use super::facts::FactSet;
use super::phase::Phase;

/// Table-driven transition policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTransitionPolicy;

impl PhaseTransitionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Returns the phase after applying the transition table.
    ///
    /// Returning `current` means "ask again", not a failure.
    pub fn next_phase(&self, current: Phase, facts: &FactSet) -> Phase {
        match current {
            Phase::Introduction => self.transition_from_introduction(facts),
            Phase::QueueConfirmation => self.transition_from_queue_confirmation(facts),
            Phase::Authentication => self.transition_from_authentication(facts),
            Phase::PlanInquiry => self.transition_from_plan_inquiry(facts),
            Phase::Conclusion => Phase::Conclusion,
        }
    }

    /// Returns true if the facts move the session out of `current`.
    pub fn should_transition(&self, current: Phase, facts: &FactSet) -> bool {
        self.next_phase(current, facts) != current
    }

    fn transition_from_introduction(&self, facts: &FactSet) -> Phase {
        if facts.agent_name.is_some() {
            Phase::QueueConfirmation
        } else {
            Phase::Introduction
        }
    }

    fn transition_from_queue_confirmation(&self, facts: &FactSet) -> Phase {
        match facts.correct_queue {
            Some(true) => Phase::Authentication,
            Some(false) => Phase::Conclusion,
            None => Phase::QueueConfirmation,
        }
    }

    fn transition_from_authentication(&self, facts: &FactSet) -> Phase {
        match facts.authenticated {
            Some(true) => Phase::PlanInquiry,
            Some(false) => Phase::Conclusion,
            None => Phase::Authentication,
        }
    }

    fn transition_from_plan_inquiry(&self, facts: &FactSet) -> Phase {
        if facts.plan_status.is_some() {
            Phase::Conclusion
        } else {
            Phase::PlanInquiry
        }
    }
}
