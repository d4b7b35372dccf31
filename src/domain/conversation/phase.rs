//! Conversation phases of a simulated support call.
//!
//! Phases are the ordered goals the customer works through. Unlike a
//! free-form dialogue, a call only ever moves forward:
//! `Introduction` → `QueueConfirmation` → `Authentication` → `PlanInquiry` → `Conclusion`,
//! with early exits to `Conclusion` from `QueueConfirmation` (wrong department)
//! and `Authentication` (verification failed).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The active conversational goal of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Customer introduces itself and learns the agent's name.
    #[default]
    Introduction,

    /// Customer checks it reached the right department.
    QueueConfirmation,

    /// Customer hands over its member ID and waits for verification.
    Authentication,

    /// Customer asks about its plan.
    PlanInquiry,

    /// Call is wrapping up. Terminal.
    Conclusion,
}

impl Phase {
    /// All phases in progression order.
    pub const ALL: [Phase; 5] = [
        Phase::Introduction,
        Phase::QueueConfirmation,
        Phase::Authentication,
        Phase::PlanInquiry,
        Phase::Conclusion,
    ];

    /// Position in the progression order, starting at zero.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Introduction => 0,
            Self::QueueConfirmation => 1,
            Self::Authentication => 2,
            Self::PlanInquiry => 3,
            Self::Conclusion => 4,
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::QueueConfirmation => "Queue confirmation",
            Self::Authentication => "Authentication",
            Self::PlanInquiry => "Plan inquiry",
            Self::Conclusion => "Conclusion",
        }
    }

    /// What the customer is trying to achieve in this phase.
    pub fn goal(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduce yourself and learn the support agent's name.",
            Self::QueueConfirmation => "Confirm you reached the right queue for your inquiry.",
            Self::Authentication => "Authenticate using your member ID.",
            Self::PlanInquiry => "Ask about the status of your plan.",
            Self::Conclusion => "Thank the agent and end the call.",
        }
    }
}

impl StateMachine for Phase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Phase::*;
        matches!(
            (self, target),
            (Introduction, QueueConfirmation)
                | (QueueConfirmation, Authentication)
                // Wrong department
                | (QueueConfirmation, Conclusion)
                | (Authentication, PlanInquiry)
                // Verification failed
                | (Authentication, Conclusion)
                | (PlanInquiry, Conclusion)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Phase::*;
        match self {
            Introduction => vec![QueueConfirmation],
            QueueConfirmation => vec![Authentication, Conclusion],
            Authentication => vec![PlanInquiry, Conclusion],
            PlanInquiry => vec![Conclusion],
            Conclusion => vec![],
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
