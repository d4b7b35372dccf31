//! Reply selection.
//!
//! Decides *which* reply the customer gives after a turn. Rendering the
//! intent into text happens elsewhere (templates or the generation service).

use serde::{Deserialize, Serialize};

use super::facts::{FactSet, PlanStatus};
use super::phase::Phase;

/// Why the call is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingReason {
    WrongDepartment,
    AuthenticationFailed,
    PlanResolved(PlanStatus),
    /// Any turn after the call has already concluded.
    Farewell,
}

/// The kind of line the customer says next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ReplyIntent {
    /// Scripted first line of a fresh session.
    Opening,
    AskAgentName,
    ConfirmDepartment,
    ClarifyDepartment,
    ProvideMemberId,
    ClarifyAuthentication,
    AskAboutPlan,
    ClarifyPlan,
    Conclude { reason: ClosingReason },
}

impl ReplyIntent {
    /// Shorthand for `Conclude { reason }`.
    pub fn conclude(reason: ClosingReason) -> Self {
        Self::Conclude { reason }
    }

    /// Intents whose text is requested from the generation service.
    pub fn uses_generation(&self) -> bool {
        matches!(self, Self::ConfirmDepartment | Self::AskAboutPlan)
    }

    /// Stable snake_case name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::AskAgentName => "ask_agent_name",
            Self::ConfirmDepartment => "confirm_department",
            Self::ClarifyDepartment => "clarify_department",
            Self::ProvideMemberId => "provide_member_id",
            Self::ClarifyAuthentication => "clarify_authentication",
            Self::AskAboutPlan => "ask_about_plan",
            Self::ClarifyPlan => "clarify_plan",
            Self::Conclude { .. } => "conclude",
        }
    }
}

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Template,
    Generated,
    /// Generation was attempted but failed; the template was used.
    Fallback,
}

/// Chooses the reply intent for the phase reached after a turn.
///
/// `phase` is the phase *after* the transition policy ran. A self-loop
/// (`transitioned == false`) asks again for the unchanged phase.
pub fn select_reply(phase: Phase, facts: &FactSet, transitioned: bool) -> ReplyIntent {
    match (phase, transitioned) {
        // Introduction is never entered by a transition.
        (Phase::Introduction, _) => ReplyIntent::AskAgentName,
        (Phase::QueueConfirmation, true) => ReplyIntent::ConfirmDepartment,
        (Phase::QueueConfirmation, false) => ReplyIntent::ClarifyDepartment,
        (Phase::Authentication, true) => ReplyIntent::ProvideMemberId,
        (Phase::Authentication, false) => ReplyIntent::ClarifyAuthentication,
        (Phase::PlanInquiry, true) => ReplyIntent::AskAboutPlan,
        (Phase::PlanInquiry, false) => ReplyIntent::ClarifyPlan,
        (Phase::Conclusion, true) => ReplyIntent::conclude(closing_reason(facts)),
        (Phase::Conclusion, false) => ReplyIntent::conclude(ClosingReason::Farewell),
    }
}

fn closing_reason(facts: &FactSet) -> ClosingReason {
    if facts.correct_queue == Some(false) {
        ClosingReason::WrongDepartment
    } else if facts.authenticated == Some(false) {
        ClosingReason::AuthenticationFailed
    } else if let Some(status) = facts.plan_status {
        ClosingReason::PlanResolved(status)
    } else {
        ClosingReason::Farewell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::facts::FactUpdate;

    fn facts(update: FactUpdate) -> FactSet {
        FactSet::new().merged(&update)
    }

    mod selection {
        use super::*;

        #[test]
        fn introduction_self_loop_asks_for_name() {
            let intent = select_reply(Phase::Introduction, &FactSet::new(), false);
            assert_eq!(intent, ReplyIntent::AskAgentName);
        }

        #[test]
        fn entering_queue_confirmation_confirms_department() {
            let f = facts(FactUpdate::none().with_agent_name("Maria"));
            assert_eq!(
                select_reply(Phase::QueueConfirmation, &f, true),
                ReplyIntent::ConfirmDepartment
            );
        }

        #[test]
        fn queue_self_loop_clarifies() {
            let f = facts(FactUpdate::none().with_agent_name("Maria"));
            assert_eq!(
                select_reply(Phase::QueueConfirmation, &f, false),
                ReplyIntent::ClarifyDepartment
            );
        }

        #[test]
        fn entering_authentication_provides_member_id() {
            let f = facts(FactUpdate::none().with_correct_queue(true));
            assert_eq!(
                select_reply(Phase::Authentication, &f, true),
                ReplyIntent::ProvideMemberId
            );
            assert_eq!(
                select_reply(Phase::Authentication, &f, false),
                ReplyIntent::ClarifyAuthentication
            );
        }

        #[test]
        fn plan_inquiry_branches_on_transition() {
            let f = facts(FactUpdate::none().with_authenticated(true));
            assert_eq!(select_reply(Phase::PlanInquiry, &f, true), ReplyIntent::AskAboutPlan);
            assert_eq!(select_reply(Phase::PlanInquiry, &f, false), ReplyIntent::ClarifyPlan);
        }
    }

    mod closing {
        use super::*;

        #[test]
        fn wrong_department_closes_with_reason() {
            let f = facts(FactUpdate::none().with_correct_queue(false));
            assert_eq!(
                select_reply(Phase::Conclusion, &f, true),
                ReplyIntent::conclude(ClosingReason::WrongDepartment)
            );
        }

        #[test]
        fn failed_authentication_closes_with_reason() {
            let f = facts(
                FactUpdate::none()
                    .with_correct_queue(true)
                    .with_authenticated(false),
            );
            assert_eq!(
                select_reply(Phase::Conclusion, &f, true),
                ReplyIntent::conclude(ClosingReason::AuthenticationFailed)
            );
        }

        #[test]
        fn resolved_plan_closes_with_status() {
            let f = facts(
                FactUpdate::none()
                    .with_correct_queue(true)
                    .with_authenticated(true)
                    .with_plan_status(PlanStatus::NotCovered),
            );
            assert_eq!(
                select_reply(Phase::Conclusion, &f, true),
                ReplyIntent::conclude(ClosingReason::PlanResolved(PlanStatus::NotCovered))
            );
        }

        #[test]
        fn turns_after_conclusion_say_farewell() {
            let f = facts(FactUpdate::none().with_plan_status(PlanStatus::Covered));
            assert_eq!(
                select_reply(Phase::Conclusion, &f, false),
                ReplyIntent::conclude(ClosingReason::Farewell)
            );
        }
    }

    mod intents {
        use super::*;

        #[test]
        fn only_free_form_intents_use_generation() {
            assert!(ReplyIntent::ConfirmDepartment.uses_generation());
            assert!(ReplyIntent::AskAboutPlan.uses_generation());
            assert!(!ReplyIntent::ProvideMemberId.uses_generation());
            assert!(!ReplyIntent::conclude(ClosingReason::Farewell).uses_generation());
        }

        #[test]
        fn serializes_with_intent_tag() {
            let json = serde_json::to_value(ReplyIntent::conclude(ClosingReason::PlanResolved(
                PlanStatus::Active,
            )))
            .unwrap();
            assert_eq!(json["intent"], "conclude");
            assert_eq!(json["reason"]["plan_resolved"], "active");
        }
    }
}
