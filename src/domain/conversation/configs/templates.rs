//! Reply templates and generation prompts.
//!
//! Every intent has a deterministic template so a turn can always be
//! answered even when the generation service is unavailable.

use super::scenario::Scenario;
use crate::domain::conversation::facts::{FactSet, PlanStatus};
use crate::domain::conversation::phase::Phase;
use crate::domain::conversation::responses::{ClosingReason, ReplyIntent};

/// User message sent alongside every generation system prompt.
pub const GENERATION_INSTRUCTION: &str = "Generate the customer's next response.";

/// Scripted first line of every session.
pub fn opening_line(scenario: &Scenario) -> String {
    format!(
        "Hello! My name is {}, and I'm calling about my insurance plan. May I ask who I'm speaking with?",
        scenario.customer_name
    )
}

/// Closing line naming the agent.
pub fn farewell(facts: &FactSet) -> String {
    format!(
        "Thank you so much for your help today, {}! You've been very informative. Have a great day!",
        facts.agent_name_or_default()
    )
}

/// Renders the template text for an intent.
pub fn render(intent: &ReplyIntent, facts: &FactSet, scenario: &Scenario) -> String {
    match intent {
        ReplyIntent::Opening => opening_line(scenario),
        ReplyIntent::AskAgentName => {
            "I'm sorry, I didn't catch your name. Could you please tell me your name?".to_string()
        }
        ReplyIntent::ConfirmDepartment => format!(
            "Nice to meet you, {}! My name is {}. {} Is this the right department for {}?",
            facts.agent_name_or_default(),
            scenario.customer_name,
            scenario.purpose,
            scenario.department
        ),
        ReplyIntent::ClarifyDepartment => format!(
            "I'm not sure if I'm in the right place. {} Can you help with {}?",
            scenario.purpose, scenario.department
        ),
        ReplyIntent::ProvideMemberId => format!(
            "Great! My member ID is {}. Could you please verify my account?",
            scenario.member_id
        ),
        ReplyIntent::ClarifyAuthentication => format!(
            "I provided my member ID {}. Do you need any additional information to verify my account?",
            scenario.member_id
        ),
        ReplyIntent::AskAboutPlan => format!(
            "Thank you for verifying my account. {}",
            scenario.plan_question
        ),
        ReplyIntent::ClarifyPlan => scenario.plan_clarification.to_string(),
        ReplyIntent::Conclude { reason } => match closing_line(*reason, scenario) {
            Some(line) => format!("{} {}", line, farewell(facts)),
            None => farewell(facts),
        },
    }
}

fn closing_line(reason: ClosingReason, scenario: &Scenario) -> Option<String> {
    match reason {
        ClosingReason::WrongDepartment => Some(format!(
            "Oh, I see. I'll call back and ask to be transferred to the right department for {}.",
            scenario.department
        )),
        ClosingReason::AuthenticationFailed => Some(
            "I'm sorry to hear that. Let me double-check my ID. I might need to call back later with the correct information."
                .to_string(),
        ),
        ClosingReason::PlanResolved(status) => Some(
            match status {
                PlanStatus::Covered => "That's great news! Thank you for checking.",
                PlanStatus::NotCovered => {
                    "I see. That's disappointing, but I appreciate you checking."
                }
                PlanStatus::Active => "That's good to hear! Thank you for confirming my plan is active.",
                PlanStatus::Inactive => "I see. I'll look into renewing my plan then.",
            }
            .to_string(),
        ),
        ClosingReason::Farewell => None,
    }
}

/// System prompt for intents rendered by the generation service.
///
/// Returns `None` for intents that are always templated.
pub fn generation_prompt(intent: &ReplyIntent, facts: &FactSet, scenario: &Scenario) -> Option<String> {
    let agent_name = facts.agent_name_or_default();
    let (phase, task) = match intent {
        ReplyIntent::ConfirmDepartment => (
            Phase::QueueConfirmation,
            format!(
                "Greet {agent_name} by name, introduce yourself as {} and ask whether this is the right department for {}. {}",
                scenario.customer_name, scenario.department, scenario.purpose
            ),
        ),
        ReplyIntent::AskAboutPlan => (
            Phase::PlanInquiry,
            format!(
                "Thank {agent_name} for verifying your account, then {}.",
                scenario.plan_goal
            ),
        ),
        _ => return None,
    };

    Some(format!(
        "You are a bot acting on behalf of a customer named {} calling a customer support line.\n\
         Current goal: {}\n\
         {}\n\
         Remember the agent's name is {}.\n\
         Keep it to one or two sentences. Only respond as the customer.",
        scenario.customer_name,
        phase.goal(),
        task,
        agent_name
    ))
}
