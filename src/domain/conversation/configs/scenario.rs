//! Customer scenarios.
//!
//! A deployment runs exactly one scenario. It fixes who the customer is,
//! which department they want and which plan vocabulary the agent's answer
//! is classified against.

use serde::{Deserialize, Serialize};

/// Selects a built-in scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Asks whether a procedure is covered.
    #[default]
    CoverageInquiry,
    /// Asks whether the plan is still active.
    PlanStatus,
}

impl ScenarioKind {
    /// Returns the static scenario definition.
    pub fn scenario(&self) -> &'static Scenario {
        match self {
            Self::CoverageInquiry => &COVERAGE_INQUIRY,
            Self::PlanStatus => &PLAN_STATUS,
        }
    }

    /// Returns the snake_case name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoverageInquiry => "coverage_inquiry",
            Self::PlanStatus => "plan_status",
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pair of plan statuses the inquiry can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanVocabulary {
    /// Covered / NotCovered.
    Coverage,
    /// Active / Inactive.
    Activity,
}

/// Static description of the customer persona and its inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub customer_name: &'static str,
    /// Synthetic identifier handed over during authentication.
    pub member_id: &'static str,
    /// Department the customer needs, as spoken ("coverage inquiries").
    pub department: &'static str,
    /// One-sentence reason for the call.
    pub purpose: &'static str,
    /// Question asked once authenticated.
    pub plan_question: &'static str,
    /// Follow-up when the agent's answer was unclear.
    pub plan_clarification: &'static str,
    /// Goal phrase used in generation prompts.
    pub plan_goal: &'static str,
    pub vocabulary: PlanVocabulary,
}

pub static COVERAGE_INQUIRY: Scenario = Scenario {
    kind: ScenarioKind::CoverageInquiry,
    customer_name: "Sarah Johnson",
    member_id: "MEM123456789",
    department: "coverage inquiries",
    purpose: "I'm calling to check if my insurance covers a procedure I'm planning.",
    plan_question: "I'm planning to have a routine colonoscopy next month. Does my current plan cover this procedure?",
    plan_clarification: "I'm not sure I understood whether the colonoscopy procedure is covered under my plan. Could you please clarify?",
    plan_goal: "find out whether a routine colonoscopy next month is covered by your plan",
    vocabulary: PlanVocabulary::Coverage,
};

pub static PLAN_STATUS: Scenario = Scenario {
    kind: ScenarioKind::PlanStatus,
    customer_name: "John Doe",
    member_id: "AD78902145",
    department: "plan status inquiries",
    purpose: "I'm calling to check whether my insurance plan is still active.",
    plan_question: "Could you please check whether my insurance plan is currently active?",
    plan_clarification: "I'm not sure I understood whether my plan is currently active. Could you please clarify?",
    plan_goal: "find out whether your insurance plan is currently active",
    vocabulary: PlanVocabulary::Activity,
};
