//! Facts the customer learns about the call.
//!
//! A `FactSet` accumulates over the session. Extractors never write it
//! directly; they return a `FactUpdate` that is merged so a fact, once
//! known, is never forgotten.

use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// Outcome of the plan inquiry.
///
/// Which pair is reachable depends on the scenario's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Covered,
    NotCovered,
    Active,
    Inactive,
}

impl PlanStatus {
    /// Returns true for the outcome the customer hoped for.
    pub fn is_favorable(&self) -> bool {
        matches!(self, Self::Covered | Self::Active)
    }

    /// Display label, as the original debug panel showed it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Covered => "Covered",
            Self::NotCovered => "Not covered",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Structured knowledge accumulated over one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    pub agent_name: Option<String>,
    pub member_id: Option<String>,
    pub correct_queue: Option<bool>,
    pub authenticated: Option<bool>,
    pub plan_status: Option<PlanStatus>,
}

impl FactSet {
    /// Creates an empty fact set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when nothing is known yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges an update, writing only the fields the update carries.
    pub fn merge(&mut self, update: &FactUpdate) {
        if let Some(name) = &update.agent_name {
            self.agent_name = Some(name.clone());
        }
        if let Some(member_id) = &update.member_id {
            self.member_id = Some(member_id.clone());
        }
        if let Some(correct_queue) = update.correct_queue {
            self.correct_queue = Some(correct_queue);
        }
        if let Some(authenticated) = update.authenticated {
            self.authenticated = Some(authenticated);
        }
        if let Some(status) = update.plan_status {
            self.plan_status = Some(status);
        }
    }

    /// Returns a copy with the update applied.
    pub fn merged(&self, update: &FactUpdate) -> Self {
        let mut next = self.clone();
        next.merge(update);
        next
    }

    /// Agent name for addressing, with the generic fallback.
    pub fn agent_name_or_default(&self) -> &str {
        self.agent_name.as_deref().unwrap_or("support agent")
    }

    /// The fact a phase is still waiting on, if any.
    pub fn missing_for(&self, phase: Phase) -> Option<&'static str> {
        match phase {
            Phase::Introduction if self.agent_name.is_none() => Some("agent_name"),
            Phase::QueueConfirmation if self.correct_queue.is_none() => Some("correct_queue"),
            Phase::Authentication if self.authenticated.is_none() => Some("authenticated"),
            Phase::PlanInquiry if self.plan_status.is_none() => Some("plan_status"),
            _ => None,
        }
    }
}

/// Partial fact set produced by one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactUpdate {
    pub agent_name: Option<String>,
    pub member_id: Option<String>,
    pub correct_queue: Option<bool>,
    pub authenticated: Option<bool>,
    pub plan_status: Option<PlanStatus>,
}

impl FactUpdate {
    /// An update carrying nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if the update carries no fact.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }

    pub fn with_member_id(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = Some(member_id.into());
        self
    }

    pub fn with_correct_queue(mut self, correct: bool) -> Self {
        self.correct_queue = Some(correct);
        self
    }

    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = Some(authenticated);
        self
    }

    pub fn with_plan_status(mut self, status: PlanStatus) -> Self {
        self.plan_status = Some(status);
        self
    }
}
