//! Conversation session aggregate.
//!
//! Holds the facts, phase and transcript of one simulated call. A turn is
//! applied in two steps: `decide_turn` computes everything the turn will
//! change without touching the session, and `commit_turn` appends both lines
//! and adopts the new state once the reply text is known. The split lets the
//! reply be rendered (possibly by a slow generation call) in between.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::configs::{PlanVocabulary, ScenarioKind};
use super::engine::PhaseTransitionPolicy;
use super::extractor::FactExtractor;
use super::facts::{FactSet, PlanStatus};
use super::phase::Phase;
use super::responses::{select_reply, ReplyIntent};
use super::transcript::{Speaker, Transcript, Turn};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};

/// Why a session snapshot cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionStateError {
    #[error("Malformed session: {0}")]
    Malformed(String),

    #[error("Facts are inconsistent with phase {phase:?}: {reason}")]
    FactsInconsistent { phase: Phase, reason: String },

    #[error("Phase cannot move from {from:?} to {to:?}")]
    IllegalTransition { from: Phase, to: Phase },

    #[error("Transcript out of order at turn {index}")]
    TranscriptOutOfOrder { index: usize },

    #[error("Plan status {status:?} is not valid for scenario {scenario}")]
    UnsupportedPlanStatus {
        status: PlanStatus,
        scenario: ScenarioKind,
    },

    #[error("Agent name must not be empty")]
    EmptyAgentName,

    #[error("Member ID {found} does not belong to scenario {scenario}")]
    ScenarioMismatch { scenario: ScenarioKind, found: String },
}

/// Everything a turn will change, computed without mutating the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnDecision {
    received_at: Timestamp,
    utterance: String,
    previous_phase: Phase,
    phase: Phase,
    transitioned: bool,
    facts: FactSet,
    intent: ReplyIntent,
    matched: Option<&'static str>,
    priming: bool,
}

impl TurnDecision {
    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn previous_phase(&self) -> Phase {
        self.previous_phase
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transitioned(&self) -> bool {
        self.transitioned
    }

    /// Facts after merging this turn's extraction.
    pub fn facts(&self) -> &FactSet {
        &self.facts
    }

    pub fn intent(&self) -> ReplyIntent {
        self.intent
    }

    /// Indicator that fired during extraction.
    pub fn matched(&self) -> Option<&'static str> {
        self.matched
    }

    /// True for the first turn of a fresh session, which bypasses the state machine.
    pub fn is_priming(&self) -> bool {
        self.priming
    }
}

/// Aggregate root for one simulated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    id: SessionId,
    scenario: ScenarioKind,
    facts: FactSet,
    phase: Phase,
    transcript: Transcript,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ConversationSession {
    /// Creates a fresh, unprimed session.
    pub fn new(id: SessionId, scenario: ScenarioKind) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            scenario,
            facts: FactSet::new(),
            phase: Phase::Introduction,
            transcript: Transcript::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn scenario(&self) -> ScenarioKind {
        self.scenario
    }

    pub fn facts(&self) -> &FactSet {
        &self.facts
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true once the opening exchange has happened.
    pub fn is_primed(&self) -> bool {
        !self.transcript.is_empty()
    }

    /// Returns true once the call has reached its terminal phase.
    pub fn is_concluded(&self) -> bool {
        self.phase.is_terminal()
    }

    // === Turn handling ===

    /// Computes the effect of one agent utterance.
    ///
    /// The first utterance of an unprimed session always gets the opening
    /// line and leaves phase and facts untouched.
    pub fn decide_turn(
        &self,
        utterance: &str,
        extractor: &FactExtractor,
        policy: &PhaseTransitionPolicy,
    ) -> TurnDecision {
        let received_at = Timestamp::now();

        if !self.is_primed() {
            return TurnDecision {
                received_at,
                utterance: utterance.to_string(),
                previous_phase: self.phase,
                phase: self.phase,
                transitioned: false,
                facts: self.facts.clone(),
                intent: ReplyIntent::Opening,
                matched: None,
                priming: true,
            };
        }

        let extraction = extractor.extract(self.phase, utterance);
        let facts = self.facts.merged(&extraction.update);
        let phase = policy.next_phase(self.phase, &facts);
        let transitioned = phase != self.phase;
        let intent = select_reply(phase, &facts, transitioned);

        TurnDecision {
            received_at,
            utterance: utterance.to_string(),
            previous_phase: self.phase,
            phase,
            transitioned,
            facts,
            intent,
            matched: extraction.matched,
            priming: false,
        }
    }

    /// Appends the agent and bot turns and adopts the decided state.
    pub fn commit_turn(&mut self, decision: TurnDecision, reply: impl Into<String>) {
        self.transcript.push(Turn::new(
            Speaker::Agent,
            decision.utterance,
            decision.received_at,
        ));
        self.transcript.push(Turn::bot(reply));
        self.facts = decision.facts;
        self.phase = decision.phase;
        self.updated_at = Timestamp::now();
    }

    /// Replaces the session with a fresh one under the same id and scenario.
    pub fn reset(&mut self) {
        *self = Self::new(self.id, self.scenario);
    }

    // === Snapshots ===

    /// Plain-data copy of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }

    /// Restores a session from a snapshot, rejecting inconsistent state.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SessionStateError> {
        Self::try_from(snapshot)
    }
}

/// Serializable form of a session, held by callers between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    #[serde(default)]
    pub scenario: ScenarioKind,
    pub phase: Phase,
    pub facts: FactSet,
    pub transcript: Transcript,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SessionSnapshot {
    /// Parses a snapshot from arbitrary JSON.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SessionStateError> {
        serde_json::from_value(value).map_err(|e| SessionStateError::Malformed(e.to_string()))
    }
}

impl From<&ConversationSession> for SessionSnapshot {
    fn from(session: &ConversationSession) -> Self {
        Self {
            id: session.id,
            scenario: session.scenario,
            phase: session.phase,
            facts: session.facts.clone(),
            transcript: session.transcript.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl TryFrom<SessionSnapshot> for ConversationSession {
    type Error = SessionStateError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        validate_facts(&snapshot)?;
        validate_transcript(&snapshot)?;

        Ok(Self {
            id: snapshot.id,
            scenario: snapshot.scenario,
            facts: snapshot.facts,
            phase: snapshot.phase,
            transcript: snapshot.transcript,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        })
    }
}

/// Name of the fact a phase waits on and whether it is set.
fn gating_fact(phase: Phase, facts: &FactSet) -> Option<(&'static str, bool)> {
    match phase {
        Phase::Introduction => Some(("agent_name", facts.agent_name.is_some())),
        Phase::QueueConfirmation => Some(("correct_queue", facts.correct_queue.is_some())),
        Phase::Authentication => Some(("authenticated", facts.authenticated.is_some())),
        Phase::PlanInquiry => Some(("plan_status", facts.plan_status.is_some())),
        Phase::Conclusion => None,
    }
}

fn validate_facts(snapshot: &SessionSnapshot) -> Result<(), SessionStateError> {
    let facts = &snapshot.facts;
    let scenario = snapshot.scenario.scenario();

    if facts
        .agent_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(SessionStateError::EmptyAgentName);
    }

    if let Some(member_id) = &facts.member_id {
        if member_id != scenario.member_id {
            return Err(SessionStateError::ScenarioMismatch {
                scenario: snapshot.scenario,
                found: member_id.clone(),
            });
        }
    }

    if let Some(status) = facts.plan_status {
        let supported = match scenario.vocabulary {
            PlanVocabulary::Coverage => matches!(status, PlanStatus::Covered | PlanStatus::NotCovered),
            PlanVocabulary::Activity => matches!(status, PlanStatus::Active | PlanStatus::Inactive),
        };
        if !supported {
            return Err(SessionStateError::UnsupportedPlanStatus {
                status,
                scenario: snapshot.scenario,
            });
        }
    }

    if snapshot.transcript.is_empty() && (snapshot.phase != Phase::Introduction || !facts.is_empty()) {
        return Err(SessionStateError::FactsInconsistent {
            phase: snapshot.phase,
            reason: "an unstarted call cannot carry facts or progress".to_string(),
        });
    }

    // The member ID is handed over together with a successful verification.
    match (facts.authenticated, facts.member_id.is_some()) {
        (Some(true), false) => {
            return Err(SessionStateError::FactsInconsistent {
                phase: snapshot.phase,
                reason: "authenticated without a member_id".to_string(),
            });
        }
        (Some(false) | None, true) => {
            return Err(SessionStateError::FactsInconsistent {
                phase: snapshot.phase,
                reason: "member_id is set before authentication succeeded".to_string(),
            });
        }
        _ => {}
    }

    // Replay the transition table over the facts and compare.
    let policy = PhaseTransitionPolicy::new();
    let mut visited = vec![Phase::Introduction];
    let mut reached = Phase::Introduction;
    loop {
        let next = policy.next_phase(reached, facts);
        if next == reached {
            break;
        }
        if !reached.can_transition_to(&next) {
            return Err(SessionStateError::IllegalTransition {
                from: reached,
                to: next,
            });
        }
        visited.push(next);
        reached = next;
    }

    for phase in Phase::ALL {
        if visited.contains(&phase) {
            continue;
        }
        if let Some((name, true)) = gating_fact(phase, facts) {
            return Err(SessionStateError::FactsInconsistent {
                phase: snapshot.phase,
                reason: format!("{} is set but {:?} was never reached", name, phase),
            });
        }
    }

    if reached != snapshot.phase {
        return Err(SessionStateError::FactsInconsistent {
            phase: snapshot.phase,
            reason: format!("facts place the call in {:?}", reached),
        });
    }

    Ok(())
}

fn validate_transcript(snapshot: &SessionSnapshot) -> Result<(), SessionStateError> {
    let transcript = &snapshot.transcript;
    if let Some(index) = transcript.first_out_of_order() {
        return Err(SessionStateError::TranscriptOutOfOrder { index });
    }
    if !transcript.is_alternating() {
        return Err(SessionStateError::TranscriptOutOfOrder {
            index: transcript.len().saturating_sub(1),
        });
    }
    Ok(())
}
