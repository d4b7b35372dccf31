//! Append-only transcript of a call.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who said a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The human support agent.
    Agent,
    /// The simulated customer.
    Bot,
}

/// One immutable line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    text: String,
    timestamp: Timestamp,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp,
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Speaker::Agent, text, Timestamp::now())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Speaker::Bot, text, Timestamp::now())
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Ordered sequence of turns. Turns are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Index of the first turn that breaks Agent/Bot alternation, if any.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.turns.iter().enumerate().find_map(|(index, turn)| {
            let expected = if index % 2 == 0 { Speaker::Agent } else { Speaker::Bot };
            (turn.speaker != expected).then_some(index)
        })
    }

    /// Returns true if turns alternate Agent, Bot, Agent, ... and end on a Bot turn.
    pub fn is_alternating(&self) -> bool {
        self.turns.len() % 2 == 0 && self.first_out_of_order().is_none()
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
        assert!(transcript.is_alternating());
    }

    #[test]
    fn push_appends_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::agent("Hello"));
        transcript.push(Turn::bot("Hi there"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].speaker(), Speaker::Agent);
        assert_eq!(transcript.last().map(Turn::text), Some("Hi there"));
        assert!(transcript.is_alternating());
    }

    #[test]
    fn trailing_agent_turn_is_not_alternating() {
        let transcript = Transcript::from(vec![Turn::agent("Hello")]);
        assert!(!transcript.is_alternating());
        assert_eq!(transcript.first_out_of_order(), None);
    }

    #[test]
    fn detects_out_of_order_turn() {
        let transcript = Transcript::from(vec![
            Turn::agent("Hello"),
            Turn::agent("Anyone there?"),
        ]);
        assert_eq!(transcript.first_out_of_order(), Some(1));
    }

    #[test]
    fn serializes_as_plain_array() {
        let transcript = Transcript::from(vec![Turn::agent("Hello")]);
        let json = serde_json::to_value(&transcript).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["speaker"], "agent");
        assert_eq!(json[0]["text"], "Hello");
    }
}
