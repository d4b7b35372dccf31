//! Rule-based fact extraction.
//!
//! Each phase has its own indicator tables. Matching is substring
//! containment on the lower-cased utterance; within a table the first
//! indicator in declared order wins, and a negative table is consulted only
//! when nothing in the positive table matched. No match is not an error, it
//! simply yields an empty update.

use super::configs::{PlanVocabulary, Scenario};
use super::facts::{FactUpdate, PlanStatus};
use super::phase::Phase;

/// Phrases that precede the agent's name, in priority order.
pub const NAME_INDICATORS: &[&str] = &["name is", "this is", "speaking", "i am", "i'm"];

pub const QUEUE_POSITIVE: &[&str] = &["yes", "correct", "right", "can help", "assist you", "coverage"];
pub const QUEUE_NEGATIVE: &[&str] = &["no", "wrong", "different", "not the right", "transfer"];

pub const AUTH_POSITIVE: &[&str] = &[
    "verified",
    "confirmed",
    "authenticated",
    "found you",
    "found your",
    "located your",
];
pub const AUTH_NEGATIVE: &[&str] = &["not found", "can't find", "cannot find", "invalid", "incorrect"];

pub const COVERAGE_POSITIVE: &[&str] = &["covered", "included", "part of your plan", "your plan covers"];
pub const COVERAGE_NEGATIVE: &[&str] = &[
    "not covered",
    "isn't covered",
    "does not cover",
    "doesn't cover",
    "excluded",
];

pub const ACTIVITY_POSITIVE: &[&str] = &["active"];
pub const ACTIVITY_NEGATIVE: &[&str] = &["inactive", "not active", "expired"];

const NAME_PUNCTUATION: &[char] = &[',', '.', '!', '?'];

/// Result of running the extractor on one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub update: FactUpdate,
    /// The indicator that produced the update, if any.
    pub matched: Option<&'static str>,
}

impl Extraction {
    fn miss() -> Self {
        Self::default()
    }

    fn hit(update: FactUpdate, indicator: &'static str) -> Self {
        Self {
            update,
            matched: Some(indicator),
        }
    }
}

/// Extracts facts from agent utterances for a given scenario.
#[derive(Debug, Clone)]
pub struct FactExtractor {
    member_id: &'static str,
    vocabulary: PlanVocabulary,
}

impl FactExtractor {
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            member_id: scenario.member_id,
            vocabulary: scenario.vocabulary,
        }
    }

    /// Extracts the facts the current phase is interested in.
    pub fn extract(&self, phase: Phase, utterance: &str) -> Extraction {
        let text = utterance.to_lowercase();
        match phase {
            Phase::Introduction => extract_agent_name(&text),
            Phase::QueueConfirmation => {
                match classify(&text, QUEUE_POSITIVE, QUEUE_NEGATIVE) {
                    Some((correct, indicator)) => {
                        Extraction::hit(FactUpdate::none().with_correct_queue(correct), indicator)
                    }
                    None => Extraction::miss(),
                }
            }
            Phase::Authentication => match classify(&text, AUTH_POSITIVE, AUTH_NEGATIVE) {
                Some((true, indicator)) => Extraction::hit(
                    FactUpdate::none()
                        .with_authenticated(true)
                        .with_member_id(self.member_id),
                    indicator,
                ),
                Some((false, indicator)) => {
                    Extraction::hit(FactUpdate::none().with_authenticated(false), indicator)
                }
                None => Extraction::miss(),
            },
            Phase::PlanInquiry => self.extract_plan_status(&text),
            Phase::Conclusion => Extraction::miss(),
        }
    }

    fn extract_plan_status(&self, text: &str) -> Extraction {
        let (positive, negative, favorable, unfavorable) = match self.vocabulary {
            PlanVocabulary::Coverage => (
                COVERAGE_POSITIVE,
                COVERAGE_NEGATIVE,
                PlanStatus::Covered,
                PlanStatus::NotCovered,
            ),
            PlanVocabulary::Activity => (
                ACTIVITY_POSITIVE,
                ACTIVITY_NEGATIVE,
                PlanStatus::Active,
                PlanStatus::Inactive,
            ),
        };

        match classify(text, positive, negative) {
            Some((hit, indicator)) => {
                let status = if hit { favorable } else { unfavorable };
                Extraction::hit(FactUpdate::none().with_plan_status(status), indicator)
            }
            None => Extraction::miss(),
        }
    }
}

/// First positive indicator wins; negatives are only checked when no positive matched.
fn classify(
    text: &str,
    positive: &'static [&'static str],
    negative: &'static [&'static str],
) -> Option<(bool, &'static str)> {
    if let Some(indicator) = first_match(text, positive) {
        return Some((true, indicator));
    }
    first_match(text, negative).map(|indicator| (false, indicator))
}

fn first_match(text: &str, indicators: &'static [&'static str]) -> Option<&'static str> {
    indicators.iter().copied().find(|indicator| text.contains(indicator))
}

fn extract_agent_name(text: &str) -> Extraction {
    for indicator in NAME_INDICATORS.iter().copied() {
        let Some((_, rest)) = text.split_once(indicator) else {
            continue;
        };
        let Some(token) = rest.split_whitespace().next() else {
            continue;
        };
        let candidate = token.trim_matches(NAME_PUNCTUATION);
        if candidate.chars().count() > 1 {
            return Extraction::hit(FactUpdate::none().with_agent_name(capitalize(candidate)), indicator);
        }
    }
    Extraction::miss()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
