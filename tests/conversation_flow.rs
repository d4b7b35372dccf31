//! Integration tests for full simulated calls.
//!
//! Drives the handlers the way the HTTP layer does:
//! 1. Scripted runs through every phase
//! 2. Early exits and reset
//! 3. Generation fallback
//! 4. Independent sessions in parallel

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use customer_call_bot::adapters::ai::{MockAIProvider, MockError, PromptedUtteranceGenerator};
use customer_call_bot::adapters::InMemorySessionStore;
use customer_call_bot::application::handlers::conversation::{
    ApplyAgentTurnCommand, ApplyAgentTurnHandler, ConversationResult, ResetConversationHandler,
    ResponseSelector, StartConversationHandler, TurnProcessor,
};
use customer_call_bot::domain::conversation::{
    ClosingReason, Phase, PlanStatus, ReplyIntent, ReplySource, ScenarioKind, Speaker,
};
use customer_call_bot::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    store: Arc<InMemorySessionStore>,
    start: StartConversationHandler,
    apply: ApplyAgentTurnHandler,
    reset: ResetConversationHandler,
}

impl Harness {
    fn new(selector: ResponseSelector, scenario: ScenarioKind) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let processor = Arc::new(TurnProcessor::new(selector, scenario));
        Self {
            start: StartConversationHandler::new(store.clone(), processor.clone()),
            apply: ApplyAgentTurnHandler::new(store.clone(), processor.clone()),
            reset: ResetConversationHandler::new(store.clone(), processor),
            store,
        }
    }

    fn templated(scenario: ScenarioKind) -> Self {
        Self::new(ResponseSelector::templated(), scenario)
    }

    async fn say(&self, started: &ConversationResult, utterance: &str) -> ConversationResult {
        self.apply
            .handle(ApplyAgentTurnCommand {
                session_id: started.session.id,
                utterance: utterance.to_string(),
            })
            .await
            .unwrap()
    }
}

const COVERAGE_SCRIPT: [&str; 4] = [
    "Hi, this is Maria speaking",
    "Yes, I can help with coverage questions",
    "Thanks, your account is verified",
    "Your plan covers that procedure",
];

// =============================================================================
// Scripted runs
// =============================================================================

#[tokio::test]
async fn coverage_call_reaches_conclusion_in_four_turns() {
    let harness = Harness::templated(ScenarioKind::CoverageInquiry);
    let started = harness.start.handle().await.unwrap();

    let expected = [
        Phase::QueueConfirmation,
        Phase::Authentication,
        Phase::PlanInquiry,
        Phase::Conclusion,
    ];
    let mut last = None;
    for (line, phase) in COVERAGE_SCRIPT.iter().zip(expected) {
        let result = harness.say(&started, line).await;
        assert_eq!(result.outcome.phase, phase, "after {:?}", line);
        assert!(result.outcome.transitioned);
        last = Some(result);
    }

    let last = last.unwrap();
    assert_eq!(
        last.outcome.intent,
        ReplyIntent::conclude(ClosingReason::PlanResolved(PlanStatus::Covered))
    );
    assert!(last.reply.starts_with("That's great news!"));
    assert!(last.reply.contains("Maria"));

    let session = &last.session;
    assert_eq!(session.facts.agent_name.as_deref(), Some("Maria"));
    assert_eq!(session.facts.correct_queue, Some(true));
    assert_eq!(session.facts.authenticated, Some(true));
    assert_eq!(session.facts.member_id.as_deref(), Some("MEM123456789"));
    assert_eq!(session.facts.plan_status, Some(PlanStatus::Covered));

    assert_eq!(session.transcript.len(), 10);
    assert!(session.transcript.is_alternating());
    assert_eq!(session.transcript.turns()[0].speaker(), Speaker::Agent);
    assert_eq!(session.transcript.turns()[9].speaker(), Speaker::Bot);
}

#[tokio::test]
async fn plan_status_call_uses_activity_vocabulary() {
    let harness = Harness::templated(ScenarioKind::PlanStatus);
    let started = harness.start.handle().await.unwrap();
    assert!(started.reply.contains("John Doe"));

    harness.say(&started, "My name is Priya").await;
    let queue = harness.say(&started, "Yes, that's correct").await;
    assert!(queue.reply.contains("AD78902145"));
    let auth = harness.say(&started, "Confirmed, you're verified").await;
    assert_eq!(auth.session.phase, Phase::PlanInquiry);
    assert!(!auth.reply.contains("AD78902145"));

    let last = harness.say(&started, "Your plan is active until December").await;
    assert_eq!(last.session.phase, Phase::Conclusion);
    assert_eq!(last.session.facts.plan_status, Some(PlanStatus::Active));
}

#[tokio::test]
async fn wrong_department_exits_early() {
    let harness = Harness::templated(ScenarioKind::CoverageInquiry);
    let started = harness.start.handle().await.unwrap();

    harness.say(&started, "My name is Maria").await;
    let result = harness
        .say(&started, "No, you need a different department")
        .await;

    assert_eq!(result.session.phase, Phase::Conclusion);
    assert_eq!(
        result.outcome.intent,
        ReplyIntent::conclude(ClosingReason::WrongDepartment)
    );
    assert_eq!(result.session.facts.authenticated, None);
}

#[tokio::test]
async fn turns_after_conclusion_only_say_goodbye() {
    let harness = Harness::templated(ScenarioKind::CoverageInquiry);
    let started = harness.start.handle().await.unwrap();
    for line in COVERAGE_SCRIPT {
        harness.say(&started, line).await;
    }

    let result = harness.say(&started, "Anything else I can do?").await;

    assert_eq!(result.outcome.phase, Phase::Conclusion);
    assert!(!result.outcome.transitioned);
    assert_eq!(result.outcome.intent, ReplyIntent::conclude(ClosingReason::Farewell));
    assert!(result.reply.starts_with("Thank you so much for your help today, Maria!"));
}

#[tokio::test]
async fn unrecognized_answers_get_clarifications() {
    let harness = Harness::templated(ScenarioKind::CoverageInquiry);
    let started = harness.start.handle().await.unwrap();

    let result = harness.say(&started, "Hmm, one moment please").await;

    assert_eq!(result.outcome.phase, Phase::Introduction);
    assert!(!result.outcome.transitioned);
    assert_eq!(result.outcome.intent, ReplyIntent::AskAgentName);
    assert_eq!(result.session.transcript.len(), 4);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn reset_clears_facts_regardless_of_depth() {
    for depth in 0..=COVERAGE_SCRIPT.len() {
        let harness = Harness::templated(ScenarioKind::CoverageInquiry);
        let started = harness.start.handle().await.unwrap();
        for line in &COVERAGE_SCRIPT[..depth] {
            harness.say(&started, line).await;
        }

        let reset = harness.reset.handle(started.session.id).await.unwrap();

        assert_eq!(reset.session.id, started.session.id);
        assert!(reset.session.facts.is_empty(), "depth {}", depth);
        assert_eq!(reset.session.phase, Phase::Introduction);
        assert_eq!(reset.session.transcript.len(), 2);
        assert_eq!(reset.outcome.intent, ReplyIntent::Opening);
    }
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn generated_lines_are_used_for_free_form_intents() {
    let provider = Arc::new(
        MockAIProvider::new()
            .with_response("\"Hi Maria! Is this where I ask about coverage?\"")
            .with_response("Could you tell me if my colonoscopy is covered?"),
    );
    let generator = Arc::new(PromptedUtteranceGenerator::new(provider.clone()));
    let harness = Harness::new(
        ResponseSelector::with_generator(generator, Duration::from_secs(5)),
        ScenarioKind::CoverageInquiry,
    );
    let started = harness.start.handle().await.unwrap();
    assert_eq!(started.outcome.reply_source, ReplySource::Template);

    let queue = harness.say(&started, COVERAGE_SCRIPT[0]).await;
    assert_eq!(queue.outcome.reply_source, ReplySource::Generated);
    assert_eq!(queue.reply, "Hi Maria! Is this where I ask about coverage?");

    let auth = harness.say(&started, COVERAGE_SCRIPT[1]).await;
    assert_eq!(auth.outcome.reply_source, ReplySource::Template);

    let plan = harness.say(&started, COVERAGE_SCRIPT[2]).await;
    assert_eq!(plan.outcome.reply_source, ReplySource::Generated);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn generation_failures_fall_back_to_templates() {
    let provider = Arc::new(
        MockAIProvider::new()
            .with_error(MockError::Unavailable {
                message: "maintenance".to_string(),
            })
            .with_response("   "),
    );
    let generator = Arc::new(PromptedUtteranceGenerator::new(provider));
    let harness = Harness::new(
        ResponseSelector::with_generator(generator, Duration::from_secs(5)),
        ScenarioKind::CoverageInquiry,
    );
    let started = harness.start.handle().await.unwrap();

    let queue = harness.say(&started, COVERAGE_SCRIPT[0]).await;
    assert_eq!(queue.outcome.reply_source, ReplySource::Fallback);
    assert!(queue.reply.starts_with("Nice to meet you, Maria!"));

    harness.say(&started, COVERAGE_SCRIPT[1]).await;
    let plan = harness.say(&started, COVERAGE_SCRIPT[2]).await;
    assert_eq!(plan.outcome.reply_source, ReplySource::Fallback);
    assert!(plan.reply.starts_with("Thank you for verifying my account."));
}

#[tokio::test(start_paused = true)]
async fn slow_generation_times_out_to_template() {
    let provider = Arc::new(
        MockAIProvider::new()
            .with_response("too late")
            .with_delay(Duration::from_secs(30)),
    );
    let generator = Arc::new(PromptedUtteranceGenerator::new(provider));
    let harness = Harness::new(
        ResponseSelector::with_generator(generator, Duration::from_secs(1)),
        ScenarioKind::CoverageInquiry,
    );
    let started = harness.start.handle().await.unwrap();

    let result = harness.say(&started, COVERAGE_SCRIPT[0]).await;

    assert_eq!(result.outcome.reply_source, ReplySource::Fallback);
    assert_eq!(result.session.phase, Phase::QueueConfirmation);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn independent_sessions_run_concurrently() {
    let harness = Arc::new(Harness::templated(ScenarioKind::CoverageInquiry));

    let runs = (0..8).map(|i| {
        let harness = harness.clone();
        async move {
            let started = harness.start.handle().await.unwrap();
            let name = format!("My name is Agent{}", i);
            harness.say(&started, &name).await;
            for line in &COVERAGE_SCRIPT[1..] {
                harness.say(&started, line).await;
            }
            started.session.id
        }
    });
    let ids = join_all(runs).await;

    assert_eq!(harness.store.len().await.unwrap(), 8);
    for (i, id) in ids.iter().enumerate() {
        let handle = harness.store.get(id).await.unwrap().unwrap();
        let session = handle.lock().await;
        assert_eq!(session.phase(), Phase::Conclusion);
        assert_eq!(session.facts().agent_name.as_deref(), Some(format!("Agent{}", i).as_str()));
        assert_eq!(session.transcript().len(), 10);
    }
}

#[tokio::test]
async fn concurrent_turns_on_one_session_are_serialized() {
    let harness = Arc::new(Harness::templated(ScenarioKind::CoverageInquiry));
    let started = harness.start.handle().await.unwrap();

    let turns = (0..5).map(|_| {
        let harness = harness.clone();
        let started = started.clone();
        async move { harness.say(&started, "One moment please").await }
    });
    join_all(turns).await;

    let handle = harness.store.get(&started.session.id).await.unwrap().unwrap();
    let session = handle.lock().await;
    assert_eq!(session.transcript().len(), 12);
    assert!(session.transcript().is_alternating());
}
