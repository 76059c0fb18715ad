use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kql_assist_backend::{BackendError, QueryExecutor};
use kql_assist_core::{AgentOutput, AssistantMessage, ChatReply, Credentials, SessionState};
use kql_assist_llm::{LlmError, QueryGenerator};
use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::{ConversationConfig, ConversationService, InMemorySessionStore, ServiceError};

type Events = Arc<Mutex<Vec<String>>>;

struct MockGenerator {
    events: Events,
    response: Result<String, u16>,
}

#[async_trait]
impl QueryGenerator for MockGenerator {
    async fn generate(&self, question: &str) -> Result<AgentOutput, LlmError> {
        self.events.lock().unwrap().push(format!("generate:{question}"));
        match &self.response {
            Ok(content) => Ok(AgentOutput::Message(AssistantMessage::new(content.clone()))),
            Err(code) => Err(LlmError::HttpStatus { code: *code, body: "llm down".to_owned() }),
        }
    }
}

/// Blocks inside `generate` until released, to hold a user's lock open.
struct GatedGenerator {
    events: Events,
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl QueryGenerator for GatedGenerator {
    async fn generate(&self, question: &str) -> Result<AgentOutput, LlmError> {
        self.events.lock().unwrap().push(format!("generate:{question}"));
        self.started.notify_one();
        self.release.notified().await;
        Ok(AgentOutput::Raw("requests | take 1".to_owned()))
    }
}

struct MockExecutor {
    events: Events,
    response: Result<Value, (u16, String)>,
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn execute(&self, kql: &str, credentials: &Credentials) -> Result<Value, BackendError> {
        self.events.lock().unwrap().push(format!("execute:{}:{kql}", credentials.app_id));
        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err((code, body)) => Err(BackendError::Status { code: *code, body: body.clone() }),
        }
    }
}

fn config() -> ConversationConfig {
    ConversationConfig::new(Credentials::new("app-1", "key-1"))
}

fn build(
    llm_response: Result<String, u16>,
    backend_response: Result<Value, (u16, String)>,
    config: ConversationConfig,
) -> (ConversationService, Events) {
    let events: Events = Arc::default();
    let generator = Arc::new(MockGenerator { events: Arc::clone(&events), response: llm_response });
    let executor =
        Arc::new(MockExecutor { events: Arc::clone(&events), response: backend_response });
    let service =
        ConversationService::new(generator, executor, Arc::new(InMemorySessionStore::new()), config);
    (service, events)
}

fn default_service() -> (ConversationService, Events) {
    build(
        Ok("```kql\nrequests | take 10\n```".to_owned()),
        Ok(json!({"tables": [{"name": "PrimaryResult", "rows": [[1]]}]})),
        config(),
    )
}

fn events_of(events: &Events) -> Vec<String> {
    events.lock().unwrap().clone()
}

#[tokio::test]
async fn test_question_produces_extracted_candidate() {
    let (service, events) = default_service();

    let reply = service.handle_message("u1", "show me 10 requests").await.unwrap();
    assert_eq!(reply, ChatReply::Candidate { kql: "requests | take 10".to_owned() });

    let state = service.session("u1").await;
    assert_eq!(state.pending().map(|p| p.kql_text.as_str()), Some("requests | take 10"));
    assert_eq!(events_of(&events), vec!["generate:show me 10 requests"]);
}

#[tokio::test]
async fn test_question_then_yes_generates_then_executes_once() {
    let (service, events) = default_service();

    service.handle_message("u1", "show me 10 requests").await.unwrap();
    let reply = service.handle_message("u1", "yes").await.unwrap();

    assert_eq!(
        reply,
        ChatReply::Results { payload: json!({"tables": [{"name": "PrimaryResult", "rows": [[1]]}]}) }
    );
    assert_eq!(
        events_of(&events),
        vec!["generate:show me 10 requests", "execute:app-1:requests | take 10"]
    );
    assert_eq!(service.session("u1").await, SessionState::Idle);
}

#[tokio::test]
async fn test_question_then_no_never_executes() {
    let (service, events) = default_service();

    service.handle_message("u1", "show me 10 requests").await.unwrap();
    let reply = service.handle_message("u1", "no").await.unwrap();

    assert_eq!(reply, ChatReply::Rejected);
    assert!(events_of(&events).iter().all(|e| !e.starts_with("execute:")));
    assert_eq!(service.session("u1").await, SessionState::Idle);
    assert_eq!(service.pending_count().await, 0);
}

#[tokio::test]
async fn test_confirmation_words_are_case_and_whitespace_insensitive() {
    for answer in ["yes", "YES", "  Yes\n", "y", "Y "] {
        let (service, events) = default_service();
        service.handle_message("u1", "q").await.unwrap();
        let reply = service.handle_message("u1", answer).await.unwrap();
        assert!(matches!(reply, ChatReply::Results { .. }), "answer {answer:?}");
        assert_eq!(events_of(&events).len(), 2);
    }
}

#[tokio::test]
async fn test_anything_else_is_a_rejection() {
    for answer in ["yes please", "yep", "ok", "", "n"] {
        let (service, events) = default_service();
        service.handle_message("u1", "q").await.unwrap();
        let reply = service.handle_message("u1", answer).await.unwrap();
        assert_eq!(reply, ChatReply::Rejected, "answer {answer:?}");
        assert_eq!(events_of(&events), vec!["generate:q"]);
    }
}

#[tokio::test]
async fn test_backend_error_is_surfaced_and_state_cleared() {
    let (service, events) = build(
        Ok("requests | take 1".to_owned()),
        Err((403, "forbidden".to_owned())),
        config(),
    );

    service.handle_message("u1", "q").await.unwrap();
    let reply = service.handle_message("u1", "y").await.unwrap();

    assert_eq!(reply, ChatReply::Error { detail: "forbidden".to_owned() });
    assert_eq!(reply.to_string(), "Error: forbidden");
    assert_eq!(events_of(&events).len(), 2);
    assert_eq!(service.session("u1").await, SessionState::Idle);
}

#[tokio::test]
async fn test_new_question_during_confirmation_is_discarded() {
    let (service, events) = default_service();

    service.handle_message("u1", "first question").await.unwrap();
    let reply = service.handle_message("u1", "second question").await.unwrap();
    assert_eq!(reply, ChatReply::Rejected);
    assert_eq!(events_of(&events), vec!["generate:first question"]);

    let reply = service.handle_message("u1", "third question").await.unwrap();
    assert!(matches!(reply, ChatReply::Candidate { .. }));
    assert_eq!(events_of(&events), vec!["generate:first question", "generate:third question"]);
}

#[tokio::test]
async fn test_reprocess_rejected_treats_input_as_new_question() {
    let (service, events) = build(
        Ok("traces | take 5".to_owned()),
        Ok(json!({})),
        config().with_reprocess_rejected(true),
    );

    service.handle_message("u1", "first question").await.unwrap();
    let reply = service.handle_message("u1", "second question").await.unwrap();

    assert_eq!(reply, ChatReply::Candidate { kql: "traces | take 5".to_owned() });
    assert_eq!(events_of(&events), vec!["generate:first question", "generate:second question"]);
    assert!(service.session("u1").await.is_awaiting_confirmation());

    // A blank answer still just rejects.
    let reply = service.handle_message("u1", "   ").await.unwrap();
    assert_eq!(reply, ChatReply::Rejected);
    assert_eq!(service.session("u1").await, SessionState::Idle);
}

#[tokio::test]
async fn test_generation_failure_leaves_user_idle() {
    let (service, events) = build(Err(401), Ok(json!({})), config());

    let err = service.handle_message("u1", "q").await.unwrap_err();
    assert!(matches!(err, ServiceError::Llm(_)));
    assert_eq!(service.session("u1").await, SessionState::Idle);
    assert_eq!(events_of(&events), vec!["generate:q"]);
}

#[tokio::test]
async fn test_blank_input_is_rejected_before_generation() {
    let (service, events) = default_service();

    let err = service.handle_message("  ", "q").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    let err = service.handle_message("u1", " \n ").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(events_of(&events).is_empty());
}

#[tokio::test]
async fn test_users_have_independent_state() {
    let (service, events) = default_service();

    service.handle_message("alice", "q1").await.unwrap();
    let reply = service.handle_message("bob", "yes").await.unwrap();

    // Bob was idle, so his "yes" is a question.
    assert!(matches!(reply, ChatReply::Candidate { .. }));
    assert_eq!(events_of(&events), vec!["generate:q1", "generate:yes"]);
    assert_eq!(service.pending_count().await, 2);

    assert!(service.reset("alice").await);
    assert!(!service.reset("alice").await);
    assert_eq!(service.pending_count().await, 1);
}

#[tokio::test]
async fn test_same_user_messages_are_serialized() {
    let events: Events = Arc::default();
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let generator = Arc::new(GatedGenerator {
        events: Arc::clone(&events),
        started: Arc::clone(&started),
        release: Arc::clone(&release),
    });
    let executor = Arc::new(MockExecutor { events: Arc::clone(&events), response: Ok(json!({})) });
    let service = Arc::new(ConversationService::new(
        generator,
        executor,
        Arc::new(InMemorySessionStore::new()),
        config(),
    ));

    let first = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.handle_message("u1", "question one").await })
    };
    started.notified().await;

    let second = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.handle_message("u1", "question two").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!second.is_finished());

    release.notify_one();
    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert!(matches!(first, ChatReply::Candidate { .. }));
    // The second message saw the pending query and was read as an answer.
    assert_eq!(second, ChatReply::Rejected);
    assert_eq!(events_of(&events), vec!["generate:question one"]);
}

#[tokio::test]
async fn test_returned_session_belongs_to_its_own_transition() {
    let events: Events = Arc::default();
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let generator = Arc::new(GatedGenerator {
        events: Arc::clone(&events),
        started: Arc::clone(&started),
        release: Arc::clone(&release),
    });
    let executor = Arc::new(MockExecutor { events: Arc::clone(&events), response: Ok(json!({})) });
    let service = Arc::new(ConversationService::new(
        generator,
        executor,
        Arc::new(InMemorySessionStore::new()),
        config(),
    ));

    let first = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.handle_message_with_session("u1", "question").await })
    };
    started.notified().await;

    let second = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.handle_message_with_session("u1", "no").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    release.notify_one();
    let (first_reply, first_session) = first.await.unwrap().unwrap();
    let (second_reply, second_session) = second.await.unwrap().unwrap();

    assert!(matches!(first_reply, ChatReply::Candidate { .. }));
    assert!(first_session.is_awaiting_confirmation());
    assert_eq!(second_reply, ChatReply::Rejected);
    assert_eq!(second_session, SessionState::Idle);
}

#[tokio::test]
async fn test_failed_message_returns_no_session() {
    let (service, _events) = build(Err(500), Ok(json!({})), config());
    assert!(service.handle_message_with_session("u1", "q").await.is_err());
    assert_eq!(service.session("u1").await, SessionState::Idle);
}

#[tokio::test]
async fn test_other_users_are_not_blocked() {
    let events: Events = Arc::default();
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let gated = Arc::new(GatedGenerator {
        events: Arc::clone(&events),
        started: Arc::clone(&started),
        release: Arc::clone(&release),
    });
    let executor = Arc::new(MockExecutor { events: Arc::clone(&events), response: Ok(json!({})) });
    let service = Arc::new(ConversationService::new(
        gated,
        executor,
        Arc::new(InMemorySessionStore::new()),
        config(),
    ));

    let blocked = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.handle_message("slow", "question").await })
    };
    started.notified().await;

    let reset = tokio::time::timeout(Duration::from_secs(1), service.reset("fast")).await;
    assert_eq!(reset.ok(), Some(false));

    release.notify_one();
    assert!(matches!(blocked.await.unwrap().unwrap(), ChatReply::Candidate { .. }));
}
