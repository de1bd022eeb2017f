//! The assistant session: an in-memory transcript plus one completion
//! exchange per user utterance.
//!
//! `Idle → Sending → Idle`. There is no error state: a failed exchange
//! appends one assistant message describing the failure. Several sends may
//! be in flight at once; replies land in completion order.

use crate::context::{ContextAssembler, PERSONA};
use mindnest_core::completion::CompletionClient;
use mindnest_core::message::ConversationMessage;
use mindnest_records::Records;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Whether any exchange is awaiting the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// A conversation with the companion. The transcript is never persisted.
pub struct AssistantSession {
    records: Records,
    client: Arc<dyn CompletionClient>,
    transcript: Mutex<Vec<ConversationMessage>>,
    in_flight: AtomicUsize,
}

impl AssistantSession {
    pub fn new(records: Records, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            records,
            client,
            transcript: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Send one utterance and append the reply.
    ///
    /// A blank utterance is ignored. Otherwise the user message is appended
    /// immediately, the history is re-read and assembled, and exactly one
    /// assistant message follows: the model's reply or a failure
    /// description. Returns that assistant message.
    pub async fn send(&self, utterance: &str) -> Option<ConversationMessage> {
        if utterance.trim().is_empty() {
            debug!("Ignoring blank utterance");
            return None;
        }

        self.push(ConversationMessage::user(utterance));
        let _sending = InFlight::enter(&self.in_flight);

        let moods = self.records.moods().all().await;
        let journal = self.records.journal().all().await;
        let context = ContextAssembler::assemble(&moods, &journal);
        debug!(
            mood_entries = moods.len(),
            journal_entries = journal.len(),
            estimated_tokens = context.estimated_tokens,
            "Assembled history context"
        );

        let instructions = [PERSONA.to_string(), context.text];
        let reply = match self.client.complete(&instructions, utterance).await {
            Ok(text) => {
                info!(client = self.client.name(), "Assistant replied");
                ConversationMessage::assistant(text)
            }
            Err(e) => {
                warn!(client = self.client.name(), error = %e, "Completion failed");
                ConversationMessage::assistant(e.to_string())
            }
        };

        self.push(reply.clone());
        Some(reply)
    }

    /// A snapshot of the transcript.
    pub fn transcript(&self) -> Vec<ConversationMessage> {
        self.lock().clone()
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            SessionState::Idle
        } else {
            SessionState::Sending
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == SessionState::Idle
    }

    fn push(&self, message: ConversationMessage) {
        self.lock().push(message);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ConversationMessage>> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts one exchange as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindnest_core::error::CompletionError;
    use mindnest_core::message::Role;
    use mindnest_core::record::{JournalEntry, Mood, MoodEntry};
    use mindnest_storage::InMemoryStore;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    /// Echoes the utterance and records every request it sees.
    #[derive(Default)]
    struct ScriptedClient {
        requests: Mutex<Vec<(Vec<String>, String)>>,
    }

    impl ScriptedClient {
        fn requests(&self) -> Vec<(Vec<String>, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            system_instructions: &[String],
            user_utterance: &str,
        ) -> Result<String, CompletionError> {
            self.requests
                .lock()
                .unwrap()
                .push((system_instructions.to_vec(), user_utterance.to_string()));
            Ok(format!("echo: {user_utterance}"))
        }
    }

    /// Always fails with the given error.
    struct FailingClient(CompletionError);

    #[async_trait]
    impl CompletionClient for FailingClient {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _: &[String], _: &str) -> Result<String, CompletionError> {
            Err(self.0.clone())
        }
    }

    /// Holds every call until released.
    struct BlockingClient {
        entered: Notify,
        release: Notify,
        started: AtomicBool,
    }

    #[async_trait]
    impl CompletionClient for BlockingClient {
        fn name(&self) -> &str {
            "blocking"
        }

        async fn complete(&self, _: &[String], user_utterance: &str) -> Result<String, CompletionError> {
            self.started.store(true, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(format!("late reply to {user_utterance}"))
        }
    }

    /// Holds each utterance until that utterance is released.
    struct GatedClient {
        gates: HashMap<String, Notify>,
        entered: AtomicUsize,
        entered_signal: Notify,
    }

    impl GatedClient {
        fn new(utterances: &[&str]) -> Self {
            Self {
                gates: utterances.iter().map(|u| (u.to_string(), Notify::new())).collect(),
                entered: AtomicUsize::new(0),
                entered_signal: Notify::new(),
            }
        }

        async fn wait_for_entered(&self, count: usize) {
            while self.entered.load(Ordering::SeqCst) < count {
                self.entered_signal.notified().await;
            }
        }

        fn release(&self, utterance: &str) {
            self.gates[utterance].notify_one();
        }
    }

    #[async_trait]
    impl CompletionClient for GatedClient {
        fn name(&self) -> &str {
            "gated"
        }

        async fn complete(&self, _: &[String], user_utterance: &str) -> Result<String, CompletionError> {
            self.entered.fetch_add(1, Ordering::SeqCst);
            self.entered_signal.notify_one();
            self.gates[user_utterance].notified().await;
            Ok(format!("reply to {user_utterance}"))
        }
    }

    fn records() -> Records {
        Records::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn blank_utterance_is_a_no_op() {
        let client = Arc::new(ScriptedClient::default());
        let session = AssistantSession::new(records(), client.clone());

        assert!(session.send("").await.is_none());
        assert!(session.send("   \n\t").await.is_none());

        assert!(session.transcript().is_empty());
        assert!(client.requests().is_empty());
        assert!(session.is_idle());
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_then_assistant() {
        let session = AssistantSession::new(records(), Arc::new(ScriptedClient::default()));

        let reply = session.send("How have I been?").await.unwrap();
        assert_eq!(reply.content, "echo: How have I been?");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ConversationMessage::user("How have I been?"));
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn request_carries_persona_then_history() {
        let records = records();
        records
            .moods()
            .append(MoodEntry::record(Some(Mood::Moody), "tired").unwrap())
            .await
            .unwrap();
        let client = Arc::new(ScriptedClient::default());
        let session = AssistantSession::new(records, client.clone());

        session.send("hi").await;

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let (instructions, utterance) = &requests[0];
        assert_eq!(utterance, "hi");
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0], PERSONA);
        assert!(instructions[1].contains("Mood: 😕, Note: tired"));
        assert!(instructions[1].contains("No journal entries yet."));
    }

    #[tokio::test]
    async fn context_reflects_entries_saved_mid_session() {
        let records = records();
        let client = Arc::new(ScriptedClient::default());
        let session = AssistantSession::new(records.clone(), client.clone());

        session.send("first").await;
        records
            .journal()
            .append(JournalEntry::write("Went hiking today").unwrap())
            .await
            .unwrap();
        session.send("second").await;

        let requests = client.requests();
        assert!(requests[0].0[1].contains("No journal entries yet."));
        assert!(requests[1].0[1].contains("\"Went hiking today\""));
    }

    #[tokio::test]
    async fn failure_becomes_one_assistant_message() {
        let session = AssistantSession::new(
            records(),
            Arc::new(FailingClient(CompletionError::Api {
                status_code: 500,
                message: "Request failed with status code 500".into(),
            })),
        );

        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Request failed with status code 500");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.iter().filter(|m| !m.is_user()).count(), 1);
        assert!(session.is_idle());

        // The session keeps accepting sends after a failure.
        let reply = session.send("still there?").await.unwrap();
        assert_eq!(reply.content, "Request failed with status code 500");
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[2], ConversationMessage::user("still there?"));
        assert_eq!(transcript[3].role, Role::Assistant);
        assert!(session.is_idle());
    }

    #[tokio::test]
    async fn missing_content_shows_placeholder() {
        let session = AssistantSession::new(
            records(),
            Arc::new(FailingClient(CompletionError::EmptyResponse)),
        );

        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply.content, "Something went wrong!");
    }

    #[tokio::test]
    async fn sending_while_awaiting_reply() {
        let client = Arc::new(BlockingClient {
            entered: Notify::new(),
            release: Notify::new(),
            started: AtomicBool::new(false),
        });
        let session = Arc::new(AssistantSession::new(records(), client.clone()));

        let task = {
            let session = session.clone();
            tokio::spawn(async move { session.send("are you there?").await })
        };

        client.entered.notified().await;
        assert!(client.started.load(Ordering::SeqCst));
        assert_eq!(session.state(), SessionState::Sending);
        assert_eq!(session.transcript(), vec![ConversationMessage::user("are you there?")]);

        client.release.notify_one();
        let reply = task.await.unwrap().unwrap();
        assert_eq!(reply.content, "late reply to are you there?");
        assert!(session.is_idle());
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn overlapping_sends_reply_in_completion_order() {
        let client = Arc::new(GatedClient::new(&["hello", "again"]));
        let session = Arc::new(AssistantSession::new(records(), client.clone()));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.send("hello").await })
        };
        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.send("again").await })
        };

        client.wait_for_entered(2).await;
        assert_eq!(session.state(), SessionState::Sending);
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert!(transcript.iter().all(ConversationMessage::is_user));

        client.release("again");
        let reply = second.await.unwrap().unwrap();
        assert_eq!(reply.content, "reply to again");
        assert_eq!(session.state(), SessionState::Sending);
        assert_eq!(session.transcript().len(), 3);

        client.release("hello");
        let reply = first.await.unwrap().unwrap();
        assert_eq!(reply.content, "reply to hello");
        assert!(session.is_idle());

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        for utterance in ["hello", "again"] {
            let users = transcript
                .iter()
                .filter(|m| m.is_user() && m.content == utterance)
                .count();
            let replies = transcript
                .iter()
                .filter(|m| !m.is_user() && m.content == format!("reply to {utterance}"))
                .count();
            assert_eq!((users, replies), (1, 1), "{utterance}");
        }
        assert_eq!(transcript[2].content, "reply to again");
        assert_eq!(transcript[3].content, "reply to hello");
    }
}
