//! Widget Handle
//!
//! A mounted widget: one [`Conversation`] wired to a [`ChatBackend`] and a
//! [`KeyValueStore`]. Created by [`WidgetHandle::init`], reconfigured with
//! [`WidgetHandle::update`] and torn down with [`WidgetHandle::destroy`].
//! Each handle owns its own session; there is no global widget.

use async_trait::async_trait;
use std::time::Duration;

use super::conversation::{Conversation, LeadOutcome, LeadPromptPolicy};
use super::session::SessionId;
use super::store::KeyValueStore;
use super::{ConfigUpdate, InitConfig, WidgetError};
use crate::client::ClientError;
use crate::types::{ChatMessage, ChatReply, ChatRequest, Lead, LeadCapture};
use crate::validation::LeadForm;

/// The two backend calls the widget makes
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    async fn capture_lead(&self, capture: &LeadCapture) -> Result<Lead, ClientError>;
}

/// What a completed send produced
#[derive(Debug, Clone, PartialEq)]
pub struct SendReport {
    /// Assistant reply, or the fallback message when the call failed
    pub reply: ChatMessage,
    /// Wait this long, then call [`WidgetHandle::show_lead_prompt`]
    pub lead_prompt_in: Option<Duration>,
}

/// A live widget instance
pub struct WidgetHandle<B, S> {
    conversation: Conversation,
    backend: B,
    store: S,
}

impl<B: ChatBackend, S: KeyValueStore> WidgetHandle<B, S> {
    /// Mount a widget. Fails without an API key.
    pub fn init(config: InitConfig, backend: B, store: S) -> Result<Self, WidgetError> {
        config.validate()?;

        let session = SessionId::generate();
        tracing::info!(session = %session, "Prodesk widget initialized");

        Ok(Self {
            conversation: Conversation::new(config.api_key.clone(), config.resolved_theme(), session),
            backend,
            store,
        })
    }

    pub fn with_policy(mut self, policy: LeadPromptPolicy) -> Self {
        self.conversation = self.conversation.with_policy(policy);
        self
    }

    /// Apply a partial config. History and session are kept.
    pub fn update(&mut self, update: &ConfigUpdate) {
        update.apply_to(&mut self.conversation);
        tracing::info!(session = %self.conversation.session(), "Prodesk widget updated");
    }

    /// Unmount, dropping the in-memory history. Returns the store so a
    /// later mount can reuse it.
    pub fn destroy(self) -> S {
        tracing::info!(session = %self.conversation.session(), "Prodesk widget destroyed");
        self.store
    }

    pub fn open(&mut self) {
        self.conversation.open();
    }

    pub fn close(&mut self) {
        self.conversation.close();
    }

    pub fn toggle(&mut self) {
        self.conversation.toggle();
    }

    /// Send a visitor message and wait for the reply. Returns `None` for
    /// blank input.
    pub async fn send(&mut self, input: &str) -> Option<SendReport> {
        let outgoing = self.conversation.begin_send(input, &self.store)?;

        let result = self
            .backend
            .send_message(&outgoing.request)
            .await
            .map(|reply| reply.answer);
        let reply = self.conversation.complete_send(result).clone();

        Some(SendReport {
            reply,
            lead_prompt_in: outgoing.lead_prompt_in,
        })
    }

    pub fn show_lead_prompt(&mut self) -> bool {
        self.conversation.show_lead_prompt()
    }

    pub fn dismiss_lead_prompt(&mut self) {
        self.conversation.dismiss_lead_prompt();
    }

    /// Validate and submit the lead form. Validation failures are returned
    /// without contacting the backend.
    pub async fn submit_lead(&mut self, form: &LeadForm) -> Result<LeadOutcome, WidgetError> {
        let capture = self.conversation.begin_lead_submit(form)?;

        let result = self.backend.capture_lead(&capture).await.map(|lead| {
            tracing::info!(lead_id = %lead.id, "Lead captured");
        });

        Ok(self.conversation.complete_lead_submit(result, &mut self.store))
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::conversation::{LeadPrompt, CHAT_ERROR_MESSAGE, LEAD_FAILED_NOTICE};
    use crate::widget::store::{lead_captured, MemoryStore};
    use crate::widget::Phase;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        chats: Mutex<Vec<ChatRequest>>,
        leads: AtomicUsize,
        fail_chat: AtomicBool,
        fail_lead: AtomicBool,
    }

    #[async_trait]
    impl ChatBackend for FakeBackend {
        async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
            self.chats.lock().unwrap().push(request.clone());
            if self.fail_chat.load(Ordering::SeqCst) {
                return Err(ClientError::Unavailable);
            }
            Ok(ChatReply {
                answer: format!("echo: {}", request.message),
                sources: Vec::new(),
                session_id: Some(request.session_id.clone()),
            })
        }

        async fn capture_lead(&self, capture: &LeadCapture) -> Result<Lead, ClientError> {
            self.leads.fetch_add(1, Ordering::SeqCst);
            if self.fail_lead.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(Lead {
                id: "lead_1".to_string(),
                client_id: None,
                session_id: capture.session_id.clone(),
                name: capture.name.clone(),
                email: capture.email.clone(),
                phone: capture.phone.clone(),
                message: capture.message.clone(),
                created_at: chrono::Utc::now(),
            })
        }
    }

    fn handle() -> WidgetHandle<FakeBackend, MemoryStore> {
        WidgetHandle::init(InitConfig::new("pk_test"), FakeBackend::default(), MemoryStore::new())
            .unwrap()
    }

    fn jane() -> LeadForm {
        LeadForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_requires_api_key() {
        let result =
            WidgetHandle::init(InitConfig::default(), FakeBackend::default(), MemoryStore::new());
        assert!(matches!(result, Err(WidgetError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_send_round_trip() {
        let mut widget = handle();
        widget.open();

        let report = widget.send("Do you ship to Canada?").await.unwrap();
        assert_eq!(report.reply.content, "echo: Do you ship to Canada?");
        assert!(report.lead_prompt_in.is_none());

        let chats = widget.backend.chats.lock().unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].api_key, "pk_test");
        assert_eq!(chats[0].session_id, widget.conversation().session().as_str());
    }

    #[tokio::test]
    async fn test_blank_send_skips_backend() {
        let mut widget = handle();
        widget.open();

        assert!(widget.send("  ").await.is_none());
        assert!(widget.backend.chats.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_uses_fallback() {
        let mut widget = handle();
        widget.backend.fail_chat.store(true, Ordering::SeqCst);
        widget.open();

        let report = widget.send("Hello").await.unwrap();
        assert_eq!(report.reply.content, CHAT_ERROR_MESSAGE);
        assert!(!widget.conversation().is_waiting());
    }

    #[tokio::test]
    async fn test_lead_flow() {
        let mut widget = handle();
        widget.open();

        widget.send("one").await;
        widget.send("two").await;
        let third = widget.send("three").await.unwrap();
        assert_eq!(third.lead_prompt_in, Some(Duration::from_millis(1000)));

        assert!(widget.show_lead_prompt());
        assert_eq!(widget.conversation().phase(), Phase::LeadPrompt);

        let outcome = widget.submit_lead(&jane()).await.unwrap();
        assert_eq!(outcome, LeadOutcome::Captured);
        assert_eq!(widget.backend.leads.load(Ordering::SeqCst), 1);
        assert!(lead_captured(widget.store(), "pk_test"));

        // Same store, new mount: the prompt never comes back
        let store = widget.destroy();
        let mut again = WidgetHandle::init(InitConfig::new("pk_test"), FakeBackend::default(), store)
            .unwrap();
        again.open();
        for text in ["a", "b", "c", "d"] {
            assert!(again.send(text).await.unwrap().lead_prompt_in.is_none());
        }
        assert_eq!(again.conversation().lead_prompt(), LeadPrompt::Captured);
    }

    #[tokio::test]
    async fn test_lead_validation_skips_backend() {
        let mut widget = handle();
        let form = LeadForm {
            name: "Jane".to_string(),
            email: "not-an-email".to_string(),
            ..Default::default()
        };

        let result = widget.submit_lead(&form).await;
        assert!(matches!(result, Err(WidgetError::Validation(_))));
        assert_eq!(widget.backend.leads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lead_failure_reports_notice() {
        let mut widget = handle();
        widget.backend.fail_lead.store(true, Ordering::SeqCst);

        let outcome = widget.submit_lead(&jane()).await.unwrap();
        assert_eq!(
            outcome,
            LeadOutcome::Failed {
                notice: LEAD_FAILED_NOTICE
            }
        );
        assert!(!lead_captured(widget.store(), "pk_test"));
    }

    #[tokio::test]
    async fn test_update_switches_key() {
        let mut widget = handle();
        widget.open();
        widget.send("before").await;

        widget.update(&ConfigUpdate {
            api_key: Some("pk_other".to_string()),
            ..Default::default()
        });
        widget.send("after").await;

        let chats = widget.backend.chats.lock().unwrap();
        assert_eq!(chats[0].api_key, "pk_test");
        assert_eq!(chats[1].api_key, "pk_other");
        assert_eq!(chats[0].session_id, chats[1].session_id);
    }
}
