//! Widget Conversation
//!
//! The chat widget's interaction lifecycle as a plain state machine:
//!
//! ```text
//! closed -> open (no messages) -> open (welcome shown) -> conversing
//!        -> [lead prompt shown] -> conversing
//! ```
//!
//! [`Conversation`] performs no IO. Operations hand back the request DTOs to
//! send and the delay to wait before showing the lead prompt; drivers (the
//! terminal [`WidgetHandle`](super::WidgetHandle) and the browser widget)
//! do the network calls and feed the results back in.
//!
//! Overlapping sends are not rejected: each `begin_send` bumps a pending
//! counter and each `complete_send` appends whatever came back, in completion
//! order.

use std::fmt::Display;
use std::time::Duration;

use crate::types::{ChatMessage, ChatRequest, LeadCapture};
use crate::validation::{FormErrors, LeadForm};
use crate::widget::session::SessionId;
use crate::widget::store::{lead_captured, mark_lead_captured, KeyValueStore};
use crate::widget::theme::{Theme, ThemeOverrides};

/// Appended in place of a reply when the chat call fails
pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please try again in a moment.";

/// Appended after a lead was saved
pub const LEAD_THANKS_MESSAGE: &str =
    "Thank you! I've saved your information. How else can I help you?";

/// Blocking notice shown when the lead call fails
pub const LEAD_FAILED_NOTICE: &str = "Failed to save your information. Please try again.";

/// When to offer the lead-capture form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadPromptPolicy {
    /// Number of user-authored messages that arms the prompt
    pub after_user_messages: usize,
    /// Delay between arming and showing
    pub delay: Duration,
}

impl Default for LeadPromptPolicy {
    fn default() -> Self {
        Self {
            after_user_messages: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Lead prompt progress within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadPrompt {
    /// Threshold not reached yet
    Idle,
    /// Armed, waiting out the delay
    Scheduled,
    /// Form visible
    Shown,
    /// Closed by the visitor; not offered again this session
    Dismissed,
    /// Lead saved, or already saved in an earlier session
    Captured,
}

/// Coarse widget phase, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Open,
    Welcomed,
    Conversing,
    LeadPrompt,
}

/// A chat request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub request: ChatRequest,
    /// Set when this message armed the lead prompt
    pub lead_prompt_in: Option<Duration>,
}

/// Result of feeding a lead-capture response back in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOutcome {
    Captured,
    Failed { notice: &'static str },
}

/// In-memory state of one widget mount
#[derive(Debug, Clone)]
pub struct Conversation {
    api_key: String,
    session: SessionId,
    theme: Theme,
    policy: LeadPromptPolicy,
    open: bool,
    messages: Vec<ChatMessage>,
    pending: usize,
    lead_prompt: LeadPrompt,
}

impl Conversation {
    pub fn new(api_key: impl Into<String>, theme: Theme, session: SessionId) -> Self {
        Self {
            api_key: api_key.into(),
            session,
            theme,
            policy: LeadPromptPolicy::default(),
            open: false,
            messages: Vec::new(),
            pending: 0,
            lead_prompt: LeadPrompt::Idle,
        }
    }

    pub fn with_policy(mut self, policy: LeadPromptPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ---- accessors ----

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// At least one chat request is in flight
    pub fn is_waiting(&self) -> bool {
        self.pending > 0
    }

    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    pub fn lead_prompt(&self) -> LeadPrompt {
        self.lead_prompt
    }

    pub fn lead_prompt_visible(&self) -> bool {
        self.lead_prompt == LeadPrompt::Shown
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn phase(&self) -> Phase {
        if !self.open {
            Phase::Closed
        } else if self.lead_prompt_visible() {
            Phase::LeadPrompt
        } else if self.user_message_count() > 0 {
            Phase::Conversing
        } else if !self.messages.is_empty() {
            Phase::Welcomed
        } else {
            Phase::Open
        }
    }

    // ---- open / close ----

    /// Open the window, seeding the welcome message on first open
    pub fn open(&mut self) {
        self.open = true;
        if self.messages.is_empty() {
            self.messages
                .push(ChatMessage::assistant(self.theme.welcome_message.clone()));
        }
    }

    /// Collapse back to the bubble. History is kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    // ---- configuration ----

    pub fn apply_theme(&mut self, overrides: &ThemeOverrides) {
        self.theme.apply(overrides);
    }

    /// Subsequent requests and the lead flag use the new key
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    // ---- chat ----

    /// Append the user's message and build the chat request.
    ///
    /// Blank input is ignored. When this message reaches the prompt threshold
    /// and `store` has no lead flag for the API key, the prompt is armed and
    /// the delay is returned in [`Outgoing::lead_prompt_in`].
    pub fn begin_send<S: KeyValueStore + ?Sized>(
        &mut self,
        input: &str,
        store: &S,
    ) -> Option<Outgoing> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(input));
        self.pending += 1;

        let lead_prompt_in = self.arm_lead_prompt(store);

        Some(Outgoing {
            request: ChatRequest {
                api_key: self.api_key.clone(),
                message: input.to_string(),
                session_id: self.session.to_string(),
            },
            lead_prompt_in,
        })
    }

    /// Append the assistant's answer, or the fallback message on failure
    pub fn complete_send<E: Display>(&mut self, result: Result<String, E>) -> &ChatMessage {
        self.pending = self.pending.saturating_sub(1);

        let message = match result {
            Ok(answer) => ChatMessage::assistant(answer),
            Err(e) => {
                tracing::warn!(session = %self.session, error = %e, "Chat request failed");
                ChatMessage::assistant(CHAT_ERROR_MESSAGE)
            }
        };

        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    fn arm_lead_prompt<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Option<Duration> {
        if self.lead_prompt != LeadPrompt::Idle
            || self.user_message_count() < self.policy.after_user_messages
        {
            return None;
        }

        if lead_captured(store, &self.api_key) {
            self.lead_prompt = LeadPrompt::Captured;
            return None;
        }

        self.lead_prompt = LeadPrompt::Scheduled;
        Some(self.policy.delay)
    }

    // ---- lead capture ----

    /// Show the armed prompt once its delay has elapsed. Returns whether it
    /// became visible.
    pub fn show_lead_prompt(&mut self) -> bool {
        if self.lead_prompt == LeadPrompt::Scheduled {
            self.lead_prompt = LeadPrompt::Shown;
            true
        } else {
            false
        }
    }

    pub fn dismiss_lead_prompt(&mut self) {
        if matches!(self.lead_prompt, LeadPrompt::Scheduled | LeadPrompt::Shown) {
            self.lead_prompt = LeadPrompt::Dismissed;
        }
    }

    /// Validate the form and build the lead-capture request
    pub fn begin_lead_submit(&self, form: &LeadForm) -> Result<LeadCapture, FormErrors> {
        let details = form.validate()?;

        Ok(LeadCapture {
            api_key: self.api_key.clone(),
            session_id: self.session.to_string(),
            name: details.name,
            email: details.email,
            phone: details.phone,
            message: details.message,
        })
    }

    /// Record the lead-capture response.
    ///
    /// On success the lead flag is written, the prompt is retired and a
    /// thank-you message is appended. On failure the prompt stays up.
    pub fn complete_lead_submit<S, E>(&mut self, result: Result<(), E>, store: &mut S) -> LeadOutcome
    where
        S: KeyValueStore + ?Sized,
        E: Display,
    {
        match result {
            Ok(()) => {
                if let Err(e) = mark_lead_captured(store, &self.api_key) {
                    tracing::warn!(error = %e, "Failed to persist lead flag");
                }
                self.lead_prompt = LeadPrompt::Captured;
                self.messages.push(ChatMessage::assistant(LEAD_THANKS_MESSAGE));
                LeadOutcome::Captured
            }
            Err(e) => {
                tracing::error!(session = %self.session, error = %e, "Lead capture failed");
                LeadOutcome::Failed {
                    notice: LEAD_FAILED_NOTICE,
                }
            }
        }
    }
}
