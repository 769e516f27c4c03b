//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use prodesk::dashboard::ClientOverview;
use prodesk::types::Client;

/// Kind of dashboard notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// How long the notice stays up before clearing itself
    pub fn lifetime_ms(self) -> u32 {
        match self {
            NoticeKind::Success => 3000,
            NoticeKind::Error => 5000,
        }
    }
}

/// One toast. `seq` tells a notice apart from a later one with the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Tenants as last loaded from the API
    pub clients: RwSignal<Vec<Client>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Current toast, newest wins
    pub notice: RwSignal<Option<Notice>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        clients: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        notice: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Total/active counts of the loaded tenants
    pub fn overview(&self) -> ClientOverview {
        self.clients.with(|clients| ClientOverview::from_clients(clients))
    }

    /// Reload the tenant list, reporting failures as a toast
    pub fn reload_clients(&self) {
        let state = self.clone();
        state.loading.set(true);

        spawn_local(async move {
            match crate::api::fetch_clients().await {
                Ok(clients) => state.clients.set(clients),
                Err(e) => state.show_error(&format!("Failed to load clients: {}", e)),
            }
            state.loading.set(false);
        });
    }

    pub fn show_success(&self, message: &str) {
        self.show(NoticeKind::Success, message);
    }

    pub fn show_error(&self, message: &str) {
        self.show(NoticeKind::Error, message);
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Replace the current toast and clear it after its lifetime, unless a
    /// newer one has taken its place by then
    fn show(&self, kind: NoticeKind, message: &str) {
        let seq = next_seq(self.notice.get_untracked().as_ref());
        self.notice.set(Some(Notice {
            seq,
            kind,
            text: message.to_string(),
        }));

        let notice = self.notice;
        gloo_timers::callback::Timeout::new(kind.lifetime_ms(), move || {
            if notice.get_untracked().is_some_and(|current| current.seq == seq) {
                notice.set(None);
            }
        }).forget();
    }
}

fn next_seq(current: Option<&Notice>) -> u32 {
    current.map_or(0, |notice| notice.seq.wrapping_add(1))
}
