//! Toast Notification Component
//!
//! Renders the dashboard's current notice with a dismiss button.

use leptos::*;

use crate::state::global::{GlobalState, Notice, NoticeKind};

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notice = state.notice;

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || notice.get().map(|notice| {
                let state = state.clone();
                view! { <NoticeBanner notice=notice on_dismiss=move || state.dismiss_notice() /> }
            })}
        </div>
    }
}

#[component]
fn NoticeBanner<F>(notice: Notice, on_dismiss: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let (icon, palette) = match notice.kind {
        NoticeKind::Success => ("✓", "bg-green-50 border-green-500 text-green-800"),
        NoticeKind::Error => ("!", "bg-red-50 border-red-500 text-red-800"),
    };

    view! {
        <div
            role="status"
            class=format!(
                "flex items-start space-x-3 border-l-4 {} px-4 py-3 rounded-md shadow-md max-w-sm animate-slide-in",
                palette
            )
        >
            <span class="font-bold">{icon}</span>
            <span class="flex-1 text-sm">{notice.text}</span>
            <button
                on:click=move |_| on_dismiss()
                class="text-sm opacity-60 hover:opacity-100"
                aria-label="Dismiss"
            >
                "×"
            </button>
        </div>
    }
}
