//! Chat Bubbles

use leptos::*;

use prodesk::types::ChatMessage;

#[component]
pub fn MessageBubble(
    message: ChatMessage,
    #[prop(into)]
    primary_color: Signal<String>,
) -> impl IntoView {
    let is_user = message.is_user();
    let row_style = if is_user {
        "display: flex; justify-content: flex-end; margin-bottom: 12px;"
    } else {
        "display: flex; justify-content: flex-start; margin-bottom: 12px;"
    };

    let bubble_style = move || {
        if is_user {
            format!(
                "max-width: 75%; padding: 10px 14px; border-radius: 16px 16px 4px 16px; \
                 background: {}; color: white;",
                primary_color.get()
            )
        } else {
            "max-width: 75%; padding: 10px 14px; border-radius: 16px 16px 16px 4px; \
             background: white; color: #1f2937; box-shadow: 0 1px 2px rgba(0,0,0,0.08);"
                .to_string()
        }
    };

    view! {
        <div style=row_style>
            <div style=bubble_style>
                <div style="white-space: pre-wrap; word-wrap: break-word;">{message.content.clone()}</div>
                <div style="font-size: 11px; opacity: 0.7; margin-top: 4px;">{message.clock_time()}</div>
            </div>
        </div>
    }
}

/// Three dots shown while a reply is pending
#[component]
pub fn TypingIndicator() -> impl IntoView {
    let dot = "width: 8px; height: 8px; border-radius: 50%; background: #9ca3af; \
               display: inline-block; margin-right: 4px; animation: prodesk-typing 1.4s infinite;";

    view! {
        <div style="display: flex; justify-content: flex-start; margin-bottom: 12px;">
            <div style="padding: 12px 16px; border-radius: 16px; background: white;">
                <span style=dot />
                <span style=format!("{} animation-delay: 0.2s;", dot) />
                <span style=format!("{} animation-delay: 0.4s;", dot) />
            </div>
        </div>
    }
}
