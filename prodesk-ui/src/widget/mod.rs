//! Chat Widget
//!
//! Floating bubble plus chat window, driven by a shared
//! [`Conversation`]. The host page owns the signal so `update` calls from
//! JavaScript show up immediately.

pub mod lead_form;
pub mod message;

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use prodesk::widget::Conversation;

use crate::api;
use crate::state::LocalStore;

use lead_form::LeadCaptureForm;
use message::{MessageBubble, TypingIndicator};

const WINDOW_WIDTH: u32 = 380;
const WINDOW_HEIGHT: u32 = 600;
const BUBBLE_SIZE: u32 = 60;

#[component]
pub fn ChatWidget(conversation: RwSignal<Conversation>) -> impl IntoView {
    let (input, set_input) = create_signal(String::new());

    let theme = create_memo(move |_| conversation.with(|c| c.theme().clone()));
    let primary_color = Signal::derive(move || theme.with(|t| t.primary_color.clone()));
    let is_open = move || conversation.with(Conversation::is_open);

    let send = move || {
        let text = input.get_untracked();
        let Some(Some(outgoing)) =
            conversation.try_update(|c| c.begin_send(&text, &LocalStore))
        else {
            return;
        };
        set_input.set(String::new());

        if let Some(delay) = outgoing.lead_prompt_in {
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            spawn_local(async move {
                TimeoutFuture::new(millis).await;
                conversation.update(|c| {
                    c.show_lead_prompt();
                });
            });
        }

        spawn_local(async move {
            let result = api::send_chat(&outgoing.request)
                .await
                .map(|reply| reply.answer);
            conversation.update(|c| {
                c.complete_send(result);
            });
        });
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    let root_style = move || {
        format!(
            "position: fixed; {} z-index: 999999; font-family: -apple-system, BlinkMacSystemFont, \
             'Segoe UI', Roboto, sans-serif;",
            theme.with(|t| t.position.css_offsets())
        )
    };

    view! {
        <div style=root_style>
            {move || is_open().then(|| view! {
                <div style=format!(
                    "width: {}px; height: {}px; max-height: calc(100vh - 100px); background: #f3f4f6; \
                     border-radius: 16px; box-shadow: 0 10px 40px rgba(0,0,0,0.2); display: flex; \
                     flex-direction: column; overflow: hidden; margin-bottom: 16px;",
                    WINDOW_WIDTH, WINDOW_HEIGHT
                )>
                    // Header
                    <div style=move || format!(
                        "background: {}; color: white; padding: 16px 20px; display: flex; \
                         justify-content: space-between; align-items: center;",
                        theme.with(|t| t.header_gradient())
                    )>
                        <div>
                            <div style="font-weight: 600; font-size: 16px;">"Prodesk Assistant"</div>
                            <div style="font-size: 12px; opacity: 0.9;">"Powered by AI • Online"</div>
                        </div>
                        <button
                            on:click=move |_| conversation.update(Conversation::close)
                            style="background: none; border: none; color: white; font-size: 20px; cursor: pointer;"
                        >
                            "×"
                        </button>
                    </div>

                    // Transcript
                    <div style="flex: 1; overflow-y: auto; padding: 16px;">
                        {move || conversation.with(|c| {
                            c.messages()
                                .iter()
                                .cloned()
                                .map(|message| view! { <MessageBubble message=message primary_color=primary_color /> })
                                .collect_view()
                        })}
                        {move || conversation.with(Conversation::is_waiting).then(|| view! { <TypingIndicator /> })}
                    </div>

                    {move || conversation.with(Conversation::lead_prompt_visible).then(|| view! {
                        <LeadCaptureForm conversation=conversation />
                    })}

                    // Input
                    <div style="display: flex; padding: 12px; background: white; border-top: 1px solid #e5e7eb;">
                        <input
                            type="text"
                            placeholder="Type your message..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=on_keydown
                            style="flex: 1; padding: 10px 14px; border: 1px solid #d1d5db; border-radius: 20px; \
                                   font-size: 14px; outline: none;"
                        />
                        <button
                            on:click=move |_| send()
                            disabled=move || input.with(|text| text.trim().is_empty())
                            style=move || format!(
                                "margin-left: 8px; width: 40px; height: 40px; border: none; border-radius: 50%; \
                                 color: white; cursor: pointer; background: {};",
                                primary_color.get()
                            )
                        >
                            "➤"
                        </button>
                    </div>
                </div>
            })}

            // Bubble
            <button
                on:click=move |_| conversation.update(Conversation::toggle)
                style=move || format!(
                    "width: {0}px; height: {0}px; border-radius: 50%; border: none; cursor: pointer; \
                     color: white; font-size: 26px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); \
                     float: {1}; background: {2};",
                    BUBBLE_SIZE,
                    if theme.with(|t| t.position.as_str() == "bottom-left") { "left" } else { "right" },
                    theme.with(|t| t.header_gradient())
                )
            >
                {move || if is_open() { "×" } else { "💬" }}
            </button>
        </div>
    }
}
