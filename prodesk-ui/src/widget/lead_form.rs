//! Lead Capture Form
//!
//! Shown inside the chat window once the prompt fires.

use leptos::*;

use prodesk::validation::{FormErrors, LeadForm};
use prodesk::widget::{Conversation, LeadOutcome};

use crate::api;
use crate::dom;
use crate::state::LocalStore;

#[component]
pub fn LeadCaptureForm(conversation: RwSignal<Conversation>) -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (phone, set_phone) = create_signal(String::new());
    let (message, set_message) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let primary_color = move || conversation.with(|c| c.theme().primary_color.clone());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let form = LeadForm {
            name: name.get(),
            email: email.get(),
            phone: phone.get(),
            message: message.get(),
        };

        let capture = match conversation.with_untracked(|c| c.begin_lead_submit(&form)) {
            Ok(capture) => capture,
            Err(e) => {
                set_errors.set(e);
                return;
            }
        };
        set_errors.set(FormErrors::default());
        set_submitting.set(true);

        spawn_local(async move {
            let result = api::capture_lead(&capture).await.map(|_| ());
            let mut store = LocalStore;
            let outcome = conversation.try_update(|c| c.complete_lead_submit(result, &mut store));

            // The form stays open so the visitor can retry
            if let Some(LeadOutcome::Failed { notice }) = outcome {
                dom::alert(notice);
            }
            set_submitting.set(false);
        });
    };

    let input_style = "width: 100%; padding: 8px 12px; margin-bottom: 6px; border: 1px solid #d1d5db; \
                       border-radius: 8px; font-size: 14px; box-sizing: border-box;";
    let error_style = "color: #dc2626; font-size: 12px; margin: 0 0 6px;";

    view! {
        <form
            on:submit=on_submit
            style="padding: 16px; background: #f9fafb; border-top: 1px solid #e5e7eb;"
        >
            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;">
                <strong style="font-size: 14px; color: #1f2937;">"Let's stay in touch!"</strong>
                <button
                    type="button"
                    on:click=move |_| conversation.update(|c| c.dismiss_lead_prompt())
                    style="background: none; border: none; cursor: pointer; color: #6b7280; font-size: 16px;"
                >
                    "×"
                </button>
            </div>

            <input
                type="text"
                placeholder="Your name *"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
                style=input_style
            />
            {move || errors.get().name.map(|e| view! { <p style=error_style>{e}</p> })}

            <input
                type="email"
                placeholder="Email *"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
                style=input_style
            />
            {move || errors.get().email.map(|e| view! { <p style=error_style>{e}</p> })}

            <input
                type="tel"
                placeholder="Phone (optional)"
                prop:value=move || phone.get()
                on:input=move |ev| set_phone.set(event_target_value(&ev))
                style=input_style
            />

            <textarea
                placeholder="Any specific requirements?"
                rows="2"
                prop:value=move || message.get()
                on:input=move |ev| set_message.set(event_target_value(&ev))
                style=format!("{} resize: none; font-family: inherit;", input_style)
            />

            <button
                type="submit"
                disabled=move || submitting.get()
                style=move || format!(
                    "width: 100%; padding: 10px; border: none; border-radius: 8px; color: white; \
                     font-weight: 600; cursor: pointer; background: {};",
                    primary_color()
                )
            >
                {move || if submitting.get() { "Saving..." } else { "Submit" }}
            </button>
        </form>
    }
}
