//! Clients Page
//!
//! Tenant list, creation form and API-key copy.

use leptos::*;

use prodesk::dashboard::{display_api_key, status_label, Clipboard};
use prodesk::types::Client;
use prodesk::validation::{ClientForm, FormErrors};

use crate::api;
use crate::components::Loading;
use crate::dom::{self, BrowserClipboard};
use crate::state::global::GlobalState;

#[component]
pub fn Clients() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (show_form, set_show_form) = create_signal(false);

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-gray-900">"Client Management"</h1>
                    <p class="text-gray-500 mt-1">"Create tenants and hand out their API keys"</p>
                </div>
                <button
                    on:click=move |_| set_show_form.update(|shown| *shown = !*shown)
                    class="px-5 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium transition-colors"
                >
                    {move || if show_form.get() { "Cancel" } else { "+ New Client" }}
                </button>
            </div>

            {move || show_form.get().then(|| view! {
                <NewClientForm on_created=move || set_show_form.set(false) />
            })}

            {move || {
                if state.loading.get() {
                    view! { <Loading /> }.into_view()
                } else if state.clients.with(Vec::is_empty) {
                    view! {
                        <p class="text-gray-500 text-center py-12">"No clients yet"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <For
                                each=move || state.clients.get()
                                key=|client| client.id.clone()
                                children=move |client| view! { <ClientCard client=client /> }
                            />
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn NewClientForm<F>(on_created: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (website, set_website) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let form = ClientForm {
            name: name.get(),
            email: email.get(),
            website_url: website.get(),
        };

        let new_client = match form.validate() {
            Ok(new_client) => new_client,
            Err(e) => {
                set_errors.set(e);
                return;
            }
        };
        set_errors.set(FormErrors::default());
        set_submitting.set(true);

        let state = state.clone();
        spawn_local(async move {
            match api::create_client(&new_client).await {
                Ok(client) => {
                    state.show_success(&format!("Client '{}' created", client.name));
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_website.set(String::new());
                    state.reload_clients();
                    on_created();
                }
                Err(e) => dom::alert(&format!("Failed to create client: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    let input_class = "w-full border border-gray-300 rounded-lg px-4 py-3 focus:border-indigo-500 focus:outline-none";

    view! {
        <form on:submit=on_submit class="bg-white rounded-xl shadow p-6 space-y-4">
            <h2 class="text-xl font-semibold text-gray-900">"Create New Client"</h2>

            <div>
                <input
                    type="text"
                    placeholder="Company name *"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class=input_class
                />
                {move || errors.get().name.map(|e| view! { <p class="text-red-600 text-sm mt-1">{e}</p> })}
            </div>

            <div>
                <input
                    type="email"
                    placeholder="Contact email *"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class=input_class
                />
                {move || errors.get().email.map(|e| view! { <p class="text-red-600 text-sm mt-1">{e}</p> })}
            </div>

            <input
                type="url"
                placeholder="Website URL (optional)"
                prop:value=move || website.get()
                on:input=move |ev| set_website.set(event_target_value(&ev))
                class=input_class
            />

            <button
                type="submit"
                disabled=move || submitting.get()
                class="px-5 py-3 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-300 text-white rounded-lg font-medium"
            >
                {move || if submitting.get() { "Creating..." } else { "Create Client" }}
            </button>
        </form>
    }
}

#[component]
fn ClientCard(client: Client) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let api_key = client.api_key.clone();
    let copy_key = move |_| match BrowserClipboard.write_text(&api_key) {
        Ok(()) => state.show_success("API Key copied to clipboard!"),
        Err(e) => state.show_error(&e.to_string()),
    };

    let status_class = if client.is_active {
        "bg-green-100 text-green-700"
    } else {
        "bg-gray-100 text-gray-600"
    };

    view! {
        <div class="bg-white rounded-xl shadow p-5 space-y-3">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-semibold text-gray-900">{client.name.clone()}</h3>
                <span class=format!("px-2 py-1 rounded text-xs font-medium {}", status_class)>
                    {status_label(&client)}
                </span>
            </div>

            <p class="text-sm text-gray-600">{client.email.clone()}</p>
            {client.website_url.clone().map(|url| view! {
                <p class="text-sm text-indigo-600 truncate">{url}</p>
            })}

            <div class="flex items-center space-x-2 bg-gray-50 rounded-lg px-3 py-2">
                <code class="flex-1 text-xs text-gray-700 truncate">{display_api_key(&client.api_key)}</code>
                <button
                    on:click=copy_key
                    class="px-3 py-1 text-xs bg-white border border-gray-300 hover:bg-gray-100 rounded"
                >
                    "Copy"
                </button>
            </div>
        </div>
    }
}
