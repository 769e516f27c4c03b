//! Settings Page
//!
//! Backend URL used by the dashboard and the widget.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn Settings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get());

        let state = state_for_test.clone();
        spawn_local(async move {
            match api::fetch_clients().await {
                Ok(clients) => {
                    set_test_result.set(Some(true));
                    state.clients.set(clients);
                    state.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state.show_success("API URL saved");
        state.reload_clients();
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Settings"</h1>
                <p class="text-gray-500 mt-1">"Configure your Prodesk dashboard"</p>
            </div>

            <section class="bg-white rounded-xl shadow p-6">
                <h2 class="text-xl font-semibold text-gray-900 mb-4">"API Connection"</h2>

                <div class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-500 mb-2">"Prodesk API URL"</label>
                        <div class="flex space-x-2">
                            <input
                                type="text"
                                prop:value=move || api_url.get()
                                on:input=move |ev| set_api_url.set(event_target_value(&ev))
                                class="flex-1 border border-gray-300 rounded-lg px-4 py-3
                                       focus:border-indigo-500 focus:outline-none"
                            />
                            <button
                                on:click=test_connection
                                disabled=move || testing.get()
                                class="px-4 py-3 bg-gray-100 hover:bg-gray-200 disabled:bg-gray-50
                                       rounded-lg font-medium transition-colors"
                            >
                                {move || if testing.get() { "Testing..." } else { "Test" }}
                            </button>
                            <button
                                on:click=save_url
                                class="px-4 py-3 bg-indigo-600 hover:bg-indigo-700 text-white
                                       rounded-lg font-medium transition-colors"
                            >
                                "Save"
                            </button>
                        </div>
                    </div>

                    <div class="flex items-center space-x-2">
                        <span class="text-sm text-gray-500">"Status:"</span>
                        {move || match test_result.get() {
                            Some(true) => view! { <span class="text-green-600">"✓ Connected"</span> }.into_view(),
                            Some(false) => view! { <span class="text-red-600">"✕ Failed"</span> }.into_view(),
                            None => view! { <span class="text-gray-500">"Not tested"</span> }.into_view(),
                        }}
                    </div>
                </div>
            </section>
        </div>
    }
}
