//! Overview Page
//!
//! Tenant counts at a glance.

use leptos::*;
use leptos_router::*;

use crate::components::{CardSkeleton, StatCard};
use crate::state::global::GlobalState;

#[component]
pub fn Overview() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let overview = {
        let state = state.clone();
        create_memo(move |_| state.overview())
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Overview"</h1>
                <p class="text-gray-500 mt-1">"Your chatbot tenants"</p>
            </div>

            {move || {
                if state.loading.get() && state.clients.with(Vec::is_empty) {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <StatCard
                                label="Total Clients"
                                value=Signal::derive(move || overview.get().total.to_string())
                                icon="🏢"
                            />
                            <StatCard
                                label="Active"
                                value=Signal::derive(move || overview.get().active.to_string())
                                icon="✅"
                            />
                            <StatCard
                                label="Inactive"
                                value=Signal::derive(move || overview.get().inactive().to_string())
                                icon="⏸"
                            />
                        </div>
                    }.into_view()
                }
            }}

            <div class="flex space-x-3">
                <A href="/clients" class="px-5 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium">
                    "Manage Clients"
                </A>
                <A href="/analytics" class="px-5 py-3 bg-white border border-gray-300 hover:bg-gray-50 rounded-lg font-medium">
                    "View Analytics"
                </A>
            </div>
        </div>
    }
}
