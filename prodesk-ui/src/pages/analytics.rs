//! Analytics Page
//!
//! Per-tenant chat stats, top queries and captured leads. The summary and
//! the lead list load independently; either may fail without hiding the
//! other.

use leptos::*;

use prodesk::dashboard::ranked_queries;
use prodesk::types::{AnalyticsSummary, Lead};

use crate::api;
use crate::components::{LeadsTable, Loading, StatCard};
use crate::state::global::GlobalState;

#[component]
pub fn Analytics() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let clients = state.clients;
    let (selected, set_selected) = create_signal(String::new());
    let summary = create_rw_signal(None::<AnalyticsSummary>);
    let leads = create_rw_signal(Vec::<Lead>::new());
    let pending = create_rw_signal(0u8);
    // Bumped on every load; responses from an earlier load are dropped
    let load_seq = create_rw_signal(0u32);

    // Default to the first tenant once the list arrives
    create_effect(move |_| {
        if selected.get_untracked().is_empty() {
            if let Some(first) = clients.with(|clients| clients.first().map(|c| c.api_key.clone())) {
                set_selected.set(first);
            }
        }
    });

    create_effect(move |_| {
        let api_key = selected.get();
        if api_key.is_empty() {
            return;
        }

        summary.set(None);
        leads.set(Vec::new());
        pending.set(2);
        let seq = load_seq.get_untracked().wrapping_add(1);
        load_seq.set(seq);

        let state_for_stats = state.clone();
        let key = api_key.clone();
        spawn_local(async move {
            let result = api::fetch_analytics(&key).await;
            if !is_current(load_seq, seq) {
                return;
            }
            match result {
                Ok(stats) => summary.set(Some(stats)),
                Err(e) => state_for_stats.show_error(&format!("Failed to load analytics: {}", e)),
            }
            pending.update(|n| *n = n.saturating_sub(1));
        });

        let state_for_leads = state.clone();
        spawn_local(async move {
            let result = api::fetch_leads(&api_key).await;
            if !is_current(load_seq, seq) {
                return;
            }
            match result {
                Ok(lead_list) => leads.set(lead_list),
                Err(e) => state_for_leads.show_error(&format!("Failed to load leads: {}", e)),
            }
            pending.update(|n| *n = n.saturating_sub(1));
        });
    });

    let stat = move |f: fn(&AnalyticsSummary) -> String| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(f).unwrap_or_else(|| "-".to_string())))
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-gray-900">"Analytics"</h1>
                    <p class="text-gray-500 mt-1">"Conversations and leads per client"</p>
                </div>

                <select
                    on:change=move |ev| set_selected.set(event_target_value(&ev))
                    prop:value=move || selected.get()
                    class="border border-gray-300 rounded-lg px-4 py-2 bg-white"
                >
                    <For
                        each=move || clients.get()
                        key=|client| client.id.clone()
                        children=move |client| view! {
                            <option value=client.api_key.clone()>{client.name.clone()}</option>
                        }
                    />
                </select>
            </div>

            {move || (pending.get() > 0).then(|| view! { <Loading /> })}

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard
                    label="Total Chats"
                    value=stat(|s| s.total_chats.to_string())
                    detail=stat(|s| format!("+{} today", s.chats_today))
                    icon="💬"
                />
                <StatCard
                    label="Leads Collected"
                    value=stat(|s| s.leads_collected.to_string())
                    detail=stat(|s| format!("+{} today", s.leads_today))
                    icon="🎯"
                />
                <StatCard
                    label="Avg Response Time"
                    value=stat(|s| format!("{:.1}s", s.avg_response_time))
                    icon="⚡"
                />
            </div>

            <section class="bg-white rounded-xl shadow p-6">
                <h2 class="text-xl font-semibold text-gray-900 mb-4">"Top Queries"</h2>
                {move || summary.with(|s| {
                    let queries = s.as_ref().map(|s| s.top_queries.clone()).unwrap_or_default();
                    if queries.is_empty() {
                        view! { <p class="text-gray-500">"No queries yet"</p> }.into_view()
                    } else {
                        view! {
                            <ol class="space-y-2">
                                {ranked_queries(&queries).into_iter().map(|(rank, query)| view! {
                                    <li class="flex items-center space-x-3">
                                        <span class="w-6 h-6 flex items-center justify-center rounded-full bg-indigo-100 text-indigo-700 text-xs font-bold">
                                            {rank}
                                        </span>
                                        <span class="text-gray-800">{query.to_string()}</span>
                                    </li>
                                }).collect_view()}
                            </ol>
                        }.into_view()
                    }
                })}
            </section>

            <LeadsTable leads=leads />
        </div>
    }
}

fn is_current(load_seq: RwSignal<u32>, seq: u32) -> bool {
    load_seq.get_untracked() == seq
}
