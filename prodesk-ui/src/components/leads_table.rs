//! Leads Table Component
//!
//! Searchable list of captured leads with CSV export.

use leptos::*;

use prodesk::dashboard::{export_filename, filter_leads, format_lead_date, leads_to_csv};
use prodesk::types::Lead;

use crate::dom;
use crate::state::global::GlobalState;

#[component]
pub fn LeadsTable(
    #[prop(into)]
    leads: Signal<Vec<Lead>>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (search, set_search) = create_signal(String::new());

    let visible = create_memo(move |_| {
        let term = search.get();
        leads.with(|leads| {
            filter_leads(leads, &term)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    // Export covers every lead, not just the filtered view
    let export = move |_| {
        let csv = leads.with(|leads| leads_to_csv(leads));
        let filename = export_filename(chrono::Utc::now().date_naive());

        match dom::download_text(&filename, &csv, "text/csv") {
            Ok(()) => state.show_success("Leads exported"),
            Err(e) => state.show_error(&format!("Export failed: {:?}", e)),
        }
    };

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold text-gray-900">
                    {move || format!("Leads ({})", leads.with(Vec::len))}
                </h2>
                <div class="flex items-center space-x-2">
                    <input
                        type="text"
                        placeholder="Search leads..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="border border-gray-300 rounded-lg px-3 py-2 text-sm
                               focus:border-indigo-500 focus:outline-none"
                    />
                    <button
                        on:click=export
                        disabled=move || leads.with(Vec::is_empty)
                        class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-300
                               text-white rounded-lg text-sm font-medium transition-colors"
                    >
                        "Export CSV"
                    </button>
                </div>
            </div>

            {move || {
                let rows = visible.get();
                if rows.is_empty() {
                    view! {
                        <p class="text-gray-500 text-center py-8">"No leads found"</p>
                    }.into_view()
                } else {
                    view! {
                        <table class="w-full text-sm text-left">
                            <thead class="text-gray-500 border-b">
                                <tr>
                                    <th class="py-2">"Name"</th>
                                    <th class="py-2">"Email"</th>
                                    <th class="py-2">"Phone"</th>
                                    <th class="py-2">"Message"</th>
                                    <th class="py-2">"Date"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|lead| view! {
                                    <tr class="border-b border-gray-100">
                                        <td class="py-2 font-medium">{lead.name.clone()}</td>
                                        <td class="py-2">{lead.email.clone()}</td>
                                        <td class="py-2">{lead.phone.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="py-2 text-gray-600">{lead.message.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="py-2 text-gray-500">{format_lead_date(&lead.created_at)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }
            }}
        </section>
    }
}
