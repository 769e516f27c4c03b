//! Stat Card Component
//!
//! One headline number with a label and an optional sub-line.

use leptos::*;

#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    /// Secondary line, e.g. "+4 today"
    #[prop(optional, into)]
    detail: Option<Signal<String>>,
    #[prop(default = "💬")]
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg p-5 shadow border border-gray-100">
            <div class="flex items-center justify-between">
                <span class="text-gray-500 text-sm">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>

            <div class="text-3xl font-bold text-gray-900 mt-2">
                {move || value.get()}
            </div>

            {detail.map(|detail| view! {
                <div class="text-sm text-green-600 mt-1">{move || detail.get()}</div>
            })}
        </div>
    }
}
