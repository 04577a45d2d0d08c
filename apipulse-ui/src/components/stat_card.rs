//! Stat Card Component
//!
//! Displays a single headline statistic with an optional hint line.

use leptos::*;

/// Stat card component
#[component]
pub fn StatCard(
    /// Label shown above the value
    #[prop(into)]
    label: String,
    /// The headline value
    #[prop(into)]
    value: Signal<String>,
    /// Optional secondary line under the value
    #[prop(optional, into)]
    hint: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition">
            <div class="text-gray-400 text-sm">{label}</div>

            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>

            {hint.map(|hint| view! {
                <div class="text-sm text-gray-500 mt-2">
                    {move || hint.get()}
                </div>
            })}
        </div>
    }
}
