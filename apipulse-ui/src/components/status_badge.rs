//! Status Badge Component
//!
//! Colored health indicator for a monitored endpoint.

use leptos::*;

/// Health state badge
#[component]
pub fn StatusBadge(
    /// Health state string from the API: "healthy", "degraded", or "down"
    #[prop(into)]
    health: String,
) -> impl IntoView {
    let (dot_class, text_class) = match health.as_str() {
        "healthy" => ("bg-green-400", "text-green-400"),
        "degraded" => ("bg-yellow-400", "text-yellow-400"),
        "down" => ("bg-red-400", "text-red-400"),
        _ => ("bg-gray-400", "text-gray-400"),
    };

    view! {
        <span class=format!("inline-flex items-center space-x-1.5 text-sm {}", text_class)>
            <span class=format!("w-2 h-2 rounded-full {}", dot_class) />
            <span class="capitalize">{health}</span>
        </span>
    }
}
