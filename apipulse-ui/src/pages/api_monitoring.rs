//! API Monitoring Page
//!
//! Monitored endpoint list with health state, request counts, and
//! last-seen times.

use leptos::*;

use crate::api;
use crate::components::{ListSkeleton, StatusBadge};
use crate::routes;
use crate::state::global::{format_ms, format_rate, format_time, GlobalState};

/// API monitoring page component
#[component]
pub fn ApiMonitoring() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let load = {
        let state = state.clone();
        move || {
            let state = state.clone();
            let minutes = state.window_minutes.get_untracked();

            spawn_local(async move {
                state.loading.set(true);

                match api::fetch_endpoints(minutes).await {
                    Ok(endpoints) => {
                        state.endpoints.set(endpoints);
                    }
                    Err(e) => {
                        state.show_error(&e);
                    }
                }

                state.loading.set(false);
            });
        }
    };

    // Initial fetch, re-run when the window changes
    let state_for_effect = state.clone();
    let load_for_effect = load.clone();
    create_effect(move |_| {
        // Track the window so a change refetches
        let _ = state_for_effect.window_minutes.get();
        load_for_effect();
    });

    let endpoints = state.endpoints;
    let state_for_view = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">{routes::API_MONITORING.title}</h1>
                    <p class="text-gray-400 mt-1">"Kuzatilayotgan endpointlar holati"</p>
                </div>

                <button
                    on:click=move |_| load()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium transition-colors"
                >
                    "Yangilash"
                </button>
            </div>

            // Endpoint table
            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    if state_for_view.loading.get() && endpoints.get().is_empty() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else if endpoints.get().is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">
                                "Hozircha endpointlar yo'q - xizmatlaringiz telemetriya yuborishini kutmoqda"
                            </p>
                        }.into_view()
                    } else {
                        view! {
                            <table class="w-full text-left">
                                <thead>
                                    <tr class="text-sm text-gray-400 border-b border-gray-700">
                                        <th class="py-2 font-medium">"Holat"</th>
                                        <th class="py-2 font-medium">"Endpoint"</th>
                                        <th class="py-2 font-medium text-right">"So'rovlar"</th>
                                        <th class="py-2 font-medium text-right">"Xatoliklar"</th>
                                        <th class="py-2 font-medium text-right">"O'rtacha"</th>
                                        <th class="py-2 font-medium text-right">"Oxirgi so'rov"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {endpoints.get().into_iter().map(|row| {
                                        view! {
                                            <tr class="border-b border-gray-700 last:border-0 hover:bg-gray-750">
                                                <td class="py-3">
                                                    <StatusBadge health=row.health.clone() />
                                                </td>
                                                <td class="py-3 font-mono text-sm">{row.endpoint.clone()}</td>
                                                <td class="py-3 text-right">{row.request_count}</td>
                                                <td class="py-3 text-right">
                                                    <span class=if row.error_count > 0 { "text-red-400" } else { "text-gray-400" }>
                                                        {format!("{} ({})", row.error_count, format_rate(row.error_rate))}
                                                    </span>
                                                </td>
                                                <td class="py-3 text-right">{format_ms(row.avg_latency_ms)}</td>
                                                <td class="py-3 text-right text-gray-400">{format_time(row.last_seen)}</td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_view()
                    }
                }}
            </section>
        </div>
    }
}
