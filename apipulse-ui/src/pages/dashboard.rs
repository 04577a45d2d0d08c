//! Dashboard Page
//!
//! Landing view: headline stats, per-endpoint summary, and the live
//! request feed.

use leptos::*;

use crate::api;
use crate::components::{CardSkeleton, StatCard, StatusBadge};
use crate::routes;
use crate::state::global::{format_ms, format_rate, format_time, GlobalState, WINDOWS};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch overview on mount and whenever the window changes
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let minutes = state_for_effect.window_minutes.get();
        let state = state_for_effect.clone();

        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_overview(minutes).await {
                Ok(overview) => {
                    state.overview.set(Some(overview));
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            state.loading.set(false);
        });
    });

    let overview = state.overview;

    let total_requests = Signal::derive(move || {
        overview.get()
            .map(|o| o.total_requests.to_string())
            .unwrap_or_else(|| "—".to_string())
    });
    let error_rate = Signal::derive(move || {
        overview.get()
            .map(|o| format_rate(o.error_rate))
            .unwrap_or_else(|| "—".to_string())
    });
    let error_count = Signal::derive(move || {
        overview.get()
            .map(|o| format!("{} ta xatolik", o.error_count))
            .unwrap_or_default()
    });
    let avg_latency = Signal::derive(move || {
        overview.get()
            .and_then(|o| o.latency)
            .map(|l| format_ms(l.avg_ms))
            .unwrap_or_else(|| "—".to_string())
    });
    let p95_latency = Signal::derive(move || {
        overview.get()
            .and_then(|o| o.latency)
            .map(|l| format_ms(l.p95_ms))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_loading = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">{routes::DASHBOARD.title}</h1>
                    <p class="text-gray-400 mt-1">"API trafigi bir qarashda"</p>
                </div>

                <WindowButtons />
            </div>

            // Headline stats
            <section>
                {move || {
                    if state_for_loading.loading.get() && overview.get().is_none() {
                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                <StatCard label="Jami so'rovlar" value=total_requests />
                                <StatCard label="Xatolik darajasi" value=error_rate hint=error_count />
                                <StatCard label="O'rtacha javob" value=avg_latency />
                                <StatCard label="p95" value=p95_latency />
                            </div>
                        }.into_view()
                    }
                }}
            </section>

            // Endpoint summary
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Endpointlar"</h2>
                <EndpointSummary />
            </section>

            // Live request feed
            <LiveFeed />
        </div>
    }
}

/// Stats window selection buttons
#[component]
fn WindowButtons() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex space-x-2">
            {WINDOWS.iter().map(|(minutes, label)| {
                let minutes = *minutes;
                let label = *label;
                let state = state.clone();

                let is_active = {
                    let state = state.clone();
                    create_memo(move |_| state.window_minutes.get() == minutes)
                };

                view! {
                    <button
                        on:click=move |_| state.window_minutes.set(minutes)
                        class=move || {
                            let base = "px-3 py-1.5 rounded-lg text-sm font-medium transition-colors";
                            if is_active.get() {
                                format!("{} bg-primary-600 text-white", base)
                            } else {
                                format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                            }
                        }
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// Compact per-endpoint table for the dashboard
#[component]
fn EndpointSummary() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let overview = state.overview;

    view! {
        <div class="space-y-2">
            {move || {
                let endpoints = overview.get().map(|o| o.endpoints).unwrap_or_default();

                if endpoints.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Hozircha trafik yo'q"</p>
                    }.into_view()
                } else {
                    endpoints.into_iter().map(|row| {
                        view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <div class="flex items-center space-x-3">
                                    <StatusBadge health=row.health.clone() />
                                    <span class="font-mono text-sm">{row.endpoint.clone()}</span>
                                </div>
                                <div class="flex items-center space-x-6 text-sm text-gray-400">
                                    <span>{format!("{} req", row.request_count)}</span>
                                    <span>{format_rate(row.error_rate)}</span>
                                    <span class="font-semibold text-white">{format_ms(row.avg_latency_ms)}</span>
                                </div>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}

/// Live request feed fed by the WebSocket connection
#[component]
fn LiveFeed() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let feed = state.live_feed;

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"So'nggi so'rovlar"</h2>

            <div class="space-y-2">
                {move || {
                    let recent: Vec<_> = feed.get().into_iter().take(10).collect();

                    if recent.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"Jonli oqim kutilmoqda..."</p>
                        }.into_view()
                    } else {
                        recent.into_iter().map(|req| {
                            let status_class = if req.status >= 500 {
                                "text-red-400"
                            } else if req.status >= 400 {
                                "text-yellow-400"
                            } else {
                                "text-green-400"
                            };

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div class="flex items-center space-x-3">
                                        <span class=format!("font-mono text-sm {}", status_class)>
                                            {req.status}
                                        </span>
                                        <span class="text-sm text-gray-300">{req.method.clone()}</span>
                                        <span class="font-mono text-sm">{req.endpoint.clone()}</span>
                                    </div>
                                    <div class="flex items-center space-x-4 text-sm text-gray-400">
                                        <span>{format_ms(req.duration_ms)}</span>
                                        <span>{format_time(req.timestamp)}</span>
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}
