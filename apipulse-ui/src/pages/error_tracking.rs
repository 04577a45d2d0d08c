//! Error Tracking Page
//!
//! Recent error events and the status-code breakdown.

use leptos::*;

use crate::api::{self, ErrorsResponse};
use crate::components::{ListSkeleton, StatCard};
use crate::routes;
use crate::state::global::{format_ms, format_rate, format_time, GlobalState};

/// How many recent error events to request
const RECENT_LIMIT: usize = 50;

/// Error tracking page component
#[component]
pub fn ErrorTracking() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let errors = create_rw_signal::<Option<ErrorsResponse>>(None);

    // Fetch error stats on mount and whenever the window changes
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let minutes = state_for_effect.window_minutes.get();
        let state = state_for_effect.clone();

        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_errors(minutes, RECENT_LIMIT).await {
                Ok(response) => {
                    errors.set(Some(response));
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            state.loading.set(false);
        });
    });

    let total_errors = Signal::derive(move || {
        errors.get()
            .map(|e| e.total_errors.to_string())
            .unwrap_or_else(|| "—".to_string())
    });
    let error_rate = Signal::derive(move || {
        errors.get()
            .map(|e| format_rate(e.error_rate))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_view = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">{routes::ERROR_TRACKING.title}</h1>
                <p class="text-gray-400 mt-1">"Xatolik javoblari va ularning manbalari"</p>
            </div>

            // Headline stats
            <section>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <StatCard label="Jami xatoliklar" value=total_errors />
                    <StatCard label="Xatolik darajasi" value=error_rate />
                </div>
            </section>

            // Status code breakdown
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Status kodlari"</h2>
                <StatusBreakdown errors=errors />
            </section>

            // Recent error events
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"So'nggi xatoliklar"</h2>

                {move || {
                    if state_for_view.loading.get() && errors.get().is_none() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else {
                        view! { <RecentErrors errors=errors /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

/// Per-status-code counts as badges
#[component]
fn StatusBreakdown(
    errors: RwSignal<Option<ErrorsResponse>>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-3">
            {move || {
                let breakdown = errors.get().map(|e| e.breakdown).unwrap_or_default();

                if breakdown.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Tanlangan oynada xatoliklar yo'q"</p>
                    }.into_view()
                } else {
                    breakdown.into_iter().map(|entry| {
                        let color = if entry.status >= 500 {
                            "bg-red-900 text-red-300"
                        } else {
                            "bg-yellow-900 text-yellow-300"
                        };

                        view! {
                            <div class=format!("rounded px-3 py-2 inline-flex items-center space-x-2 {}", color)>
                                <span class="font-mono font-semibold">{entry.status}</span>
                                <span class="text-sm">{format!("{} ta", entry.count)}</span>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}

/// Recent error event list, newest first
#[component]
fn RecentErrors(
    errors: RwSignal<Option<ErrorsResponse>>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {move || {
                let recent = errors.get().map(|e| e.recent).unwrap_or_default();

                if recent.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Tanlangan oynada xatoliklar yo'q"</p>
                    }.into_view()
                } else {
                    recent.into_iter().map(|event| {
                        let status_class = if event.status >= 500 {
                            "text-red-400"
                        } else {
                            "text-yellow-400"
                        };

                        view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <div class="flex items-center space-x-3">
                                    <span class=format!("font-mono text-sm font-semibold {}", status_class)>
                                        {event.status}
                                    </span>
                                    <span class="text-sm text-gray-300">{event.method.clone()}</span>
                                    <span class="font-mono text-sm">{event.endpoint.clone()}</span>
                                    {event.source.clone().map(|source| view! {
                                        <span class="text-xs text-gray-500">{source}</span>
                                    })}
                                </div>
                                <div class="flex items-center space-x-4 text-sm text-gray-400">
                                    <span>{format_ms(event.duration_ms)}</span>
                                    <span>{format_time(event.timestamp)}</span>
                                </div>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}
