//! Response Times Page
//!
//! Latency percentiles and the bucketed latency chart.

use leptos::*;

use crate::api;
use crate::components::{ChartSkeleton, LatencyChart, StatCard};
use crate::routes;
use crate::state::global::{format_ms, GlobalState, LatencySummary, SeriesBucket, WINDOWS};

/// Buckets requested for the latency chart
const CHART_BUCKETS: usize = 60;

/// Response times page component
#[component]
pub fn ResponseTimes() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let summary = create_rw_signal::<Option<LatencySummary>>(None);
    let series = create_rw_signal::<Vec<SeriesBucket>>(Vec::new());

    // Fetch latency stats on mount and whenever the window changes
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let minutes = state_for_effect.window_minutes.get();
        let state = state_for_effect.clone();

        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_latency(minutes, CHART_BUCKETS, None).await {
                Ok(response) => {
                    summary.set(response.summary);
                    series.set(response.series);
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            state.loading.set(false);
        });
    });

    let percentile_value = move |pick: fn(&LatencySummary) -> f64| {
        Signal::derive(move || {
            summary.get()
                .map(|s| format_ms(pick(&s)))
                .unwrap_or_else(|| "—".to_string())
        })
    };

    let p50 = percentile_value(|s| s.p50_ms);
    let p90 = percentile_value(|s| s.p90_ms);
    let p95 = percentile_value(|s| s.p95_ms);
    let p99 = percentile_value(|s| s.p99_ms);

    let sample_count = Signal::derive(move || {
        summary.get()
            .map(|s| format!("{} ta so'rov", s.count))
            .unwrap_or_default()
    });

    let state_for_view = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">{routes::RESPONSE_TIMES.title}</h1>
                    <p class="text-gray-400 mt-1">"Javob vaqti persentillari va trendi"</p>
                </div>

                <WindowButtons />
            </div>

            // Percentile cards
            <section>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <StatCard label="p50" value=p50 hint=sample_count />
                    <StatCard label="p90" value=p90 />
                    <StatCard label="p95" value=p95 />
                    <StatCard label="p99" value=p99 />
                </div>
            </section>

            // Latency chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"O'rtacha javob vaqti"</h2>

                {move || {
                    if state_for_view.loading.get() && series.get().is_empty() {
                        view! { <ChartSkeleton /> }.into_view()
                    } else {
                        view! { <LatencyChart series=series /> }.into_view()
                    }
                }}
            </section>
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
