//! Latency Chart Component
//!
//! Bucketed latency series rendered with HTML5 Canvas: average latency as a
//! line, error buckets highlighted underneath.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::SeriesBucket;

const LINE_COLOR: &str = "#FF9800"; // Orange (primary)
const ERROR_COLOR: &str = "#F44336"; // Red

/// Latency series chart component
#[component]
pub fn LatencyChart(
    /// Bucketed series to render
    #[prop(into)]
    series: Signal<Vec<SeriesBucket>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the series changes
    create_effect(move |_| {
        let buckets = series.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &buckets);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                <LegendEntry color=LINE_COLOR label="Avg latency" />
                <LegendEntry color=ERROR_COLOR label="Errors" />
            </div>
        </div>
    }
}

/// Single legend entry
#[component]
fn LegendEntry(
    color: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div
                class="w-3 h-3 rounded-full"
                style=format!("background-color: {}", color)
            />
            <span class="text-sm text-gray-300">{label}</span>
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, buckets: &[SeriesBucket]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Y-axis range over average latency
    let mut max_latency = buckets.iter().map(|b| b.avg_latency_ms).fold(0.0, f64::max);
    if max_latency <= 0.0 {
        max_latency = 1.0;
    }
    max_latency *= 1.1;

    // Draw grid lines
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    // Horizontal grid lines (5 lines)
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        // Y-axis labels
        let value = max_latency - (i as f64 / 5.0) * max_latency;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0} ms", value), 5.0, y + 4.0);
    }

    if buckets.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected range", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let step = chart_width / buckets.len() as f64;

    // Error markers: a red bar at the bottom of each bucket with errors
    ctx.set_fill_style(&ERROR_COLOR.into());
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.error_count > 0 {
            let x = margin_left + i as f64 * step;
            ctx.fill_rect(x, margin_top + chart_height - 6.0, step.max(2.0), 6.0);
        }
    }

    // Average latency line over buckets with traffic
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();

    let mut started = false;
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.count == 0 {
            continue;
        }

        let x = margin_left + (i as f64 + 0.5) * step;
        let y = margin_top + ((max_latency - bucket.avg_latency_ms) / max_latency) * chart_height;

        if started {
            ctx.line_to(x, y);
        } else {
            ctx.move_to(x, y);
            started = true;
        }
    }
    ctx.stroke();

    // Points on buckets with traffic
    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.count == 0 {
            continue;
        }

        let x = margin_left + (i as f64 + 0.5) * step;
        let y = margin_top + ((max_latency - bucket.avg_latency_ms) / max_latency) * chart_height;

        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let first = buckets.first().map(|b| b.timestamp).unwrap_or(0);
    let last = buckets.last().map(|b| b.timestamp).unwrap_or(0);

    let num_labels = 5;
    for i in 0..=num_labels {
        let timestamp = first + i as i64 * (last - first) / num_labels as i64;
        let x = margin_left + (i as f64 / num_labels as f64) * chart_width;

        let time = chrono::DateTime::from_timestamp_millis(timestamp)
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_default();

        let _ = ctx.fill_text(&time, x - 15.0, height - 10.0);
    }
}
