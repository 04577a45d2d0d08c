//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod latency_chart;
pub mod loading;
pub mod nav;
pub mod stat_card;
pub mod status_badge;
pub mod toast;

pub use latency_chart::LatencyChart;
pub use loading::{CardSkeleton, ChartSkeleton, ListSkeleton, Loading};
pub use nav::Nav;
pub use stat_card::StatCard;
pub use status_badge::StatusBadge;
pub use toast::Toast;
