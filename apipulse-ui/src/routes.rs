//! Route Table
//!
//! Declarative mapping from URL path to page view and display metadata.
//! The table is built once at module load and stays immutable; the router
//! in [`crate::app`] consumes it at startup, and the navigation bar and
//! document-title effect read it afterwards.

use leptos::{IntoView, View};

use crate::pages::{ApiMonitoring, Dashboard, ErrorTracking, ResponseTimes};

/// Document title used for paths the table does not know
pub const APP_TITLE: &str = "ApiPulse";

/// A single path-to-view mapping
///
/// `view` is a deferred reference: the table never calls it, the router
/// resolves it when the matching path is first navigated to.
#[derive(Clone, Copy)]
pub struct RouteEntry {
    /// URL path, unique across the table
    pub path: &'static str,
    /// Identifier for programmatic navigation, unique across the table
    pub name: &'static str,
    /// Page title shown in the browser tab
    pub title: &'static str,
    /// Deferred page component
    pub view: fn() -> View,
}

pub const DASHBOARD: RouteEntry = RouteEntry {
    path: "/",
    name: "Dashboard",
    title: "Statistika",
    view: || Dashboard().into_view(),
};

pub const API_MONITORING: RouteEntry = RouteEntry {
    path: "/api-monitoring",
    name: "ApiMonitoring",
    title: "API monitoringi",
    view: || ApiMonitoring().into_view(),
};

pub const RESPONSE_TIMES: RouteEntry = RouteEntry {
    path: "/response-times",
    name: "ResponseTimes",
    title: "Javob vaqtlari",
    view: || ResponseTimes().into_view(),
};

pub const ERROR_TRACKING: RouteEntry = RouteEntry {
    path: "/error-tracking",
    name: "ErrorTracking",
    title: "Xatoliklarni kuzatuv",
    view: || ErrorTracking().into_view(),
};

/// The route table, in navigation order, with the landing route first
pub static ROUTES: [RouteEntry; 4] = [DASHBOARD, API_MONITORING, RESPONSE_TIMES, ERROR_TRACKING];

/// Find an entry by exact path
pub fn find(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|r| r.path == path)
}

/// Page title for a path, if the table knows it
pub fn title_for(path: &str) -> Option<&'static str> {
    find(path).map(|r| r.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_distinct() {
        let paths: HashSet<&str> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_names_are_distinct() {
        let names: HashSet<&str> = ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn test_exactly_one_root_path() {
        let roots = ROUTES.iter().filter(|r| r.path == "/").count();
        assert_eq!(roots, 1);
    }

    #[test]
    fn test_titles_are_non_empty() {
        for route in &ROUTES {
            assert!(!route.title.is_empty(), "empty title for {}", route.path);
        }
    }

    #[test]
    fn test_dashboard_route() {
        let route = find("/").unwrap();
        assert_eq!(route.name, "Dashboard");
        assert_eq!(route.title, "Statistika");
    }

    #[test]
    fn test_api_monitoring_route() {
        let route = find("/api-monitoring").unwrap();
        assert_eq!(route.name, "ApiMonitoring");
        assert_eq!(route.title, "API monitoringi");
    }

    #[test]
    fn test_response_times_route() {
        let route = find("/response-times").unwrap();
        assert_eq!(route.name, "ResponseTimes");
        assert_eq!(route.title, "Javob vaqtlari");
    }

    #[test]
    fn test_error_tracking_route() {
        let route = find("/error-tracking").unwrap();
        assert_eq!(route.name, "ErrorTracking");
        assert_eq!(route.title, "Xatoliklarni kuzatuv");
    }

    #[test]
    fn test_unregistered_path_has_no_match() {
        assert!(find("/nonexistent").is_none());
        assert_eq!(title_for("/nonexistent"), None);
    }
}
