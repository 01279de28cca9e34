//! Client-side navigation: routes, transient navigation state and the shell
//! that tracks the current location.
//!
//! A payload reaches the visualization view only as [`NavigationState`]
//! attached to a transition. Nothing is persisted; opening a route without
//! state yields a location whose `state` is `None`.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::payload::UploadResponse;
use crate::telemetry::{self, SessionEvent};

/// Views reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Route {
    Landing,
    Upload,
    Visualize,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Landing, Route::Upload, Route::Visualize];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Upload => "/upload",
            Route::Visualize => "/visualize",
        }
    }

    /// Label used by the navigation bar
    pub fn label(&self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Upload => "Upload",
            Route::Visualize => "Visualize",
        }
    }

    /// Resolve a URL path; a trailing slash is ignored
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Immutable payload attached to a navigation transition
///
/// Cloning shares the same payload. Two states are "the same" only when
/// they come from the same transition, regardless of content.
#[derive(Debug, Clone)]
pub struct NavigationState(Arc<UploadResponse>);

impl NavigationState {
    pub fn new(response: UploadResponse) -> Self {
        Self(Arc::new(response))
    }

    pub fn response(&self) -> &UploadResponse {
        &self.0
    }

    pub fn same_as(&self, other: &NavigationState) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Where the user is, and what the transition carried
#[derive(Debug, Clone)]
pub struct Location {
    pub route: Route,
    pub state: Option<NavigationState>,
    /// Increases by one on every transition
    pub sequence: u64,
}

impl Location {
    fn initial() -> Self {
        Self {
            route: Route::Landing,
            state: None,
            sequence: 0,
        }
    }
}

/// Performs route transitions
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, state: Option<NavigationState>);
}

/// Routes kept by [`NavigationShell::history`]
pub const HISTORY_LIMIT: usize = 32;

/// Tracks the current location and the most recent routes
pub struct NavigationShell {
    location: Mutex<Location>,
    history: Mutex<VecDeque<Route>>,
}

impl NavigationShell {
    /// Start on the landing route with no state
    pub fn new() -> Self {
        Self {
            location: Mutex::new(Location::initial()),
            history: Mutex::new(VecDeque::from([Route::Landing])),
        }
    }

    /// Plain link navigation; never carries state
    pub fn open(&self, route: Route) {
        self.navigate(route, None);
    }

    /// Current location (cheap clone)
    pub fn location(&self) -> Location {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_route(&self) -> Route {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .route
    }

    /// Last [`HISTORY_LIMIT`] routes visited, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Number of transitions since the shell was created
    pub fn transitions(&self) -> u64 {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sequence
    }
}

impl Navigator for NavigationShell {
    fn navigate(&self, route: Route, state: Option<NavigationState>) {
        let with_state = state.is_some();
        {
            let mut location = self.location.lock().unwrap_or_else(PoisonError::into_inner);
            location.sequence += 1;
            location.route = route;
            location.state = state;
            debug!(
                "[Navigation] #{} -> {} (state: {})",
                location.sequence, route, with_state
            );
        }
        {
            let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back(route);
        }

        telemetry::session().record(SessionEvent::Navigated {
            route: route.path().to_string(),
            with_state,
        });
    }
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_route_from_path_normalizes() {
        assert_eq!(Route::from_path("/visualize/"), Some(Route::Visualize));
        assert_eq!(Route::from_path(" /upload "), Some(Route::Upload));
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("//"), Some(Route::Landing));
        assert_eq!(Route::from_path("/settings"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_shell_starts_on_landing() {
        let shell = NavigationShell::new();
        let location = shell.location();
        assert_eq!(location.route, Route::Landing);
        assert!(location.state.is_none());
        assert_eq!(shell.transitions(), 0);
    }

    #[test]
    fn test_open_never_carries_state() {
        let shell = NavigationShell::new();
        shell.navigate(
            Route::Visualize,
            Some(NavigationState::new(UploadResponse::default())),
        );
        shell.open(Route::Visualize);

        let location = shell.location();
        assert_eq!(location.route, Route::Visualize);
        assert!(location.state.is_none());
        assert_eq!(location.sequence, 2);
    }

    #[test]
    fn test_history_records_every_transition() {
        let shell = NavigationShell::new();
        shell.open(Route::Upload);
        shell.open(Route::Visualize);
        assert_eq!(
            shell.history(),
            vec![Route::Landing, Route::Upload, Route::Visualize]
        );
    }

    #[test]
    fn test_history_keeps_most_recent_routes() {
        let shell = NavigationShell::new();
        for _ in 0..HISTORY_LIMIT {
            shell.open(Route::Upload);
        }
        shell.open(Route::Visualize);

        let history = shell.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], Route::Upload);
        assert_eq!(history.last(), Some(&Route::Visualize));
        assert_eq!(shell.transitions(), HISTORY_LIMIT as u64 + 1);
    }

    #[test]
    fn test_state_identity() {
        let a = NavigationState::new(UploadResponse::default());
        let b = NavigationState::new(UploadResponse::default());
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }
}
