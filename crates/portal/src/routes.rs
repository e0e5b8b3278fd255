//! Client routes and the guard that decides whether a page may render.

use serde::Serialize;

use safecity_auth::{Identity, visible_entries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Map,
    Report,
    MyReports,
    Admin,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Map,
        Route::Report,
        Route::MyReports,
        Route::Admin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Map => "/map",
            Route::Report => "/report",
            Route::MyReports => "/my-reports",
            Route::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Pages anyone may open.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Landing | Route::Login | Route::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(Route),
}

/// Decide what to do with a navigation to `route`.
///
/// Protected pages are reachable exactly when the view-filter lists them for
/// the current role; anything else goes back to the dashboard, and anonymous
/// visitors go to the landing page.
pub fn guard(route: Route, current: Option<&Identity>) -> RouteDecision {
    if route.is_public() {
        return RouteDecision::Render;
    }

    let Some(identity) = current else {
        return RouteDecision::Redirect(Route::Landing);
    };

    if visible_entries(identity.role).iter().any(|e| e.path == route.path()) {
        RouteDecision::Render
    } else {
        tracing::debug!(route = route.path(), role = %identity.role, "route not visible to role");
        RouteDecision::Redirect(Route::Dashboard)
    }
}
