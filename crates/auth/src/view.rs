//! Authorization view-filter.
//!
//! Maps a role to the ordered navigation entries and dashboard actions it may
//! see. This is the only place the visibility policy is defined.
//!
//! - No IO
//! - No hidden state
//! - Same role in, same ordered entries out

use serde::Serialize;
use thiserror::Error;

use crate::{Identity, Role};

/// A navigable entry (navbar link or dashboard action button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewEntry {
    pub path: &'static str,
    pub label: &'static str,
}

impl ViewEntry {
    const fn new(path: &'static str, label: &'static str) -> Self {
        Self { path, label }
    }

    /// Exact match against the current location, used for highlighting.
    pub fn is_active(&self, location: &str) -> bool {
        self.path == location
    }
}

pub const DASHBOARD: ViewEntry = ViewEntry::new("/dashboard", "Dashboard");
pub const MAP_VIEW: ViewEntry = ViewEntry::new("/map", "Map View");
pub const REPORT_CRIME: ViewEntry = ViewEntry::new("/report", "Report Crime");
pub const MY_REPORTS: ViewEntry = ViewEntry::new("/my-reports", "My Reports");
pub const ADMIN_PANEL: ViewEntry = ViewEntry::new("/admin", "Admin Panel");

pub const REPORT_INCIDENT: ViewEntry = ViewEntry::new("/report", "Report Incident");
pub const VIEW_MY_REPORTS: ViewEntry = ViewEntry::new("/my-reports", "View My Reports");
pub const MANAGE_REPORTS: ViewEntry = ViewEntry::new("/admin/reports", "Manage Reports");
pub const USER_MANAGEMENT: ViewEntry = ViewEntry::new("/admin/users", "User Management");
pub const VIEW_SAFETY_MAP: ViewEntry = ViewEntry::new("/map", "View Safety Map");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// A role value outside the closed set reached the filter.
    #[error("unrecognized role '{0}'")]
    UnknownRole(String),
}

/// Navigation entries for an authenticated role, in display order.
pub fn visible_entries(role: Role) -> Vec<ViewEntry> {
    let mut entries = vec![DASHBOARD, MAP_VIEW];
    match role {
        Role::Citizen => entries.extend([REPORT_CRIME, MY_REPORTS]),
        Role::Police | Role::Admin => entries.push(ADMIN_PANEL),
    }
    entries
}

/// Dashboard quick actions for an authenticated role, in display order.
pub fn quick_actions(role: Role) -> Vec<ViewEntry> {
    let mut actions = match role {
        Role::Citizen => vec![REPORT_INCIDENT, VIEW_MY_REPORTS],
        Role::Police | Role::Admin => vec![MANAGE_REPORTS, USER_MANAGEMENT],
    };
    actions.push(VIEW_SAFETY_MAP);
    actions
}

/// Navigation entries for a raw role string (e.g. decoded from storage).
///
/// Unknown values never fall through to a default role.
pub fn visible_entries_for(raw_role: &str) -> Result<Vec<ViewEntry>, AuthzError> {
    let role: Role = raw_role
        .parse()
        .map_err(|_| AuthzError::UnknownRole(raw_role.to_string()))?;
    Ok(visible_entries(role))
}

/// Render-safe variant of [`visible_entries_for`]: an unknown role yields no
/// entries and is logged.
pub fn entries_or_empty(raw_role: &str) -> Vec<ViewEntry> {
    match visible_entries_for(raw_role) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(error = %err, "view filter rejected role; rendering no entries");
            Vec::new()
        }
    }
}

/// Navigation for whoever is current. Anonymous visitors get nothing.
pub fn navigation_for(identity: Option<&Identity>) -> Vec<ViewEntry> {
    identity.map(|i| visible_entries(i.role)).unwrap_or_default()
}
