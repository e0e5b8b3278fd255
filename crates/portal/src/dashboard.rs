//! Dashboard page model (the role-dependent parts only).

use serde::Serialize;

use safecity_auth::{ViewEntry, quick_actions};
use safecity_session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardModel {
    pub greeting: String,
    pub quick_actions: Vec<ViewEntry>,
}

impl DashboardModel {
    pub fn build(session: &SessionStore) -> Option<Self> {
        let identity = session.current()?;
        Some(Self {
            greeting: format!("Welcome to SafeCity, {}.", identity.name),
            quick_actions: quick_actions(identity.role),
        })
    }
}
