//! Navigation bar model.

use serde::Serialize;

use safecity_auth::{ViewEntry, navigation_for};
use safecity_session::SessionStore;

use crate::routes::Route;

pub const BRAND: &str = "SafeCity Portal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub entry: ViewEntry,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarModel {
    pub brand: &'static str,
    pub user_name: String,
    /// Role badge text, the role's wire value (`citizen`, `police`, `admin`).
    pub role_badge: &'static str,
    pub items: Vec<NavItem>,
}

impl NavbarModel {
    /// Build the navbar for whoever is current. `None` for anonymous
    /// visitors; the page redirects them instead of rendering a navbar.
    pub fn build(session: &SessionStore, location: &str) -> Option<Self> {
        let identity = session.current()?;
        let items = navigation_for(Some(&identity))
            .into_iter()
            .map(|entry| NavItem {
                active: entry.is_active(location),
                entry,
            })
            .collect();

        Some(Self {
            brand: BRAND,
            user_name: identity.name.to_string(),
            role_badge: identity.role.as_str(),
            items,
        })
    }

    pub fn active_item(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.active)
    }
}

/// The logout button: end the session and go back to the landing page.
pub fn logout(session: &SessionStore) -> Route {
    session.logout();
    Route::Landing
}
