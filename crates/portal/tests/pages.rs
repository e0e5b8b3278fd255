use std::sync::Arc;

use safecity_auth::{Password, Profile, Registration, Role};
use safecity_portal::navbar::{self, BRAND};
use safecity_portal::{DashboardModel, Field, NavbarModel, RegistrationPage, Route, RouteDecision, guard};
use safecity_session::{
    InMemoryCredentialStore, InMemoryIdentityBackend, SessionConfig, SessionStatus, SessionStore,
};

fn session() -> (Arc<SessionStore>, Arc<InMemoryIdentityBackend>) {
    let backend = Arc::new(InMemoryIdentityBackend::default());
    let store = SessionStore::new(
        backend.clone(),
        Arc::new(InMemoryCredentialStore::new()),
        SessionConfig::default(),
    );
    (Arc::new(store), backend)
}

async fn signed_in_as(role: Role) -> Arc<SessionStore> {
    let (store, _) = session();
    store
        .register(Registration {
            profile: Profile::new("Jordan Lee", "jordan@example.com", role).unwrap(),
            password: Password::new("secret1"),
        })
        .await
        .unwrap();
    store
}

fn filled_page() -> RegistrationPage {
    let mut page = RegistrationPage::new();
    page.set(Field::Name, "Jordan Lee");
    page.set(Field::Email, "jordan@example.com");
    page.set(Field::Password, "secret1");
    page.set(Field::ConfirmPassword, "secret1");
    page
}

#[tokio::test]
async fn citizen_navbar_highlights_current_page() {
    let store = signed_in_as(Role::Citizen).await;
    let navbar = NavbarModel::build(&store, "/report").unwrap();

    assert_eq!(navbar.brand, BRAND);
    assert_eq!(navbar.user_name, "Jordan Lee");
    assert_eq!(navbar.role_badge, "citizen");

    let labels: Vec<_> = navbar.items.iter().map(|i| i.entry.label).collect();
    assert_eq!(labels, ["Dashboard", "Map View", "Report Crime", "My Reports"]);
    assert_eq!(navbar.active_item().unwrap().entry.label, "Report Crime");
    assert_eq!(navbar.items.iter().filter(|i| i.active).count(), 1);
}

#[tokio::test]
async fn police_navbar_shows_admin_panel() {
    let store = signed_in_as(Role::Police).await;
    let navbar = NavbarModel::build(&store, "/somewhere-else").unwrap();

    let labels: Vec<_> = navbar.items.iter().map(|i| i.entry.label).collect();
    assert_eq!(labels, ["Dashboard", "Map View", "Admin Panel"]);
    assert!(navbar.active_item().is_none());
}

#[test]
fn anonymous_visitor_gets_no_navbar_and_is_redirected() {
    let (store, _) = session();
    assert!(NavbarModel::build(&store, "/dashboard").is_none());
    assert!(DashboardModel::build(&store).is_none());
    assert_eq!(
        guard(Route::Dashboard, store.current().as_ref()),
        RouteDecision::Redirect(Route::Landing)
    );
}

#[tokio::test]
async fn logout_button_returns_to_landing() {
    let store = signed_in_as(Role::Admin).await;
    assert_eq!(navbar::logout(&store), Route::Landing);
    assert_eq!(store.status(), SessionStatus::Anonymous);
    assert!(NavbarModel::build(&store, "/dashboard").is_none());
}

#[tokio::test]
async fn dashboard_actions_follow_role() {
    let citizen = signed_in_as(Role::Citizen).await;
    let dashboard = DashboardModel::build(&citizen).unwrap();
    assert_eq!(dashboard.greeting, "Welcome to SafeCity, Jordan Lee.");
    let labels: Vec<_> = dashboard.quick_actions.iter().map(|a| a.label).collect();
    assert_eq!(labels, ["Report Incident", "View My Reports", "View Safety Map"]);

    let admin = signed_in_as(Role::Admin).await;
    let labels: Vec<_> = DashboardModel::build(&admin)
        .unwrap()
        .quick_actions
        .iter()
        .map(|a| a.label)
        .collect();
    assert_eq!(labels, ["Manage Reports", "User Management", "View Safety Map"]);
}

#[tokio::test]
async fn successful_registration_navigates_to_dashboard() {
    let (store, _) = session();
    let mut page = filled_page();
    page.set(Field::Role, "police");

    assert_eq!(page.submit(&store).await, Some(Route::Dashboard));
    assert_eq!(store.status(), SessionStatus::Authenticated);
    assert_eq!(page.error, None);
    assert_eq!(store.current().unwrap().role, Role::Police);
}

#[tokio::test]
async fn short_password_shows_error_and_keeps_fields() {
    let (store, backend) = session();
    let mut page = filled_page();
    page.set(Field::Password, "abc12");
    page.set(Field::ConfirmPassword, "abc12");
    let before = page.form.clone();

    assert_eq!(page.submit(&store).await, None);
    assert_eq!(page.error.as_deref(), Some("Password must be at least 6 characters"));
    assert_eq!(page.form, before);
    assert_eq!(store.status(), SessionStatus::Anonymous);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn mismatched_passwords_show_error() {
    let (store, backend) = session();
    let mut page = filled_page();
    page.set(Field::ConfirmPassword, "secret2");

    assert_eq!(page.submit(&store).await, None);
    assert_eq!(page.error.as_deref(), Some("Passwords do not match"));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn backend_conflict_is_shown_verbatim() {
    let (store, _) = session();
    let mut first = filled_page();
    first.submit(&store).await.unwrap();
    navbar::logout(&store);

    let mut second = filled_page();
    assert_eq!(second.submit(&store).await, None);
    assert_eq!(
        second.error.as_deref(),
        Some("an account already exists for this email")
    );
}

#[test]
fn role_picker_defaults_to_citizen() {
    let page = RegistrationPage::new();
    let options = page.role_options();

    let values: Vec<_> = options.iter().map(|o| o.value).collect();
    assert_eq!(values, ["citizen", "police", "admin"]);
    assert_eq!(options[1].label, "Police Officer");
    assert_eq!(
        options.iter().filter(|o| o.selected).map(|o| o.value).collect::<Vec<_>>(),
        ["citizen"]
    );
}
