//! `safecity-portal`
//!
//! **Responsibility:** page models for the SafeCity client.
//!
//! Pages never own identity. Each one is handed the [`SessionStore`] and
//! only reads it or calls its operations:
//! - [`navbar`]: entries, user badge, logout
//! - [`dashboard`]: greeting and role-dependent quick actions
//! - [`registration`]: form state and submission
//! - [`routes`]: which page may render for whom
//!
//! [`SessionStore`]: safecity_session::SessionStore

pub mod dashboard;
pub mod navbar;
pub mod registration;
pub mod routes;

pub use dashboard::DashboardModel;
pub use navbar::{NavItem, NavbarModel};
pub use registration::{Field, RegistrationPage, RoleOption};
pub use routes::{Route, RouteDecision, guard};
