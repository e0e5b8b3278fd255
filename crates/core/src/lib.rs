//! `safecity-core` — foundation building blocks.
//!
//! This crate contains **pure** primitives shared by the auth and session
//! crates (no I/O, no async).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{ValidationError, ValidationResult};
pub use id::IdentityId;
pub use value_object::ValueObject;
