//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, CallerIdentity, CallerResolver, FixedCallerResolver, caller_middleware};
