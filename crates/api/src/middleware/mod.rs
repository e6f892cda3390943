//! Request middleware for the API.

pub mod auth;

pub use auth::{AuthGateway, AuthPolicy, PathMatcher, auth_gateway};
