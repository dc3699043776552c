//! Request extractors for authentication and authorization.

pub mod auth;
