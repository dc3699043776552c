//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification for the
//!   admin login.
//! - [`google`] -- the opaque Google ID-token verification collaborator.

pub mod google;
pub mod password;
