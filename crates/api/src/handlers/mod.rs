pub mod admin;
pub mod auth;
pub mod check;
pub mod groups;
pub mod stats;
pub mod websites;
