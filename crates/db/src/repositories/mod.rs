//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query on user-owned
//! data is scoped by `user_id`; cross-user reads or writes are a
//! correctness bug, not just a privacy concern.

pub mod admin_repo;
pub mod group_repo;
pub mod stats_repo;
pub mod user_repo;
pub mod website_repo;

pub use admin_repo::AdminRepo;
pub use group_repo::GroupRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use website_repo::WebsiteRepo;
