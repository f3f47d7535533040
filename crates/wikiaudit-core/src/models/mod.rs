//! Data models for GitHub API responses.
//!
//! - `Repository`: one entry of the `/users/{handle}/repos` listing
//! - `RateLimit`: the core quota from `/rate_limit`

pub mod rate_limit;
pub mod repository;

pub use rate_limit::{RateLimit, RateLimitResponse};
pub use repository::Repository;
