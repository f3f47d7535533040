//! GitHub transport.
//!
//! This module provides the `GitHubClient` used for every request the scan
//! makes: the github.com login form, the paginated REST repository listing,
//! the per-repository wiki creation page, and the rate-limit status endpoint.
//!
//! Listing pages are followed through the `Link` response header.

pub mod client;
pub mod error;
pub mod pagination;

pub use client::{GitHubClient, WikiPage};
pub use error::ApiError;
