//! Core library for wikiaudit.
//!
//! Finds GitHub repositories whose wiki accepts new pages from any
//! signed-in user. The pipeline is strictly sequential:
//!
//! - `accounts`: reads profile URLs and extracts account handles
//! - `auth`: signs in through the github.com login form and holds the session
//! - `api`: REST/HTML transport, repository enumeration, rate-limit status
//! - `probe`: requests `<repo>/wiki/_new` and inspects the page title
//! - `report`: writes the flat `publicwiki.txt` report
//! - `scan`: drives the above per account and decides when to abort

pub mod accounts;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod report;
pub mod scan;

pub use accounts::{parse_accounts_file, Account};
pub use api::{ApiError, GitHubClient};
pub use auth::{AuthError, CredentialStore, Session};
pub use config::Config;
pub use error::ScanError;
pub use probe::{ProbeOutcome, WikiProbe};
pub use report::ReportWriter;
pub use scan::{AccountReport, ScanSummary, Scanner};
