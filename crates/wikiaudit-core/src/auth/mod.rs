//! Authentication module for signing in to github.com.
//!
//! This module provides:
//! - `Session`: the signed-in HTTP context, created once and passed to every
//!   operation that talks to GitHub
//! - `LoginForm`: the hidden fields scraped from the login page
//! - `CredentialStore`: optional OS-level password storage via keyring

pub mod credentials;
pub mod error;
pub mod session;

pub use credentials::CredentialStore;
pub use error::AuthError;
pub use session::{LoginForm, Session};
