use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed - incorrect username or password")]
    InvalidCredentials,

    #[error("Login page is missing the '{0}' form field")]
    MissingFormField(&'static str),

    #[error("Login request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),
}
