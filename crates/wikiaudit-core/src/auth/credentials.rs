use keyring::Entry;

use super::AuthError;

const SERVICE_NAME: &str = "wikiaudit";

pub struct CredentialStore;

impl CredentialStore {
    /// Store the password for a username in the OS keychain
    pub fn store(username: &str, password: &str) -> Result<(), AuthError> {
        let entry = Entry::new(SERVICE_NAME, username)?;
        entry.set_password(password)?;
        Ok(())
    }

    /// Retrieve the password for a username from the OS keychain
    pub fn get_password(username: &str) -> Result<String, AuthError> {
        let entry = Entry::new(SERVICE_NAME, username)?;
        Ok(entry.get_password()?)
    }

    /// Delete stored credentials for a username
    pub fn delete(username: &str) -> Result<(), AuthError> {
        let entry = Entry::new(SERVICE_NAME, username)?;
        entry.delete_credential()?;
        Ok(())
    }

    /// Check if credentials exist for a username
    pub fn has_credentials(username: &str) -> bool {
        Entry::new(SERVICE_NAME, username)
            .and_then(|entry| entry.get_password())
            .is_ok()
    }
}
