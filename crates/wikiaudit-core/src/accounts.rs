//! Accounts file parsing.
//!
//! The accounts file holds one GitHub profile URL per line, e.g.
//! `https://github.com/octocat`. Blank lines are ignored; order and
//! duplicates are preserved.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::ScanError;

/// Profile URL prefixes accepted in the accounts file.
const PROFILE_PREFIXES: [&str; 4] = [
    "https://github.com/",
    "https://www.github.com/",
    "http://github.com/",
    "http://www.github.com/",
];

/// A GitHub account handle, e.g. `octocat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account(String);

impl Account {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the account handle from a single profile URL line.
///
/// Returns `None` for anything that is not `<prefix><handle>` with an
/// optional trailing slash, query, or fragment.
pub fn parse_account_line(line: &str) -> Option<Account> {
    let line = line.trim();
    let rest = PROFILE_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))?;
    // Profile links are often pasted with a query or fragment (`?tab=repositories`)
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let handle = rest.strip_suffix('/').unwrap_or(rest);

    if is_valid_handle(handle) {
        Some(Account::new(handle))
    } else {
        None
    }
}

/// GitHub handles are ASCII alphanumerics and hyphens.
fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Parse the contents of an accounts file.
pub fn parse_accounts(contents: &str) -> Result<Vec<Account>, ScanError> {
    let mut accounts = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let account = parse_account_line(line).ok_or_else(|| ScanError::InvalidAccountLine {
            line: idx + 1,
            content: line.trim().to_string(),
        })?;
        accounts.push(account);
    }
    Ok(accounts)
}

/// Read and parse the accounts file at `path`.
///
/// Fails with `AccountsFileNotFound` before touching the network when the
/// path is not a regular file.
pub fn parse_accounts_file(path: &Path) -> Result<Vec<Account>, ScanError> {
    if !path.is_file() {
        return Err(ScanError::AccountsFileNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ScanError::AccountsFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let accounts = parse_accounts(&contents)?;
    debug!(path = %path.display(), count = accounts.len(), "Parsed accounts file");
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_account_line() {
        assert_eq!(
            parse_account_line("https://github.com/octocat"),
            Some(Account::new("octocat"))
        );
        assert_eq!(
            parse_account_line("  https://github.com/octocat/  "),
            Some(Account::new("octocat"))
        );
        assert_eq!(
            parse_account_line("http://www.github.com/some-org"),
            Some(Account::new("some-org"))
        );

        assert_eq!(
            parse_account_line("https://github.com/octocat?tab=repositories"),
            Some(Account::new("octocat"))
        );
        assert_eq!(
            parse_account_line("https://github.com/octocat/#readme"),
            Some(Account::new("octocat"))
        );

        assert_eq!(parse_account_line("https://github.com/"), None);
        assert_eq!(parse_account_line("https://github.com/?tab=repositories"), None);
        assert_eq!(parse_account_line("https://github.com/.."), None);
        assert_eq!(parse_account_line("https://github.com/..%2F"), None);
        assert_eq!(parse_account_line("https://github.com/octo_cat"), None);
        assert_eq!(parse_account_line("https://github.com/octo cat"), None);
        assert_eq!(parse_account_line("https://github.com/octocat/hello-world"), None);
        assert_eq!(parse_account_line("https://gitlab.com/octocat"), None);
        assert_eq!(parse_account_line("octocat"), None);
    }

    #[test]
    fn test_parse_accounts_counts_non_empty_lines() {
        let contents = "https://github.com/alice\n\nhttps://github.com/bob\n   \nhttps://github.com/alice\n";
        let accounts = parse_accounts(contents).unwrap();
        let handles: Vec<&str> = accounts.iter().map(|a| a.handle()).collect();
        assert_eq!(handles, vec!["alice", "bob", "alice"]);
    }

    #[test]
    fn test_parse_accounts_reports_bad_line() {
        let contents = "https://github.com/alice\nnot a url\n";
        match parse_accounts(contents) {
            Err(ScanError::InvalidAccountLine { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "not a url");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_accounts_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            parse_accounts_file(&path),
            Err(ScanError::AccountsFileNotFound(_))
        ));
        // A directory is not a valid accounts file either
        assert!(matches!(
            parse_accounts_file(dir.path()),
            Err(ScanError::AccountsFileNotFound(_))
        ));
    }

    #[test]
    fn test_parse_accounts_file_windows_line_endings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "https://github.com/alice\r\nhttps://github.com/bob\r\n").unwrap();
        let accounts = parse_accounts_file(file.path()).unwrap();
        assert_eq!(accounts, vec![Account::new("alice"), Account::new("bob")]);
    }
}
