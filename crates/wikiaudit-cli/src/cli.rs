//! Command-line interface definitions for wikiaudit.
//!
//! ```bash
//! # Scan the accounts listed in accounts.txt, signing in as octocat
//! wikiaudit --accounts_file accounts.txt --username octocat
//!
//! # Reuse the password stored in the OS keychain, debug logging to a file
//! wikiaudit --accounts_file accounts.txt --username octocat --keychain -v --log-file scan.log
//! ```
//!
//! The password is always read interactively (or from the keychain with
//! `--keychain`); it is never accepted as an argument.

use clap::Parser;
use std::path::PathBuf;

/// Find world-editable GitHub repository wikis.
#[derive(Debug, Parser)]
#[command(name = "wikiaudit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text file with one GitHub profile URL per line
    #[arg(long = "accounts_file", visible_alias = "accounts-file", value_name = "PATH")]
    pub accounts_file: PathBuf,

    /// GitHub username used for authentication
    #[arg(long, value_name = "USERNAME")]
    pub username: String,

    /// Report file (defaults to publicwiki.txt in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Read the password from the OS keychain and store it after a successful login
    #[arg(long)]
    pub keychain: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_required_flags() {
        let cli = Cli::try_parse_from([
            "wikiaudit",
            "--accounts_file",
            "accounts.txt",
            "--username",
            "octocat",
        ])
        .unwrap();
        assert_eq!(cli.accounts_file, PathBuf::from("accounts.txt"));
        assert_eq!(cli.username, "octocat");
        assert!(cli.output.is_none());
        assert!(!cli.keychain);
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_parse_hyphenated_alias_and_verbosity() {
        let cli = Cli::try_parse_from([
            "wikiaudit",
            "--accounts-file",
            "a.txt",
            "--username",
            "u",
            "-vv",
            "--output",
            "out.txt",
        ])
        .unwrap();
        assert_eq!(cli.accounts_file, PathBuf::from("a.txt"));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_missing_username_is_rejected() {
        assert!(Cli::try_parse_from(["wikiaudit", "--accounts_file", "a.txt"]).is_err());
    }

    #[test]
    fn test_password_flag_does_not_exist() {
        assert!(Cli::try_parse_from([
            "wikiaudit",
            "--accounts_file",
            "a.txt",
            "--username",
            "u",
            "--password",
            "secret",
        ])
        .is_err());
    }
}
