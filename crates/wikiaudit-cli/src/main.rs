//! wikiaudit - find GitHub repositories whose wiki accepts new pages from
//! anyone who is signed in.
//!
//! Reads profile URLs from the accounts file, signs in once, then for every
//! account lists its repositories and probes each wiki. Results go to
//! `publicwiki.txt`.

mod cli;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wikiaudit_core::{
    parse_accounts_file, Account, AuthError, Config, CredentialStore, GitHubClient, ReportWriter, Scanner,
    Session, WikiProbe,
};

use cli::Cli;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    /// Scan completed
    Success = 0,
    /// Bad accounts file, failed login, or the scan was stopped by rate limiting
    Fatal = 1,
}

impl ExitCode {
    fn as_i32(self) -> i32 {
        self as i32
    }

    fn from_result(result: &Result<()>) -> Self {
        match result {
            Ok(()) => ExitCode::Success,
            Err(_) => ExitCode::Fatal,
        }
    }
}

/// Where the password came from, so a rejected keychain entry can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordSource {
    Prompt,
    Keychain,
}

/// Initialize the tracing subscriber for logging
fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to override the level (e.g., RUST_LOG=wikiaudit_core=trace)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

fn obtain_password(username: &str, use_keychain: bool) -> Result<(String, PasswordSource)> {
    if use_keychain && CredentialStore::has_credentials(username) {
        let password = CredentialStore::get_password(username)
            .context("Failed to read password from keychain")?;
        info!(username = username, "Using password stored in keychain");
        return Ok((password, PasswordSource::Keychain));
    }
    let password = rpassword::prompt_password("Password: ")?;
    Ok((password, PasswordSource::Prompt))
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    // Validate the accounts file before prompting or touching the network
    let accounts = parse_accounts_file(&cli.accounts_file)?;
    info!(count = accounts.len(), "Loaded accounts");

    let (password, source) = obtain_password(&cli.username, cli.keychain)?;
    scan_accounts(&config, &cli, &accounts, &password, source).await
}

/// Sign in, then scan every account into the report.
async fn scan_accounts(
    config: &Config,
    cli: &Cli,
    accounts: &[Account],
    password: &str,
    source: PasswordSource,
) -> Result<()> {
    let report_path = cli.output.clone().unwrap_or_else(|| config.report_path.clone());
    let report = ReportWriter::create(&report_path)
        .with_context(|| format!("Failed to create report file {}", report_path.display()))?;

    let client = GitHubClient::new(config).context("Failed to build HTTP client")?;
    let session = match Session::login(client, &cli.username, password).await {
        Ok(session) => session,
        Err(AuthError::InvalidCredentials) if source == PasswordSource::Keychain => {
            if let Err(e) = CredentialStore::delete(&cli.username) {
                warn!(error = %e, "Failed to remove rejected password from keychain");
            }
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    if cli.keychain && source == PasswordSource::Prompt {
        if let Err(e) = CredentialStore::store(session.username(), password) {
            warn!(error = %e, "Failed to store password in keychain");
        }
    }

    let probe = WikiProbe::new(config.rate_limit_pause());
    let mut scanner = Scanner::new(&session, probe, report);
    let summary = scanner.run(accounts).await?;

    info!(
        accounts = summary.accounts.len(),
        failed_accounts = summary.failed_accounts.len(),
        repositories = summary.repositories_probed(),
        probe_failures = summary.probe_failures(),
        public_wikis = summary.public_wiki_count(),
        "Scan finished. Wiki list @ {}",
        report_path.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_guard = match init_tracing(cli.log_level(), cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(ExitCode::Fatal.as_i32());
        }
    };

    let result = run(cli).await;
    if let Err(ref e) = result {
        error!("Exiting - {:#}", e);
    }
    let code = ExitCode::from_result(&result);

    // Flush the file appender before exiting
    drop(log_guard);
    std::process::exit(code.as_i32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOGIN_PAGE: &str = r#"<html><head><title>Sign in to GitHub</title></head><body>
<form action="/session" method="post">
  <input type="hidden" name="authenticity_token" value="tok" />
  <input type="hidden" name="timestamp" value="1700000000000" />
  <input type="hidden" name="timestamp_secret" value="secret" />
</form></body></html>"#;

    fn config_for(server: &MockServer) -> Config {
        Config {
            github_url: server.uri(),
            api_url: server.uri(),
            ..Config::default()
        }
    }

    fn cli_with_output(output: &Path) -> Cli {
        Cli::try_parse_from([
            "wikiaudit",
            "--accounts_file",
            "accounts.txt",
            "--username",
            "wikiaudit-test-user",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap()
    }

    async fn mount_login(server: &MockServer, landing: &str) {
        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_string(landing))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::from_result(&Ok(())).as_i32(), 0);
        assert_eq!(ExitCode::from_result(&Err(anyhow::anyhow!("boom"))).as_i32(), 1);
    }

    async fn assert_rejected_login_exits_without_listing(source: PasswordSource) {
        let server = MockServer::start().await;
        mount_login(&server, "<div>Incorrect username or password.</div>").await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/users/.*/repos$"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_output(&dir.path().join("publicwiki.txt"));
        let accounts = vec![Account::new("alice"), Account::new("bob")];

        let result = scan_accounts(&config_for(&server), &cli, &accounts, "wrong", source).await;

        let err = result.as_ref().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::InvalidCredentials)
        ));
        assert_eq!(ExitCode::from_result(&result), ExitCode::Fatal);
        assert_eq!(ExitCode::from_result(&result).as_i32(), 1);
    }

    #[tokio::test]
    async fn test_rejected_login_exits_with_code_1() {
        assert_rejected_login_exits_without_listing(PasswordSource::Prompt).await;
    }

    #[tokio::test]
    async fn test_rejected_keychain_password_exits_with_code_1() {
        // No entry exists for the test user, so the removal only warns
        assert_rejected_login_exits_without_listing(PasswordSource::Keychain).await;
    }

    #[tokio::test]
    async fn test_successful_scan_writes_report_and_exits_0() {
        let server = MockServer::start().await;
        mount_login(&server, "<title>GitHub</title>").await;
        Mock::given(method("GET"))
            .and(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("publicwiki.txt");
        let cli = cli_with_output(&report_path);

        let result = scan_accounts(
            &config_for(&server),
            &cli,
            &[Account::new("alice")],
            "pw",
            PasswordSource::Prompt,
        )
        .await;
        assert_eq!(ExitCode::from_result(&result), ExitCode::Success);

        let text = std::fs::read_to_string(&report_path).unwrap();
        assert!(text.starts_with("Date: "));
        assert!(text.contains("GitHub account alice [0] repositories.\n \t Public wiki found: \n"));
    }
}
