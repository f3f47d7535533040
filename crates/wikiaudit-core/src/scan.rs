//! Scan driver: enumerate each account's repositories, probe every wiki,
//! record the public ones.
//!
//! Only request-quota errors end the run. Before returning
//! [`ScanError::RateLimitExhausted`] the driver asks the rate-limit endpoint
//! how many requests remain so the user knows why it stopped. Any other
//! enumeration failure skips that account; any other probe failure skips
//! that repository.

use std::io::Write;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::accounts::Account;
use crate::api::ApiError;
use crate::auth::Session;
use crate::error::ScanError;
use crate::probe::WikiProbe;
use crate::report::ReportWriter;

/// Result of scanning one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountReport {
    pub account: Account,
    pub repositories: usize,
    pub public_wikis: Vec<String>,
    pub probe_failures: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub accounts: Vec<AccountReport>,
    /// Accounts whose repository listing could not be fetched
    pub failed_accounts: Vec<Account>,
}

impl ScanSummary {
    pub fn repositories_probed(&self) -> usize {
        self.accounts.iter().map(|a| a.repositories - a.probe_failures).sum()
    }

    pub fn public_wiki_count(&self) -> usize {
        self.accounts.iter().map(|a| a.public_wikis.len()).sum()
    }

    pub fn probe_failures(&self) -> usize {
        self.accounts.iter().map(|a| a.probe_failures).sum()
    }
}

pub struct Scanner<'a, W: Write> {
    session: &'a Session,
    probe: WikiProbe,
    report: ReportWriter<W>,
    date: NaiveDate,
}

impl<'a, W: Write> Scanner<'a, W> {
    pub fn new(session: &'a Session, probe: WikiProbe, report: ReportWriter<W>) -> Self {
        Self {
            session,
            probe,
            report,
            date: Local::now().date_naive(),
        }
    }

    /// Override the date written to the report header.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Scan every account in order.
    pub async fn run(&mut self, accounts: &[Account]) -> Result<ScanSummary, ScanError> {
        self.report.write_header(self.date)?;

        let mut summary = ScanSummary::default();
        for account in accounts {
            info!(account = %account, "Scanning GitHub account");
            match self.scan_account(account).await? {
                Some(report) => summary.accounts.push(report),
                None => summary.failed_accounts.push(account.clone()),
            }
        }
        Ok(summary)
    }

    /// Returns `Ok(None)` when the account's repositories could not be listed.
    async fn scan_account(&mut self, account: &Account) -> Result<Option<AccountReport>, ScanError> {
        let repos = match self.session.client().list_repositories(account.handle()).await {
            Ok(repos) => repos,
            Err(e) if e.is_quota() => return Err(self.abort(e).await),
            Err(e) => {
                warn!(account = %account, error = %e, "Failed to list repositories, skipping account");
                return Ok(None);
            }
        };

        info!(account = %account, total = repos.len(), "Repositories total");
        self.report.write_account(account.handle(), repos.len())?;

        let mut result = AccountReport {
            account: account.clone(),
            repositories: repos.len(),
            public_wikis: Vec::new(),
            probe_failures: 0,
        };

        for repo in &repos {
            info!(repo = %repo.html_url, "Scanning");
            if repo.wiki_disabled() {
                debug!(repo = %repo.html_url, "Listing reports wiki disabled, probing anyway");
            }
            match self.probe.probe(self.session, &repo.html_url).await {
                Ok(outcome) if outcome.is_public() => {
                    self.report.write_public_wiki(&repo.html_url)?;
                    result.public_wikis.push(repo.html_url.clone());
                }
                Ok(_) => {}
                Err(e) if e.is_quota() => return Err(self.abort(e).await),
                Err(e) => {
                    warn!(repo = %repo.html_url, error = %e, "Wiki probe failed");
                    result.probe_failures += 1;
                }
            }
        }

        Ok(Some(result))
    }

    /// Look up the remaining quota and turn `cause` into the terminal error.
    async fn abort(&self, cause: ApiError) -> ScanError {
        let remaining = match self.session.client().rate_limit().await {
            Ok(rate) => {
                error!(
                    remaining = rate.remaining,
                    limit = rate.limit,
                    reset = ?rate.reset_display(),
                    "Exiting - rate limit reached"
                );
                Some(rate.remaining)
            }
            Err(e) => {
                error!(error = %e, "Exiting - rate limit reached, remaining quota unknown");
                None
            }
        };
        ScanError::RateLimitExhausted { remaining, source: cause }
    }
}
