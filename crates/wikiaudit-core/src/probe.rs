//! Wiki creation page probe.
//!
//! A repository's wiki is treated as publicly creatable when the signed-in
//! session can load `<repo>/wiki/_new` and the page title reads
//! "Create New Page". Anything else (sign-in page, 404, wiki disabled) is
//! not flagged.

use std::time::Duration;

use reqwest::StatusCode;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::auth::Session;
use crate::config::DEFAULT_RATE_LIMIT_PAUSE_SECS;

/// Title fragment GitHub renders on an editable new-page form.
const CREATE_PAGE_MARKER: &str = "Create New Page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The new-page form is open to this session
    PublicWiki { title: String },
    NotPublic { title: String },
    /// The page had no usable `<title>`
    NoTitle,
}

impl ProbeOutcome {
    pub fn is_public(&self) -> bool {
        matches!(self, ProbeOutcome::PublicWiki { .. })
    }
}

/// Return the trimmed text of the first `<title>` element, if non-empty.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!title.is_empty()).then_some(title)
}

pub fn is_creatable_title(title: &str) -> bool {
    title.contains(CREATE_PAGE_MARKER)
}

/// Classify a wiki creation page by its title.
pub fn classify(html: &str) -> ProbeOutcome {
    match extract_title(html) {
        Some(title) if is_creatable_title(&title) => ProbeOutcome::PublicWiki { title },
        Some(title) => ProbeOutcome::NotPublic { title },
        None => ProbeOutcome::NoTitle,
    }
}

pub struct WikiProbe {
    rate_limit_pause: Duration,
}

impl Default for WikiProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_RATE_LIMIT_PAUSE_SECS))
    }
}

impl WikiProbe {
    pub fn new(rate_limit_pause: Duration) -> Self {
        Self { rate_limit_pause }
    }

    /// Probe one repository.
    ///
    /// On a 429 the probe pauses for the fixed interval and then classifies
    /// the body it already has; the request is not re-issued.
    pub async fn probe(&self, session: &Session, repo_url: &str) -> Result<ProbeOutcome, ApiError> {
        let page = session.client().fetch_wiki_new(repo_url).await?;

        if page.status == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                repo = repo_url,
                pause_secs = self.rate_limit_pause.as_secs(),
                "429 Too Many Requests response received, pausing"
            );
            tokio::time::sleep(self.rate_limit_pause).await;
        }

        let outcome = classify(&page.body);
        match &outcome {
            ProbeOutcome::PublicWiki { title } => {
                info!(repo = repo_url, title = %title, "Public wiki found");
            }
            ProbeOutcome::NotPublic { title } => {
                debug!(repo = repo_url, status = %page.status, title = %title, "Wiki not open");
            }
            ProbeOutcome::NoTitle => {
                info!(repo = repo_url, status = %page.status, "No title found on repo");
            }
        }
        Ok(outcome)
    }
}
