use serde::{Deserialize, Serialize};

/// A repository as returned by the REST listing. Only `html_url` is
/// required; it is the canonical URL the wiki probe builds on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub html_url: String,
    #[serde(default)]
    pub has_wiki: Option<bool>,
}

impl Repository {
    /// True only when the listing explicitly says the wiki feature is off.
    pub fn wiki_disabled(&self) -> bool {
        self.has_wiki == Some(false)
    }
}

/// URL of the page GitHub serves for creating a new wiki page.
pub fn wiki_new_url(repo_url: &str) -> String {
    format!("{}/wiki/_new", repo_url.trim_end_matches('/'))
}
