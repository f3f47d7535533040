use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::api::GitHubClient;

use super::AuthError;

/// Phrase github.com renders when the username/password pair is rejected.
const LOGIN_FAILED_PHRASE: &str = "Incorrect username or password";

/// Hidden inputs the session endpoint expects back from the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub authenticity_token: String,
    pub timestamp: String,
    pub timestamp_secret: String,
}

impl LoginForm {
    /// Extract the hidden fields from the login page HTML.
    pub fn parse(html: &str) -> Result<Self, AuthError> {
        let document = Html::parse_document(html);
        Ok(Self {
            authenticity_token: input_value(&document, "authenticity_token")?,
            timestamp: input_value(&document, "timestamp")?,
            timestamp_secret: input_value(&document, "timestamp_secret")?,
        })
    }
}

fn input_value(document: &Html, name: &'static str) -> Result<String, AuthError> {
    Selector::parse(&format!(r#"input[name="{}"]"#, name))
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .find_map(|el| el.value().attr("value").map(str::to_string))
        })
        .ok_or(AuthError::MissingFormField(name))
}

/// The signed-in HTTP context.
///
/// Built once at startup by [`Session::login`] and then borrowed by the
/// enumerator and the probe. The cookie store inside the client carries
/// the github.com session; it is never persisted.
pub struct Session {
    client: GitHubClient,
    username: String,
}

impl Session {
    /// Sign in through the github.com login form.
    ///
    /// Fetches the login page, posts the credentials together with the
    /// page's hidden fields, and inspects the landing page. A rejected
    /// password is never retried.
    pub async fn login(
        client: GitHubClient,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        let login_page = client.fetch_login_page().await?;
        let form = LoginForm::parse(&login_page)?;
        debug!("Parsed login form fields");

        let fields = [
            ("login", username),
            ("password", password),
            ("authenticity_token", form.authenticity_token.as_str()),
            ("timestamp", form.timestamp.as_str()),
            ("timestamp_secret", form.timestamp_secret.as_str()),
            ("commit", "Sign in"),
            ("js-webauthn-support", "supported"),
            ("js-webauthn-iuvpaa-support", "unsupported"),
        ];
        let landing = client.submit_login(&fields).await?;

        if landing.contains(LOGIN_FAILED_PHRASE) {
            return Err(AuthError::InvalidCredentials);
        }

        info!(username = username, "Logged in");
        Ok(Self {
            client,
            username: username.to_string(),
        })
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
