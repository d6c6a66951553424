use super::{ZoomError, API_BASE_URL, DEFAULT_ACCOUNT_ID, OAUTH_TOKEN_ENDPOINT};
use std::fmt;
use url::Url;

/// Environment variables consulted by [`ZoomConfig::from_env`].
pub const CLIENT_ID_VAR: &str = "ZOOM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "ZOOM_CLIENT_SECRET";
pub const ACCOUNT_ID_VAR: &str = "ZOOM_ACCOUNT_ID";
pub const OAUTH_URL_VAR: &str = "ZOOM_OAUTH_URL";
pub const API_BASE_URL_VAR: &str = "ZOOM_API_BASE_URL";

/// Everything needed to talk to Zoom.
///
/// Credentials are optional here: a missing client ID or secret only becomes
/// an error once we actually attempt to obtain an access token.
#[derive(Clone)]
pub struct ZoomConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    /// The account ID sent with the `account_credentials` grant.
    pub account_id: String,
    /// Where we exchange credentials for an access token.
    pub oauth_url: Url,
    /// The base all API endpoints are appended to.
    pub api_base_url: Url,
}

impl ZoomConfig {
    /// Creates a configuration around the given credentials with Zoom's default endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ZoomError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration using the given lookup for variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ZoomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            client_id: lookup(CLIENT_ID_VAR),
            client_secret: lookup(CLIENT_SECRET_VAR),
            ..Self::default()
        };

        if let Some(account_id) = lookup(ACCOUNT_ID_VAR).filter(|value| !value.is_empty()) {
            config.account_id = account_id;
        }
        if let Some(oauth_url) = lookup(OAUTH_URL_VAR) {
            config.oauth_url = parse_url(OAUTH_URL_VAR, &oauth_url)?;
        }
        if let Some(api_base_url) = lookup(API_BASE_URL_VAR) {
            config.api_base_url = parse_url(API_BASE_URL_VAR, &api_base_url)?;
        }

        Ok(config)
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn with_oauth_url(mut self, oauth_url: Url) -> Self {
        self.oauth_url = oauth_url;
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: Url) -> Self {
        self.api_base_url = api_base_url;
        self
    }

    /// Uses the given credentials when the configured ones are incomplete.
    pub fn with_fallback_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        if !self.has_credentials() {
            self.client_id = Some(client_id.into());
            self.client_secret = Some(client_secret.into());
        }
        self
    }

    /// Whether both halves of the client credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    /// Returns the client ID and secret, treating empty values as missing.
    pub fn credentials(&self) -> Result<(&str, &str), ZoomError> {
        let client_id = self.client_id.as_deref().filter(|id| !id.is_empty());
        let client_secret = self.client_secret.as_deref().filter(|secret| !secret.is_empty());
        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(ZoomError::MissingCredentials),
        }
    }

    /// Joins an endpoint such as `/users/me` onto the API base.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        format!("{base}{endpoint}")
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            oauth_url: Url::parse(OAUTH_TOKEN_ENDPOINT).expect("should be able to parse token endpoint"),
            api_base_url: Url::parse(API_BASE_URL).expect("should be able to parse API base URL"),
        }
    }
}

// The secret must never end up in logs.
impl fmt::Debug for ZoomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .field("oauth_url", &self.oauth_url.as_str())
            .field("api_base_url", &self.api_base_url.as_str())
            .finish()
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ZoomError> {
    Url::parse(value).map_err(|source| ZoomError::InvalidConfig { name, source })
}
