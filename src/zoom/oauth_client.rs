use super::{ZoomConfig, ZoomError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header;
use serde::Deserialize;
use tracing::{debug, error};

/// The response format from the OAuth token endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime of the token in seconds. We do not reuse tokens, so this is informational.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Exchanges client credentials for short-lived access tokens.
///
/// Tokens are never cached: every call to [`TokenProvider::obtain_access_token`]
/// performs a fresh exchange.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    config: ZoomConfig,
    client: reqwest::Client,
}

impl TokenProvider {
    pub fn new(config: ZoomConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a provider sharing an existing HTTP client.
    pub fn with_client(config: ZoomConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Attempt to obtain an access token via the `account_credentials` grant.
    pub async fn obtain_access_token(&self) -> Result<String, ZoomError> {
        let response = self.request_token().await.map_err(|err| {
            error!("Error generating Zoom access token: {err}");
            err
        })?;
        Ok(response.access_token)
    }

    async fn request_token(&self) -> Result<TokenResponse, ZoomError> {
        // Credentials are checked before anything touches the network.
        let (client_id, client_secret) = self.config.credentials()?;
        let basic_auth = STANDARD.encode(format!("{client_id}:{client_secret}"));

        debug!(url = %self.config.oauth_url, "requesting Zoom access token");
        let result = self
            .client
            .post(self.config.oauth_url.clone())
            .header(header::AUTHORIZATION, format!("Basic {basic_auth}"))
            // `form` sets our content type to `application/x-www-form-urlencoded`.
            .form(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .send()
            .await?;

        let status = result.status();
        let response_text = result.text().await?;
        if !status.is_success() {
            return Err(ZoomError::Status {
                status,
                body: response_text,
            });
        }

        let body: TokenResponse = serde_json::from_str(&response_text)?;
        if body.access_token.is_empty() {
            return Err(ZoomError::MalformedToken);
        }

        debug!(
            token_type = ?body.token_type,
            expires_in = ?body.expires_in,
            "obtained Zoom access token"
        );
        Ok(body)
    }
}
