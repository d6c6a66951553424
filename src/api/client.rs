use crate::zoom::{TokenProvider, ZoomConfig, ZoomError};
use reqwest::header;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, error};

/// The HTTP methods we issue API requests with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ZoomError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ZoomError::InvalidArgument(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues authenticated requests against the Zoom API.
///
/// Each request obtains its own access token first; nothing is shared between calls
/// apart from the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    tokens: TokenProvider,
}

impl ApiClient {
    /// Creates a new API client around the given configuration.
    pub fn new(config: ZoomConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            tokens: TokenProvider::with_client(config, client.clone()),
            client,
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        self.tokens.config()
    }

    /// Performs a body-less GET against the given endpoint.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ZoomError> {
        self.execute_request::<T, ()>(endpoint, HttpMethod::Get, None)
            .await
    }

    /// Obtains a fresh access token, then performs the given request.
    ///
    /// `endpoint` is relative to the API base, e.g. `/users/me`. The response body
    /// is decoded as `T`; an empty body is treated as JSON `null`.
    pub async fn execute_request<T, B>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<T, ZoomError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let access_token = match self.tokens.obtain_access_token().await {
            Ok(token) => token,
            Err(err) => {
                error!("Error making Zoom API request: failed to generate access token");
                return Err(ZoomError::TokenUnavailable(Box::new(err)));
            }
        };

        self.send(&access_token, endpoint, method, body)
            .await
            .map_err(|err| {
                error!(%method, endpoint, "Error making Zoom API request: {err}");
                err
            })
    }

    async fn send<T, B>(
        &self,
        access_token: &str,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<T, ZoomError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config().endpoint_url(endpoint);
        debug!(%method, %url, "making Zoom API request");

        let mut request = self
            .client
            .request(method.into(), url)
            .bearer_auth(access_token)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        let result = request.send().await?;
        let status = result.status();
        let response_text = result.text().await?;
        if !status.is_success() {
            return Err(ZoomError::Status {
                status,
                body: response_text,
            });
        }

        // Some endpoints (e.g. deletions) respond with 204 and no content at all.
        let payload = if response_text.trim().is_empty() {
            "null"
        } else {
            response_text.as_str()
        };
        Ok(serde_json::from_str(payload)?)
    }
}
