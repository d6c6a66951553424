use reqwest::StatusCode;
use thiserror::Error;

/// Possible error types while working with Zoom.
#[derive(Debug, Error)]
pub enum ZoomError {
    /// The client ID or client secret was not configured.
    #[error("missing Zoom OAuth credentials")]
    MissingCredentials,
    /// A configured endpoint could not be parsed.
    #[error("invalid value for {name}")]
    InvalidConfig {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    /// We were unable to reach the server, or the connection dropped.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server responded, but not with a 2xx status.
    #[error("unexpected response status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The response body was not the JSON we expected.
    #[error("unable to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The OAuth response decoded, but carried no usable access token.
    #[error("OAuth response did not contain an access token")]
    MalformedToken,
    /// An API request was abandoned because no access token could be obtained.
    #[error("failed to generate access token")]
    TokenUnavailable(#[source] Box<ZoomError>),
    /// The system keyring could not be read or written.
    #[error("credential storage error: {0}")]
    CredentialStorage(#[from] keyring::Error),
    /// Reading an interactive answer from the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A command-line value, such as an HTTP method or JSON body, was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ZoomError {
    /// Whether this error (or the error that caused it) is due to missing credentials.
    pub fn is_missing_credentials(&self) -> bool {
        match self {
            ZoomError::MissingCredentials => true,
            ZoomError::TokenUnavailable(cause) => cause.is_missing_credentials(),
            _ => false,
        }
    }

    /// The HTTP status returned by the server, if that's why we failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZoomError::Status { status, .. } => Some(*status),
            ZoomError::TokenUnavailable(cause) => cause.status(),
            _ => None,
        }
    }
}
