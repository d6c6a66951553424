mod config;
mod error;
mod oauth_client;
pub mod storage;

pub use config::{
    ZoomConfig, ACCOUNT_ID_VAR, API_BASE_URL_VAR, CLIENT_ID_VAR, CLIENT_SECRET_VAR, OAUTH_URL_VAR,
};
pub use error::ZoomError;
pub use oauth_client::{TokenProvider, TokenResponse};

/// The endpoint leveraged for obtaining an access token.
pub const OAUTH_TOKEN_ENDPOINT: &str = "https://zoom.us/oauth/token";

/// All API endpoints are relative to this base.
pub const API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Zoom accepts `me` in place of an account ID for user-level access.
pub const DEFAULT_ACCOUNT_ID: &str = "me";
