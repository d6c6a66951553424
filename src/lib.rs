//! A small client for the Zoom REST API.
//!
//! [`zoom::TokenProvider`] exchanges client credentials for an access token using the
//! `account_credentials` grant, and [`api::ApiClient`] attaches a freshly obtained token
//! to every request it makes.

pub mod api;
pub mod zoom;

pub use api::{ApiClient, HttpMethod, Meeting, NewMeeting, User};
pub use zoom::{TokenProvider, ZoomConfig, ZoomError};
