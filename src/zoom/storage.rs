use super::ZoomError;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::{io, io::Write};
use tracing::debug;

const KEYRING_SERVICE: &str = "zoomctl";
const KEYRING_USER: &str = "OAuth2 Client Credentials";

/// The format of our JSON within our credential storage.
///
/// Both halves live in a single entry so we never end up with one but not the other.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CredentialStorage {
    pub client_id: String,
    pub client_secret: String,
}

impl CredentialStorage {
    pub fn from_json(contents: &str) -> Result<Self, ZoomError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json(&self) -> Result<String, ZoomError> {
        Ok(serde_json::to_string(&self)?)
    }
}

fn entry() -> Result<Entry, ZoomError> {
    Ok(Entry::new(KEYRING_SERVICE, KEYRING_USER)?)
}

/// Retrieves stored client credentials from the user's keyring, if any exist.
pub fn load() -> Result<Option<CredentialStorage>, ZoomError> {
    match entry()?.get_password() {
        Ok(contents) => CredentialStorage::from_json(&contents).map(Some),
        Err(keyring::Error::NoEntry) => {
            debug!("no stored Zoom credentials in keyring");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Persists client credentials to the user's keyring.
pub fn store(credentials: &CredentialStorage) -> Result<(), ZoomError> {
    entry()?.set_password(&credentials.to_json()?)?;
    Ok(())
}

/// Quick and dirty function to read input from the user.
pub fn interactive_prompt(prompt_type: &str) -> Result<String, ZoomError> {
    let mut response = String::new();
    print!("Please enter {prompt_type} for your Zoom app: ");
    io::stdout().flush()?;
    io::stdin().read_line(&mut response)?;

    Ok(response.trim().to_string())
}

/// Interactively request the client ID and secret, and store them.
pub fn request_client_credentials() -> Result<CredentialStorage, ZoomError> {
    let credentials = CredentialStorage {
        client_id: interactive_prompt("the client ID")?,
        client_secret: interactive_prompt("the client secret")?,
    };
    if credentials.client_id.is_empty() || credentials.client_secret.is_empty() {
        return Err(ZoomError::MissingCredentials);
    }

    store(&credentials)?;
    Ok(credentials)
}
