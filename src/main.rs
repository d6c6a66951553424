use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{error::Error, process::ExitCode};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use zoomctl::{
    zoom::{storage, ZoomConfig},
    ApiClient, HttpMethod, NewMeeting, ZoomError,
};

/// Talk to the Zoom API using server-to-server OAuth credentials.
#[derive(Debug, Parser)]
#[command(name = "zoomctl", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store a client ID and secret in the system keyring.
    Login,
    /// Show the user the credentials belong to.
    Me,
    /// Show a meeting.
    Meeting {
        meeting_id: String,
    },
    /// Create a meeting hosted by the given user.
    CreateMeeting {
        /// User ID or email address; `me` for the current user.
        user_id: String,
        #[arg(long)]
        topic: String,
        /// Meeting type: 1 instant, 2 scheduled, 3 recurring, 8 recurring with fixed time.
        #[arg(long = "type")]
        meeting_type: Option<u8>,
        #[arg(long)]
        start_time: Option<String>,
        /// Duration in minutes.
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        timezone: Option<String>,
        #[arg(long)]
        agenda: Option<String>,
    },
    /// Make an arbitrary request against the API.
    Request {
        /// GET, POST, PUT or DELETE.
        method: HttpMethod,
        /// Path relative to the API base, e.g. `/users/me`.
        endpoint: String,
        /// JSON request body.
        #[arg(long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), ZoomError> {
    // Logging in is the only command that doesn't need a client.
    let client = || load_config().map(ApiClient::new);

    match command {
        Command::Login => {
            storage::request_client_credentials()?;
            println!("Stored Zoom credentials in the keyring.");
            Ok(())
        }
        Command::Me => print_json(&client()?.get_current_user().await?),
        Command::Meeting { meeting_id } => print_json(&client()?.get_meeting(&meeting_id).await?),
        Command::CreateMeeting {
            user_id,
            topic,
            meeting_type,
            start_time,
            duration,
            timezone,
            agenda,
        } => {
            let meeting = NewMeeting {
                topic,
                meeting_type,
                start_time,
                duration,
                timezone,
                agenda,
            };
            print_json(&client()?.create_meeting(&user_id, &meeting).await?)
        }
        Command::Request {
            method,
            endpoint,
            data,
        } => {
            let body = data
                .map(|data| serde_json::from_str::<serde_json::Value>(&data))
                .transpose()
                .map_err(|err| ZoomError::InvalidArgument(format!("--data is not JSON: {err}")))?;
            let response: serde_json::Value = client()?
                .execute_request(&endpoint, method, body.as_ref())
                .await?;
            print_json(&response)
        }
    }
}

/// Environment variables take priority; otherwise we fall back to the keyring.
fn load_config() -> Result<ZoomConfig, ZoomError> {
    let config = ZoomConfig::from_env()?;
    if config.has_credentials() {
        return Ok(config);
    }

    match storage::load()? {
        Some(stored) => {
            debug!("using Zoom credentials from keyring");
            Ok(config.with_fallback_credentials(stored.client_id, stored.client_secret))
        }
        // Missing credentials are reported once a token is actually needed.
        None => Ok(config),
    }
}

/// Renders an error followed by each of its causes, e.g.
/// `failed to generate access token: missing Zoom OAuth credentials`.
fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        // Wrapping variants such as `Network` already show their source.
        let cause_text = cause.to_string();
        if !rendered.ends_with(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ZoomError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
