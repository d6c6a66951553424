use super::{ApiClient, HttpMethod};
use crate::zoom::ZoomError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Zoom user, as returned by `GET /users/{userId}`.
///
/// The body is kept exactly as Zoom sent it; accessors pick out the common fields
/// without requiring them to be present.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct User(pub Value);

impl User {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.0.get("first_name").and_then(Value::as_str)
    }

    pub fn last_name(&self) -> Option<&str> {
        self.0.get("last_name").and_then(Value::as_str)
    }
}

/// A scheduled or instant meeting, kept verbatim like [`User`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Meeting(pub Value);

impl Meeting {
    /// Zoom meeting IDs are normally numeric, but we return whatever was sent.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn topic(&self) -> Option<&str> {
        self.0.get("topic").and_then(Value::as_str)
    }

    /// 1 = instant, 2 = scheduled, 3 = recurring without fixed time, 8 = recurring with fixed time.
    pub fn meeting_type(&self) -> Option<u64> {
        self.0.get("type").and_then(Value::as_u64)
    }

    pub fn start_time(&self) -> Option<&str> {
        self.0.get("start_time").and_then(Value::as_str)
    }

    /// Duration in minutes.
    pub fn duration(&self) -> Option<u64> {
        self.0.get("duration").and_then(Value::as_u64)
    }

    pub fn join_url(&self) -> Option<&str> {
        self.0.get("join_url").and_then(Value::as_str)
    }
}

/// The body for `POST /users/{userId}/meetings`.
///
/// Unset fields are left out entirely so Zoom applies its own defaults.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct NewMeeting {
    pub topic: String,
    /// 1 = instant, 2 = scheduled, 3 = recurring without fixed time, 8 = recurring with fixed time.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<u8>,
    /// `yyyy-MM-ddTHH:mm:ss`, optionally suffixed with `Z` for UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
}

impl NewMeeting {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }
}

impl ApiClient {
    /// Fetches the user the access token belongs to.
    pub async fn get_current_user(&self) -> Result<User, ZoomError> {
        self.get("/users/me").await
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting, ZoomError> {
        self.get(&format!("/meetings/{meeting_id}")).await
    }

    /// Creates a meeting hosted by the given user (`me` works too).
    pub async fn create_meeting(
        &self,
        user_id: &str,
        meeting: &NewMeeting,
    ) -> Result<Meeting, ZoomError> {
        self.execute_request(
            &format!("/users/{user_id}/meetings"),
            HttpMethod::Post,
            Some(meeting),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::ZoomConfig;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use url::Url;

    fn client_for(server: &ServerGuard, config: ZoomConfig) -> ApiClient {
        let base = server.url();
        ApiClient::new(
            config
                .with_oauth_url(Url::parse(&format!("{base}/oauth/token")).unwrap())
                .with_api_base_url(Url::parse(&base).unwrap()),
        )
    }

    async fn mock_token(server: &mut ServerGuard, access_token: &str) -> mockito::Mock {
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "access_token": access_token,
                    "expires_in": 3599,
                    "token_type": "bearer",
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    #[test]
    fn new_meeting_serializes_only_what_is_set() {
        let body = serde_json::to_value(NewMeeting::new("Standup")).unwrap();
        assert_eq!(body, json!({"topic": "Standup"}));

        let scheduled = NewMeeting {
            meeting_type: Some(2),
            duration: Some(15),
            ..NewMeeting::new("Standup")
        };
        assert_eq!(
            serde_json::to_value(scheduled).unwrap(),
            json!({"topic": "Standup", "type": 2, "duration": 15})
        );
    }

    #[tokio::test]
    async fn current_user_is_decoded_exactly() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, "tok-me").await;
        let me = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer tok-me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"u1","email":"a@b.com"}"#)
            .create_async()
            .await;

        let user = client_for(&server, ZoomConfig::new("id", "secret"))
            .get_current_user()
            .await
            .unwrap();

        assert_eq!(user.id(), Some("u1"));
        assert_eq!(user.email(), Some("a@b.com"));
        assert_eq!(user.0, json!({"id": "u1", "email": "a@b.com"}));
        me.assert_async().await;
    }

    #[tokio::test]
    async fn fetches_meeting_by_id() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, "tok").await;
        let _meeting = server
            .mock("GET", "/meetings/85746065432")
            .with_status(200)
            .with_body(
                r#"{"id":85746065432,"topic":"Standup","type":2,"duration":15,"status":"waiting"}"#,
            )
            .create_async()
            .await;

        let meeting = client_for(&server, ZoomConfig::new("id", "secret"))
            .get_meeting("85746065432")
            .await
            .unwrap();

        assert_eq!(meeting.id(), Some(&json!(85746065432u64)));
        assert_eq!(meeting.topic(), Some("Standup"));
        assert_eq!(meeting.meeting_type(), Some(2));
        assert_eq!(meeting.duration(), Some(15));
        assert_eq!(meeting.0["status"], json!("waiting"));
    }

    #[tokio::test]
    async fn bodies_are_returned_without_schema_checks() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, "tok").await;
        let _me = server
            .mock("GET", "/users/me")
            .with_status(200)
            .with_body(r#"{"email":"a@b.com"}"#)
            .create_async()
            .await;
        let _meeting = server
            .mock("GET", "/meetings/m1")
            .with_status(200)
            .with_body(r#"{"id":"abc","topic":"x"}"#)
            .create_async()
            .await;

        let client = client_for(&server, ZoomConfig::new("id", "secret"));

        let user = client.get_current_user().await.unwrap();
        assert_eq!(user.id(), None);
        assert_eq!(user.0, json!({"email": "a@b.com"}));

        let meeting = client.get_meeting("m1").await.unwrap();
        assert_eq!(meeting.id(), Some(&json!("abc")));
        assert_eq!(meeting.topic(), Some("x"));
    }

    #[tokio::test]
    async fn creates_meeting_under_user() {
        let mut server = Server::new_async().await;
        let token = mock_token(&mut server, "fresh-token").await;
        let create = server
            .mock("POST", "/users/u1/meetings")
            .match_header("authorization", "Bearer fresh-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"topic": "Standup"})))
            .with_status(201)
            .with_body(r#"{"id":123,"topic":"Standup","join_url":"https://zoom.us/j/123"}"#)
            .create_async()
            .await;

        let meeting = client_for(&server, ZoomConfig::new("id", "secret"))
            .create_meeting("u1", &NewMeeting::new("Standup"))
            .await
            .unwrap();

        assert_eq!(meeting.id(), Some(&json!(123)));
        assert_eq!(meeting.join_url(), Some("https://zoom.us/j/123"));
        token.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn wrappers_skip_api_calls_without_credentials() {
        let mut server = Server::new_async().await;
        let posts = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let gets = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, ZoomConfig::default());

        let user = client.get_current_user().await;
        assert!(user.unwrap_err().is_missing_credentials());

        let meeting = client.get_meeting("42").await;
        assert!(matches!(meeting, Err(ZoomError::TokenUnavailable(_))));

        let created = client.create_meeting("u1", &NewMeeting::new("Standup")).await;
        assert!(created.unwrap_err().is_missing_credentials());

        posts.assert_async().await;
        gets.assert_async().await;
    }
}
