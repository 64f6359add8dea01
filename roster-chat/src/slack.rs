//! Slack Web API implementation of [`ChatClient`].
//!
//! `conversations.members` is cursor-paginated; the loop follows
//! `response_metadata.next_cursor` until it comes back empty. Every response
//! carries an `ok` flag that must be checked in addition to the HTTP status.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use roster_core::profile::UserProfile;
use roster_core::types::{ChannelId, UserId};

use crate::client::ChatClient;
use crate::error::ChatError;

const SLACK_API_BASE: &str = "https://slack.com/api";
const PAGE_LIMIT: usize = 200;

/// Authenticated Slack Web API client.
pub struct SlackApiClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MembersResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    profile: UserProfile,
}

impl SlackApiClient {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: Url::parse(SLACK_API_BASE).expect("Slack API base URL is valid"),
            token: bot_token.into(),
        }
    }

    fn method_url(&self, method: &str) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL has a path")
            .push(method);
        url
    }

    async fn read_body(&self, resp: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ChatError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn api_failure(method: &'static str, error: Option<String>) -> ChatError {
        ChatError::Api {
            method,
            code: error.unwrap_or_else(|| "unknown_error".to_string()),
        }
    }
}

#[async_trait]
impl ChatClient for SlackApiClient {
    async fn channel_members(&self, channel: &ChannelId) -> Result<Vec<UserId>, ChatError> {
        let mut members = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut url = self.method_url("conversations.members");
            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("channel", &channel.0)
                    .append_pair("limit", &PAGE_LIMIT.to_string());
                if !cursor.is_empty() {
                    query.append_pair("cursor", &cursor);
                }
            }

            let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
            let resp = self.read_body(resp).await?;
            let body: MembersResponse = resp.json().await?;
            if !body.ok {
                return Err(Self::api_failure("conversations.members", body.error));
            }

            members.extend(body.members.into_iter().map(UserId::from));
            cursor = body
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                return Ok(members);
            }
        }
    }

    async fn user_profile(&self, user: &UserId) -> Result<UserProfile, ChatError> {
        let mut url = self.method_url("users.profile.get");
        url.query_pairs_mut().append_pair("user", &user.0);

        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        let resp = self.read_body(resp).await?;
        let body: ProfileResponse = resp.json().await?;
        if !body.ok {
            return Err(Self::api_failure("users.profile.get", body.error));
        }
        Ok(body.profile)
    }

    async fn send_direct_message(&self, user: &UserId, text: &str) -> Result<(), ChatError> {
        let resp = self
            .http
            .post(self.method_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&json!({ "channel": user.0, "text": text }))
            .send()
            .await?;
        let resp = self.read_body(resp).await?;
        let body: ApiEnvelope = resp.json().await?;
        if !body.ok {
            return Err(Self::api_failure("chat.postMessage", body.error));
        }
        tracing::debug!(user = %user, "direct message sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
