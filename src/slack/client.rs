//! Slack API client module
//!
//! Implements the directory lookups the command needs on top of the Web API,
//! with retry on transient failures.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiUsersInfoRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackUserId};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::command::fetcher::CHANNEL_PAGE_SIZE;
use crate::command::ports::DirectoryClient;
use crate::core::models::{Channel, ChannelPage, UserProfile};
use crate::errors::SlackError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const USERS_CONVERSATIONS_URL: &str = "https://slack.com/api/users.conversations";

/// Conversation types listed for a user: public and private channels.
pub const CHANNEL_TYPES: &str = "public_channel,private_channel";

#[derive(Debug, Deserialize)]
struct UsersConversationsResponse {
    ok: bool,
    #[serde(default)]
    channels: Vec<ConversationEntry>,
    response_metadata: Option<ResponseMetadata>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationEntry {
    id: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    next_cursor: Option<String>,
}

impl UsersConversationsResponse {
    fn into_page(self) -> Result<ChannelPage, SlackError> {
        if !self.ok {
            return Err(SlackError::ApiError(format!(
                "users.conversations error: {}",
                self.error.unwrap_or_else(|| "unknown".to_string())
            )));
        }

        let channels = self
            .channels
            .into_iter()
            .map(|entry| {
                let name = entry.name.unwrap_or_else(|| entry.id.clone());
                Channel { id: entry.id, name }
            })
            .collect();

        let next_cursor = self
            .response_metadata
            .and_then(|m| m.next_cursor)
            .filter(|c| !c.is_empty());

        Ok(ChannelPage {
            channels,
            next_cursor,
        })
    }
}

/// Retries after the first attempt on transient failures.
const RETRY_ATTEMPTS: usize = 4;
/// Ceiling on any single wait between attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Waits before each retry, before jitter: 100ms, 200ms, 400ms, 800ms.
///
/// `ExponentialBackoff` raises its base to the attempt number and multiplies
/// by the factor, so the base stays small and the factor sets the scale.
fn retry_delays() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(MAX_RETRY_DELAY)
        .take(RETRY_ATTEMPTS)
}

/// Picks the profile's display name, then its real name, then the user ID.
fn profile_display_name(
    display_name: Option<&str>,
    real_name: Option<&str>,
    user_id: &str,
) -> String {
    [display_name, real_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|n| !n.is_empty())
        .unwrap_or(user_id)
        .to_string()
}

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    #[must_use]
    pub fn token(&self) -> &SlackApiToken {
        &self.token
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SlackError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SlackError>> + Send,
        T: Send,
    {
        RetryIf::spawn(retry_delays().map(jitter), operation, SlackError::is_retryable).await
    }

    /// Fetch a user's profile via `users.info`.
    ///
    /// The display name is the profile's display name, then its real name,
    /// then the raw user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the API call fails.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, SlackError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);
            let user_info_req = SlackApiUsersInfoRequest::new(SlackUserId(user_id.to_string()));

            let info = session.users_info(&user_info_req).await?;
            let profile = info.user.profile.as_ref();
            let display_name = profile_display_name(
                profile.and_then(|p| p.display_name.as_deref()),
                profile.and_then(|p| p.real_name.as_deref()),
                user_id,
            );

            Ok(UserProfile {
                id: user_id.to_string(),
                display_name,
            })
        })
        .await
    }

    /// Fetch one page of `users.conversations` for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Slack returns an error.
    pub async fn get_user_channels_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        let limit = CHANNEL_PAGE_SIZE.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("user", user_id),
            ("types", CHANNEL_TYPES),
            ("limit", limit.as_str()),
        ];
        if let Some(c) = cursor {
            query.push(("cursor", c));
        }

        self.with_retry(|| async {
            let resp = HTTP_CLIENT
                .get(USERS_CONVERSATIONS_URL)
                .bearer_auth(&self.token.token_value.0)
                .query(&query)
                .send()
                .await?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                return Err(SlackError::RateLimited(
                    "users.conversations HTTP 429".to_string(),
                ));
            }

            if !resp.status().is_success() {
                return Err(SlackError::ApiError(format!(
                    "users.conversations HTTP {}",
                    resp.status()
                )));
            }

            let body: UsersConversationsResponse = resp.json().await.map_err(|e| {
                SlackError::GeneralError(format!("users.conversations JSON parse error: {e}"))
            })?;

            let page = body.into_page()?;
            debug!(
                user_id = %user_id,
                channels = page.channels.len(),
                has_more = page.next_cursor.is_some(),
                "users.conversations page"
            );
            Ok(page)
        })
        .await
    }
}

#[async_trait]
impl DirectoryClient for SlackClient {
    async fn resolve_user(&self, user_id: &str) -> Result<UserProfile, SlackError> {
        self.get_user_profile(user_id).await
    }

    async fn list_channels_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        self.get_user_channels_page(user_id, cursor).await
    }
}
