use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Slack API rate limited: {0}")]
    RateLimited(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl SlackError {
    /// Whether the failure is transient and worth another attempt.
    ///
    /// Slack `ok=false` answers (`user_not_found`, `missing_scope`, ...) are
    /// final; only transport failures and rate limiting are retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, SlackError::HttpError(_) | SlackError::RateLimited(_))
    }
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        let message = error.to_string();
        match error {
            SlackClientError::RateLimitError(_) => SlackError::RateLimited(message),
            SlackClientError::HttpError(_) => SlackError::HttpError(message),
            _ => SlackError::ApiError(message),
        }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

/// Failure of a single command invocation.
///
/// Every variant aborts the invocation; the user sees one generic error
/// response that embeds this value's `Display` text.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not resolve user {user_id}: {source}")]
    Resolution {
        user_id: String,
        #[source]
        source: SlackError,
    },

    #[error("could not list channels for user {user_id}: {source}")]
    Fetch {
        user_id: String,
        #[source]
        source: SlackError,
    },

    #[error("channel listing for user {user_id} returned cursor {cursor} twice")]
    PaginationLoop { user_id: String, cursor: String },

    #[error("channel listing for user {user_id} exceeded {pages} pages")]
    PageLimitExceeded { user_id: String, pages: usize },
}

impl CommandError {
    /// The user whose lookup or listing failed.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            CommandError::Resolution { user_id, .. }
            | CommandError::Fetch { user_id, .. }
            | CommandError::PaginationLoop { user_id, .. }
            | CommandError::PageLimitExceeded { user_id, .. } => user_id,
        }
    }
}
