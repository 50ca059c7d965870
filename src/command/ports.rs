//! Capabilities the command handler is given instead of reaching for globals.

use async_trait::async_trait;

use super::report::FormattedReport;
use crate::core::models::{ChannelPage, UserProfile};
use crate::errors::SlackError;

/// Read access to the workspace directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Look up a user's profile.
    ///
    /// # Errors
    ///
    /// Fails when the user does not exist, the token lacks permission, or the
    /// transport fails.
    async fn resolve_user(&self, user_id: &str) -> Result<UserProfile, SlackError>;

    /// Fetch one page of the public and private channels `user_id` belongs to.
    ///
    /// # Errors
    ///
    /// Fails on transport or permission errors.
    async fn list_channels_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError>;
}

/// Delivers the invocation's single response.
#[async_trait]
pub trait Responder: Send + Sync {
    /// # Errors
    ///
    /// Fails if the platform rejects or cannot receive the message.
    async fn send_message(&self, report: &FormattedReport) -> Result<(), SlackError>;
}
