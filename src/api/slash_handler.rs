//! Handler for the channel membership slash command.
//!
//! Acknowledges right away and leaves all directory lookups to the worker.

use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::helpers::{ok_empty, ok_ephemeral};
use super::parsing::parse_slash_command;
use super::sqs::TaskQueue;
use crate::core::models::CommandTask;
use crate::errors::SlackError;

/// Handle a slash command from Slack.
///
/// Queues a [`CommandTask`] and returns the acknowledgment. When queueing
/// fails the acknowledgment carries the failure notice instead, since the
/// worker will never answer.
///
/// # Errors
/// Returns an error if the body cannot be parsed.
pub async fn handle_slash_command<Q>(queue: &Q, body: &str) -> Result<Value, SlackError>
where
    Q: TaskQueue + ?Sized,
{
    let command = parse_slash_command(body)?;

    if command.response_url.is_empty() {
        return Err(SlackError::ParseError(
            "Slash command is missing response_url".to_string(),
        ));
    }

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        command = %command.command,
        user_id = %command.user_id,
        "Slash command received"
    );

    let task = CommandTask {
        correlation_id: correlation_id.clone(),
        command: command.command,
        user_id: command.user_id,
        channel_id: command.channel_id,
        response_url: command.response_url,
        text: command.text,
    };

    if let Err(e) = queue.enqueue(&task).await {
        error!(
            "Failed to enqueue task (correlation_id={}): {}",
            correlation_id, e
        );
        return Ok(ok_ephemeral(&format!(
            "An error occurred while processing your request. Please try again. (ref: {})",
            &correlation_id[..8]
        )));
    }

    Ok(ok_empty())
}
