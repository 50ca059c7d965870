//! Response-related utilities for Slack interactions.
//!
//! This module provides standardized ways to create the JSON bodies posted
//! to a slash command's `response_url`.

use serde_json::{Value, json};

use super::renderer::RenderedMessage;
use crate::core::config::ResponseVisibility;

/// Create a JSON payload for an ephemeral response
///
/// Ephemeral messages are only visible to the user who triggered the command.
///
/// # Examples
///
/// ```
/// use chanlist::slack::response_builder::create_ephemeral_payload;
///
/// let payload = create_ephemeral_payload("This message is only visible to you");
/// assert_eq!(payload["response_type"], "ephemeral");
/// ```
#[must_use]
pub fn create_ephemeral_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral"
    })
}

/// Create the `response_url` payload for a rendered report.
///
/// The message is always posted as a new message rather than replacing the
/// invocation.
#[must_use]
pub fn create_report_payload(message: &RenderedMessage, visibility: ResponseVisibility) -> Value {
    let mut payload = json!({
        "text": message.text,
        "response_type": visibility.as_response_type(),
        "replace_original": false
    });

    if let Some(blocks) = &message.blocks {
        payload["blocks"] = blocks.clone();
    }

    payload
}
