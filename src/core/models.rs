use serde::{Deserialize, Serialize};

/// Snapshot of a user fetched once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
}

/// A channel the user is a member of. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// All channels of one user, in upstream fetch order.
pub type ChannelSet = Vec<Channel>;

/// One page of a `users.conversations` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    /// `None` (or an empty cursor) ends the listing.
    pub next_cursor: Option<String>,
}

/// Work item queued by the API function and consumed by the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTask {
    pub correlation_id: String,
    /// Slash command name as invoked, e.g. `/channels`.
    pub command: String,
    /// User who invoked the command.
    pub user_id: String,
    pub channel_id: String,
    pub response_url: String,
    /// Raw text following the command name.
    pub text: String,
}
