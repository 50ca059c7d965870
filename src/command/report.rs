//! Platform-independent outcome of one command invocation.
//!
//! Renderers in [`crate::slack::renderer`] turn a [`FormattedReport`] into
//! Slack markup; nothing here knows about blocks or mrkdwn.

use std::collections::HashSet;

use crate::core::models::{ChannelSet, UserProfile};

/// Channel sets of two users split by channel ID.
///
/// Each list keeps the fetch order of the set it was filtered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    pub shared: ChannelSet,
    pub unique_to_first: ChannelSet,
    pub unique_to_second: ChannelSet,
}

/// Splits two channel sets into shared and per-user channels.
///
/// `shared` follows the order of `first`. Duplicate IDs within an input are
/// counted once.
#[must_use]
pub fn compare_channels(first: &ChannelSet, second: &ChannelSet) -> ComparisonResult {
    let first_ids: HashSet<&str> = first.iter().map(|c| c.id.as_str()).collect();
    let second_ids: HashSet<&str> = second.iter().map(|c| c.id.as_str()).collect();

    let mut result = ComparisonResult::default();
    let mut emitted: HashSet<&str> = HashSet::new();

    for channel in first {
        if !emitted.insert(channel.id.as_str()) {
            continue;
        }
        if second_ids.contains(channel.id.as_str()) {
            result.shared.push(channel.clone());
        } else {
            result.unique_to_first.push(channel.clone());
        }
    }

    for channel in second {
        if first_ids.contains(channel.id.as_str()) || !emitted.insert(channel.id.as_str()) {
            continue;
        }
        result.unique_to_second.push(channel.clone());
    }

    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleUserReport {
    pub user: UserProfile,
    pub channels: ChannelSet,
}

impl SingleUserReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.channels.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub first: UserProfile,
    pub second: UserProfile,
    pub first_total: usize,
    pub second_total: usize,
    pub comparison: ComparisonResult,
}

impl ComparisonReport {
    #[must_use]
    pub fn new(
        first: UserProfile,
        first_channels: &ChannelSet,
        second: UserProfile,
        second_channels: &ChannelSet,
    ) -> Self {
        let comparison = compare_channels(first_channels, second_channels);
        Self {
            first_total: comparison.shared.len() + comparison.unique_to_first.len(),
            second_total: comparison.shared.len() + comparison.unique_to_second.len(),
            first,
            second,
            comparison,
        }
    }
}

/// Everything the responder can be asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedReport {
    /// Wrong number of mentions.
    Usage { command: String },
    SingleUser(SingleUserReport),
    Comparison(ComparisonReport),
    /// Generic processing error, with the underlying failure text.
    Failure { message: String },
}

impl FormattedReport {
    /// Short label used in log lines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FormattedReport::Usage { .. } => "usage",
            FormattedReport::SingleUser(_) => "single_user",
            FormattedReport::Comparison(_) => "comparison",
            FormattedReport::Failure { .. } => "failure",
        }
    }
}
