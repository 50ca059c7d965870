//! Cursor-driven retrieval of a user's complete channel membership.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::ports::DirectoryClient;
use crate::core::config::DEFAULT_CHANNEL_PAGE_LIMIT;
use crate::core::models::ChannelSet;
use crate::errors::CommandError;

/// Page size requested from `users.conversations`.
pub const CHANNEL_PAGE_SIZE: u16 = 100;

/// Walks the paginated listing for one user.
///
/// Pages are requested strictly one after another because each cursor comes
/// from the previous response.
#[derive(Debug, Clone, Copy)]
pub struct ChannelFetcher {
    page_limit: usize,
}

impl Default for ChannelFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_PAGE_LIMIT)
    }
}

impl ChannelFetcher {
    #[must_use]
    pub fn new(page_limit: usize) -> Self {
        Self {
            page_limit: page_limit.max(1),
        }
    }

    /// Returns every channel `user_id` belongs to, in fetch order.
    ///
    /// Channel IDs already seen on an earlier page are skipped.
    ///
    /// # Errors
    ///
    /// Fails if any page request fails, if the upstream hands back a cursor it
    /// already returned, or if the listing runs past the page limit.
    pub async fn fetch_all<D>(
        &self,
        directory: &D,
        user_id: &str,
    ) -> Result<ChannelSet, CommandError>
    where
        D: DirectoryClient + ?Sized,
    {
        let mut channels: ChannelSet = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if pages == self.page_limit {
                warn!(user_id = %user_id, pages, "Channel listing hit the page limit");
                return Err(CommandError::PageLimitExceeded {
                    user_id: user_id.to_string(),
                    pages,
                });
            }

            let page = directory
                .list_channels_page(user_id, cursor.as_deref())
                .await
                .map_err(|source| CommandError::Fetch {
                    user_id: user_id.to_string(),
                    source,
                })?;
            pages += 1;

            debug!(
                user_id = %user_id,
                page = pages,
                channels = page.channels.len(),
                "Fetched channel page"
            );

            for channel in page.channels {
                if seen_ids.insert(channel.id.clone()) {
                    channels.push(channel);
                } else {
                    debug!(user_id = %user_id, channel_id = %channel.id, "Skipping duplicate channel");
                }
            }

            match page.next_cursor.filter(|c| !c.is_empty()) {
                None => break,
                Some(next) => {
                    if !seen_cursors.insert(next.clone()) {
                        warn!(user_id = %user_id, cursor = %next, "Channel listing cursor repeated");
                        return Err(CommandError::PaginationLoop {
                            user_id: user_id.to_string(),
                            cursor: next,
                        });
                    }
                    cursor = Some(next);
                }
            }
        }

        info!(user_id = %user_id, pages, channels = channels.len(), "Fetched channel membership");
        Ok(channels)
    }
}
