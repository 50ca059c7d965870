//! Scripted fakes for the command handler's capabilities.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tokio::sync::Barrier;

use async_trait::async_trait;
use chanlist::SlackError;
use chanlist::command::{DirectoryClient, FormattedReport, Responder};
use chanlist::core::models::{Channel, ChannelPage, UserProfile};

pub fn channel(id: &str, name: &str) -> Channel {
    Channel::new(id, name)
}

/// Directory with canned users and per-user page lists.
///
/// Page `n` is served for cursor `None` (n = 0) or `"cursor-n"`; every page
/// except the last points at the next one.
#[derive(Default)]
pub struct FakeDirectory {
    users: HashMap<String, String>,
    pages: HashMap<String, Vec<Vec<Channel>>>,
    failing_users: HashSet<String>,
    failing_listings: HashSet<String>,
    looping_listings: HashSet<String>,
    pub resolve_calls: Mutex<Vec<String>>,
    pub page_calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: &str, name: &str, channels: Vec<Channel>) -> Self {
        self.users.insert(id.to_string(), name.to_string());
        self.pages.insert(id.to_string(), vec![channels]);
        self
    }

    pub fn with_paged_user(mut self, id: &str, name: &str, pages: Vec<Vec<Channel>>) -> Self {
        self.users.insert(id.to_string(), name.to_string());
        self.pages.insert(id.to_string(), pages);
        self
    }

    pub fn with_unresolvable_user(mut self, id: &str) -> Self {
        self.failing_users.insert(id.to_string());
        self
    }

    pub fn with_failing_listing(mut self, id: &str) -> Self {
        self.failing_listings.insert(id.to_string());
        self
    }

    /// Every page for `id` returns the same cursor.
    pub fn with_looping_listing(mut self, id: &str) -> Self {
        self.looping_listings.insert(id.to_string());
        self
    }

    pub fn resolve_count(&self) -> usize {
        self.resolve_calls.lock().unwrap().len()
    }

    pub fn page_count(&self) -> usize {
        self.page_calls.lock().unwrap().len()
    }

    pub fn page_count_for(&self, user_id: &str) -> usize {
        self.page_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == user_id)
            .count()
    }

    pub fn remote_calls(&self) -> usize {
        self.resolve_count() + self.page_count()
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn resolve_user(&self, user_id: &str) -> Result<UserProfile, SlackError> {
        self.resolve_calls.lock().unwrap().push(user_id.to_string());
        if self.failing_users.contains(user_id) {
            return Err(SlackError::ApiError("user_not_found".to_string()));
        }
        match self.users.get(user_id) {
            Some(name) => Ok(UserProfile {
                id: user_id.to_string(),
                display_name: name.clone(),
            }),
            None => Err(SlackError::ApiError("user_not_found".to_string())),
        }
    }

    async fn list_channels_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        self.page_calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), cursor.map(str::to_string)));

        if self.failing_listings.contains(user_id) {
            return Err(SlackError::ApiError("missing_scope".to_string()));
        }
        if self.looping_listings.contains(user_id) {
            return Ok(ChannelPage {
                channels: vec![channel("C1", "general")],
                next_cursor: Some("same-cursor".to_string()),
            });
        }

        let pages = self
            .pages
            .get(user_id)
            .ok_or_else(|| SlackError::ApiError("user_not_found".to_string()))?;
        let index = match cursor {
            None => 0,
            Some(c) => c
                .strip_prefix("cursor-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| SlackError::ApiError("invalid_cursor".to_string()))?,
        };
        let channels = pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < pages.len()).then(|| format!("cursor-{}", index + 1));

        Ok(ChannelPage {
            channels,
            next_cursor,
        })
    }
}

/// Wraps a [`FakeDirectory`] so both profile lookups, and both users' first
/// page requests, wait for each other before answering. Issuing them one after
/// another never gets past the first wait.
pub struct GatedDirectory {
    inner: FakeDirectory,
    lookups: Barrier,
    first_pages: Barrier,
}

impl GatedDirectory {
    pub fn new(inner: FakeDirectory) -> Self {
        Self {
            inner,
            lookups: Barrier::new(2),
            first_pages: Barrier::new(2),
        }
    }

    pub fn inner(&self) -> &FakeDirectory {
        &self.inner
    }
}

#[async_trait]
impl DirectoryClient for GatedDirectory {
    async fn resolve_user(&self, user_id: &str) -> Result<UserProfile, SlackError> {
        self.lookups.wait().await;
        self.inner.resolve_user(user_id).await
    }

    async fn list_channels_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        if cursor.is_none() {
            self.first_pages.wait().await;
        }
        self.inner.list_channels_page(user_id, cursor).await
    }
}

/// Records every report it is asked to send.
#[derive(Default)]
pub struct RecordingResponder {
    pub sent: Mutex<Vec<FormattedReport>>,
    fail: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<FormattedReport> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn send_message(&self, report: &FormattedReport) -> Result<(), SlackError> {
        self.sent.lock().unwrap().push(report.clone());
        if self.fail {
            return Err(SlackError::HttpError("connection reset".to_string()));
        }
        Ok(())
    }
}
