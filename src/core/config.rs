use std::env;

/// Default ceiling on pages fetched for one user's channel listing.
pub const DEFAULT_CHANNEL_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseVisibility {
    #[default]
    Ephemeral,
    InChannel,
}

impl ResponseVisibility {
    /// Value of Slack's `response_type` field.
    #[must_use]
    pub fn as_response_type(self) -> &'static str {
        match self {
            ResponseVisibility::Ephemeral => "ephemeral",
            ResponseVisibility::InChannel => "in_channel",
        }
    }

    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ephemeral" => Ok(ResponseVisibility::Ephemeral),
            "in_channel" => Ok(ResponseVisibility::InChannel),
            other => Err(format!(
                "RESPONSE_VISIBILITY: expected `ephemeral` or `in_channel`, got `{}`",
                other
            )),
        }
    }
}

/// Settings the API function needs to verify and enqueue commands.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub processing_queue_url: String,
    pub slack_signing_secret: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        Ok(Self {
            processing_queue_url: required(&get, "PROCESSING_QUEUE_URL")?,
            slack_signing_secret: required(&get, "SLACK_SIGNING_SECRET")?,
        })
    }
}

/// Settings the worker function needs to run commands and respond.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub slack_bot_token: String,
    pub channel_page_limit: usize,
    pub response_visibility: ResponseVisibility,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let channel_page_limit = match get("CHANNEL_PAGE_LIMIT") {
            Some(raw) => parse_page_limit(&raw)?,
            None => DEFAULT_CHANNEL_PAGE_LIMIT,
        };
        let response_visibility = match get("RESPONSE_VISIBILITY") {
            Some(raw) => ResponseVisibility::parse(&raw)?,
            None => ResponseVisibility::default(),
        };

        Ok(Self {
            slack_bot_token: required(&get, "SLACK_BOT_TOKEN")?,
            channel_page_limit,
            response_visibility,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, String> {
    get(key).ok_or_else(|| format!("{key}: environment variable not found"))
}

fn parse_page_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("CHANNEL_PAGE_LIMIT: must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("CHANNEL_PAGE_LIMIT: {}", e)),
    }
}
