use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;

use crate::core::config::ApiConfig;

/// Oldest request timestamp accepted, in seconds.
const MAX_REQUEST_AGE_SECS: u64 = 300;
/// Tolerated clock skew for timestamps from the future, in seconds.
const MAX_CLOCK_SKEW_SECS: u64 = 60;

type HmacSha256 = Hmac<Sha256>;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn timestamp_in_window(ts: u64, now: u64) -> bool {
    ts <= now.saturating_add(MAX_CLOCK_SKEW_SECS) && now.saturating_sub(ts) <= MAX_REQUEST_AGE_SECS
}

fn signing_mac(signing_secret: &str, timestamp: &str, request_body: &str) -> Option<HmacSha256> {
    let mut mac = match HmacSha256::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return None;
        }
    };
    mac.update(format!("v0:{timestamp}:{request_body}").as_bytes());
    Some(mac)
}

/// Verifies Slack's `X-Slack-Signature` for a request body.
#[must_use]
pub fn verify_slack_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    config: &ApiConfig,
) -> bool {
    verify_signature_at(
        request_body,
        timestamp,
        signature,
        &config.slack_signing_secret,
        now_secs(),
    )
}

/// Same as [`verify_slack_signature`] with an explicit clock.
#[must_use]
pub fn verify_signature_at(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
    now: u64,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Unparseable X-Slack-Request-Timestamp: {}", timestamp);
        return false;
    };
    if !timestamp_in_window(ts, now) {
        error!("Timestamp out of range, potential replay attack");
        return false;
    }

    let Some(received) = signature
        .strip_prefix("v0=")
        .and_then(|hex_sig| hex::decode(hex_sig).ok())
    else {
        error!("Malformed X-Slack-Signature header");
        return false;
    };

    let Some(mac) = signing_mac(signing_secret, timestamp, request_body) else {
        return false;
    };

    if mac.verify_slice(&received).is_ok() {
        true
    } else {
        error!("Signature verification failed");
        false
    }
}

/// Computes the `v0=` signature Slack would send for a body.
#[must_use]
pub fn compute_signature(timestamp: &str, request_body: &str, signing_secret: &str) -> String {
    match signing_mac(signing_secret, timestamp, request_body) {
        Some(mac) => format!("v0={}", hex::encode(mac.finalize().into_bytes())),
        None => String::new(),
    }
}
