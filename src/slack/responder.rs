//! Delivers the command's response through the slash command `response_url`.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{error, info};

use super::renderer::{BlockKitRenderer, ReportRenderer};
use super::response_builder::create_report_payload;
use crate::command::ports::Responder;
use crate::command::report::FormattedReport;
use crate::core::config::ResponseVisibility;
use crate::errors::SlackError;

/// Posts rendered reports to one `response_url`.
pub struct ResponseUrlResponder {
    http_client: HttpClient,
    response_url: String,
    visibility: ResponseVisibility,
    renderer: Box<dyn ReportRenderer>,
}

impl ResponseUrlResponder {
    #[must_use]
    pub fn new(http_client: HttpClient, response_url: impl Into<String>) -> Self {
        Self {
            http_client,
            response_url: response_url.into(),
            visibility: ResponseVisibility::default(),
            renderer: Box::new(BlockKitRenderer),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: ResponseVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn ReportRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

#[async_trait]
impl Responder for ResponseUrlResponder {
    async fn send_message(&self, report: &FormattedReport) -> Result<(), SlackError> {
        let rendered = self.renderer.render(report);
        let body = create_report_payload(&rendered, self.visibility);

        let resp = self
            .http_client
            .post(&self.response_url)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                "response_url POST failed: status={} body={}",
                status, body_text
            );
            return Err(SlackError::ApiError(format!(
                "response_url POST failed with HTTP {status}"
            )));
        }

        info!(report = report.kind(), "Posted command response");
        Ok(())
    }
}
