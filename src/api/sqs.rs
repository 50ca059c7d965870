use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;

use crate::core::models::CommandTask;
use crate::errors::SlackError;

/// Hands a command task to the worker.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the task cannot be serialized or enqueued.
    async fn enqueue(&self, task: &CommandTask) -> Result<(), SlackError>;
}

/// SQS-backed queue between the API and worker functions.
pub struct SqsTaskQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsTaskQueue {
    #[must_use]
    pub fn new(client: SqsClient, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Builds an SQS client from the ambient AWS environment.
    pub async fn from_env(queue_url: impl Into<String>) -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(SqsClient::new(&shared_config), queue_url)
    }
}

#[async_trait]
impl TaskQueue for SqsTaskQueue {
    async fn enqueue(&self, task: &CommandTask) -> Result<(), SlackError> {
        let message_body = serde_json::to_string(task)
            .map_err(|e| SlackError::ApiError(format!("Failed to serialize task: {e}")))?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message_body)
            .send()
            .await
            .map_err(|e| SlackError::AwsError(format!("Failed to send message to SQS: {e}")))?;
        Ok(())
    }
}
