use futures::future::join_all;
use lambda_runtime::{Error, LambdaEvent};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{error, info};

use crate::command::{ChannelFetcher, CommandHandler, DirectoryClient, Responder};
use crate::core::config::WorkerConfig;
use crate::core::models::CommandTask;
use crate::slack::{ResponseUrlResponder, SlackClient};

/// Decodes one SQS record body into a `CommandTask`.
///
/// # Errors
///
/// Returns an error if the record has no string body or the body is not a task.
pub fn parse_record(record: &Value) -> Result<CommandTask, String> {
    record
        .get("body")
        .and_then(|body| body.as_str())
        .ok_or_else(|| "Failed to extract SQS message body".to_string())
        .and_then(|body_str| {
            serde_json::from_str(body_str).map_err(|e| {
                format!("Failed to parse SQS message body into CommandTask: {}", e)
            })
        })
}

/// Decodes every record of an SQS event, keeping per-record failures.
///
/// # Errors
///
/// Returns an error if the event carries no `Records` array.
pub fn parse_tasks(payload: &Value) -> Result<Vec<Result<CommandTask, String>>, String> {
    let records = payload
        .get("Records")
        .and_then(|records| records.as_array())
        .ok_or_else(|| "SQS event has no Records array".to_string())?;

    Ok(records.iter().map(parse_record).collect())
}

/// Runs the command for every task in the batch concurrently.
///
/// Records that cannot be decoded are logged and skipped; they carry no
/// usable `response_url`. Delivery failures are logged and swallowed so SQS
/// does not redeliver the batch and produce second responses. Returns the
/// number of tasks that ran.
///
/// # Errors
///
/// Returns an error if the event carries no `Records` array.
pub async fn run_batch<D, R, F>(payload: &Value, build: F) -> Result<usize, String>
where
    D: DirectoryClient,
    R: Responder,
    F: Fn(&CommandTask) -> CommandHandler<D, R>,
{
    let tasks: Vec<CommandTask> = parse_tasks(payload)?
        .into_iter()
        .filter_map(|parsed| match parsed {
            Ok(task) => Some(task),
            Err(e) => {
                error!("Skipping SQS record: {}", e);
                None
            }
        })
        .collect();

    let runs = tasks.into_iter().map(|task| {
        let handler = build(&task);
        async move {
            info!(
                correlation_id = %task.correlation_id,
                user_id = %task.user_id,
                channel_id = %task.channel_id,
                "Worker received command task"
            );
            if let Err(e) = handler.handle(&task.text).await {
                error!(
                    correlation_id = %task.correlation_id,
                    "Failed to deliver command response: {}", e
                );
            }
        }
    });

    Ok(join_all(runs).await.len())
}

/// Lambda handler for the Worker entrypoint. Runs the command for every
/// queued task and posts each one's single response.
///
/// # Errors
///
/// Returns an error if configuration is missing or the event is malformed.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = WorkerConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let ran = run_batch(&event.payload, |task| {
        let directory = SlackClient::new(config.slack_bot_token.clone());
        let responder = ResponseUrlResponder::new(HttpClient::new(), task.response_url.clone())
            .with_visibility(config.response_visibility);
        CommandHandler::new(directory, responder, task.command.clone())
            .with_fetcher(ChannelFetcher::new(config.channel_page_limit))
    })
    .await
    .map_err(|e| {
        error!("{}", e);
        Error::from(e)
    })?;

    info!(tasks = ran, "Worker batch finished");
    Ok(())
}

pub use self::function_handler as handler;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_body(text: &str) -> String {
        json!({
            "correlation_id": "abc",
            "command": "/channels",
            "user_id": "U1",
            "channel_id": "C1",
            "response_url": "https://hooks.slack.com/commands/1",
            "text": text
        })
        .to_string()
    }

    #[test]
    fn parses_every_record_body() {
        let event = json!({
            "Records": [{ "body": task_body("<@U111>") }, { "body": task_body("<@U222>") }]
        });

        let tasks = parse_tasks(&event).unwrap();
        let texts: Vec<String> = tasks.into_iter().map(|t| t.unwrap().text).collect();
        assert_eq!(texts, vec!["<@U111>", "<@U222>"]);
    }

    #[test]
    fn bad_record_does_not_hide_the_others() {
        let event = json!({
            "Records": [{ "body": "not json" }, { "body": task_body("<@U111>") }]
        });

        let tasks = parse_tasks(&event).unwrap();
        assert!(tasks[0].is_err());
        assert_eq!(tasks[1].as_ref().unwrap().command, "/channels");
    }

    #[test]
    fn rejects_event_without_records() {
        assert!(parse_tasks(&json!({})).is_err());
        assert!(parse_tasks(&json!({ "Records": [] })).unwrap().is_empty());
        assert!(parse_record(&json!({ "messageId": "1" })).is_err());
    }
}
