//! The channel membership command: parse, resolve, fetch, report, respond.

use futures::future::try_join;
use tracing::{error, info};

use super::fetcher::ChannelFetcher;
use super::parser::{ParsedArgs, parse_args};
use super::ports::{DirectoryClient, Responder};
use super::report::{ComparisonReport, FormattedReport, SingleUserReport};
use super::resolver::resolve_users;
use crate::errors::{CommandError, SlackError};

/// Text placed in front of the underlying failure in the error response.
pub const GENERIC_ERROR_PREFIX: &str = "An error occurred while processing your request";

/// Runs one invocation of the command against injected capabilities.
///
/// Holds no state between invocations.
pub struct CommandHandler<D, R> {
    directory: D,
    responder: R,
    fetcher: ChannelFetcher,
    command: String,
}

impl<D, R> CommandHandler<D, R>
where
    D: DirectoryClient,
    R: Responder,
{
    pub fn new(directory: D, responder: R, command: impl Into<String>) -> Self {
        Self {
            directory,
            responder,
            fetcher: ChannelFetcher::default(),
            command: command.into(),
        }
    }

    #[must_use]
    pub fn with_fetcher(mut self, fetcher: ChannelFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    #[must_use]
    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Builds the report for `text` and sends it. Exactly one message is sent
    /// per call, whichever branch is taken.
    ///
    /// # Errors
    ///
    /// Only delivery failures surface here; lookup and listing failures are
    /// turned into the generic error response.
    #[tracing::instrument(level = "info", skip(self), fields(command = %self.command))]
    pub async fn handle(&self, text: &str) -> Result<FormattedReport, SlackError> {
        let report = match self.build_report(text).await {
            Ok(report) => report,
            Err(e) => {
                error!(user_id = %e.user_id(), "Command failed: {}", e);
                FormattedReport::Failure {
                    message: format!("{GENERIC_ERROR_PREFIX}: {e}"),
                }
            }
        };

        info!(report = report.kind(), "Sending command response");
        self.responder.send_message(&report).await?;
        Ok(report)
    }

    /// Produces the report without sending it.
    ///
    /// # Errors
    ///
    /// Fails if a user cannot be resolved or a channel listing fails.
    pub async fn build_report(&self, text: &str) -> Result<FormattedReport, CommandError> {
        match parse_args(text) {
            ParsedArgs::Usage { found } => {
                info!(mentions = found, "Wrong number of users, replying with usage");
                Ok(FormattedReport::Usage {
                    command: self.command.clone(),
                })
            }
            ParsedArgs::Single(user_id) => self.single_user(user_id).await,
            ParsedArgs::Pair(first, second) => self.comparison(first, second).await,
        }
    }

    async fn single_user(&self, user_id: String) -> Result<FormattedReport, CommandError> {
        let mut profiles = resolve_users(&self.directory, std::slice::from_ref(&user_id)).await?;
        let user = profiles.remove(0);

        let channels = self.fetcher.fetch_all(&self.directory, &user.id).await?;

        Ok(FormattedReport::SingleUser(SingleUserReport { user, channels }))
    }

    async fn comparison(
        &self,
        first_id: String,
        second_id: String,
    ) -> Result<FormattedReport, CommandError> {
        let mut profiles = resolve_users(&self.directory, &[first_id, second_id]).await?;
        let second = profiles.remove(1);
        let first = profiles.remove(0);

        let (first_channels, second_channels) = try_join(
            self.fetcher.fetch_all(&self.directory, &first.id),
            self.fetcher.fetch_all(&self.directory, &second.id),
        )
        .await?;

        Ok(FormattedReport::Comparison(ComparisonReport::new(
            first,
            &first_channels,
            second,
            &second_channels,
        )))
    }
}
