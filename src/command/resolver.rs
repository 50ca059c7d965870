//! Looks up the profiles of the users named in a command.

use futures::future::try_join_all;
use tracing::debug;

use super::ports::DirectoryClient;
use crate::core::models::UserProfile;
use crate::errors::CommandError;

/// Resolves every ID concurrently. Profiles come back in input order.
///
/// # Errors
///
/// Returns the first lookup failure; there is no partial result.
pub async fn resolve_users<D>(
    directory: &D,
    user_ids: &[String],
) -> Result<Vec<UserProfile>, CommandError>
where
    D: DirectoryClient + ?Sized,
{
    let lookups = user_ids.iter().map(|user_id| async move {
        let profile = directory
            .resolve_user(user_id)
            .await
            .map_err(|source| CommandError::Resolution {
                user_id: user_id.clone(),
                source,
            })?;
        debug!(user_id = %user_id, display_name = %profile.display_name, "Resolved user");
        Ok::<_, CommandError>(profile)
    });

    try_join_all(lookups).await
}
