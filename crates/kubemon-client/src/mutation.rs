use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::ChangeId;
use crate::sync::{Notification, Synchronizer};

/// Performs state-changing calls and re-synchronizes afterwards.
///
/// Nothing is patched locally: after a successful mutation the changes and
/// stats are fetched again, so `is_read` flags and counters are always what
/// the backend reports. A failed mutation changes nothing and raises an
/// error notification.
#[derive(Debug, Clone)]
pub struct MutationCoordinator {
    sync: Synchronizer,
}

impl MutationCoordinator {
    pub fn new(sync: Synchronizer) -> Self {
        Self { sync }
    }

    pub async fn mark_read(&self, id: &ChangeId) -> ClientResult<()> {
        let result = match self.sync.client().mark_read(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClientError::rejected(
                "mark-read",
                format!("change '{}' was not marked as read", id),
            )),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Marked change {} as read", id);
                self.sync.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!("Error marking {} as read: {}", id, e);
                self.sync
                    .notify(Notification::error("Error marking change as read"));
                Err(e)
            }
        }
    }

    /// Returns the number of changes the backend marked
    pub async fn mark_all_read(&self) -> ClientResult<u64> {
        match self.sync.client().mark_all_read().await {
            Ok(count) => {
                info!("Marked {} changes as read", count);
                self.sync.refresh().await;
                self.sync.notify(Notification::success(format!(
                    "Marked {} changes as read",
                    count
                )));
                Ok(count)
            }
            Err(e) => {
                warn!("Error marking all as read: {}", e);
                self.sync
                    .notify(Notification::error("Error marking changes as read"));
                Err(e)
            }
        }
    }

    /// Ask the backend to persist its change log now.
    ///
    /// Persistence does not alter the change list, so no re-sync follows.
    pub async fn force_save(&self) -> ClientResult<()> {
        let result = match self.sync.client().save_now().await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(ClientError::rejected(
                "save-now",
                response.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.sync.notify(Notification::success(
                    "Changes saved to file successfully!",
                ));
                Ok(())
            }
            Err(e) => {
                warn!("Error saving to file: {}", e);
                let message = match &e {
                    ClientError::Rejected { reason, .. } => {
                        format!("Error saving to file: {}", reason)
                    }
                    _ => "Error saving to file".to_string(),
                };
                self.sync.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    /// Manual refresh requested by the user
    pub async fn refresh(&self) {
        self.sync.refresh().await;
        self.sync.notify(Notification::info("Data refreshed"));
    }
}
