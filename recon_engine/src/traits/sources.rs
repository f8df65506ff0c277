use thiserror::Error;

use super::data_objects::{Cursor, Page, RefreshId};
use crate::records::Transaction;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Source API error: {0}")]
    ApiError(String),
    #[error("Refresh {0} failed upstream")]
    RefreshFailed(RefreshId),
}

/// A payment or banking provider that supplies transactions.
///
/// Some providers only serve data synchronized on demand: for those, [`Self::start_refresh`]
/// kicks off a synchronization and [`Self::check_refresh`] polls it. Providers that are always
/// current return `None` from `start_refresh`, and the engine skips the polling.
#[allow(async_fn_in_trait)]
pub trait TransactionSource {
    /// A short operator-facing name for this source, used in log output.
    fn name(&self) -> &str;

    /// Ask the provider to synchronize its data. Returns a handle to poll, or `None` when the
    /// provider serves live data and has nothing to refresh.
    async fn start_refresh(&self) -> Result<Option<RefreshId>, SourceError>;

    /// Whether the given refresh has completed.
    async fn check_refresh(&self, refresh: &RefreshId) -> Result<bool, SourceError>;

    /// Fetch one page of transactions. Pass the cursor from the previous page to continue; `None`
    /// starts from the beginning.
    async fn fetch_transactions(&self, cursor: Option<&Cursor>) -> Result<Page<Transaction>, SourceError>;
}
