use thiserror::Error;

use crate::records::{Direction, Match};

#[derive(Debug, Clone, Error)]
pub enum MatchStoreError {
    #[error("Match store error: {0}")]
    StorageError(String),
}

/// Persistence for finalized match sets. Matches are stored in four groups: per direction, split
/// by whether the chosen invoices' amounts reconciled with the transaction. The storage format is
/// the implementor's business.
#[allow(async_fn_in_trait)]
pub trait MatchStore {
    async fn store_matches(
        &self,
        direction: Direction,
        reconciled: bool,
        matches: &[Match],
    ) -> Result<(), MatchStoreError>;

    async fn load_matches(&self, direction: Direction, reconciled: bool) -> Result<Vec<Match>, MatchStoreError>;
}
