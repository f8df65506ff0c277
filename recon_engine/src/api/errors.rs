use thiserror::Error;

use crate::{
    config::ConfigError,
    traits::{DestinationError, MatchStoreError, SourceError},
};

#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Transaction source error: {0}")]
    Source(#[from] SourceError),
    #[error("Invoice destination error: {0}")]
    Destination(#[from] DestinationError),
    #[error("Match store error: {0}")]
    MatchStore(#[from] MatchStoreError),
}
