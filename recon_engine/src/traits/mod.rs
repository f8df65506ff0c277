//! Interface contracts for the engine's external collaborators.
//!
//! The matching core is pure computation over in-memory data; everything that touches the outside
//! world is reached through the traits in this module, each implemented by an adapter the engine
//! never sees the internals of:
//!
//! * [`TransactionSource`] — a banking or payment provider that supplies the transaction sequence.
//! * [`InvoiceDestination`] — the ledger holding the invoice sequence, and the only party that
//!   ever mutates an invoice (marking it paid).
//! * [`MatchStore`] — persistence for finalized match sets, split by direction and by whether the
//!   amounts reconciled.
//!
//! Retry, backoff and authentication are the adapters' business; the engine only sees their typed
//! errors.
mod data_objects;
mod destinations;
mod match_store;
mod sources;

pub use data_objects::{Cursor, Page, RefreshId};
pub use destinations::{DestinationError, InvoiceDestination};
pub use match_store::{MatchStore, MatchStoreError};
pub use sources::{SourceError, TransactionSource};
