//! The reconciliation flow API: composes the external collaborators around the matching core.
//!
//! [`ReconciliationApi`] drives one reconciliation run end to end: pull transactions and invoices
//! through the adapter traits, match per direction, hand the finalized match sets to the
//! [`crate::traits::MatchStore`], push paid-status updates back to the ledger, and run the
//! consistency check over what was persisted.
mod errors;
mod flow_api;

pub use errors::ReconciliationError;
pub use flow_api::{sort_invoices, sort_transactions, PaidInvoice, ReconciliationApi};
