use chrono::{DateTime, Utc};
use thiserror::Error;

use super::data_objects::{Cursor, Page};
use crate::records::Invoice;

#[derive(Debug, Clone, Error)]
pub enum DestinationError {
    #[error("Destination API error: {0}")]
    ApiError(String),
    #[error("No invoice with foreign id {0}")]
    InvoiceNotFound(String),
}

/// The ledger (spreadsheet, accounting system) holding one direction's invoices.
///
/// This is the only collaborator that ever mutates an invoice: the engine itself treats invoices
/// as read-only and asks the destination to flip the paid flag.
#[allow(async_fn_in_trait)]
pub trait InvoiceDestination {
    /// Fetch one page of invoices. Pass the cursor from the previous page to continue; `None`
    /// starts from the beginning.
    async fn fetch_invoices(&self, cursor: Option<&Cursor>) -> Result<Page<Invoice>, DestinationError>;

    /// Mark the invoice with the given foreign id as paid at `paid_at` (the matched transaction's
    /// settlement time). Returns whether the ledger accepted the update.
    async fn mark_invoice_paid(&self, foreign_id: &str, paid_at: DateTime<Utc>) -> Result<bool, DestinationError>;
}
