use super::InvoiceMatcher;
use crate::{
    helpers::normalize_structured_reference,
    records::{Invoice, Transaction},
};

/// Matches a transaction against the first invoice whose structured reference equals the
/// transaction memo, after stripping the `/` and `+` separators from the memo.
///
/// Normalization and matching are applied unconditionally, whether or not the transaction flags
/// its memo as structured; the flag is not consulted.
pub struct StructuredReferenceMatcher;

impl InvoiceMatcher for StructuredReferenceMatcher {
    fn match_invoices(&self, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice> {
        let normalized = normalize_structured_reference(&transaction.memo);
        invoices
            .iter()
            .find(|invoice| invoice.structured_reference.as_deref() == Some(normalized.as_str()))
            .map(|invoice| vec![invoice.clone()])
            .unwrap_or_default()
    }
}
