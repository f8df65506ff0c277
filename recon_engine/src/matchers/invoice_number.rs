use regex::Regex;

use super::InvoiceMatcher;
use crate::{
    config::{compile_pattern, ConfigError},
    records::{Invoice, Transaction},
};

/// The suffix scan shared by [`InvoiceNumberMatcher`] and the window matcher.
///
/// Applies only to transactions with a non-empty, unstructured memo. Extracts every
/// non-overlapping regex hit from the memo as a candidate invoice number, then selects every
/// invoice whose invoice number ends with one of the candidates, preserving invoice-list order.
/// The suffix comparison tolerates numbering-scheme prefixes: a memo naming `0042` still matches
/// invoice `INV-2021-0042`.
pub(crate) fn suffix_matches(regex: &Regex, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice> {
    if transaction.memo_is_structured || transaction.memo.is_empty() {
        return Vec::new();
    }
    let candidates = regex.find_iter(&transaction.memo).map(|m| m.as_str()).collect::<Vec<_>>();
    invoices
        .iter()
        .filter(|invoice| candidates.iter().any(|candidate| invoice.invoice_number.ends_with(candidate)))
        .cloned()
        .collect()
}

/// Matches invoices whose invoice number appears (as a suffix) in the transaction memo. The memo
/// is scanned with a configurable regex; the default pattern treats the whole memo as one
/// candidate number. May return several invoices when the memo names several.
pub struct InvoiceNumberMatcher {
    regex: Regex,
}

impl InvoiceNumberMatcher {
    pub fn new(pattern: Option<&str>, flags: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self { regex: compile_pattern(pattern, flags)? })
    }
}

impl InvoiceMatcher for InvoiceNumberMatcher {
    fn match_invoices(&self, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice> {
        suffix_matches(&self.regex, transaction, invoices)
    }
}
