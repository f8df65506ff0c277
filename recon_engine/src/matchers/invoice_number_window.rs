use recon_common::Money;
use regex::Regex;

use super::{invoice_number::suffix_matches, subsets::Subsets, InvoiceMatcher};
use crate::{
    config::{compile_pattern, ConfigError, DEFAULT_WINDOW_OFFSET},
    records::{Invoice, Transaction},
};

/// Subset-sum search for transactions that settle several invoices in one transfer.
///
/// Built on the same suffix scan as [`super::InvoiceNumberMatcher`]: the memo must name at least
/// one invoice, and the first suffix match anchors the search. The full invoice list is sorted by
/// invoice number and a window of `2 * offset + 1` invoices around the anchor is taken (clamped at
/// the ends), on the assumption that invoices settled together carry nearby numbers. Subsets of
/// the window of size two and up are then enumerated, smallest first; the first subset containing
/// the anchor whose amounts sum to the transaction amount (within tolerance) wins.
///
/// There is no single-invoice fallback: an empty suffix match, or no subset summing to the
/// transaction amount, yields an empty result.
pub struct InvoiceNumberWindowMatcher {
    regex: Regex,
    offset: usize,
}

impl InvoiceNumberWindowMatcher {
    pub fn new(pattern: Option<&str>, flags: Option<&str>, offset: Option<usize>) -> Result<Self, ConfigError> {
        Ok(Self { regex: compile_pattern(pattern, flags)?, offset: offset.unwrap_or(DEFAULT_WINDOW_OFFSET) })
    }
}

impl InvoiceMatcher for InvoiceNumberWindowMatcher {
    fn match_invoices(&self, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice> {
        let base = suffix_matches(&self.regex, transaction, invoices);
        let Some(anchor) = base.first() else {
            return Vec::new();
        };
        let mut sorted = invoices.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
        let Some(position) = sorted.iter().position(|invoice| invoice.foreign_id == anchor.foreign_id) else {
            return Vec::new();
        };
        let start = position.saturating_sub(self.offset);
        let end = (position + self.offset + 1).min(sorted.len());
        let window = &sorted[start..end];
        let anchor_index = position - start;
        let target = transaction.amount.abs();
        for subset in Subsets::new(window.len()) {
            if !subset.contains(&anchor_index) {
                continue;
            }
            let total = subset.iter().map(|&i| window[i].amount).sum::<Money>();
            if total.reconciles_with(target) {
                // the window is sorted by invoice number and subset indices are ascending, so the
                // result is already in invoice-number order
                return subset.into_iter().map(|i| window[i].clone()).collect();
            }
        }
        Vec::new()
    }
}
