//! The pluggable matching strategies.
//!
//! Every strategy implements [`InvoiceMatcher`]: a pure function from a transaction and the shared
//! invoice set to the list of invoices that should reconcile against it. Strategies never perform
//! I/O, never mutate their inputs and carry no mutable state, so the same chain can be applied to
//! any number of transactions, in any order, concurrently.
//!
//! * [`StructuredReferenceMatcher`] — exact match on the normalized structured payment reference.
//! * [`InvoiceNumberMatcher`] — invoice numbers extracted from the transaction memo by regex,
//!   matched by suffix.
//! * [`InvoiceNumberWindowMatcher`] — subset-sum search in a window of invoices around a suffix
//!   match, for transactions that settle several invoices at once.
//! * [`UniqueAmountMatcher`] — the single invoice whose amount equals the transaction amount
//!   exactly.
//!
//! An ordered chain of strategies is built from [`MatcherConfig`] entries with
//! [`MatcherChain::build`]; a bad regex in the configuration fails the build before any matching
//! runs.
mod invoice_number;
mod invoice_number_window;
mod structured_reference;
mod subsets;
mod unique_amount;

pub use invoice_number::InvoiceNumberMatcher;
pub use invoice_number_window::InvoiceNumberWindowMatcher;
pub use structured_reference::StructuredReferenceMatcher;
pub use subsets::Subsets;
pub use unique_amount::UniqueAmountMatcher;

use crate::{
    config::{ConfigError, MatcherConfig},
    records::{Invoice, MatcherKind, Transaction},
};

/// The common strategy contract: map a transaction and the invoice set to the (possibly empty)
/// ordered list of invoices that should reconcile against it.
pub trait InvoiceMatcher {
    fn match_invoices(&self, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice>;
}

/// An ordered chain of named strategies for one reconciliation direction.
pub struct MatcherChain {
    entries: Vec<(MatcherKind, Box<dyn InvoiceMatcher + Send + Sync>)>,
}

impl MatcherChain {
    /// Instantiates the configured strategies in order. Fails on the first invalid regex, so a
    /// misconfigured chain is rejected at startup rather than mid-run.
    pub fn build(configs: &[MatcherConfig]) -> Result<Self, ConfigError> {
        let mut entries: Vec<(MatcherKind, Box<dyn InvoiceMatcher + Send + Sync>)> = Vec::with_capacity(configs.len());
        for config in configs {
            let matcher: Box<dyn InvoiceMatcher + Send + Sync> = match config {
                MatcherConfig::StructuredReference => Box::new(StructuredReferenceMatcher),
                MatcherConfig::InvoiceNumber { regex, regex_flags } => {
                    Box::new(InvoiceNumberMatcher::new(regex.as_deref(), regex_flags.as_deref())?)
                },
                MatcherConfig::InvoiceNumberWindow { regex, regex_flags, offset } => {
                    Box::new(InvoiceNumberWindowMatcher::new(regex.as_deref(), regex_flags.as_deref(), *offset)?)
                },
                MatcherConfig::UniqueAmount => Box::new(UniqueAmountMatcher),
            };
            entries.push((config.kind(), matcher));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> impl Iterator<Item = (MatcherKind, &(dyn InvoiceMatcher + Send + Sync))> + '_ {
        self.entries.iter().map(|(kind, matcher)| (*kind, matcher.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for MatcherChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = self.entries.iter().map(|(kind, _)| *kind).collect::<Vec<_>>();
        f.debug_struct("MatcherChain").field("entries", &kinds).finish()
    }
}
