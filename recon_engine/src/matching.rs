//! The matching orchestrator: applies an ordered strategy chain to each transaction with a
//! two-phase selection policy.

use log::*;
use recon_common::Money;

use crate::{
    matchers::MatcherChain,
    records::{Invoice, Match, Transaction},
};

/// Matches every transaction against the shared invoice set, emitting exactly one [`Match`] per
/// transaction, in input order.
///
/// Phase one runs the chain in configured order and lets the first strategy whose candidate
/// amounts sum to the transaction amount (within tolerance) win. Only when no strategy reconciles
/// does phase two run the same chain again and let the first non-empty candidate list win, with
/// `amounts_reconciled` false. A transaction no strategy can place gets an empty match.
///
/// Transactions are processed independently against a read-only invoice set, so the output is
/// deterministic and idempotent for an unchanged snapshot.
pub fn match_transactions_with_invoices(
    transactions: &[Transaction],
    invoices: &[Invoice],
    chain: &MatcherChain,
) -> Vec<Match> {
    transactions.iter().map(|transaction| match_one(transaction, invoices, chain)).collect()
}

fn match_one(transaction: &Transaction, invoices: &[Invoice], chain: &MatcherChain) -> Match {
    let target = transaction.amount.abs();
    for (kind, matcher) in chain.entries() {
        let candidates = matcher.match_invoices(transaction, invoices);
        let total = candidates.iter().map(|invoice| invoice.amount).sum::<Money>();
        if total.reconciles_with(target) {
            debug!(
                "🔗️💰️ Transaction [{}] reconciled by {kind}: {} invoice(s) totalling {total}",
                transaction.foreign_id,
                candidates.len()
            );
            return Match {
                transaction: transaction.clone(),
                invoices: candidates,
                matcher: Some(kind),
                amounts_reconciled: true,
            };
        }
    }
    for (kind, matcher) in chain.entries() {
        let candidates = matcher.match_invoices(transaction, invoices);
        if !candidates.is_empty() {
            debug!(
                "🔗️📎️ Transaction [{}] matched by {kind} without reconciling amounts ({} invoice(s))",
                transaction.foreign_id,
                candidates.len()
            );
            return Match {
                transaction: transaction.clone(),
                invoices: candidates,
                matcher: Some(kind),
                amounts_reconciled: false,
            };
        }
    }
    trace!("🔗️🕳️ No strategy matched transaction [{}]", transaction.foreign_id);
    Match { transaction: transaction.clone(), invoices: Vec::new(), matcher: None, amounts_reconciled: false }
}
