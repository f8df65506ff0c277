//! Post-hoc consistency checking over finalized, amount-reconciled matches.
//!
//! Every invoice may settle against at most one transaction per direction. In principle an invoice
//! could legitimately split across several transactions, but the engine treats any invoice claimed
//! twice as an inconsistency to be resolved by the operator; this strictness is policy.

use std::collections::{HashMap, HashSet};

use log::*;
use serde::{Deserialize, Serialize};

use crate::records::{Direction, Match};

/// Tallies how often each invoice number is claimed across the given matches.
pub fn count_invoice_occurrences(matches: &[Match]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for m in matches {
        for invoice in &m.invoices {
            *counts.entry(invoice.invoice_number.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// An invoice number claimed by more than one transaction within one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub invoice_number: String,
    pub count: usize,
}

/// Reports every invoice claimed by more than one transaction in the given direction's
/// amount-reconciled matches, in order of first appearance. Never stops at the first violation:
/// one run reports the complete set of inconsistencies.
pub fn check_direction(direction: Direction, matches: &[Match]) -> Vec<Violation> {
    let counts = count_invoice_occurrences(matches);
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    for m in matches {
        for invoice in &m.invoices {
            if !seen.insert(invoice.invoice_number.as_str()) {
                continue;
            }
            let count = counts[invoice.invoice_number.as_str()];
            if count > 1 {
                error!("🔎️⚠️ Invoice {} is claimed by {count} {direction} transactions", invoice.invoice_number);
                violations.push(Violation { invoice_number: invoice.invoice_number.clone(), count });
            }
        }
    }
    violations
}

/// The aggregated outcome of checking both directions. The directions are independent; both must
/// be violation-free for the reconciliation run to be trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub withdrawals: Vec<Violation>,
    pub deposits: Vec<Violation>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.withdrawals.is_empty() && self.deposits.is_empty()
    }
}

/// Checks the amount-reconciled matches of both directions and aggregates every violation before
/// signalling overall failure.
pub fn check_matches(withdrawals: &[Match], deposits: &[Match]) -> CheckReport {
    let report = CheckReport {
        withdrawals: check_direction(Direction::Withdrawals, withdrawals),
        deposits: check_direction(Direction::Deposits, deposits),
    };
    if report.passed() {
        info!("🔎️✅️ Consistency check passed: every invoice is claimed at most once in both directions");
    }
    report
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, TimeZone, Utc};
    use recon_common::Money;

    use super::*;
    use crate::records::{Invoice, MatcherKind, SourceType, Transaction};

    fn match_claiming(tx_id: &str, invoice_numbers: &[&str]) -> Match {
        let ts = Utc.with_ymd_and_hms(2021, 12, 16, 9, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2021, 12, 1).unwrap();
        let invoices = invoice_numbers
            .iter()
            .map(|n| Invoice::new(format!("rec-{n}"), *n, date, Money::from_units(100)))
            .collect::<Vec<_>>();
        let amount = Money::from_units(-100) * invoices.len() as i64;
        Match {
            transaction: Transaction::new(SourceType::Bank, tx_id, amount, "EUR", ts),
            invoices,
            matcher: Some(MatcherKind::InvoiceNumber),
            amounts_reconciled: true,
        }
    }

    #[test]
    fn counts_occurrences_across_matches() {
        let matches = vec![match_claiming("t1", &["INV-100", "INV-101"]), match_claiming("t2", &["INV-100"])];
        let counts = count_invoice_occurrences(&matches);
        assert_eq!(counts["INV-100"], 2);
        assert_eq!(counts["INV-101"], 1);
    }

    #[test]
    fn doubly_claimed_invoice_is_a_violation() {
        let matches = vec![match_claiming("t1", &["INV-100"]), match_claiming("t2", &["INV-100"])];
        let violations = check_direction(Direction::Withdrawals, &matches);
        assert_eq!(violations, vec![Violation { invoice_number: "INV-100".to_string(), count: 2 }]);
    }

    #[test]
    fn all_violations_are_reported_in_one_run() {
        let matches = vec![
            match_claiming("t1", &["INV-1", "INV-2"]),
            match_claiming("t2", &["INV-2", "INV-3"]),
            match_claiming("t3", &["INV-1"]),
            match_claiming("t4", &["INV-1"]),
        ];
        let violations = check_direction(Direction::Withdrawals, &matches);
        assert_eq!(violations, vec![
            Violation { invoice_number: "INV-1".to_string(), count: 3 },
            Violation { invoice_number: "INV-2".to_string(), count: 2 },
        ]);
    }

    #[test]
    fn unique_claims_pass() {
        let matches = vec![match_claiming("t1", &["INV-1"]), match_claiming("t2", &["INV-2"])];
        let report = check_matches(&matches, &matches);
        assert!(report.passed());
    }

    #[test]
    fn directions_are_checked_independently() {
        let clean = vec![match_claiming("t1", &["INV-1"])];
        let dirty = vec![match_claiming("t2", &["INV-9"]), match_claiming("t3", &["INV-9"])];
        let report = check_matches(&clean, &dirty);
        assert!(!report.passed());
        assert!(report.withdrawals.is_empty());
        assert_eq!(report.deposits.len(), 1);
        assert_eq!(report.deposits[0].count, 2);
    }
}
