use std::collections::HashSet;

use chrono::Duration;

use super::InvoiceMatcher;
use crate::records::{Invoice, Transaction};

/// Matches a transaction with the one invoice whose amount equals the transaction's absolute
/// amount exactly (no tolerance) and whose date is at most one day after the transaction.
///
/// Applies only to transactions with an unstructured memo; the memo content itself is irrelevant.
/// When several invoices qualify but all belong to the same counterpart, the one dated closest to
/// the transaction wins (first occurrence on a tie). Several qualifying counterparts is
/// ambiguous and yields nothing.
pub struct UniqueAmountMatcher;

impl InvoiceMatcher for UniqueAmountMatcher {
    fn match_invoices(&self, transaction: &Transaction, invoices: &[Invoice]) -> Vec<Invoice> {
        if transaction.memo_is_structured {
            return Vec::new();
        }
        let target = transaction.amount.abs();
        let cutoff = transaction.timestamp + Duration::days(1);
        let qualifying = invoices
            .iter()
            .filter(|invoice| invoice.amount == target && invoice.date_as_timestamp() <= cutoff)
            .collect::<Vec<_>>();
        if qualifying.len() == 1 {
            return vec![qualifying[0].clone()];
        }
        let counterparts = qualifying.iter().map(|invoice| invoice.counterpart_id.as_deref()).collect::<HashSet<_>>();
        if counterparts.len() == 1 {
            let closest = qualifying
                .iter()
                .min_by_key(|invoice| (invoice.date_as_timestamp() - transaction.timestamp).num_seconds().abs());
            if let Some(invoice) = closest {
                return vec![(*invoice).clone()];
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, TimeZone, Utc};
    use recon_common::Money;

    use super::*;
    use crate::records::SourceType;

    fn transaction(amount_units: i64) -> Transaction {
        let ts = Utc.with_ymd_and_hms(2021, 12, 16, 0, 0, 0).unwrap();
        Transaction::new(SourceType::Bank, "t1", Money::from_units(amount_units), "EUR", ts).with_memo("december")
    }

    fn invoice(foreign_id: &str, amount_units: i64, date: (i32, u32, u32), counterpart: &str) -> Invoice {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Invoice::new(foreign_id, format!("INV-{foreign_id}"), date, Money::from_units(amount_units))
            .with_counterpart_id(counterpart)
    }

    #[test]
    fn single_qualifying_invoice_wins() {
        let invoices = vec![invoice("a", 200, (2021, 12, 1), "C1"), invoice("b", 150, (2021, 12, 1), "C1")];
        let result = UniqueAmountMatcher.match_invoices(&transaction(-200), &invoices);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].foreign_id, "a");
    }

    #[test]
    fn same_counterpart_picks_closest_date() {
        let invoices = vec![
            invoice("a", 200, (2021, 12, 1), "C2"),
            invoice("b", 200, (2021, 12, 15), "C2"),
            invoice("c", 200, (2021, 12, 31), "C2"),
        ];
        // 2021-12-31 is beyond timestamp + 1 day, so only the first two qualify
        let result = UniqueAmountMatcher.match_invoices(&transaction(-200), &invoices);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].foreign_id, "b");
    }

    #[test]
    fn tie_on_distance_keeps_first_occurrence() {
        let invoices = vec![invoice("a", 200, (2021, 12, 15), "C2"), invoice("b", 200, (2021, 12, 17), "C2")];
        let result = UniqueAmountMatcher.match_invoices(&transaction(-200), &invoices);
        assert_eq!(result[0].foreign_id, "a");
    }

    #[test]
    fn distinct_counterparts_are_ambiguous() {
        let invoices = vec![invoice("a", 200, (2021, 12, 1), "C1"), invoice("b", 200, (2021, 12, 2), "C2")];
        assert!(UniqueAmountMatcher.match_invoices(&transaction(-200), &invoices).is_empty());
    }

    #[test]
    fn amount_equality_is_strict() {
        let near = Invoice::new(
            "a",
            "INV-a",
            NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(),
            Money::from_cents(20_050),
        );
        assert!(UniqueAmountMatcher.match_invoices(&transaction(-200), &[near]).is_empty());
    }

    #[test]
    fn invoice_dated_one_day_after_still_qualifies() {
        let invoices = vec![invoice("a", 200, (2021, 12, 17), "C1")];
        let result = UniqueAmountMatcher.match_invoices(&transaction(-200), &invoices);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn structured_memo_does_not_apply() {
        let ts = Utc.with_ymd_and_hms(2021, 12, 16, 0, 0, 0).unwrap();
        let tx = Transaction::new(SourceType::Bank, "t1", Money::from_units(-200), "EUR", ts)
            .with_structured_memo("123456789");
        let invoices = vec![invoice("a", 200, (2021, 12, 1), "C1")];
        assert!(UniqueAmountMatcher.match_invoices(&tx, &invoices).is_empty());
    }

    #[test]
    fn empty_invoice_list_yields_empty_result() {
        assert!(UniqueAmountMatcher.match_invoices(&transaction(-200), &[]).is_empty());
    }
}
