use std::time::Duration;

use log::*;

use super::errors::ReconciliationError;
use crate::{
    checker::{check_matches, CheckReport},
    config::{ConfigError, IgnoreConfig, ReconciliationConfig},
    matchers::MatcherChain,
    matching::match_transactions_with_invoices,
    records::{Direction, Invoice, Match, Transaction},
    traits::{InvoiceDestination, MatchStore, RefreshId, TransactionSource},
};

const DEFAULT_REFRESH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Confirmation that one invoice was marked paid at the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidInvoice {
    pub invoice_number: String,
    pub foreign_id: String,
}

/// Drives a reconciliation run against the configured strategy chains.
///
/// Both chains are built up front, so a bad matcher configuration fails construction before any
/// adapter is contacted.
pub struct ReconciliationApi {
    withdrawal_chain: MatcherChain,
    deposit_chain: MatcherChain,
    ignores: IgnoreConfig,
    refresh_poll_interval: Duration,
}

impl std::fmt::Debug for ReconciliationApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi")
    }
}

impl ReconciliationApi {
    pub fn new(config: &ReconciliationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            withdrawal_chain: MatcherChain::build(&config.withdrawal_matchers)?,
            deposit_chain: MatcherChain::build(&config.deposit_matchers)?,
            ignores: config.ignores.clone(),
            refresh_poll_interval: DEFAULT_REFRESH_POLL_INTERVAL,
        })
    }

    pub fn with_refresh_poll_interval(mut self, interval: Duration) -> Self {
        self.refresh_poll_interval = interval;
        self
    }

    fn chain(&self, direction: Direction) -> &MatcherChain {
        match direction {
            Direction::Withdrawals => &self.withdrawal_chain,
            Direction::Deposits => &self.deposit_chain,
        }
    }

    /// Pulls the full transaction sequence from every source.
    ///
    /// Starts a refresh on each source that supports one and polls until every refresh completes,
    /// then drains each source's pages. Transactions whose counterpart name is on the direction's
    /// ignore list are dropped. The result is sorted for stable persistence.
    pub async fn pull_transactions<S: TransactionSource>(
        &self,
        sources: &[S],
    ) -> Result<Vec<Transaction>, ReconciliationError> {
        info!("⬇️💳️ Starting refreshes for {} source(s)", sources.len());
        let mut refreshes = Vec::with_capacity(sources.len());
        for source in sources {
            let refresh = source.start_refresh().await?;
            if refresh.is_none() {
                debug!("⬇️💳️ Source {} serves live data, nothing to refresh", source.name());
            }
            refreshes.push(refresh);
        }
        while !self.refreshes_complete(sources, &refreshes).await? {
            trace!("⬇️💳️ Refreshes still running, polling again shortly");
            tokio::time::sleep(self.refresh_poll_interval).await;
        }
        let mut transactions = Vec::new();
        for source in sources {
            let mut page = source.fetch_transactions(None).await?;
            let mut pulled = page.items;
            while let Some(cursor) = page.cursor {
                page = source.fetch_transactions(Some(&cursor)).await?;
                pulled.extend(page.items);
            }
            debug!("⬇️💳️ Pulled {} transaction(s) from {}", pulled.len(), source.name());
            transactions.extend(pulled);
        }
        let before = transactions.len();
        transactions.retain(|transaction| !self.is_ignored(transaction));
        if before > transactions.len() {
            debug!("⬇️💳️ Dropped {} transaction(s) via ignore lists", before - transactions.len());
        }
        sort_transactions(&mut transactions);
        info!("⬇️💳️ Pulled {} transaction(s) in total", transactions.len());
        Ok(transactions)
    }

    async fn refreshes_complete<S: TransactionSource>(
        &self,
        sources: &[S],
        refreshes: &[Option<RefreshId>],
    ) -> Result<bool, ReconciliationError> {
        for (source, refresh) in sources.iter().zip(refreshes) {
            if let Some(refresh) = refresh {
                if !source.check_refresh(refresh).await? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn is_ignored(&self, transaction: &Transaction) -> bool {
        let Some(name) = transaction.counterpart_name.as_deref() else {
            return false;
        };
        match transaction.direction() {
            Some(Direction::Withdrawals) => self.ignores.withdrawals.contains(name),
            Some(Direction::Deposits) | None => self.ignores.deposits.contains(name),
        }
    }

    /// Pulls one direction's full invoice sequence, draining the destination's pages. The result
    /// is sorted for stable persistence.
    pub async fn pull_invoices<D: InvoiceDestination>(
        &self,
        destination: &D,
    ) -> Result<Vec<Invoice>, ReconciliationError> {
        let mut page = destination.fetch_invoices(None).await?;
        let mut invoices = page.items;
        while let Some(cursor) = page.cursor {
            page = destination.fetch_invoices(Some(&cursor)).await?;
            invoices.extend(page.items);
        }
        sort_invoices(&mut invoices);
        info!("⬇️🧾️ Pulled {} invoice(s)", invoices.len());
        Ok(invoices)
    }

    /// Matches one direction's transactions against its invoice set. Transactions belonging to
    /// the other direction (or moving no money) are skipped; the rest are processed in order.
    pub fn match_direction(
        &self,
        direction: Direction,
        transactions: &[Transaction],
        invoices: &[Invoice],
    ) -> Vec<Match> {
        let relevant = transactions
            .iter()
            .filter(|transaction| transaction.direction() == Some(direction))
            .cloned()
            .collect::<Vec<_>>();
        info!("🔗️ Matching {} {direction} transaction(s) against {} invoice(s)", relevant.len(), invoices.len());
        match_transactions_with_invoices(&relevant, invoices, self.chain(direction))
    }

    /// Persists a finalized match set, split into the amount-reconciled and amount-unreconciled
    /// groups.
    pub async fn store_matches<M: MatchStore>(
        &self,
        direction: Direction,
        matches: &[Match],
        store: &M,
    ) -> Result<(), ReconciliationError> {
        let (reconciled, unreconciled): (Vec<Match>, Vec<Match>) =
            matches.iter().cloned().partition(|m| m.amounts_reconciled);
        info!(
            "💾️ Storing {} reconciled and {} unreconciled {direction} match(es)",
            reconciled.len(),
            unreconciled.len()
        );
        store.store_matches(direction, true, &reconciled).await?;
        store.store_matches(direction, false, &unreconciled).await?;
        Ok(())
    }

    /// Marks every still-unpaid invoice in the given amount-reconciled matches as paid at the
    /// ledger, keyed by the invoice's foreign id and the matched transaction's settlement time.
    ///
    /// A failure on one invoice is logged and does not stop the rest; the returned list holds the
    /// confirmations for the invoices the ledger accepted.
    pub async fn push_paid_invoices<D: InvoiceDestination>(
        &self,
        matches: &[Match],
        destination: &D,
    ) -> Result<Vec<PaidInvoice>, ReconciliationError> {
        let mut confirmations = Vec::new();
        for m in matches {
            if m.invoices.is_empty() {
                continue;
            }
            for invoice in m.invoices.iter().filter(|invoice| !invoice.is_paid) {
                match destination.mark_invoice_paid(&invoice.foreign_id, m.transaction.timestamp).await {
                    Ok(true) => {
                        info!("⬆️🧾️ Marked invoice {} as paid", invoice.invoice_number);
                        confirmations.push(PaidInvoice {
                            invoice_number: invoice.invoice_number.clone(),
                            foreign_id: invoice.foreign_id.clone(),
                        });
                    },
                    Ok(false) => {
                        warn!("⬆️🧾️ Ledger rejected the paid-status update for invoice {}", invoice.invoice_number);
                    },
                    Err(e) => {
                        error!("⬆️🧾️ Error marking invoice {} as paid: {e}", invoice.invoice_number);
                    },
                }
            }
        }
        Ok(confirmations)
    }

    /// Loads the persisted amount-reconciled matches for both directions and checks that no
    /// invoice is claimed by more than one transaction.
    pub async fn check_consistency<M: MatchStore>(&self, store: &M) -> Result<CheckReport, ReconciliationError> {
        let withdrawals = store.load_matches(Direction::Withdrawals, true).await?;
        let deposits = store.load_matches(Direction::Deposits, true).await?;
        Ok(check_matches(&withdrawals, &deposits))
    }
}

/// Sorts transactions for stable persistence: reverse chronological, then by source type, then by
/// foreign id.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.source_type.cmp(&b.source_type))
            .then_with(|| a.foreign_id.cmp(&b.foreign_id))
    });
}

/// Sorts invoices for stable persistence: reverse by invoice date, then by foreign id.
pub fn sort_invoices(invoices: &mut [Invoice]) {
    invoices.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date).then_with(|| a.foreign_id.cmp(&b.foreign_id)));
}
