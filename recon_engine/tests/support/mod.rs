//! In-memory collaborators for exercising the reconciliation flow without any real adapters.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use recon_engine::{
    records::{Direction, Invoice, Match, Transaction},
    traits::{Cursor, DestinationError, InvoiceDestination, MatchStore, MatchStoreError, Page, RefreshId, SourceError, TransactionSource},
};

const PAGE_SIZE: usize = 2;

/// A transaction source serving a fixed list in small pages, optionally pretending its refresh
/// needs a few polls to complete.
pub struct MemorySource {
    name: String,
    transactions: Vec<Transaction>,
    checks_until_ready: Mutex<u32>,
}

impl MemorySource {
    pub fn new(name: &str, transactions: Vec<Transaction>, checks_until_ready: u32) -> Self {
        Self { name: name.to_string(), transactions, checks_until_ready: Mutex::new(checks_until_ready) }
    }
}

impl TransactionSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start_refresh(&self) -> Result<Option<RefreshId>, SourceError> {
        if *self.checks_until_ready.lock().unwrap() == 0 {
            return Ok(None);
        }
        Ok(Some(RefreshId::from(format!("refresh-{}", self.name))))
    }

    async fn check_refresh(&self, _refresh: &RefreshId) -> Result<bool, SourceError> {
        let mut remaining = self.checks_until_ready.lock().unwrap();
        if *remaining == 0 {
            return Ok(true);
        }
        *remaining -= 1;
        Ok(*remaining == 0)
    }

    async fn fetch_transactions(&self, cursor: Option<&Cursor>) -> Result<Page<Transaction>, SourceError> {
        Ok(paginate(&self.transactions, cursor))
    }
}

/// An invoice ledger that records every paid-status update it accepts.
pub struct MemoryLedger {
    invoices: Vec<Invoice>,
    paid: Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl MemoryLedger {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self { invoices, paid: Mutex::new(Vec::new()) }
    }

    /// The (foreign id, paid-at) updates accepted so far, in call order.
    pub fn paid_updates(&self) -> Vec<(String, DateTime<Utc>)> {
        self.paid.lock().unwrap().clone()
    }
}

impl InvoiceDestination for MemoryLedger {
    async fn fetch_invoices(&self, cursor: Option<&Cursor>) -> Result<Page<Invoice>, DestinationError> {
        Ok(paginate(&self.invoices, cursor))
    }

    async fn mark_invoice_paid(&self, foreign_id: &str, paid_at: DateTime<Utc>) -> Result<bool, DestinationError> {
        if !self.invoices.iter().any(|invoice| invoice.foreign_id == foreign_id) {
            return Err(DestinationError::InvoiceNotFound(foreign_id.to_string()));
        }
        self.paid.lock().unwrap().push((foreign_id.to_string(), paid_at));
        Ok(true)
    }
}

/// Match persistence backed by a map keyed on (direction, reconciled).
#[derive(Default)]
pub struct MemoryMatchStore {
    groups: Mutex<HashMap<(Direction, bool), Vec<Match>>>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    async fn store_matches(
        &self,
        direction: Direction,
        reconciled: bool,
        matches: &[Match],
    ) -> Result<(), MatchStoreError> {
        self.groups.lock().unwrap().insert((direction, reconciled), matches.to_vec());
        Ok(())
    }

    async fn load_matches(&self, direction: Direction, reconciled: bool) -> Result<Vec<Match>, MatchStoreError> {
        Ok(self.groups.lock().unwrap().get(&(direction, reconciled)).cloned().unwrap_or_default())
    }
}

fn paginate<T: Clone>(items: &[T], cursor: Option<&Cursor>) -> Page<T> {
    let offset = cursor.map(|c| c.0.parse::<usize>().unwrap()).unwrap_or(0);
    let end = (offset + PAGE_SIZE).min(items.len());
    let cursor = (end < items.len()).then(|| Cursor::from(end.to_string()));
    Page { items: items[offset..end].to_vec(), cursor }
}
