//! Reconciliation Engine
//!
//! Reconciles financial transactions pulled from payment and banking sources against invoices
//! pulled from a ledger destination. The engine is provider-agnostic: concrete HTTP adapters,
//! persistence and command wiring live outside this crate and plug in through the traits in
//! [`mod@traits`].
//!
//! The library is divided into three main sections:
//! 1. The matching core ([`mod@matchers`], [`mod@matching`]). A chain of pure, pluggable
//!    strategies associates each transaction with the invoices whose amounts should reconcile;
//!    a two-phase policy prefers the first strategy whose candidates sum to the transaction
//!    amount, then falls back to the first strategy that finds anything at all.
//! 2. The consistency checker ([`mod@checker`]). Validates, after the fact, that no invoice in a
//!    finalized match set is claimed by more than one transaction.
//! 3. The flow API ([`mod@api`]). Composes the adapter traits around the core: pull, match,
//!    store, push paid-status updates, check.
//!
//! Matching is synchronous, deterministic, pure computation over data already in memory; all I/O
//! is behind the collaborator traits.
pub mod api;
pub mod checker;
pub mod config;
pub mod helpers;
pub mod matchers;
pub mod matching;
pub mod records;
pub mod traits;

pub use api::{ReconciliationApi, ReconciliationError};
pub use checker::{check_matches, CheckReport, Violation};
pub use config::{ConfigError, IgnoreConfig, MatcherConfig, ReconciliationConfig};
pub use matchers::{InvoiceMatcher, MatcherChain};
pub use matching::match_transactions_with_invoices;
pub use records::{Direction, Invoice, Match, MatcherKind, SourceType, Transaction};
