use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use recon_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------     SourceType      ---------------------------------------------------------
/// The kind of upstream system a transaction was pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A bank account aggregator.
    Bank,
    /// A payment service provider.
    PayPal,
}

impl Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Bank => write!(f, "bank"),
            SourceType::PayPal => write!(f, "paypal"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid source type: {0}")]
pub struct ConversionError(String);

impl FromStr for SourceType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(Self::Bank),
            "paypal" => Ok(Self::PayPal),
            s => Err(ConversionError(format!("Invalid source type: {s}"))),
        }
    }
}

//--------------------------------------     Direction       ---------------------------------------------------------
/// The two reconciliation directions. Withdrawals (outbound money) are reconciled against invoices
/// the operator owes; deposits (inbound money) against invoices owed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Withdrawals,
    Deposits,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Withdrawals => write!(f, "withdrawals"),
            Direction::Deposits => write!(f, "deposits"),
        }
    }
}

//--------------------------------------     Transaction     ---------------------------------------------------------
/// A financial transaction pulled from a payment or banking source. Immutable once pulled; the
/// matching core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub source_type: SourceType,
    /// The transaction id as assigned by the upstream system
    pub foreign_id: String,
    /// Signed amount. Negative = outbound (withdrawal), positive = inbound (deposit)
    pub amount: Money,
    pub currency: String,
    /// Free-text message attached to the transfer. Useful for matching transactions with invoices
    pub memo: String,
    /// True when the memo carries a structured payment reference rather than free text
    pub memo_is_structured: bool,
    /// The time the transaction was settled upstream
    pub timestamp: DateTime<Utc>,
    pub counterpart_reference: Option<String>,
    pub counterpart_name: Option<String>,
}

impl Transaction {
    pub fn new(
        source_type: SourceType,
        foreign_id: impl Into<String>,
        amount: Money,
        currency: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            source_type,
            foreign_id: foreign_id.into(),
            amount,
            currency: currency.into(),
            memo: String::new(),
            memo_is_structured: false,
            timestamp,
            counterpart_reference: None,
            counterpart_name: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_structured_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self.memo_is_structured = true;
        self
    }

    pub fn with_counterpart(mut self, reference: impl Into<String>, name: impl Into<String>) -> Self {
        self.counterpart_reference = Some(reference.into());
        self.counterpart_name = Some(name.into());
        self
    }

    /// The reconciliation direction this transaction belongs to. Zero-amount transactions belong
    /// to neither direction.
    pub fn direction(&self) -> Option<Direction> {
        if self.amount.value() < 0 {
            Some(Direction::Withdrawals)
        } else if self.amount.value() > 0 {
            Some(Direction::Deposits)
        } else {
            None
        }
    }
}

//--------------------------------------      Invoice        ---------------------------------------------------------
/// An invoice pulled from the ledger destination. The matching core never mutates invoices; only
/// the external push collaborator flips the paid flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// The record id as assigned by the ledger destination
    pub foreign_id: String,
    /// The invoice number. May embed a longer alphanumeric numbering-scheme code
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// The amount owed. Always a non-negative magnitude
    pub amount: Money,
    pub is_paid: bool,
    /// Structured payment reference, when the ledger carries one
    pub structured_reference: Option<String>,
    pub counterpart_id: Option<String>,
}

impl Invoice {
    pub fn new(
        foreign_id: impl Into<String>,
        invoice_number: impl Into<String>,
        invoice_date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            foreign_id: foreign_id.into(),
            invoice_number: invoice_number.into(),
            invoice_date,
            amount,
            is_paid: false,
            structured_reference: None,
            counterpart_id: None,
        }
    }

    pub fn with_structured_reference(mut self, reference: impl Into<String>) -> Self {
        self.structured_reference = Some(reference.into());
        self
    }

    pub fn with_counterpart_id(mut self, counterpart_id: impl Into<String>) -> Self {
        self.counterpart_id = Some(counterpart_id.into());
        self
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }

    /// The invoice date as a UTC timestamp at midnight, for comparisons against transaction
    /// settlement times.
    pub fn date_as_timestamp(&self) -> DateTime<Utc> {
        self.invoice_date.and_time(NaiveTime::MIN).and_utc()
    }
}

//--------------------------------------    MatcherKind      ---------------------------------------------------------
/// Names the strategy that produced a match. Doubles as the tag used in matcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatcherKind {
    StructuredReference,
    InvoiceNumber,
    InvoiceNumberWindow,
    UniqueAmount,
}

impl Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatcherKind::StructuredReference => write!(f, "structuredReference"),
            MatcherKind::InvoiceNumber => write!(f, "invoiceNumber"),
            MatcherKind::InvoiceNumberWindow => write!(f, "invoiceNumberWindow"),
            MatcherKind::UniqueAmount => write!(f, "uniqueAmount"),
        }
    }
}

//--------------------------------------       Match         ---------------------------------------------------------
/// The immutable outcome of matching one transaction against the invoice set. Exactly one `Match`
/// exists per input transaction, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub transaction: Transaction,
    /// The invoices chosen for this transaction, possibly empty, in strategy output order
    pub invoices: Vec<Invoice>,
    /// The strategy that produced the choice, or `None` when no strategy applied
    pub matcher: Option<MatcherKind>,
    /// True when the chosen invoices' total fell within tolerance of the transaction's absolute
    /// amount
    pub amounts_reconciled: bool,
}
