use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::search::{ResourceKind, Searchable};
use crate::domain::types::{RefNum, TypeConstraintError};

/// Format the processor uses for transaction timestamps.
pub const TRANSACTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A processed transaction as reported by the remote service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub ref_num: Option<RefNum>,
    pub customer_id: Option<String>,
    pub date_time: String,
    pub status: Option<String>,
    pub transaction_type: Option<String>,
    pub amount: f64,
    pub description: Option<String>,
    pub card_type: Option<String>,
    pub error: Option<String>,
}

/// Normalized view of a [`Transaction`] for display and reconciliation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub ref_num: Option<RefNum>,
    pub customer_id: Option<String>,
    pub date_time: NaiveDateTime,
    pub description: Option<String>,
    /// Card brand, or `ACH` for check transactions.
    pub card_type: String,
    /// First word of the processor status (`"Settled"` for `"Settled (Batch 9)"`).
    pub status: Option<String>,
    pub transaction_type: Option<String>,
    pub note: String,
    /// Negative for credits.
    pub amount: f64,
}

impl Transaction {
    pub fn summarize(&self) -> Result<TransactionSummary, TypeConstraintError> {
        let date_time = NaiveDateTime::parse_from_str(&self.date_time, TRANSACTION_TIME_FORMAT)
            .map_err(|_| TypeConstraintError::InvalidValue(self.date_time.clone()))?;

        let card_type = self
            .card_type
            .as_deref()
            .map(str::trim)
            .filter(|card| !card.is_empty())
            .unwrap_or("ACH")
            .to_string();

        let status = self
            .status
            .as_deref()
            .and_then(|status| status.split_whitespace().next())
            .map(str::to_string);

        let amount = if self.transaction_type.as_deref() == Some("Credit") {
            -self.amount
        } else {
            self.amount
        };

        let note = match status.as_deref() {
            Some("Error") => self.error.clone().unwrap_or_default(),
            _ => String::new(),
        };

        Ok(TransactionSummary {
            ref_num: self.ref_num,
            customer_id: self.customer_id.clone(),
            date_time,
            description: self.description.clone(),
            card_type,
            status,
            transaction_type: self.transaction_type.clone(),
            note,
            amount,
        })
    }
}

impl TransactionSummary {
    pub fn is_authorized(&self) -> bool {
        self.status.as_deref() == Some("Authorized")
    }
}

impl Searchable for Transaction {
    const KIND: ResourceKind = ResourceKind::Transaction;
}
