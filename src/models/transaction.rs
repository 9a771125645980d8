use serde::{Deserialize, Serialize};

use crate::domain::search::ResultEnvelope;
use crate::domain::transaction::Transaction as DomainTransaction;
use crate::domain::types::{RefNum, TypeConstraintError};
use crate::models::into_envelope;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionDetail {
    #[serde(default)]
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreditCardData {
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionResponse {
    pub ref_num: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Wire model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<String>,
    pub date_time: String,
    pub status: Option<String>,
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub details: TransactionDetail,
    #[serde(default)]
    pub credit_card_data: CreditCardData,
    #[serde(default)]
    pub response: TransactionResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionSearchResult {
    pub transactions_matched: Option<usize>,
    pub transactions_returned: usize,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(transaction: Transaction) -> Result<Self, Self::Error> {
        let ref_num = match transaction.response.ref_num.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<RefNum>()?),
        };

        Ok(Self {
            ref_num,
            customer_id: transaction.customer_id,
            date_time: transaction.date_time,
            status: transaction.status,
            transaction_type: transaction.transaction_type,
            amount: transaction.details.amount,
            description: transaction.details.description,
            card_type: transaction.credit_card_data.card_type,
            error: transaction.response.error,
        })
    }
}

impl TryFrom<TransactionSearchResult> for ResultEnvelope<DomainTransaction> {
    type Error = TypeConstraintError;

    fn try_from(result: TransactionSearchResult) -> Result<Self, Self::Error> {
        into_envelope(
            result.transactions_returned,
            result.transactions_matched,
            result.transactions,
        )
    }
}
