use serde::{Deserialize, Serialize};

use crate::domain::batch::Batch as DomainBatch;
use crate::domain::search::ResultEnvelope;
use crate::domain::types::{BatchRefNum, TypeConstraintError};
use crate::models::into_envelope;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Wire model for [`crate::domain::batch::Batch`].
pub struct Batch {
    pub batch_ref_num: String,
    pub sequence: Option<u64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub opened: String,
    pub closed: Option<String>,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub sales_amount: f64,
    #[serde(default)]
    pub credits_amount: f64,
    #[serde(default)]
    pub net_amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchSearchResult {
    pub batches_matched: Option<usize>,
    pub batches_returned: usize,
    #[serde(default)]
    pub batches: Option<Vec<Batch>>,
}

impl TryFrom<Batch> for DomainBatch {
    type Error = TypeConstraintError;

    fn try_from(batch: Batch) -> Result<Self, Self::Error> {
        Ok(Self {
            batch_ref_num: batch.batch_ref_num.parse::<BatchRefNum>()?,
            sequence: batch.sequence,
            status: batch.status,
            opened: batch.opened,
            closed: batch.closed,
            transaction_count: batch.transaction_count,
            sales_amount: batch.sales_amount,
            credits_amount: batch.credits_amount,
            net_amount: batch.net_amount,
        })
    }
}

impl TryFrom<BatchSearchResult> for ResultEnvelope<DomainBatch> {
    type Error = TypeConstraintError;

    fn try_from(result: BatchSearchResult) -> Result<Self, Self::Error> {
        into_envelope(
            result.batches_returned,
            result.batches_matched,
            result.batches,
        )
    }
}
