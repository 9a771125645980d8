use serde::{Deserialize, Serialize};

use crate::domain::search::{ResourceKind, Searchable};
use crate::domain::types::BatchRefNum;

/// Settlement batch summary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_ref_num: BatchRefNum,
    pub sequence: Option<u64>,
    pub status: String,
    pub opened: String,
    pub closed: Option<String>,
    pub transaction_count: u64,
    pub sales_amount: f64,
    pub credits_amount: f64,
    pub net_amount: f64,
}

impl Searchable for Batch {
    const KIND: ResourceKind = ResourceKind::Batch;
}
