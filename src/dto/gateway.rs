//! Messages exchanged with relay callers over the gateway socket.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::customer::{Customer, CustomerUpdate, RecurringUpdate};
use crate::domain::report::ReportFormat;
use crate::domain::search::{
    PageRequest, ResourceKind, ResultEnvelope, SearchCriteria, SearchParam,
};
use crate::domain::transaction::TransactionSummary;
use crate::domain::types::{CustomerNumber, RefNum, TypeConstraintError, UserId};
use crate::services::ServiceError;

/// Error kind reported for messages that are not a valid request.
pub const BAD_REQUEST_KIND: &str = "BadRequest";

/// Paging parameters as sent by callers; missing values take the
/// collection's defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn into_page(self, kind: ResourceKind) -> Result<PageRequest, TypeConstraintError> {
        let first = PageRequest::first(kind);
        PageRequest::new(
            self.offset.unwrap_or(first.offset()),
            self.limit.unwrap_or(first.limit()),
            self.sort.unwrap_or_else(|| first.sort().to_string()),
        )
    }
}

/// One named method call. `method` selects the variant and `params` carries
/// its arguments.
#[derive(Debug, Deserialize)]
#[serde(
    tag = "method",
    content = "params",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum GatewayRequest {
    BuildCriteria {
        params: Vec<SearchParam>,
        #[serde(default = "match_all_default")]
        match_all: bool,
    },
    DayRange {
        year: String,
        month: String,
        day: String,
    },
    Search {
        kind: ResourceKind,
        #[serde(default)]
        criteria: SearchCriteria,
        page: Option<PageParams>,
    },
    Resolve {
        user_id: UserId,
    },
    GetCustomer {
        user_id: UserId,
    },
    SearchCustomersById {
        user_id: UserId,
        page: Option<PageParams>,
    },
    GetAllCustomers {
        user_id: UserId,
    },
    ListEnabledCustomers,
    AutoBillEnabled {
        user_id: UserId,
    },
    EnableCustomer {
        user_id: UserId,
    },
    DisableCustomer {
        user_id: UserId,
    },
    DisableCustomerNumber {
        number: CustomerNumber,
    },
    UpdateCustomer {
        number: CustomerNumber,
        fields: CustomerUpdate,
    },
    UpdateRecurring {
        number: CustomerNumber,
        update: RecurringUpdate,
    },
    CustomerHistory {
        number: CustomerNumber,
    },
    HistoryFor {
        user_id: UserId,
    },
    DisableAll {
        user_id: UserId,
        page: Option<PageParams>,
    },
    TransactionsForDay {
        year: String,
        month: String,
        day: String,
        page: Option<PageParams>,
    },
    GetTransaction {
        ref_num: RefNum,
    },
    VoidTransaction {
        user_id: UserId,
        ref_num: RefNum,
    },
    ListBatches {
        #[serde(default)]
        criteria: SearchCriteria,
        page: Option<PageParams>,
    },
    GetReport {
        report_type: String,
        year: String,
        month: String,
        day: String,
        format: Option<ReportFormat>,
    },
    ChecksSettledByDate {
        year: String,
        month: String,
        day: String,
    },
}

fn match_all_default() -> bool {
    true
}

/// One search page plus whether the caller should ask for the next one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    #[serde(flatten)]
    pub envelope: ResultEnvelope<T>,
    pub has_more: bool,
    /// Offset to request next; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

impl<T> SearchPage<T> {
    pub fn new(envelope: ResultEnvelope<T>, page: &PageRequest) -> Self {
        let has_more = envelope.has_more(page);
        Self {
            envelope,
            has_more,
            next_offset: has_more.then(|| page.next().offset()),
        }
    }
}

/// A customer together with its normalized transaction history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerHistory {
    pub customer: Customer,
    pub transactions: Vec<TransactionSummary>,
}

impl From<(Customer, Vec<TransactionSummary>)> for CustomerHistory {
    fn from((customer, transactions): (Customer, Vec<TransactionSummary>)) -> Self {
        Self {
            customer,
            transactions,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GatewayReply {
    Ok {
        result: Value,
    },
    Error {
        kind: String,
        message: String,
        /// Items completed before a bulk operation aborted.
        #[serde(skip_serializing_if = "Option::is_none")]
        processed: Option<usize>,
    },
}

impl GatewayReply {
    pub fn ok<T: Serialize>(result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(result) => GatewayReply::Ok { result },
            Err(e) => GatewayReply::Error {
                kind: "EncodingFailure".to_string(),
                message: e.to_string(),
                processed: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        GatewayReply::Error {
            kind: BAD_REQUEST_KIND.to_string(),
            message: message.into(),
            processed: None,
        }
    }
}

impl From<ServiceError> for GatewayReply {
    fn from(err: ServiceError) -> Self {
        let processed = match &err {
            ServiceError::PartialBulk { processed, .. } => Some(*processed),
            _ => None,
        };
        GatewayReply::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
            processed,
        }
    }
}
