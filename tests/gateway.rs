//! Relay gateway tests driving raw JSON messages through a fake remote service.

use std::sync::Mutex;

use serde_json::{Value, json};

use epay_bridge::domain::batch::Batch;
use epay_bridge::domain::customer::{BillingAddress, Customer, CustomerUpdate};
use epay_bridge::domain::report::{ReportFormat, ReportRequest, encode_report};
use epay_bridge::domain::search::{ResultEnvelope, SearchQuery};
use epay_bridge::domain::transaction::Transaction;
use epay_bridge::domain::types::{BatchRefNum, CustomerNumber, RefNum, UserId};
use epay_bridge::gateway::handle_message;
use epay_bridge::repository::errors::{RepositoryError, RepositoryResult};
use epay_bridge::repository::{
    BatchReader, CustomerReader, CustomerWriter, TransactionReader, TransactionWriter,
};

/// In-memory stand-in for the processor with a fixed set of customers.
#[derive(Default)]
struct FakeProcessor {
    customers: Vec<Customer>,
    fail_disable: Option<u64>,
    disabled: Mutex<Vec<u64>>,
    reports: Mutex<Vec<ReportRequest>>,
}

impl FakeProcessor {
    fn with_customers(numbers: &[u64]) -> Self {
        Self {
            customers: numbers
                .iter()
                .map(|&number| Customer {
                    customer_number: CustomerNumber::new(number).unwrap(),
                    customer_id: "acme".to_string(),
                    enabled: true,
                    schedule: None,
                    next: None,
                    amount: Some(10.0),
                    description: None,
                    billing: BillingAddress::default(),
                })
                .collect(),
            ..Self::default()
        }
    }
}

impl CustomerReader for FakeProcessor {
    fn search_customer_id(&self, user_id: &UserId) -> RepositoryResult<CustomerNumber> {
        self.customers
            .iter()
            .find(|c| c.customer_id == user_id.as_str())
            .map(|c| c.customer_number)
            .ok_or(RepositoryError::NotFound)
    }

    fn get_customer(&self, number: CustomerNumber) -> RepositoryResult<Customer> {
        self.customers
            .iter()
            .find(|c| c.customer_number == number)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn search_customers(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Customer>> {
        let wanted = query.criteria.params.first().map(|p| p.value.as_str());
        let items: Vec<Customer> = self
            .customers
            .iter()
            .filter(|c| wanted.is_none_or(|id| c.customer_id == id))
            .cloned()
            .collect();
        Ok(ResultEnvelope::new(items.len(), items)?)
    }

    fn get_customer_history(
        &self,
        _number: CustomerNumber,
    ) -> RepositoryResult<ResultEnvelope<Transaction>> {
        Ok(ResultEnvelope::empty())
    }
}

impl CustomerWriter for FakeProcessor {
    fn enable_customer(&self, _number: CustomerNumber) -> RepositoryResult<()> {
        Ok(())
    }

    fn disable_customer(&self, number: CustomerNumber) -> RepositoryResult<()> {
        if self.fail_disable == Some(number.get()) {
            return Err(RepositoryError::Fault {
                code: "40031".to_string(),
                message: "Customer locked".to_string(),
            });
        }
        self.disabled.lock().unwrap().push(number.get());
        Ok(())
    }

    fn update_customer(
        &self,
        _number: CustomerNumber,
        update: &CustomerUpdate,
    ) -> RepositoryResult<bool> {
        Ok(!update.is_empty())
    }
}

impl TransactionReader for FakeProcessor {
    fn search_transactions(
        &self,
        _query: &SearchQuery,
    ) -> RepositoryResult<ResultEnvelope<Transaction>> {
        Ok(ResultEnvelope::empty())
    }

    fn get_transaction(&self, _ref_num: RefNum) -> RepositoryResult<Transaction> {
        Err(RepositoryError::NotFound)
    }

    fn get_transaction_report(&self, request: &ReportRequest) -> RepositoryResult<String> {
        self.reports.lock().unwrap().push(request.clone());
        Ok(encode_report("Date,Amount\n2024-03-05,10.00\n"))
    }
}

impl TransactionWriter for FakeProcessor {
    fn void_transaction(&self, _ref_num: RefNum) -> RepositoryResult<bool> {
        Ok(false)
    }
}

impl BatchReader for FakeProcessor {
    fn search_batches(&self, _query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Batch>> {
        let batch = Batch {
            batch_ref_num: BatchRefNum::new(12).unwrap(),
            sequence: Some(1),
            status: "Open".to_string(),
            opened: "2024-03-05 00:00:01".to_string(),
            closed: None,
            transaction_count: 0,
            sales_amount: 0.0,
            credits_amount: 0.0,
            net_amount: 0.0,
        };
        Ok(ResultEnvelope::new(1, vec![batch])?.with_matched(1))
    }
}

fn call(repo: &FakeProcessor, request: Value) -> Value {
    let reply = handle_message(repo, request.to_string().as_bytes(), ReportFormat::Tab);
    serde_json::from_slice(&reply).expect("reply is JSON")
}

#[test]
fn malformed_message_gets_bad_request_reply() {
    let repo = FakeProcessor::default();

    let reply = handle_message(&repo, b"{not json", ReportFormat::Csv);
    let reply: Value = serde_json::from_slice(&reply).unwrap();

    assert_eq!(reply["status"], "error");
    assert_eq!(reply["kind"], "BadRequest");
}

#[test]
fn unknown_method_gets_bad_request_reply() {
    let reply = call(
        &FakeProcessor::default(),
        json!({"method": "dropDatabase", "params": {}}),
    );

    assert_eq!(reply["kind"], "BadRequest");
}

#[test]
fn day_range_returns_exact_literals() {
    let reply = call(
        &FakeProcessor::default(),
        json!({"method": "dayRange", "params": {"year": "2024", "month": "03", "day": "05"}}),
    );

    assert_eq!(
        reply,
        json!({
            "status": "ok",
            "result": {"start": "2024-03-05 00:00:00", "end": "2024-03-05 23:59:59"}
        })
    );
}

#[test]
fn build_criteria_defaults_to_match_all() {
    let reply = call(
        &FakeProcessor::default(),
        json!({
            "method": "buildCriteria",
            "params": {"params": [{"field": "CustomerID", "operator": "eq", "value": "acme"}]}
        }),
    );

    assert_eq!(reply["result"]["matchAll"], true);
    assert_eq!(reply["result"]["params"][0]["operator"], "eq");
}

#[test]
fn resolve_reports_not_found_distinctly() {
    let reply = call(
        &FakeProcessor::with_customers(&[1]),
        json!({"method": "resolve", "params": {"userId": "nonexistent"}}),
    );

    assert_eq!(reply["status"], "error");
    assert_eq!(reply["kind"], "NotFound");
}

#[test]
fn resolve_returns_customer_number() {
    let reply = call(
        &FakeProcessor::with_customers(&[17]),
        json!({"method": "resolve", "params": {"userId": "acme"}}),
    );

    assert_eq!(reply, json!({"status": "ok", "result": 17}));
}

#[test]
fn customer_reply_uses_camel_case_fields() {
    let reply = call(
        &FakeProcessor::with_customers(&[21]),
        json!({"method": "getCustomer", "params": {"userId": "acme"}}),
    );

    assert_eq!(reply["status"], "ok");
    assert_eq!(reply["result"]["customerNumber"], 21);
    assert_eq!(reply["result"]["customerId"], "acme");
    assert!(reply["result"].get("customer_number").is_none());
}

#[test]
fn disable_all_reports_processed_count_on_abort() {
    let repo = FakeProcessor {
        fail_disable: Some(2),
        ..FakeProcessor::with_customers(&[1, 2, 3])
    };

    let reply = call(
        &repo,
        json!({"method": "disableAll", "params": {"userId": "acme"}}),
    );

    assert_eq!(reply["kind"], "PartialBulkFailure");
    assert_eq!(reply["processed"], 1);
    assert_eq!(*repo.disabled.lock().unwrap(), vec![1]);
}

#[test]
fn disable_all_returns_count() {
    let repo = FakeProcessor::with_customers(&[4, 5]);

    let reply = call(
        &repo,
        json!({"method": "disableAll", "params": {"userId": "acme"}}),
    );

    assert_eq!(reply, json!({"status": "ok", "result": 2}));
}

#[test]
fn batch_search_returns_envelope() {
    let reply = call(
        &FakeProcessor::default(),
        json!({"method": "search", "params": {"kind": "batch", "page": {"limit": 10}}}),
    );

    assert_eq!(reply["status"], "ok");
    assert_eq!(reply["result"]["returnedCount"], 1);
    assert_eq!(reply["result"]["matchedCount"], 1);
    assert_eq!(reply["result"]["hasMore"], false);
    assert_eq!(reply["result"]["items"][0]["batchRefNum"], 12);
}

#[test]
fn zero_page_limit_is_an_invalid_argument() {
    let reply = call(
        &FakeProcessor::default(),
        json!({"method": "search", "params": {"kind": "customer", "page": {"limit": 0}}}),
    );

    assert_eq!(reply["kind"], "InvalidArgument");
}

#[test]
fn report_without_format_uses_configured_default() {
    let repo = FakeProcessor::default();

    let reply = call(
        &repo,
        json!({
            "method": "getReport",
            "params": {"reportType": "custom:daily", "year": "2024", "month": "03", "day": "05"}
        }),
    );

    assert_eq!(reply["result"], "Date,Amount\n2024-03-05,10.00\n");
    let reports = repo.reports.lock().unwrap();
    assert_eq!(reports[0].format, ReportFormat::Tab);
    assert_eq!(reports[0].start_date, "2024-03-05");
}
