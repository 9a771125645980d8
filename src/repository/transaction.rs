use serde_json::{Value, json};

use crate::domain::report::ReportRequest;
use crate::domain::search::{ResultEnvelope, SearchQuery, Searchable};
use crate::domain::transaction::Transaction;
use crate::domain::types::RefNum;
use crate::models::remote::SearchParams;
use crate::models::transaction::{Transaction as WireTransaction, TransactionSearchResult};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{RemoteRepository, TransactionReader, TransactionWriter};

impl TransactionReader for RemoteRepository {
    fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> RepositoryResult<ResultEnvelope<Transaction>> {
        let result: Option<TransactionSearchResult> =
            self.call(Transaction::KIND.search_operation(), SearchParams::from(query))?;
        match result {
            Some(result) => Ok(ResultEnvelope::try_from(result)?),
            None => Ok(ResultEnvelope::empty()),
        }
    }

    fn get_transaction(&self, ref_num: RefNum) -> RepositoryResult<Transaction> {
        let wire = self
            .call::<_, WireTransaction>("getTransaction", json!({ "RefNum": ref_num.to_string() }))?
            .ok_or(RepositoryError::NotFound)?;
        Ok(Transaction::try_from(wire)?)
    }

    fn get_transaction_report(&self, request: &ReportRequest) -> RepositoryResult<String> {
        self.call_required(
            "getTransactionReport",
            json!({
                "StartDate": request.start_date,
                "EndDate": request.end_date,
                "Report": request.report_type,
                "Format": request.format.as_str(),
            }),
        )
    }
}

impl TransactionWriter for RemoteRepository {
    fn void_transaction(&self, ref_num: RefNum) -> RepositoryResult<bool> {
        let voided = self.call::<_, Value>(
            "voidTransaction",
            json!({ "RefNum": ref_num.to_string() }),
        )?;
        Ok(matches!(voided, Some(Value::Bool(true))))
    }
}
