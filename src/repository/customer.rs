use serde_json::{Value, json};

use crate::domain::customer::{Customer, CustomerUpdate};
use crate::domain::search::{ResultEnvelope, SearchQuery, Searchable};
use crate::domain::transaction::Transaction;
use crate::domain::types::{CustomerNumber, UserId};
use crate::models::customer::{Customer as WireCustomer, CustomerSearchResult};
use crate::models::remote::SearchParams;
use crate::models::transaction::TransactionSearchResult;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerReader, CustomerWriter, RemoteRepository};

/// Fault code the processor uses when no customer matches a lookup.
pub const CUSTOMER_NOT_FOUND_FAULT: &str = "40030";

/// Turns the processor's no-match fault into [`RepositoryError::NotFound`].
fn missing_customer(err: RepositoryError) -> RepositoryError {
    match err {
        RepositoryError::Fault { code, .. } if code == CUSTOMER_NOT_FOUND_FAULT => {
            RepositoryError::NotFound
        }
        other => other,
    }
}

/// Interprets the scalar returned by `searchCustomerID`.
///
/// The processor answers "no match" with an empty value or `0`.
fn parse_customer_number(value: Option<Value>) -> RepositoryResult<CustomerNumber> {
    let raw = match value {
        None | Some(Value::Null) => return Err(RepositoryError::NotFound),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(RepositoryError::Protocol(format!(
                "unexpected customer number {other}"
            )));
        }
    };

    if raw.is_empty() || raw == "0" {
        return Err(RepositoryError::NotFound);
    }

    raw.parse::<CustomerNumber>().map_err(RepositoryError::from)
}

impl CustomerReader for RemoteRepository {
    fn search_customer_id(&self, user_id: &UserId) -> RepositoryResult<CustomerNumber> {
        let value = self
            .call::<_, Value>("searchCustomerID", json!({ "CustID": user_id }))
            .map_err(missing_customer)?;
        parse_customer_number(value)
    }

    fn get_customer(&self, number: CustomerNumber) -> RepositoryResult<Customer> {
        let wire = self
            .call::<_, WireCustomer>("getCustomer", json!({ "CustNum": number.to_string() }))
            .map_err(missing_customer)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(Customer::try_from(wire)?)
    }

    fn search_customers(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Customer>> {
        let result: Option<CustomerSearchResult> =
            self.call(Customer::KIND.search_operation(), SearchParams::from(query))?;
        match result {
            Some(result) => Ok(ResultEnvelope::try_from(result)?),
            None => Ok(ResultEnvelope::empty()),
        }
    }

    fn get_customer_history(
        &self,
        number: CustomerNumber,
    ) -> RepositoryResult<ResultEnvelope<Transaction>> {
        let result: Option<TransactionSearchResult> = self.call(
            "getCustomerHistory",
            json!({ "CustNum": number.to_string() }),
        )?;
        match result {
            Some(result) => Ok(ResultEnvelope::try_from(result)?),
            None => Ok(ResultEnvelope::empty()),
        }
    }
}

impl CustomerWriter for RemoteRepository {
    fn enable_customer(&self, number: CustomerNumber) -> RepositoryResult<()> {
        self.call::<_, Value>("enableCustomer", json!({ "CustNum": number.to_string() }))?;
        Ok(())
    }

    fn disable_customer(&self, number: CustomerNumber) -> RepositoryResult<()> {
        self.call::<_, Value>("disableCustomer", json!({ "CustNum": number.to_string() }))?;
        Ok(())
    }

    fn update_customer(
        &self,
        number: CustomerNumber,
        update: &CustomerUpdate,
    ) -> RepositoryResult<bool> {
        let update_data: Vec<Value> = update
            .fields()
            .iter()
            .map(|(field, value)| json!({ "Field": field, "Value": value }))
            .collect();

        self.call_required(
            "quickUpdateCustomer",
            json!({ "CustNum": number.to_string(), "UpdateData": update_data }),
        )
    }
}
