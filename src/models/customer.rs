use serde::{Deserialize, Serialize};

use crate::domain::customer::{BillingAddress as DomainBillingAddress, Customer as DomainCustomer};
use crate::domain::search::ResultEnvelope;
use crate::domain::types::{CustomerNumber, TypeConstraintError};
use crate::models::into_envelope;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Wire model for [`crate::domain::customer::BillingAddress`].
pub struct BillingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Wire model for [`crate::domain::customer::Customer`].
pub struct Customer {
    /// Decimal string on the wire.
    pub cust_num: String,
    #[serde(rename = "CustomerID", default)]
    pub customer_id: String,
    #[serde(default)]
    pub enabled: bool,
    pub schedule: Option<String>,
    pub next: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    #[serde(default)]
    pub billing_address: BillingAddress,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerSearchResult {
    pub customers_matched: Option<usize>,
    pub customers_returned: usize,
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
}

impl From<BillingAddress> for DomainBillingAddress {
    fn from(address: BillingAddress) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            company: address.company,
            street: address.street,
            zip: address.zip,
            email: address.email,
        }
    }
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_number: customer.cust_num.parse::<CustomerNumber>()?,
            customer_id: customer.customer_id,
            enabled: customer.enabled,
            schedule: customer.schedule,
            next: customer.next,
            amount: customer.amount,
            description: customer.description,
            billing: customer.billing_address.into(),
        })
    }
}

impl TryFrom<CustomerSearchResult> for ResultEnvelope<DomainCustomer> {
    type Error = TypeConstraintError;

    fn try_from(result: CustomerSearchResult) -> Result<Self, Self::Error> {
        into_envelope(
            result.customers_returned,
            result.customers_matched,
            result.customers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_customer_into_domain() {
        let wire: Customer = serde_json::from_str(
            r#"{
                "CustNum": "4410",
                "CustomerID": "acme",
                "Enabled": true,
                "Schedule": "monthly",
                "Next": "2024-04-01",
                "Amount": 75.0,
                "BillingAddress": {"FirstName": "Ada", "Email": "ada@example.com"}
            }"#,
        )
        .unwrap();

        let customer = DomainCustomer::try_from(wire).unwrap();

        assert_eq!(customer.customer_number.get(), 4410);
        assert_eq!(customer.customer_id, "acme");
        assert!(customer.enabled);
        assert_eq!(customer.amount, Some(75.0));
        assert_eq!(customer.billing.first_name.as_deref(), Some("Ada"));
        assert_eq!(customer.description, None);
    }

    #[test]
    fn invalid_customer_number_is_rejected() {
        let wire: Customer = serde_json::from_str(r#"{"CustNum": "abc"}"#).unwrap();

        assert!(DomainCustomer::try_from(wire).is_err());
    }
}
