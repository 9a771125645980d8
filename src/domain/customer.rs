use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::search::{ResourceKind, Searchable};
use crate::domain::types::CustomerNumber;

/// Billing contact stored with a processor customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub email: Option<String>,
}

/// A stored customer with its recurring-billing schedule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_number: CustomerNumber,
    /// Business identifier; shared by every card a member has on file.
    pub customer_id: String,
    pub enabled: bool,
    pub schedule: Option<String>,
    pub next: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub billing: BillingAddress,
}

/// Partial update of a stored customer, keyed by processor field name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct CustomerUpdate {
    fields: BTreeMap<String, String>,
}

impl CustomerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, String>> for CustomerUpdate {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

/// Changes to the recurring-billing schedule of a customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringUpdate {
    pub enabled: bool,
    pub next: String,
    pub description: String,
    pub amount: String,
}

impl From<RecurringUpdate> for CustomerUpdate {
    fn from(update: RecurringUpdate) -> Self {
        let enabled = if update.enabled { "True" } else { "False" };
        CustomerUpdate::new()
            .field("Enabled", enabled)
            .field("Next", update.next)
            .field("Description", update.description)
            .field("Amount", update.amount)
            .field("SendReceipt", "True")
    }
}

impl Searchable for Customer {
    const KIND: ResourceKind = ResourceKind::Customer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurring_update_always_sends_receipt() {
        let update: CustomerUpdate = RecurringUpdate {
            enabled: false,
            next: "2024-04-01".to_string(),
            description: "Membership".to_string(),
            amount: "75.00".to_string(),
        }
        .into();

        let fields = update.fields();
        assert_eq!(fields["Enabled"], "False");
        assert_eq!(fields["Next"], "2024-04-01");
        assert_eq!(fields["SendReceipt"], "True");
        assert_eq!(fields.len(), 5);
    }
}
