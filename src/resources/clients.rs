use serde_json::Value;

use super::{Id, Resource};
use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{Params, Record, require_fields};

const PREFIX: &str = "admin/client";

/// Fields `create` checks locally before anything is sent.
pub const CLIENT_REQUIRED_FIELDS: [&str; 4] = ["email", "first_name", "last_name", "password"];

const DEFAULT_BALANCE_DESCRIPTION: &str = "Balance update";

#[derive(Debug, Clone, Copy)]
/// Customer accounts (`admin/client`).
pub struct Clients<'a> {
    resource: Resource<'a>,
}

impl<'a> Clients<'a> {
    pub(crate) fn new(client: &'a FossBillingClient) -> Self {
        Self {
            resource: Resource::new(client, PREFIX),
        }
    }

    /// List clients. Filters such as `page`, `per_page` or `search` are passed through.
    pub fn list(&self, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        self.resource.list("", filters)
    }

    pub fn get(&self, client_id: Id) -> Result<Value, FossBillingError> {
        self.resource.get(&client_id.to_string())
    }

    /// Create a client.
    ///
    /// `payload` must contain `email`, `first_name`, `last_name` and `password`;
    /// otherwise [`FossBillingError::Validation`] is returned and no request is sent.
    pub fn create(&self, payload: &Record) -> Result<Value, FossBillingError> {
        require_fields(payload, &CLIENT_REQUIRED_FIELDS)?;
        self.resource.post("", Some(payload))
    }

    pub fn update(&self, client_id: Id, payload: &Record) -> Result<Value, FossBillingError> {
        self.resource.put(&client_id.to_string(), payload)
    }

    /// Delete a client, optionally together with its orders (`delete_orders=1`).
    pub fn delete(&self, client_id: Id, delete_orders: bool) -> Result<bool, FossBillingError> {
        self.resource.delete(
            &client_id.to_string(),
            Params::new().with("delete_orders", delete_orders),
        )
    }

    pub fn get_balance(&self, client_id: Id) -> Result<Value, FossBillingError> {
        self.resource.get(&format!("{client_id}/balance"))
    }

    /// Add (positive `amount`) or subtract (negative `amount`) funds.
    ///
    /// A missing or empty description is sent as `"Balance update"`.
    pub fn update_balance(
        &self,
        client_id: Id,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Value, FossBillingError> {
        let description = description
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_BALANCE_DESCRIPTION);

        let mut body = Record::new();
        body.insert("amount".to_owned(), Value::from(amount));
        body.insert("description".to_owned(), Value::from(description));
        self.resource
            .post(&format!("{client_id}/balance"), Some(&body))
    }
}
