use serde_json::Value;

use super::{Id, Resource, reason_body};
use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{Params, Record};

const PREFIX: &str = "admin/order";

#[derive(Debug, Clone, Copy)]
/// Product orders (`admin/order`).
///
/// Lifecycle methods only trigger the transition; the server decides whether it is allowed.
pub struct Orders<'a> {
    resource: Resource<'a>,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a FossBillingClient) -> Self {
        Self {
            resource: Resource::new(client, PREFIX),
        }
    }

    pub fn list(&self, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        self.resource.list("", filters)
    }

    pub fn get(&self, order_id: Id) -> Result<Value, FossBillingError> {
        self.resource.get(&order_id.to_string())
    }

    /// Order `product_id` for `client_id`. Entries in `extra` (period, quantity,
    /// config options) are merged into the body and win over the two ids.
    pub fn create(
        &self,
        client_id: Id,
        product_id: Id,
        extra: &Record,
    ) -> Result<Value, FossBillingError> {
        let mut body = Record::new();
        body.insert("client_id".to_owned(), Value::from(client_id));
        body.insert("product_id".to_owned(), Value::from(product_id));
        body.extend(extra.clone());
        self.resource.post("", Some(&body))
    }

    pub fn update(&self, order_id: Id, payload: &Record) -> Result<Value, FossBillingError> {
        self.resource.put(&order_id.to_string(), payload)
    }

    /// Delete an order, optionally together with its addons (`delete_addons=1`).
    pub fn delete(&self, order_id: Id, delete_addons: bool) -> Result<bool, FossBillingError> {
        self.resource.delete(
            &order_id.to_string(),
            Params::new().with("delete_addons", delete_addons),
        )
    }

    pub fn activate(&self, order_id: Id) -> Result<Value, FossBillingError> {
        self.resource.post(&format!("{order_id}/activate"), None)
    }

    pub fn renew(&self, order_id: Id) -> Result<Value, FossBillingError> {
        self.resource.post(&format!("{order_id}/renew"), None)
    }

    pub fn suspend(&self, order_id: Id, reason: &str) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{order_id}/suspend"), Some(&reason_body(reason)))
    }

    pub fn unsuspend(&self, order_id: Id) -> Result<Value, FossBillingError> {
        self.resource.post(&format!("{order_id}/unsuspend"), None)
    }

    pub fn cancel(&self, order_id: Id, reason: &str) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{order_id}/cancel"), Some(&reason_body(reason)))
    }
}
