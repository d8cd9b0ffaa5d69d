use serde_json::Value;

use super::{Id, Resource, reason_body};
use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{Params, Record};

const PREFIX: &str = "admin/service";

#[derive(Debug, Clone, Copy)]
/// Provisioned services (`admin/service`).
///
/// Services are created by activating orders, so there is no `create` here.
pub struct Services<'a> {
    resource: Resource<'a>,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a FossBillingClient) -> Self {
        Self {
            resource: Resource::new(client, PREFIX),
        }
    }

    pub fn list(&self, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        self.resource.list("", filters)
    }

    pub fn get(&self, service_id: Id) -> Result<Value, FossBillingError> {
        self.resource.get(&service_id.to_string())
    }

    pub fn update(&self, service_id: Id, payload: &Record) -> Result<Value, FossBillingError> {
        self.resource.put(&service_id.to_string(), payload)
    }

    pub fn delete(&self, service_id: Id) -> Result<bool, FossBillingError> {
        self.resource.delete(&service_id.to_string(), Params::new())
    }

    /// Renew a service. `options` (e.g. `period`) is sent as the JSON body.
    pub fn renew(&self, service_id: Id, options: &Record) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{service_id}/renew"), Some(options))
    }

    pub fn suspend(&self, service_id: Id, reason: &str) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{service_id}/suspend"), Some(&reason_body(reason)))
    }

    pub fn unsuspend(&self, service_id: Id) -> Result<Value, FossBillingError> {
        self.resource.post(&format!("{service_id}/unsuspend"), None)
    }

    pub fn cancel(&self, service_id: Id, reason: &str) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{service_id}/cancel"), Some(&reason_body(reason)))
    }
}
