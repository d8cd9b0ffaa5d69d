//! Resource facades: one per admin API prefix, each borrowing the owning client.

use serde_json::Value;

use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{ApiRequest, Params, Record};

mod clients;
mod invoices;
mod orders;
mod services;
mod system;

pub use clients::{CLIENT_REQUIRED_FIELDS, Clients};
pub use invoices::Invoices;
pub use orders::Orders;
pub use services::Services;
pub use system::System;

/// Numeric identifier of a remote record (client, invoice, order, service).
pub type Id = u64;

/// A URL prefix bound to a client; every facade delegates through one of these.
#[derive(Debug, Clone, Copy)]
struct Resource<'a> {
    client: &'a FossBillingClient,
    prefix: &'static str,
}

impl<'a> Resource<'a> {
    fn new(client: &'a FossBillingClient, prefix: &'static str) -> Self {
        Self { client, prefix }
    }

    /// `prefix/sub`, with no leading or trailing `/` when `sub` is empty.
    fn path(&self, sub: &str) -> String {
        format!("{}/{}", self.prefix, sub)
            .trim_matches('/')
            .to_owned()
    }

    fn list(&self, sub: &str, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        let value = self.client.get(&self.path(sub), Some(filters))?;
        Ok(crate::transport::decode_list_envelope(value)?)
    }

    fn get(&self, sub: &str) -> Result<Value, FossBillingError> {
        self.client.get(&self.path(sub), None)
    }

    fn post(&self, sub: &str, data: Option<&Record>) -> Result<Value, FossBillingError> {
        self.client.post(&self.path(sub), data)
    }

    fn put(&self, sub: &str, data: &Record) -> Result<Value, FossBillingError> {
        self.client.put(&self.path(sub), Some(data))
    }

    /// `DELETE`; the response carries nothing useful, so only success is reported.
    fn delete(&self, sub: &str, flags: Params) -> Result<bool, FossBillingError> {
        self.client
            .request_raw(ApiRequest::delete(self.path(sub)).query(flags))?;
        Ok(true)
    }

    /// Body-less `POST` whose response is ignored.
    fn trigger(&self, sub: &str) -> Result<bool, FossBillingError> {
        self.client.request_raw(ApiRequest::post(self.path(sub)))?;
        Ok(true)
    }
}

/// `{"reason": <reason>}` body used by `suspend` and `cancel`.
fn reason_body(reason: &str) -> Record {
    let mut body = Record::new();
    body.insert("reason".to_owned(), Value::from(reason));
    body
}
