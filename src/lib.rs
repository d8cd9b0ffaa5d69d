//! Typed, blocking Rust client for the FOSSBilling admin REST API.
//!
//! The crate is split into a domain layer of validated types, a transport
//! layer for wire-format details (query encoding, response envelopes), a
//! client layer that dispatches requests and classifies failures, and thin
//! resource facades for `admin/client`, `admin/invoice`, `admin/order`,
//! `admin/service` and `admin/system`.
//!
//! ```rust,no_run
//! use fossbilling::{FossBillingClient, Params};
//!
//! fn main() -> Result<(), fossbilling::FossBillingError> {
//!     let client = FossBillingClient::new("https://billing.example.com", "api-key")?;
//!     let unpaid = client
//!         .invoices()
//!         .list(&Params::new().with("status", "unpaid").with("per_page", 50))?;
//!     for invoice in unpaid {
//!         println!("{}", invoice["id"]);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod resources;
mod transport;

pub use client::{FossBillingClient, FossBillingClientBuilder, FossBillingError};
pub use domain::{
    ApiKey, ApiRequest, BaseUrl, Method, ParamValue, Params, Record, ValidationError,
    require_fields,
};
pub use resources::{Clients, Id, Invoices, Orders, Services, System};
pub use transport::TransportError;
