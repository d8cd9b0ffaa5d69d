use serde_json::Value;

use super::{Id, Resource};
use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{ApiRequest, Params, Record};

const PREFIX: &str = "admin/invoice";
const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy)]
/// Invoices (`admin/invoice`).
pub struct Invoices<'a> {
    resource: Resource<'a>,
}

impl<'a> Invoices<'a> {
    pub(crate) fn new(client: &'a FossBillingClient) -> Self {
        Self {
            resource: Resource::new(client, PREFIX),
        }
    }

    /// List invoices. Filters such as `client_id`, `status` or `page` are passed through.
    pub fn list(&self, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        self.resource.list("", filters)
    }

    pub fn get(&self, invoice_id: Id) -> Result<Value, FossBillingError> {
        self.resource.get(&invoice_id.to_string())
    }

    /// Issue an invoice to `client_id`.
    ///
    /// `items` are line items (`title`, `price`, `quantity`, ...). Entries in
    /// `extra` (due date, tax, discount) are merged into the body and win over
    /// `client_id` and `items`.
    pub fn create(
        &self,
        client_id: Id,
        items: Vec<Value>,
        extra: &Record,
    ) -> Result<Value, FossBillingError> {
        let mut body = Record::new();
        body.insert("client_id".to_owned(), Value::from(client_id));
        body.insert("items".to_owned(), Value::Array(items));
        body.extend(extra.clone());
        self.resource.post("", Some(&body))
    }

    pub fn update(&self, invoice_id: Id, payload: &Record) -> Result<Value, FossBillingError> {
        self.resource.put(&invoice_id.to_string(), payload)
    }

    pub fn delete(&self, invoice_id: Id) -> Result<bool, FossBillingError> {
        self.resource.delete(&invoice_id.to_string(), Params::new())
    }

    /// Record a payment. `payment` (e.g. `txn_id`, `amount`) is sent as the JSON body.
    pub fn mark_as_paid(
        &self,
        invoice_id: Id,
        payment: &Record,
    ) -> Result<Value, FossBillingError> {
        self.resource
            .post(&format!("{invoice_id}/mark_as_paid"), Some(payment))
    }

    /// Download the rendered invoice. The body is returned as is, without JSON decoding.
    pub fn generate_pdf(&self, invoice_id: Id) -> Result<Vec<u8>, FossBillingError> {
        let request = ApiRequest::get(self.resource.path(&format!("{invoice_id}/pdf")))
            .header("Accept", PDF_MEDIA_TYPE);
        self.resource.client.request_raw(request)
    }

    pub fn send_reminder(&self, invoice_id: Id) -> Result<bool, FossBillingError> {
        self.resource.trigger(&format!("{invoice_id}/send_reminder"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::fake::{FakeTransport, make_client};
    use crate::domain::Method;

    use super::*;

    #[test]
    fn generate_pdf_overrides_accept_and_returns_raw_bytes() {
        let pdf = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n".to_vec();
        let transport = FakeTransport::new(200, pdf.clone());
        let client = make_client(transport.clone());

        let bytes = client.invoices().generate_pdf(42).unwrap();
        assert_eq!(bytes, pdf);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url.as_str(),
            "https://billing.example.com/api/admin/invoice/42/pdf"
        );
        assert_eq!(request.header("Accept"), Some("application/pdf"));
        assert_eq!(request.header("X-API-Key"), Some("test_key"));
    }

    #[test]
    fn create_builds_body_from_client_items_and_extra() {
        let transport = FakeTransport::new(200, r#"{"id": 100}"#);
        let client = make_client(transport.clone());

        let items = vec![json!({"title": "Hosting", "price": 9.99, "quantity": 1})];
        let mut extra = Record::new();
        extra.insert("due_at".to_owned(), json!("2026-11-01"));
        client.invoices().create(7, items, &extra).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/api/admin/invoice");
        assert_eq!(
            request.body,
            Some(json!({
                "client_id": 7,
                "items": [{"title": "Hosting", "price": 9.99, "quantity": 1}],
                "due_at": "2026-11-01"
            }))
        );
    }

    #[test]
    fn mark_as_paid_posts_payment_fields() {
        let transport = FakeTransport::new(200, r#"{"status": "paid"}"#);
        let client = make_client(transport.clone());

        let mut payment = Record::new();
        payment.insert("txn_id".to_owned(), json!("TX-1"));
        let updated = client.invoices().mark_as_paid(42, &payment).unwrap();
        assert_eq!(updated, json!({"status": "paid"}));

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/admin/invoice/42/mark_as_paid");
        assert_eq!(request.body, Some(json!({"txn_id": "TX-1"})));
    }

    #[test]
    fn send_reminder_ignores_response_body() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone());

        assert!(client.invoices().send_reminder(42).unwrap());
        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/api/admin/invoice/42/send_reminder");
        assert!(request.body.is_none());
    }

    #[test]
    fn delete_and_update() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        assert!(client.invoices().delete(42).unwrap());
        let request = transport.last_request();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url.query(), None);

        let mut payload = Record::new();
        payload.insert("notes".to_owned(), json!("net 30"));
        client.invoices().update(42, &payload).unwrap();
        assert_eq!(transport.last_request().method, Method::Put);
    }

    #[test]
    fn list_and_get() {
        let transport = FakeTransport::new(200, r#"{"list": [{"id": 1}], "pages": 1}"#);
        let client = make_client(transport.clone());

        let items = client
            .invoices()
            .list(&Params::new().with("status", "unpaid"))
            .unwrap();
        assert_eq!(items, vec![json!({"id": 1})]);

        client.invoices().get(1).unwrap();
        assert_eq!(transport.last_request().url.path(), "/api/admin/invoice/1");
    }

    #[test]
    fn pdf_error_status_is_still_classified() {
        let client = make_client(FakeTransport::new(
            404,
            r#"{"error": {"message": "Invoice not found"}}"#,
        ));
        let err = client.invoices().generate_pdf(1).unwrap_err();
        assert!(err.is_not_found());
    }
}
