use serde_json::Value;

use super::Resource;
use crate::client::{FossBillingClient, FossBillingError};
use crate::domain::{Params, Record};

const PREFIX: &str = "admin/system";

#[derive(Debug, Clone, Copy)]
/// Installation-wide endpoints (`admin/system`). There are no per-id operations.
pub struct System<'a> {
    resource: Resource<'a>,
}

impl<'a> System<'a> {
    pub(crate) fn new(client: &'a FossBillingClient) -> Self {
        Self {
            resource: Resource::new(client, PREFIX),
        }
    }

    /// Version and environment details.
    pub fn info(&self) -> Result<Value, FossBillingError> {
        self.resource.get("info")
    }

    /// Counters for clients, orders, invoices and so on.
    pub fn stats(&self) -> Result<Value, FossBillingError> {
        self.resource.get("stats")
    }

    pub fn health_check(&self) -> Result<Value, FossBillingError> {
        self.resource.get("health")
    }

    pub fn get_config(&self) -> Result<Value, FossBillingError> {
        self.resource.get("config")
    }

    pub fn update_config(&self, payload: &Record) -> Result<Value, FossBillingError> {
        self.resource.post("config", Some(payload))
    }

    /// Log entries; filters such as `type`, `search` or `page` are passed through.
    pub fn get_logs(&self, filters: &Params) -> Result<Vec<Value>, FossBillingError> {
        self.resource.list("logs", filters)
    }

    pub fn clear_cache(&self) -> Result<bool, FossBillingError> {
        self.resource.trigger("cache/clear")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::fake::{FakeTransport, make_client};
    use crate::domain::Method;

    use super::*;

    fn assert_last_get(transport: &FakeTransport, path: &str) {
        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.path(), path);
    }

    #[test]
    fn read_endpoints_use_get() {
        let transport = FakeTransport::new(200, r#"{"ok": true}"#);
        let client = make_client(transport.clone());
        let system = client.system();

        assert_eq!(system.info().unwrap(), json!({"ok": true}));
        assert_last_get(&transport, "/api/admin/system/info");

        system.stats().unwrap();
        assert_last_get(&transport, "/api/admin/system/stats");

        system.health_check().unwrap();
        assert_last_get(&transport, "/api/admin/system/health");

        system.get_config().unwrap();
        assert_last_get(&transport, "/api/admin/system/config");

        assert_eq!(transport.calls(), 4);
    }

    #[test]
    fn update_config_posts_payload() {
        let transport = FakeTransport::new(200, r#"{"company_name": "Acme"}"#);
        let client = make_client(transport.clone());

        let mut payload = Record::new();
        payload.insert("company_name".to_owned(), json!("Acme"));
        client.system().update_config(&payload).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/api/admin/system/config");
        assert_eq!(request.body, Some(json!({"company_name": "Acme"})));
    }

    #[test]
    fn get_logs_unwraps_list_and_defaults_to_empty() {
        let transport = FakeTransport::new(200, r#"{"list": [{"message": "cron ran"}]}"#);
        let client = make_client(transport.clone());

        let logs = client
            .system()
            .get_logs(&Params::new().with("type", "activity"))
            .unwrap();
        assert_eq!(logs, vec![json!({"message": "cron ran"})]);
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://billing.example.com/api/admin/system/logs?type=activity"
        );

        let client = make_client(FakeTransport::new(200, r#"{"total": 0}"#));
        assert!(client.system().get_logs(&Params::new()).unwrap().is_empty());
    }

    #[test]
    fn clear_cache_posts_without_body() {
        let transport = FakeTransport::new(200, "true");
        let client = make_client(transport.clone());

        assert!(client.system().clear_cache().unwrap());
        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/api/admin/system/cache/clear");
        assert!(request.body.is_none());
    }

    #[test]
    fn authentication_failure_on_system_endpoint() {
        let client = make_client(FakeTransport::new(401, ""));
        assert!(client.system().stats().unwrap_err().is_authentication());
    }
}
