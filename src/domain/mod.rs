//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod validation;
mod value;

pub use request::{ApiRequest, Method, ParamValue, Params, Record};
pub use validation::{ValidationError, require_fields};
pub use value::{ApiKey, BaseUrl};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn params_builder_replaces_earlier_values() {
        let params = Params::new()
            .with("page", 1)
            .with("search", "acme")
            .with("page", 2);
        assert_eq!(params.get("page"), Some(&ParamValue::Int(2)));
        assert_eq!(
            params.get("search"),
            Some(&ParamValue::Str("acme".to_owned()))
        );
        assert_eq!(params.iter().count(), 2);
    }

    #[test]
    fn params_collects_from_pairs_and_maps_none_to_null() {
        let params: Params = [("status", Some("active")), ("client_id", None)]
            .into_iter()
            .collect();
        assert_eq!(params.get("client_id"), Some(&ParamValue::Null));
        assert_eq!(
            params.get("status"),
            Some(&ParamValue::Str("active".to_owned()))
        );
    }

    #[test]
    fn api_request_builder_keeps_every_part() {
        let request = ApiRequest::post("admin/order/7/suspend")
            .query(Params::new().with("notify", true))
            .body(json!({"reason": "abuse"}))
            .header("Accept", "application/pdf")
            .timeout(Duration::from_secs(5));

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.endpoint(), "admin/order/7/suspend");
        assert_eq!(
            request.query_params().get("notify"),
            Some(&ParamValue::Bool(true))
        );
        assert_eq!(request.json_body(), Some(&json!({"reason": "abuse"})));
        assert_eq!(
            request.headers(),
            &[("Accept".to_owned(), "application/pdf".to_owned())]
        );
        assert_eq!(request.timeout_override(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn method_names_match_http_verbs() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
