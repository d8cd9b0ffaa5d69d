//! Client layer: owns configuration and the HTTP connection, dispatches calls
//! and classifies responses.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiKey, ApiRequest, BaseUrl, Method, Params, Record, ValidationError};
use crate::resources::{Clients, Invoices, Orders, Services, System};

mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use error::FossBillingError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const JSON_MEDIA_TYPE: &str = "application/json";
const AUTHENTICATION_FAILED: &str = "Invalid API key or insufficient permissions";

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) timeout: Duration,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: Vec<u8>,
}

/// Executes one request, blocking until a response arrives or the timeout expires.
pub(crate) trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[derive(Clone)]
/// Builder for [`FossBillingClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct FossBillingClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl fmt::Debug for FossBillingClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FossBillingClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl FossBillingClientBuilder {
    /// Create a builder with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Default timeout for every request. Individual calls may override it
    /// with [`ApiRequest::timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`FossBillingClient`].
    ///
    /// Errors:
    /// - [`FossBillingError::Configuration`] when the base URL is empty or not
    ///   an absolute `http(s)` URL, or the HTTP client cannot be created,
    /// - [`FossBillingError::Configuration`] when the API key cannot be sent as a
    ///   header value (control characters),
    /// - [`FossBillingError::Validation`] when the API key is blank.
    pub fn build(self) -> Result<FossBillingClient, FossBillingError> {
        let base_url = BaseUrl::parse(&self.base_url)
            .map_err(|err| FossBillingError::Configuration(err.to_string()))?;
        let api_key = ApiKey::new(self.api_key)?;
        reqwest::header::HeaderValue::from_str(api_key.as_str()).map_err(|err| {
            FossBillingError::Configuration(format!("API key is not a valid header value: {err}"))
        })?;

        let mut builder = reqwest::blocking::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| FossBillingError::Configuration(err.to_string()))?;

        Ok(FossBillingClient {
            base_url,
            api_key,
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Blocking client for the FOSSBilling admin REST API.
///
/// Every call is one request/response round trip against `<base_url>/api/`,
/// carrying `Accept: application/json`, `Content-Type: application/json` and
/// the `X-API-Key` header. Nothing is retried, cached or paginated.
///
/// The client is `Send + Sync` and cheap to clone; clones share one
/// connection pool. Use from several threads is safe only as long as the
/// underlying `reqwest::blocking::Client` is; no extra locking happens here.
pub struct FossBillingClient {
    base_url: BaseUrl,
    api_key: ApiKey,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for FossBillingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FossBillingClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl FossBillingClient {
    /// Create a client with the default timeout.
    ///
    /// For more customization, use [`FossBillingClient::builder`].
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, FossBillingError> {
        FossBillingClientBuilder::new(base_url, api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> FossBillingClientBuilder {
        FossBillingClientBuilder::new(base_url, api_key)
    }

    /// Normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Default per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `admin/client` endpoints.
    pub fn clients(&self) -> Clients<'_> {
        Clients::new(self)
    }

    /// `admin/invoice` endpoints.
    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(self)
    }

    /// `admin/order` endpoints.
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// `admin/service` endpoints.
    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    /// `admin/system` endpoints.
    pub fn system(&self) -> System<'_> {
        System::new(self)
    }

    /// Send a request and decode the successful response as JSON.
    ///
    /// Errors:
    /// - [`FossBillingError::Authentication`] for HTTP 401,
    /// - [`FossBillingError::NotFound`] for HTTP 404,
    /// - [`FossBillingError::Validation`] for HTTP 422,
    /// - [`FossBillingError::Api`] for other non-2xx statuses and network failures,
    /// - [`FossBillingError::Decode`] when a 2xx body is not valid JSON.
    pub fn request(&self, request: ApiRequest) -> Result<Value, FossBillingError> {
        let body = self.dispatch(&request)?;
        Ok(crate::transport::decode_json_response(&body)?)
    }

    /// Send a request and return the successful response body undecoded.
    ///
    /// Error classification is the same as for [`FossBillingClient::request`],
    /// minus [`FossBillingError::Decode`].
    pub fn request_raw(&self, request: ApiRequest) -> Result<Vec<u8>, FossBillingError> {
        self.dispatch(&request)
    }

    /// `GET <endpoint>` with optional query filters.
    pub fn get(&self, endpoint: &str, params: Option<&Params>) -> Result<Value, FossBillingError> {
        self.request(with_query(ApiRequest::get(endpoint), params))
    }

    /// `POST <endpoint>` with an optional JSON body.
    pub fn post(&self, endpoint: &str, data: Option<&Record>) -> Result<Value, FossBillingError> {
        self.request(with_body(ApiRequest::post(endpoint), data))
    }

    /// `PUT <endpoint>` with an optional JSON body.
    pub fn put(&self, endpoint: &str, data: Option<&Record>) -> Result<Value, FossBillingError> {
        self.request(with_body(ApiRequest::put(endpoint), data))
    }

    /// `DELETE <endpoint>` with optional query flags.
    pub fn delete(
        &self,
        endpoint: &str,
        params: Option<&Params>,
    ) -> Result<Value, FossBillingError> {
        self.request(with_query(ApiRequest::delete(endpoint), params))
    }

    fn dispatch(&self, request: &ApiRequest) -> Result<Vec<u8>, FossBillingError> {
        let http_request = self.build_http_request(request)?;
        debug!(
            method = %http_request.method,
            url = %http_request.url,
            "dispatching FOSSBilling API request"
        );

        let response = self.http.execute(http_request).map_err(|err| {
            warn!(error = %err, "FOSSBilling API request failed before a response");
            FossBillingError::Api {
                message: format!("Request failed: {err}"),
                status: None,
                body: None,
                source: Some(err),
            }
        })?;

        debug!(status = response.status, "received FOSSBilling API response");
        if (200..=299).contains(&response.status) {
            Ok(response.body)
        } else {
            Err(classify_error(response))
        }
    }

    fn build_http_request(&self, request: &ApiRequest) -> Result<HttpRequest, FossBillingError> {
        let mut url = self.base_url.endpoint_url(request.endpoint())?;
        crate::transport::append_query(&mut url, request.query_params())?;

        Ok(HttpRequest {
            method: request.method(),
            url,
            headers: merge_headers(self.default_headers(), request.headers()),
            body: request.json_body().cloned(),
            timeout: request.timeout_override().unwrap_or(self.timeout),
        })
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Accept".to_owned(), JSON_MEDIA_TYPE.to_owned()),
            ("Content-Type".to_owned(), JSON_MEDIA_TYPE.to_owned()),
            (ApiKey::HEADER.to_owned(), self.api_key.as_str().to_owned()),
        ]
    }
}

fn with_query(request: ApiRequest, params: Option<&Params>) -> ApiRequest {
    match params {
        Some(params) => request.query(params.clone()),
        None => request,
    }
}

fn with_body(request: ApiRequest, data: Option<&Record>) -> ApiRequest {
    match data {
        Some(data) => request.body(Value::Object(data.clone())),
        None => request,
    }
}

/// Header names compare case-insensitively; an override replaces every default of that name.
fn merge_headers(
    mut defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (name, value) in overrides {
        defaults.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        defaults.push((name.clone(), value.clone()));
    }
    defaults
}

fn classify_error(response: HttpResponse) -> FossBillingError {
    let status = response.status;
    let message = crate::transport::decode_error_message(status, &response.body);
    warn!(status, message = %message, "FOSSBilling API returned an error status");

    match status {
        401 => FossBillingError::Authentication {
            message: AUTHENTICATION_FAILED.to_owned(),
        },
        404 => FossBillingError::NotFound { message },
        422 => FossBillingError::Validation(ValidationError::Rejected { message }),
        _ => {
            let body = String::from_utf8_lossy(&response.body);
            let body = if body.trim().is_empty() {
                None
            } else {
                Some(body.into_owned())
            };
            FossBillingError::Api {
                message: format!("API request failed with status {status}: {message}"),
                status: Some(status),
                body,
                source: None,
            }
        }
    }
}
