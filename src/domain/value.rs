use std::fmt;

use url::Url;

use crate::domain::validation::ValidationError;

/// Path segment every API endpoint lives under.
const API_ROOT: &str = "api/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root URL of a FOSSBilling installation.
///
/// Invariant: an absolute `http`/`https` URL whose path ends with exactly one `/`.
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Field name used in validation errors (`base_url`).
    pub const FIELD: &'static str = "base_url";

    /// Parse and normalize a base URL.
    ///
    /// `https://billing.example.com/fossbilling` becomes
    /// `https://billing.example.com/fossbilling/`; a value that already ends
    /// with `/` is kept as is.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = value.as_ref().trim();
        if input.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let invalid = |reason: String| ValidationError::InvalidUrl {
            input: input.to_owned(),
            reason,
        };

        let mut url = Url::parse(input).map_err(|err| invalid(err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("cannot be used as a base URL".to_owned()));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Resolve an endpoint such as `admin/client/42` to
    /// `<base>/api/admin/client/42`.
    ///
    /// Leading slashes on `endpoint` are stripped so the result never contains `//`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ValidationError> {
        let relative = format!("{API_ROOT}{}", endpoint.trim_start_matches('/'));
        self.0
            .join(&relative)
            .map_err(|err| ValidationError::InvalidUrl {
                input: relative,
                reason: err.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// FOSSBilling admin API key, sent as the `X-API-Key` header.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in validation errors (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Header carrying the key on every request.
    pub const HEADER: &'static str = "X-API-Key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
