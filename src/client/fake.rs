use std::error::Error as StdError;
use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::{ApiKey, BaseUrl};

use super::{DEFAULT_TIMEOUT, FossBillingClient, HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    outcome: Outcome,
}

#[derive(Debug, Clone)]
enum Outcome {
    Respond { status: u16, body: Vec<u8> },
    Fail { message: String },
}

impl FakeTransport {
    pub(crate) fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::with_outcome(Outcome::Respond {
            status,
            body: body.into(),
        })
    }

    /// Every call fails before a response, like a refused connection.
    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail {
            message: message.into(),
        })
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                outcome,
            })),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.state
            .lock()
            .unwrap()
            .requests
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpTransport for FakeTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state.outcome.clone()
        };
        match outcome {
            Outcome::Respond { status, body } => Ok(HttpResponse { status, body }),
            Outcome::Fail { message } => Err(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                message,
            ))),
        }
    }
}

impl HttpRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub(crate) fn make_client(transport: FakeTransport) -> FossBillingClient {
    FossBillingClient {
        base_url: BaseUrl::parse("https://billing.example.com").unwrap(),
        api_key: ApiKey::new("test_key").unwrap(),
        timeout: DEFAULT_TIMEOUT,
        http: Arc::new(transport),
    }
}
