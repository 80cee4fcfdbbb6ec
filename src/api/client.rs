use crate::api::{Envelope, Method, Request};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("{}", status_message(.code, .text, .api_error))]
    Status {
        code: u16,
        text: String,
        /// `error` field of the body, when the failure body was an envelope.
        api_error: Option<String>,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

fn status_message(code: &u16, text: &str, api_error: &Option<String>) -> String {
    let mut msg = format!("HTTP {}", code);
    if !text.is_empty() {
        msg.push(' ');
        msg.push_str(text);
    }
    if let Some(e) = api_error {
        msg.push_str(": ");
        msg.push_str(e);
    }
    msg
}

/// Single-shot JSON calls against a full URL. No retry, no timeout.
pub trait Transport {
    fn get_json(&self, url: &str) -> Result<Value, DispatchError>;
    fn post_json(&self, url: &str, payload: &Value) -> Result<Value, DispatchError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        // reqwest's blocking client times out after 30s by default; calls here wait indefinitely.
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, DispatchError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| DispatchError::Network(e.to_string()))?;
        read_json(resp)
    }

    fn post_json(&self, url: &str, payload: &Value) -> Result<Value, DispatchError> {
        let resp = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .map_err(|e| DispatchError::Network(e.to_string()))?;
        read_json(resp)
    }
}

fn read_json(resp: Response) -> Result<Value, DispatchError> {
    let status = resp.status();
    if !status.is_success() {
        let api_error = resp
            .json::<Value>()
            .ok()
            .and_then(|body| Envelope::from_value(&body).error);
        return Err(DispatchError::Status {
            code: status.as_u16(),
            text: status.canonical_reason().unwrap_or_default().to_string(),
            api_error,
        });
    }
    let body = resp
        .text()
        .map_err(|e| DispatchError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| DispatchError::Decode(e.to_string()))
}

/// Send `req` relative to `base` through `transport`.
pub fn dispatch(
    transport: &dyn Transport,
    base: &str,
    req: &Request,
) -> Result<Value, DispatchError> {
    let url = req.url(base);
    debug!(method = ?req.method, %url, "dispatching request");
    let result = match (req.method, &req.body) {
        (Method::Get, _) => transport.get_json(&url),
        (Method::Post, Some(body)) => transport.post_json(&url, body),
        (Method::Post, None) => transport.post_json(&url, &Value::Object(Default::default())),
    };
    if let Err(e) = &result {
        warn!(%url, error = %e, "request failed");
    }
    result
}
