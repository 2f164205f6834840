//! Request gateway
//!
//! Issues one logical operation per remote call and normalizes every
//! failure into either a transport failure (no response obtained) or a
//! remote rejection (response obtained, failure status). Performs no
//! retries: a first or next scan retried after a partial remote failure
//! could leave session state ambiguous, so retry policy belongs to the
//! caller.

mod operation;

pub use operation::{HttpMethod, Operation, TimeoutClass};

use crate::config::Config;
use crate::core::types::{BridgeError, BridgeResult};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const API_PREFIX: &str = "api/cheatengine";

/// Gateway to the remote service. Cheap to share behind an `Arc`; each
/// call is independent and may be issued concurrently.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    scan_timeout: Duration,
}

impl Gateway {
    /// Creates a gateway from configuration
    pub fn new(config: &Config) -> BridgeResult<Self> {
        Self::with_base_url(
            config.base_url(),
            config.request_timeout(),
            config.scan_timeout(),
        )
    }

    /// Creates a gateway against an explicit base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        request_timeout: Duration,
        scan_timeout: Duration,
    ) -> BridgeResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| BridgeError::transport("client-init", e.to_string()))?;

        Ok(Gateway {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            scan_timeout,
        })
    }

    /// The base URL this gateway targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_for(&self, op: Operation) -> Duration {
        match op.timeout_class() {
            TimeoutClass::Short => self.request_timeout,
            TimeoutClass::Scan => self.scan_timeout,
        }
    }

    /// Invokes one logical operation and returns the parsed response body.
    ///
    /// The returned value is the full envelope; a `success: false` envelope
    /// or a non-2xx status is already normalized into
    /// [`BridgeError::RemoteRejected`].
    pub async fn invoke(&self, op: Operation, payload: Option<&Value>) -> BridgeResult<Value> {
        let url = format!("{}/{}/{}", self.base_url, API_PREFIX, op.path());
        debug!(operation = %op, %url, "invoking remote operation");

        let mut request = match op.method() {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };
        request = request.timeout(self.timeout_for(op));
        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BridgeError::transport(op.path(), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BridgeError::transport(op.path(), e.to_string()))?;

        // A failure status alone classifies as a rejection; the body may be
        // a proxy's HTML error page rather than a service envelope.
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .as_ref()
                .and_then(remote_error_message)
                .unwrap_or_else(|| status.to_string());
            warn!(operation = %op, status = status.as_u16(), "remote rejected operation");
            return Err(BridgeError::rejected(op.path(), status.as_u16(), message));
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|_| {
            BridgeError::ProtocolInvariant(format!(
                "{}: response body is not valid JSON",
                op.path()
            ))
        })?;

        // The envelope's own success indicator can reject a 200 response.
        if let Some(false) = envelope.get("success").and_then(Value::as_bool) {
            let message =
                remote_error_message(&envelope).unwrap_or_else(|| "unspecified error".to_string());
            warn!(operation = %op, %message, "remote reported failure");
            return Err(BridgeError::rejected(op.path(), status.as_u16(), message));
        }

        Ok(envelope)
    }
}

fn remote_error_message(envelope: &Value) -> Option<String> {
    envelope
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Extracts a required string field from a response envelope.
pub fn expect_str(envelope: &Value, field: &str, op: Operation) -> BridgeResult<String> {
    envelope
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            BridgeError::ProtocolInvariant(format!("{}: response missing '{}'", op.path(), field))
        })
}

/// Extracts a required unsigned integer field from a response envelope.
pub fn expect_u64(envelope: &Value, field: &str, op: Operation) -> BridgeResult<u64> {
    envelope.get(field).and_then(Value::as_u64).ok_or_else(|| {
        BridgeError::ProtocolInvariant(format!("{}: response missing '{}'", op.path(), field))
    })
}

/// Extracts a required boolean field from a response envelope.
pub fn expect_bool(envelope: &Value, field: &str, op: Operation) -> BridgeResult<bool> {
    envelope.get(field).and_then(Value::as_bool).ok_or_else(|| {
        BridgeError::ProtocolInvariant(format!("{}: response missing '{}'", op.path(), field))
    })
}

/// Extracts a required array field from a response envelope.
pub fn expect_array<'a>(
    envelope: &'a Value,
    field: &str,
    op: Operation,
) -> BridgeResult<&'a Vec<Value>> {
    envelope.get(field).and_then(Value::as_array).ok_or_else(|| {
        BridgeError::ProtocolInvariant(format!("{}: response missing '{}'", op.path(), field))
    })
}
