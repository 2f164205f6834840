//! High-level client facade
//!
//! [`CeClient`] composes the codec and the request gateway into the
//! one-shot operations the remote service exposes, and mints scan
//! sessions for the stateful scan protocol. Every one-shot call here is a
//! single stateless request/response pass.

mod memory;
mod process;

pub use process::{ProcessEntry, ProcessStatus};

use crate::config::Config;
use crate::core::types::{BridgeResult, VarType};
use crate::gateway::{expect_str, Gateway, Operation};
use crate::scan::ScanSession;
use serde_json::{json, Value};
use std::sync::Arc;

/// Conversion operations the remote service performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// MD5 digest of the input string
    Md5,
    /// ANSI to UTF-8 re-encoding
    AnsiToUtf8,
    /// UTF-8 to ANSI re-encoding
    Utf8ToAnsi,
}

impl Conversion {
    /// The remote service's name for this conversion
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Conversion::Md5 => "md5",
            Conversion::AnsiToUtf8 => "ansitoutf8",
            Conversion::Utf8ToAnsi => "utf8toansi",
        }
    }
}

/// Client for a Cheat-Engine-style remote memory service
#[derive(Debug, Clone)]
pub struct CeClient {
    gateway: Arc<Gateway>,
}

impl CeClient {
    /// Creates a client from configuration
    pub fn new(config: &Config) -> BridgeResult<Self> {
        Ok(CeClient {
            gateway: Arc::new(Gateway::new(config)?),
        })
    }

    /// Creates a client around an existing gateway
    pub fn from_gateway(gateway: Arc<Gateway>) -> Self {
        CeClient { gateway }
    }

    /// The underlying gateway
    pub fn gateway(&self) -> Arc<Gateway> {
        Arc::clone(&self.gateway)
    }

    /// Mints a new scan session bound to the given variable type
    pub fn scan_session(&self, var_type: VarType) -> ScanSession {
        ScanSession::new(self.gateway(), var_type)
    }

    /// Queries the remote service's health endpoint
    pub async fn health(&self) -> BridgeResult<Value> {
        self.gateway.invoke(Operation::Health, None).await
    }

    /// Executes a Lua snippet in the remote service
    pub async fn execute_lua(&self, code: &str) -> BridgeResult<Value> {
        let payload = json!({ "code": code });
        let envelope = self
            .gateway
            .invoke(Operation::ExecuteLua, Some(&payload))
            .await?;
        Ok(envelope.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Converts a string through the remote service (hash or re-encoding)
    pub async fn convert(&self, input: &str, conversion: Conversion) -> BridgeResult<String> {
        let payload = json!({
            "input": input,
            "conversionType": conversion.wire_name(),
        });
        let envelope = self
            .gateway
            .invoke(Operation::Convert, Some(&payload))
            .await?;
        expect_str(&envelope, "output", Operation::Convert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::SessionState;

    #[test]
    fn test_conversion_wire_names() {
        assert_eq!(Conversion::Md5.wire_name(), "md5");
        assert_eq!(Conversion::AnsiToUtf8.wire_name(), "ansitoutf8");
        assert_eq!(Conversion::Utf8ToAnsi.wire_name(), "utf8toansi");
    }

    #[test]
    fn test_client_construction_and_session_minting() {
        let client = CeClient::new(&Config::default()).unwrap();
        assert_eq!(client.gateway().base_url(), "http://localhost:6300");

        let session = client.scan_session(VarType::Float);
        assert_eq!(session.state(), &SessionState::Uninitialized);
        assert_eq!(session.var_type(), VarType::Float);
    }
}
