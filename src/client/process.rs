//! Process and thread enumeration one-shots

use super::CeClient;
use crate::core::types::{BridgeError, BridgeResult};
use crate::gateway::{expect_array, Operation};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One entry from the remote process list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
}

/// Status of the currently opened process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub attached: bool,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CeClient {
    /// Lists processes visible to the remote service
    pub async fn process_list(&self) -> BridgeResult<Vec<ProcessEntry>> {
        let envelope = self.gateway.invoke(Operation::ProcessList, None).await?;
        let raw = expect_array(&envelope, "processes", Operation::ProcessList)?;
        raw.iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| {
                    BridgeError::ProtocolInvariant(format!(
                        "process-list: malformed entry: {}",
                        e
                    ))
                })
            })
            .collect()
    }

    /// Lists thread identifiers of the opened process
    pub async fn thread_list(&self) -> BridgeResult<Vec<String>> {
        let envelope = self.gateway.invoke(Operation::ThreadList, None).await?;
        let raw = expect_array(&envelope, "threads", Operation::ThreadList)?;
        Ok(raw
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => s.to_string(),
                None => item.to_string(),
            })
            .collect())
    }

    /// Reports whether a process is opened, and which
    pub async fn process_status(&self) -> BridgeResult<ProcessStatus> {
        let envelope = self.gateway.invoke(Operation::ProcessStatus, None).await?;
        serde_json::from_value(envelope).map_err(|e| {
            BridgeError::ProtocolInvariant(format!("process-status: malformed response: {}", e))
        })
    }

    /// Opens a process by pid or name, making it the scan/read target
    pub async fn open_process(&self, process: &str) -> BridgeResult<()> {
        let payload = json!({ "process": process });
        self.gateway
            .invoke(Operation::OpenProcess, Some(&payload))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_entry_deserialization() {
        let entry: ProcessEntry =
            serde_json::from_value(json!({ "pid": 1234, "name": "game.exe" })).unwrap();
        assert_eq!(entry.pid, 1234);
        assert_eq!(entry.name, "game.exe");
    }

    #[test]
    fn test_process_status_optional_fields() {
        let status: ProcessStatus = serde_json::from_value(json!({ "attached": false })).unwrap();
        assert!(!status.attached);
        assert_eq!(status.pid, None);

        let status: ProcessStatus = serde_json::from_value(
            json!({ "attached": true, "pid": 77, "name": "game.exe", "success": true }),
        )
        .unwrap();
        assert_eq!(status.pid, Some(77));
    }
}
