//! Typed memory operations and code-level one-shots

use super::CeClient;
use crate::codec::{
    decode_address, decode_typed_value, encode_address, encode_read_request, encode_write_request,
    AobPattern,
};
use crate::core::types::{
    Address, Alignment, BridgeError, BridgeResult, Locality, TypedValue, ValueKind,
};
use crate::gateway::{expect_array, expect_str, expect_u64, Operation};
use serde_json::{json, Value};

impl CeClient {
    /// Reads one typed value from the given address.
    ///
    /// The locality is explicit: `Target` reads the opened process,
    /// `Host` reads the remote service's own memory.
    pub async fn read_memory(
        &self,
        address: &Address,
        kind: &ValueKind,
        locality: Locality,
    ) -> BridgeResult<TypedValue> {
        let mut payload = encode_read_request(kind, locality)?;
        payload.insert("address".into(), encode_address(address));

        let envelope = self
            .gateway
            .invoke(Operation::ReadMemory, Some(&Value::Object(payload)))
            .await?;

        let value = envelope.get("value").ok_or_else(|| {
            BridgeError::ProtocolInvariant("read-memory: response missing 'value'".to_string())
        })?;
        decode_typed_value(kind, value)
    }

    /// Writes one typed value, supplied in human notation, to the given
    /// address.
    pub async fn write_memory(
        &self,
        address: &Address,
        kind: &ValueKind,
        raw_value: &str,
        locality: Locality,
    ) -> BridgeResult<()> {
        let mut payload = encode_write_request(kind, raw_value, locality)?;
        payload.insert("address".into(), encode_address(address));

        self.gateway
            .invoke(Operation::WriteMemory, Some(&Value::Object(payload)))
            .await?;
        Ok(())
    }

    /// Disassembles the instruction at the given address
    pub async fn disassemble(&self, address: &Address) -> BridgeResult<String> {
        let payload = json!({ "address": encode_address(address) });
        let envelope = self
            .gateway
            .invoke(Operation::Disassemble, Some(&payload))
            .await?;
        expect_str(&envelope, "disassembled", Operation::Disassemble)
    }

    /// Reports the byte length of the instruction at the given address
    pub async fn get_instruction_size(&self, address: &Address) -> BridgeResult<u64> {
        let payload = json!({ "address": encode_address(address) });
        let envelope = self
            .gateway
            .invoke(Operation::GetInstructionSize, Some(&payload))
            .await?;
        expect_u64(&envelope, "size", Operation::GetInstructionSize)
    }

    /// Scans target memory for an array-of-bytes pattern. The pattern is
    /// validated locally before transmission.
    pub async fn aob_scan(
        &self,
        pattern: &str,
        protection_flags: Option<&str>,
        alignment: Option<&Alignment>,
    ) -> BridgeResult<Vec<Address>> {
        let pattern = AobPattern::parse(pattern)?;

        let mut payload = serde_json::Map::new();
        payload.insert("pattern".into(), json!(pattern.wire_form()));
        if let Some(flags) = protection_flags {
            payload.insert("protectionFlags".into(), json!(flags));
        }
        if let Some(alignment) = alignment {
            payload.insert("alignmentType".into(), json!(alignment.wire_type()));
            payload.insert("alignmentParam".into(), json!(alignment.wire_param()));
        }

        let envelope = self
            .gateway
            .invoke(Operation::AobScan, Some(&Value::Object(payload)))
            .await?;

        expect_array(&envelope, "addresses", Operation::AobScan)?
            .iter()
            .map(decode_address)
            .collect()
    }

    /// Resolves a symbolic address expression to its canonical 64-bit
    /// value through the remote service.
    pub async fn resolve_address(
        &self,
        expression: &str,
        locality: Locality,
    ) -> BridgeResult<u64> {
        // Parse locally first so malformed notations never leave the host.
        let address: Address = expression.parse()?;
        if let Some(canonical) = address.canonical() {
            return Ok(canonical);
        }

        let payload = json!({
            "address": encode_address(&address),
            "local": matches!(locality, Locality::Host),
        });
        let envelope = self
            .gateway
            .invoke(Operation::ResolveAddress, Some(&payload))
            .await?;

        let resolved = envelope.get("address").ok_or_else(|| {
            BridgeError::ProtocolInvariant("resolve-address: response missing 'address'".to_string())
        })?;
        decode_address(resolved)?.canonical().ok_or_else(|| {
            BridgeError::ProtocolInvariant(
                "resolve-address: remote returned a non-canonical address".to_string(),
            )
        })
    }
}
