//! One-shot client operation tests against a simulated remote

use ce_bridge::{
    Address, CeClient, Conversion, ErrorKind, Gateway, IntWidth, Locality, TypedValue, ValueKind,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> CeClient {
    let gateway =
        Gateway::with_base_url(server.url(), Duration::from_secs(2), Duration::from_secs(5))
            .unwrap();
    CeClient::from_gateway(Arc::new(gateway))
}

#[tokio::test]
async fn read_typed_dword() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/read-memory")
        .match_body(Matcher::PartialJson(json!({
            "address": "0x1000",
            "dataType": "dword",
            "signed": false,
        })))
        .with_body(json!({ "success": true, "value": 1337 }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let value = client
        .read_memory(
            &Address::new(0x1000),
            &ValueKind::int(IntWidth::W32, false),
            Locality::Target,
        )
        .await
        .unwrap();
    assert_eq!(value, TypedValue::U32(1337));
    mock.assert_async().await;
}

#[tokio::test]
async fn read_host_local_string_uses_local_tag() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/read-memory")
        .match_body(Matcher::PartialJson(json!({
            "dataType": "stringLocal",
            "maxLength": 32,
            "wideChar": true,
        })))
        .with_body(json!({ "success": true, "value": "PlayerOne" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let value = client
        .read_memory(
            &Address::new(0x2000),
            &ValueKind::Str {
                max_length: 32,
                wide: true,
            },
            Locality::Host,
        )
        .await
        .unwrap();
    assert_eq!(value, TypedValue::Str("PlayerOne".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn write_out_of_range_never_reaches_the_remote() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .write_memory(
            &Address::new(0x1000),
            &ValueKind::int(IntWidth::W16, true),
            "40000",
            Locality::Target,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    untouched.assert_async().await;
}

#[tokio::test]
async fn write_bytes_payload_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/write-memory")
        .match_body(Matcher::PartialJson(json!({
            "dataType": "bytes",
            "byteValues": [0x90, 0x90],
            "byteCount": 2,
        })))
        .with_body(json!({ "success": true }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .write_memory(
            &Address::new(0x401000),
            &ValueKind::Bytes {
                count: 2,
                as_table: false,
            },
            "90 90",
            Locality::Target,
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn process_list_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/cheatengine/process-list")
        .with_body(
            json!({
                "success": true,
                "processes": [
                    { "pid": 4242, "name": "game.exe" },
                    { "pid": 1, "name": "init" },
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/cheatengine/process-status")
        .with_body(
            json!({ "success": true, "attached": true, "pid": 4242, "name": "game.exe" })
                .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let processes = client.process_list().await.unwrap();
    assert_eq!(processes.len(), 2);
    assert_eq!(processes[0].pid, 4242);
    assert_eq!(processes[0].name, "game.exe");

    let status = client.process_status().await.unwrap();
    assert!(status.attached);
    assert_eq!(status.pid, Some(4242));
}

#[tokio::test]
async fn aob_scan_normalizes_and_decodes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/aob-scan")
        .match_body(Matcher::PartialJson(json!({
            "pattern": "48 8B ?? 90",
            "protectionFlags": "+X",
        })))
        .with_body(
            json!({ "success": true, "addresses": ["0x401000", "0x40BEEF"] }).to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let addresses = client
        .aob_scan("48 8b ? 90", Some("+X"), None)
        .await
        .unwrap();
    assert_eq!(
        addresses,
        vec![Address::new(0x401000), Address::new(0x40BEEF)]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_aob_pattern_fails_locally() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.aob_scan("XY ZZ", None, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    untouched.assert_async().await;
}

#[tokio::test]
async fn convert_md5() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/convert")
        .match_body(Matcher::PartialJson(json!({
            "input": "password",
            "conversionType": "md5",
        })))
        .with_body(
            json!({ "success": true, "output": "5f4dcc3b5aa765d61d8327deb882cf99" }).to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let output = client.convert("password", Conversion::Md5).await.unwrap();
    assert_eq!(output, "5f4dcc3b5aa765d61d8327deb882cf99");
}

#[tokio::test]
async fn resolve_symbolic_address_remotely() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/resolve-address")
        .match_body(Matcher::PartialJson(json!({
            "address": "kernel32.dll+1A0",
            "local": false,
        })))
        .with_body(json!({ "success": true, "address": "0x7FF8A0001A0" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let resolved = client
        .resolve_address("kernel32.dll+1A0", Locality::Target)
        .await
        .unwrap();
    assert_eq!(resolved, 0x7FF8_A000_1A0);
    mock.assert_async().await;
}

#[tokio::test]
async fn resolve_literal_address_stays_local() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(
        client
            .resolve_address("0x1000", Locality::Target)
            .await
            .unwrap(),
        0x1000
    );
    assert_eq!(
        client
            .resolve_address("4096", Locality::Host)
            .await
            .unwrap(),
        4096
    );
    untouched.assert_async().await;
}

#[tokio::test]
async fn execute_lua_returns_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/execute-lua")
        .match_body(Matcher::PartialJson(json!({ "code": "return 1+1" })))
        .with_body(json!({ "success": true, "result": 2 }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.execute_lua("return 1+1").await.unwrap();
    assert_eq!(result, json!(2));
}

#[tokio::test]
async fn instruction_size_at_address() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cheatengine/get-instruction-size")
        .match_body(Matcher::PartialJson(json!({ "address": "0x401000" })))
        .with_body(json!({ "success": true, "size": 7 }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let size = client
        .get_instruction_size(&Address::new(0x401000))
        .await
        .unwrap();
    assert_eq!(size, 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn disassemble_and_thread_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/disassemble")
        .with_body(
            json!({ "success": true, "disassembled": "mov eax,[rbx+08]" }).to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/cheatengine/thread-list")
        .with_body(json!({ "success": true, "threads": ["0x1A4", "0x1B0"] }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.disassemble(&Address::new(0x401000)).await.unwrap(),
        "mov eax,[rbx+08]"
    );
    assert_eq!(client.thread_list().await.unwrap(), vec!["0x1A4", "0x1B0"]);
}
