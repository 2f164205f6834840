//! Gateway failure normalization tests

use ce_bridge::{BridgeError, ErrorKind, Gateway, Operation};
use serde_json::json;
use std::time::Duration;

fn gateway(url: &str) -> Gateway {
    Gateway::with_base_url(url, Duration::from_secs(2), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Port 9 (discard) is not listening.
    let gw = gateway("http://127.0.0.1:9");
    let err = gw.invoke(Operation::Health, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        BridgeError::Transport { operation, .. } => assert_eq!(operation, "health"),
        other => panic!("expected transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn http_error_status_is_a_remote_rejection() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/read-memory")
        .with_status(500)
        .with_body(json!({ "success": false, "error": "no process open" }).to_string())
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let err = gw
        .invoke(Operation::ReadMemory, Some(&json!({ "address": "0x1000" })))
        .await
        .unwrap_err();

    match err {
        BridgeError::RemoteRejected {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "no process open");
        }
        other => panic!("expected remote rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn failure_envelope_with_ok_status_is_a_remote_rejection() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/open-process")
        .with_status(200)
        .with_body(json!({ "success": false, "error": "process not found" }).to_string())
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let err = gw
        .invoke(Operation::OpenProcess, Some(&json!({ "process": "nope.exe" })))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteRejection);
}

#[tokio::test]
async fn error_status_with_non_json_body_is_a_remote_rejection() {
    // A proxy between client and service answers with an HTML error page;
    // the failure status alone classifies the outcome.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/cheatengine/read-memory")
        .with_status(502)
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let err = gw.invoke(Operation::ReadMemory, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteRejection);
    match err {
        BridgeError::RemoteRejected { status, .. } => assert_eq!(status, 502),
        other => panic!("expected remote rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_a_protocol_violation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/cheatengine/health")
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let err = gw.invoke(Operation::Health, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolInvariant);
}

#[tokio::test]
async fn get_operations_send_no_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cheatengine/process-list")
        .with_body(json!({ "success": true, "processes": [] }).to_string())
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let envelope = gw.invoke(Operation::ProcessList, None).await.unwrap();
    assert_eq!(envelope["processes"], json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn envelope_without_success_field_passes_through() {
    // The health endpoint answers with a plain status document.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/cheatengine/health")
        .with_body(json!({ "status": "healthy", "version": "1.0.0" }).to_string())
        .create_async()
        .await;

    let gw = gateway(&server.url());
    let envelope = gw.invoke(Operation::Health, None).await.unwrap();
    assert_eq!(envelope["status"], "healthy");
}
