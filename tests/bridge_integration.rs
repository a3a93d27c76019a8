//! Integration tests for the CREOSON bridge client.
//!
//! These tests run the client against a stub HTTP bridge, verifying the
//! envelope contract end to end: session propagation, error surfacing,
//! transport failures, and the full six-step automation sequence.
//!
//! # Running
//!
//! ```bash
//! cargo test --test bridge_integration -- --nocapture
//! ```

use std::path::Path;
use std::time::Duration;

use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use creobatch::bridge::{BridgeError, CreosonClient};
use creobatch::config::StartConfig;
use creobatch::ops::{Automation, RunError};
use creobatch::params;

/// Build a client pointed at the stub bridge.
fn bridge_client(server: &MockServer) -> CreosonClient {
    let url = Url::parse(&format!("{}/creoson", server.uri())).expect("stub URL should parse");
    CreosonClient::new(url, Duration::from_secs(5)).expect("client should build")
}

/// Stub response for every command other than connect.
fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(r#"{"status":{"error":false}}"#)
}

/// Mount a connect-specific mock issuing `sessionId` plus a catch-all
/// success mock.
async fn mount_session_bridge(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .and(body_string_contains(r#""function":"connect""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"status":{{"error":false}},"sessionId":"{session_id}"}}"#
        )))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ok_response())
        .mount(server)
        .await;
}

/// Request bodies received by the stub, in order.
async fn request_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|r| String::from_utf8(r.body.clone()).expect("request body is UTF-8"))
        .collect()
}

#[tokio::test]
async fn session_id_attached_to_every_call_after_connect() {
    let server = MockServer::start().await;
    mount_session_bridge(&server, "abc").await;

    let mut client = bridge_client(&server);
    assert_eq!(client.session_id(), None);

    client
        .post("connection", "connect", params! {})
        .await
        .expect("connect should succeed");
    assert_eq!(client.session_id(), Some("abc"));

    client
        .post("file", "save", params! { "file" => "fin.prt" })
        .await
        .expect("save should succeed");
    client
        .post("creo", "cd", params! { "dirname" => "C:\\work" })
        .await
        .expect("cd should succeed");

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 3);
    assert!(!bodies[0].contains("sessionId"), "connect must not carry a session id");
    assert!(bodies[1].contains(r#""sessionId":"abc""#));
    assert!(bodies[2].contains(r#""sessionId":"abc""#));
}

#[tokio::test]
async fn connect_without_session_id_leaves_client_sessionless() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ok_response())
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    client
        .post("connection", "connect", params! {})
        .await
        .expect("connect should succeed");
    assert_eq!(client.session_id(), None);
}

#[tokio::test]
async fn application_error_surfaces_bridge_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status":{"error":true,"message":"bad param"}}"#,
        ))
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    let err = client
        .post("parameter", "set", params! { "name" => "test" })
        .await
        .unwrap_err();

    match err {
        BridgeError::Application(message) => assert_eq!(message, "bad param"),
        other => panic!("expected Application error, got {other:?}"),
    }
}

#[tokio::test]
async fn application_error_without_message_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":{"error":true}}"#))
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    let err = client.post("file", "open", params! {}).await.unwrap_err();

    match err {
        BridgeError::Application(message) => assert_eq!(message, "Unknown error"),
        other => panic!("expected Application error, got {other:?}"),
    }
}

#[tokio::test]
async fn status_error_false_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status":{"error":false,"message":"all good"},"dirname":"C:\\work"}"#,
        ))
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    let result = client
        .post("creo", "cd", params! { "dirname" => "C:\\work" })
        .await
        .expect("cd should succeed");
    assert_eq!(
        result.get("dirname").and_then(|v| v.as_str()),
        Some("C:\\work")
    );
}

#[tokio::test]
async fn response_without_status_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"dirname":"C:\\work"}"#))
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    client
        .post("creo", "cd", params! { "dirname" => "C:\\work" })
        .await
        .expect("missing status field must not be treated as an error");
}

#[tokio::test]
async fn non_200_status_fails_before_decoding() {
    let server = MockServer::start().await;
    // The body advertises an application error, but a 500 must surface as a
    // transport failure without the body ever being interpreted.
    Mock::given(method("POST"))
        .and(path("/creoson"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"{"status":{"error":true,"message":"should never be read"}}"#,
        ))
        .mount(&server)
        .await;

    let mut client = bridge_client(&server);
    let err = client
        .post("connection", "connect", params! {})
        .await
        .unwrap_err();

    match err {
        BridgeError::Status(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Nothing listens here; the request must fail with a connection error,
    // not hang or panic.
    let url = Url::parse("http://127.0.0.1:9/creoson").unwrap();
    let mut client = CreosonClient::new(url, Duration::from_secs(2)).unwrap();

    let err = client
        .post("connection", "connect", params! {})
        .await
        .unwrap_err();
    assert!(
        matches!(err, BridgeError::Connection(_) | BridgeError::Timeout(_)),
        "expected transport failure, got {err:?}"
    );
}

#[tokio::test]
async fn validation_failures_send_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_response())
        .expect(0)
        .mount(&server)
        .await;

    let mut creo = Automation::new(bridge_client(&server), "/tmp");

    let err = creo
        .change_dir(Path::new("/definitely/not/a/real/directory"))
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::DirNotFound(_)));

    let dir = tempfile::tempdir().unwrap();
    creo = Automation::new(bridge_client(&server), dir.path());
    let err = creo.open_file("fin.prt", None, true, true).await.unwrap_err();
    assert!(matches!(err, RunError::FileNotFound(_)));

    assert_eq!(request_bodies(&server).await.len(), 0);
}

/// The full six-step sequence against a stub bridge: completes, and every
/// call after connect carries the issued session id.
#[tokio::test]
async fn six_step_sequence_completes_with_session() {
    let server = MockServer::start().await;
    mount_session_bridge(&server, "s1").await;

    // Local working directory with the part file the open step validates.
    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("fin.prt"), b"part data").unwrap();

    let start = StartConfig {
        start_dir: workdir.path().display().to_string(),
        start_command: "nitro_proe_remote.bat".to_string(),
        retries: 5,
        use_desktop: false,
    };

    let mut creo = Automation::new(bridge_client(&server), workdir.path());
    creo.start_creo(start.to_params()).await.expect("start");
    creo.connect().await.expect("connect");
    creo.change_dir(workdir.path()).await.expect("cd");
    creo.open_file("fin.prt", Some("fin"), true, true)
        .await
        .expect("open");
    creo.set_parameter("test", "updated by creobatch", "STRING")
        .await
        .expect("set parameter");
    creo.save_file("fin.prt").await.expect("save");

    assert_eq!(creo.session_id(), Some("s1"));

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 6);

    let functions = [
        r#""function":"start_creo""#,
        r#""function":"connect""#,
        r#""function":"cd""#,
        r#""function":"open""#,
        r#""function":"set""#,
        r#""function":"save""#,
    ];
    for (body, function) in bodies.iter().zip(functions) {
        assert!(body.contains(function), "body {body} missing {function}");
    }

    // Session id appears on every call after connect, and on none before.
    for body in &bodies[..2] {
        assert!(!body.contains("sessionId"), "premature session id in {body}");
    }
    for body in &bodies[2..] {
        assert!(body.contains(r#""sessionId":"s1""#), "missing session id in {body}");
    }

    // Fixed flags of parameter.set.
    assert!(bodies[4].contains(r#""no_create":false"#));
    assert!(bodies[4].contains(r#""designate":true"#));
}
