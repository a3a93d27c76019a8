//! HTTP client for the CREOSON bridge.
//!
//! One blocking request/response exchange per command: the envelope is
//! serialized, POSTed to the bridge, and the decoded response is inspected
//! for an application-level error before being handed back to the caller.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::bridge::codec;
use crate::models::{Params, Value};

/// Default CREOSON endpoint.
pub const DEFAULT_BRIDGE_URL: &str = "http://localhost:9056/creoson";

/// Default connect/read timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Bridge-specific error types.
///
/// `Connection`, `Timeout`, and `Status` are transport failures raised
/// before the response is interpreted; `Application` means the bridge
/// itself reported a failed command.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The bridge could not be reached or the exchange failed mid-flight.
    #[error("cannot reach bridge: {0}")]
    Connection(#[source] reqwest::Error),

    /// The exchange exceeded the configured timeout.
    #[error("bridge request timed out after {0} ms")]
    Timeout(u64),

    /// The bridge answered with a non-200 HTTP status.
    #[error("bridge returned HTTP {0}")]
    Status(StatusCode),

    /// The bridge executed the command and reported `status.error = true`.
    #[error("Creoson error: {0}")]
    Application(String),
}

/// Client for the CREOSON JSON-over-HTTP bridge.
///
/// Holds the one piece of cross-call state the protocol requires: the
/// session id issued by `connection.connect`. Once set, it is attached to
/// every subsequent envelope for the lifetime of the client.
///
/// # Example
///
/// ```ignore
/// use creobatch::bridge::CreosonClient;
///
/// let mut client = CreosonClient::new(url, Duration::from_millis(60_000))?;
/// client.post("connection", "connect", Params::new()).await?;
/// client.post("file", "save", params! { "file" => "fin.prt" }).await?;
/// ```
pub struct CreosonClient {
    http: Client,
    url: Url,
    timeout_ms: u64,
    session_id: Option<String>,
}

impl CreosonClient {
    /// Creates a client for the bridge at `url` with the given timeout
    /// applied to both connecting and reading.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, BridgeError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(BridgeError::Connection)?;

        Ok(Self {
            http,
            url,
            timeout_ms: timeout.as_millis() as u64,
            session_id: None,
        })
    }

    /// The session id issued by the bridge, once `connection.connect` has
    /// succeeded.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Sends one command to the bridge and returns the decoded response map.
    ///
    /// The envelope carries `command` and `function`, the current session id
    /// if one exists, and `data` if non-empty. The exchange blocks until the
    /// response is fully read or the timeout expires; the pooled connection
    /// is returned to the client on every exit path.
    ///
    /// # Errors
    ///
    /// - `BridgeError::Connection` / `BridgeError::Timeout` on transport
    ///   failure
    /// - `BridgeError::Status` if the HTTP status is not 200 (raised before
    ///   any decoding)
    /// - `BridgeError::Application` if the response `status` object has
    ///   `error == true`, carrying its `message` field
    pub async fn post(
        &mut self,
        command: &str,
        function: &str,
        data: Params,
    ) -> Result<Params, BridgeError> {
        let mut envelope = Params::new();
        envelope.insert("command", command);
        envelope.insert("function", function);
        if let Some(session) = &self.session_id {
            envelope.insert("sessionId", session.as_str());
        }
        if !data.is_empty() {
            envelope.insert("data", data);
        }

        let body = codec::encode(&envelope);
        tracing::debug!("{command}.{function} -> {body}");

        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BridgeError::Status(status));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let result = codec::decode(&text);

        if let Some(Value::Object(status)) = result.get("status") {
            if status.get("error").and_then(Value::as_bool) == Some(true) {
                let message = match status.get("message") {
                    Some(msg) => msg.to_string(),
                    None => "Unknown error".to_string(),
                };
                return Err(BridgeError::Application(message));
            }
        }

        if command == "connection" && function == "connect" {
            if let Some(sid) = result.get("sessionId").filter(|v| !v.is_null()) {
                let sid = sid.to_string();
                tracing::info!("session established: {sid}");
                self.session_id = Some(sid);
            }
        }

        Ok(result)
    }

    fn transport_error(&self, err: reqwest::Error) -> BridgeError {
        if err.is_timeout() {
            BridgeError::Timeout(self.timeout_ms)
        } else {
            BridgeError::Connection(err)
        }
    }
}
