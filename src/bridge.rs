//! Client for the CREOSON automation bridge.
//!
//! CREOSON is a local HTTP service that translates JSON commands into Creo
//! API calls. This module provides the Rust-side boundary for that
//! exchange: a flat JSON codec and a client that performs one blocking
//! request/response per command.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐        HTTP POST           ┌──────────────┐      ┌──────┐
//! │   creobatch     │ ◄─────────────────────────►│   CREOSON    │ ◄───►│ Creo │
//! │ (CreosonClient) │   JSON command envelopes   │   (bridge)   │      └──────┘
//! └─────────────────┘                            └──────────────┘
//! ```
//!
//! # Protocol
//!
//! Every exchange is a single POST of a command envelope:
//!
//! ```text
//! {"command":"file","function":"open","sessionId":"s1","data":{"file":"fin.prt"}}
//! ```
//!
//! and the response is a JSON object whose `status` field reports success
//! or failure:
//!
//! ```text
//! {"status":{"error":false},"sessionId":"s1"}
//! ```
//!
//! The session id issued by `connection.connect` is captured by the client
//! and attached to every subsequent envelope.
//!
//! # Usage
//!
//! ```ignore
//! use creobatch::bridge::CreosonClient;
//! use creobatch::params;
//!
//! let mut client = CreosonClient::new(url, timeout)?;
//! client.post("connection", "connect", params! {}).await?;
//! let result = client.post("creo", "cd", params! { "dirname" => "C:\\work" }).await?;
//! ```

mod client;
pub mod codec;

pub use client::{BridgeError, CreosonClient, DEFAULT_BRIDGE_URL, DEFAULT_TIMEOUT_MS};
