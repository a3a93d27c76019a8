//! creobatch library
//!
//! Core components for driving PTC Creo through the CREOSON bridge:
//!
//! - `bridge` - HTTP client and flat JSON codec for the CREOSON protocol
//! - `models` - loosely-typed value and ordered map the envelopes are built from
//! - `ops` - the six automation operations with local path validation
//! - `config` - literal run configuration
//!
//! # Bridge module
//!
//! The `bridge` module is the transport boundary:
//!
//! ```ignore
//! use creobatch::bridge::CreosonClient;
//! use creobatch::params;
//!
//! let mut client = CreosonClient::new(url, timeout)?;
//! client.post("connection", "connect", params! {}).await?;
//! let result = client.post("file", "save", params! { "file" => "fin.prt" }).await?;
//! ```

pub mod bridge;
pub mod config;
pub mod models;
pub mod ops;
