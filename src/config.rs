//! Run configuration.
//!
//! Everything here is literal: the bridge endpoint, the timeout, the
//! working directory, and the job to perform. No config file or
//! environment variable is consulted (`RUST_LOG` steers logging only).

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::bridge::{DEFAULT_BRIDGE_URL, DEFAULT_TIMEOUT_MS};
use crate::models::Params;
use crate::params;

/// Startup configuration handed to `connection.start_creo`.
///
/// These fields are interpreted by the bridge, not locally; in particular
/// `retries` is how often the *bridge* retries the Creo launch.
#[derive(Debug, Clone)]
pub struct StartConfig {
    pub start_dir: String,
    pub start_command: String,
    pub retries: i64,
    pub use_desktop: bool,
}

impl StartConfig {
    /// The config map as sent in the `start_creo` envelope.
    pub fn to_params(&self) -> Params {
        params! {
            "start_dir" => self.start_dir.as_str(),
            "start_command" => self.start_command.as_str(),
            "retries" => self.retries,
            "use_desktop" => self.use_desktop,
        }
    }
}

/// Full configuration for one automation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// CREOSON endpoint.
    pub bridge_url: Url,
    /// Connect/read timeout for every bridge exchange.
    pub timeout: Duration,
    /// Initial working directory; also the target of the `creo.cd` step.
    pub working_dir: PathBuf,
    /// Creo startup configuration.
    pub start: StartConfig,
    /// Part file to open and save, relative to the working directory.
    pub part_file: String,
    /// Generic name for family-table instances; empty to omit.
    pub generic: String,
    /// Parameter to set on the opened part.
    pub parameter_name: String,
    pub parameter_value: String,
    pub parameter_type: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        let working_dir = "D:\\mydoc\\Creoson_test";
        Self {
            bridge_url: Url::parse(DEFAULT_BRIDGE_URL).expect("default bridge URL is valid"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            working_dir: PathBuf::from(working_dir),
            start: StartConfig {
                start_dir: working_dir.to_string(),
                start_command: "nitro_proe_remote.bat".to_string(),
                retries: 5,
                use_desktop: false,
            },
            part_file: "fin.prt".to_string(),
            generic: "fin".to_string(),
            parameter_name: "test".to_string(),
            parameter_value: "updated by creobatch".to_string(),
            parameter_type: "STRING".to_string(),
        }
    }
}
