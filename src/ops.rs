//! The six Creo operations, in execution order.
//!
//! Each operation is a thin layer over [`CreosonClient::post`]: validate
//! local preconditions (paths must exist before asking Creo to use them),
//! build the parameter map, delegate. There are no retries and no rollback;
//! the first failure propagates up and aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bridge::{BridgeError, CreosonClient};
use crate::models::Params;
use crate::params;

/// Failure of a single operation.
///
/// The path variants are local validation failures raised before any HTTP
/// request is made; `Bridge` wraps everything the exchange itself can
/// produce.
#[derive(Debug, Error)]
pub enum RunError {
    /// The requested working directory does not exist locally.
    #[error("invalid directory: {}", .0.display())]
    DirNotFound(PathBuf),

    /// The file to open does not exist under the working directory.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Sequential Creo automation over a [`CreosonClient`].
///
/// Tracks the working directory used to resolve relative file paths. The
/// directory is replaced only after the bridge has acknowledged the change,
/// so it is always an absolute, normalized path once [`change_dir`] has
/// succeeded.
///
/// [`change_dir`]: Automation::change_dir
pub struct Automation {
    client: CreosonClient,
    working_dir: PathBuf,
}

impl Automation {
    pub fn new(client: CreosonClient, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            working_dir: working_dir.into(),
        }
    }

    /// Current working directory for resolving relative file paths.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Session id captured by the underlying client, if connected.
    pub fn session_id(&self) -> Option<&str> {
        self.client.session_id()
    }

    /// `connection.start_creo` — asks the bridge to launch Creo with the
    /// given startup configuration. The `retries` field in the config is
    /// data for the bridge, not a local retry policy.
    pub async fn start_creo(&mut self, config: Params) -> Result<(), RunError> {
        self.client
            .post("connection", "start_creo", config)
            .await?;
        Ok(())
    }

    /// `connection.connect` — opens a session. The client stores the
    /// returned session id for all subsequent calls.
    pub async fn connect(&mut self) -> Result<(), RunError> {
        self.client
            .post("connection", "connect", Params::new())
            .await?;
        Ok(())
    }

    /// `creo.cd` — changes Creo's working directory.
    ///
    /// The path is canonicalized locally and must exist and be a directory;
    /// on success it becomes the working directory for later operations.
    pub async fn change_dir(&mut self, dir: &Path) -> Result<(), RunError> {
        let abs = fs::canonicalize(dir).map_err(|_| RunError::DirNotFound(dir.to_path_buf()))?;
        if !abs.is_dir() {
            return Err(RunError::DirNotFound(abs));
        }

        tracing::info!("changing working directory to {}", abs.display());
        self.client
            .post(
                "creo",
                "cd",
                params! { "dirname" => abs.to_string_lossy().as_ref() },
            )
            .await?;
        self.working_dir = abs;
        Ok(())
    }

    /// `file.open` — opens a model file, resolved against the working
    /// directory. `generic` names the generic for family-table instances
    /// and is omitted from the request when empty.
    pub async fn open_file(
        &mut self,
        file: &str,
        generic: Option<&str>,
        display: bool,
        activate: bool,
    ) -> Result<(), RunError> {
        let abs = self.working_dir.join(file);
        if !abs.is_file() {
            return Err(RunError::FileNotFound(abs));
        }

        let mut data = params! {
            "file" => abs.to_string_lossy().as_ref(),
            "display" => display,
            "activate" => activate,
        };
        if let Some(generic) = generic.filter(|g| !g.is_empty()) {
            data.insert("generic", generic);
        }
        self.client.post("file", "open", data).await?;
        Ok(())
    }

    /// `parameter.set` — sets a parameter on the active model. Existing
    /// parameters only (`no_create = false`); the parameter is designated
    /// for drawings (`designate = true`).
    pub async fn set_parameter(
        &mut self,
        name: &str,
        value: &str,
        param_type: &str,
    ) -> Result<(), RunError> {
        self.client
            .post(
                "parameter",
                "set",
                params! {
                    "name" => name,
                    "type" => param_type,
                    "value" => value,
                    "no_create" => false,
                    "designate" => true,
                },
            )
            .await?;
        Ok(())
    }

    /// `file.save` — saves the named model.
    pub async fn save_file(&mut self, file: &str) -> Result<(), RunError> {
        self.client
            .post("file", "save", params! { "file" => file })
            .await?;
        Ok(())
    }
}
