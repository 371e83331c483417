//! Error types for the scaffolding engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Everything that can stop a scaffolding run.
///
/// None of these are retried. A failure after the destination directory has
/// been created leaves whatever was already written in place.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Project name is empty or not a single path component
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    /// Destination already exists on disk
    #[error("folder {} already exists! Delete or use another name.", path.display())]
    ProjectExists { path: PathBuf },

    /// A file or directory could not be created during replication
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template asset or manifest could not be read
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An overlay was selected but the asset store has no tree for it
    #[error("no template assets registered for overlay '{overlay}' (looked in {asset_path})")]
    UnknownOverlay { overlay: String, asset_path: String },

    /// The base template is missing from the asset store
    #[error("base template '{asset_path}' not found in asset store")]
    MissingTemplate { asset_path: String },

    /// package.json could not be parsed or has an unexpected shape
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Root catalog (template.yaml) could not be parsed
    #[error("invalid template catalog: {0}")]
    Catalog(#[from] serde_yaml::Error),

    /// Remote asset download failed
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Asset bundle could not be built or read
    #[error("asset bundle error: {0}")]
    Bundle(#[from] zip::result::ZipError),

    /// Package manager could not be spawned or exited unsuccessfully
    #[error("`{command}` failed: {message}")]
    PackageManager { command: String, message: String },
}

impl ScaffoldError {
    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }
}
