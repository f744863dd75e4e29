use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the copy pipeline.
///
/// None of these ever reach the host build: the hook turns every one of them
/// into an error status line.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to copy {from:?} to {to:?}: {cause}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("failed to create directory {path:?}: {cause}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("build options have no output library name")]
    MissingLibrary,
}

pub type PluginResult<T> = Result<T, PluginError>;
