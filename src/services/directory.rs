use crate::error::PluginError;
use crate::models::StatusLine;
use crate::utils::resolve_path;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

const CREATE_DIRECTORY: &str = "Create directory";

/// What the destination directory looked like after the ensure step
#[derive(Debug)]
pub enum DirectoryState {
    Created,
    Existing,
    Failed(PluginError),
}

/// Outcome of ensuring `<base>/<module>` exists
#[derive(Debug)]
pub struct DirectoryCheck {
    pub path: PathBuf,
    pub state: DirectoryState,
    pub status: StatusLine,
}

impl DirectoryCheck {
    /// Whether files may be copied into the directory
    pub fn is_ready(&self) -> bool {
        !matches!(self.state, DirectoryState::Failed(_))
    }
}

/// Make sure the per-module destination directory exists.
///
/// Only the last level is created; missing ancestors are reported as a
/// failure. The existence check and the creation are two separate calls, so
/// a concurrent run may create the directory in between. That case surfaces
/// as `AlreadyExists` from `create_dir` and is reported like a directory that
/// was already there.
pub async fn ensure_destination_dir(
    base_path: &Path,
    module_name: &str,
    verbose_errors: bool,
) -> DirectoryCheck {
    let path = resolve_path(base_path, &[module_name]);

    let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
    if exists {
        debug!("Destination directory {} already exists", path.display());
        return existing(path, module_name);
    }

    match tokio::fs::create_dir(&path).await {
        Ok(()) => {
            debug!("Created destination directory {}", path.display());
            DirectoryCheck {
                status: StatusLine::success(CREATE_DIRECTORY, module_name),
                path,
                state: DirectoryState::Created,
            }
        }
        Err(cause) => classify_create_error(cause, path, module_name, verbose_errors).await,
    }
}

/// Turn a `create_dir` failure into a directory check. `AlreadyExists` on a
/// path that is now a directory counts as existing.
async fn classify_create_error(
    cause: io::Error,
    path: PathBuf,
    module_name: &str,
    verbose_errors: bool,
) -> DirectoryCheck {
    if cause.kind() == ErrorKind::AlreadyExists {
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if is_dir {
            debug!(
                "Destination directory {} appeared after existence check",
                path.display()
            );
            return existing(path, module_name);
        }
    }

    let err = PluginError::CreateDirectory {
        path: path.clone(),
        cause,
    };
    error!("{}", err);

    let message = if verbose_errors {
        format!("{module_name} ({err})")
    } else {
        module_name.to_string()
    };

    DirectoryCheck {
        path,
        status: StatusLine::error(CREATE_DIRECTORY, &message),
        state: DirectoryState::Failed(err),
    }
}

fn existing(path: PathBuf, module_name: &str) -> DirectoryCheck {
    DirectoryCheck {
        path,
        state: DirectoryState::Existing,
        status: StatusLine::info(CREATE_DIRECTORY, module_name, "Exist"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();

        let check = ensure_destination_dir(dir.path(), "mylib", false).await;

        assert!(matches!(check.state, DirectoryState::Created));
        assert_eq!(check.status.severity(), Severity::Success);
        assert!(check.is_ready());
        assert!(dir.path().join("mylib").is_dir());
    }

    #[tokio::test]
    async fn test_existing_directory_reports_exist() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("mylib")).unwrap();
        std::fs::write(dir.path().join("mylib").join("keep.txt"), b"keep").unwrap();

        let check = ensure_destination_dir(dir.path(), "mylib", false).await;

        assert!(matches!(check.state, DirectoryState::Existing));
        assert_eq!(check.status.severity(), Severity::Info);
        assert!(check.status.as_str().contains("[Exist]"));
        assert!(dir.path().join("mylib").join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_ancestor_is_not_created() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("missing_root");

        let check = ensure_destination_dir(&base, "mylib", false).await;

        assert!(!check.is_ready());
        assert_eq!(check.status.severity(), Severity::Error);
        assert!(!base.exists());
    }

    #[tokio::test]
    async fn test_already_exists_on_directory_counts_as_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mylib");
        std::fs::create_dir(&path).unwrap();

        let check = classify_create_error(
            io::Error::from(ErrorKind::AlreadyExists),
            path,
            "mylib",
            false,
        )
        .await;

        assert!(matches!(check.state, DirectoryState::Existing));
        assert!(check.is_ready());
        assert!(check.status.as_str().contains("[Exist]"));
    }

    #[tokio::test]
    async fn test_already_exists_without_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("mylib");
        let file = dir.path().join("plain");
        std::fs::write(&file, b"").unwrap();

        for path in [missing, file] {
            let check = classify_create_error(
                io::Error::from(ErrorKind::AlreadyExists),
                path,
                "mylib",
                false,
            )
            .await;

            assert!(matches!(check.state, DirectoryState::Failed(_)));
            assert_eq!(check.status.severity(), Severity::Error);
        }
    }

    #[tokio::test]
    async fn test_empty_module_resolves_to_base() {
        let dir = tempdir().unwrap();

        let check = ensure_destination_dir(dir.path(), "", false).await;

        assert!(matches!(check.state, DirectoryState::Existing));
        assert_eq!(check.path, resolve_path(dir.path(), &[""]));
    }

    #[tokio::test]
    async fn test_verbose_error_includes_cause() {
        let dir = tempdir().unwrap();
        // A regular file where the base directory should be
        let base = dir.path().join("not_a_dir");
        std::fs::write(&base, b"").unwrap();

        let quiet = ensure_destination_dir(&base, "mylib", false).await;
        let verbose = ensure_destination_dir(&base, "mylib", true).await;

        assert!(!quiet.status.as_str().contains("failed to create directory"));
        assert!(verbose.status.as_str().contains("failed to create directory"));
    }
}
