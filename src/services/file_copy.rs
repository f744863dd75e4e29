use crate::error::PluginError;
use crate::models::StatusLine;
use crate::utils::{copy_file, resolve_path};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const COPY: &str = "Copy";

/// Configuration for file copying operations
#[derive(Debug, Clone, Default)]
pub struct FileCopyConfig {
    /// Append the underlying error to failed copy lines
    pub verbose_errors: bool,
}

/// One planned copy, paths already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    pub file: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Result of a single file copy
#[derive(Debug)]
pub enum CopyResult {
    Success { task: CopyTask, bytes: u64 },
    Error { task: CopyTask, error: PluginError },
}

impl CopyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CopyResult::Success { .. })
    }

    pub fn task(&self) -> &CopyTask {
        match self {
            CopyResult::Success { task, .. } | CopyResult::Error { task, .. } => task,
        }
    }

    /// Report line for this copy, labeled `<subfolder>/<file>`
    pub fn to_status_line(&self, subfolder: &str, config: &FileCopyConfig) -> StatusLine {
        let target = format!("{}/{}", subfolder, self.task().file);
        match self {
            CopyResult::Success { .. } => StatusLine::success(COPY, &target),
            CopyResult::Error { error, .. } if config.verbose_errors => {
                StatusLine::error(COPY, &format!("{target} ({error})"))
            }
            CopyResult::Error { .. } => StatusLine::error(COPY, &target),
        }
    }
}

/// Pure function to resolve every file against both roots, in input order
pub fn plan_copy_tasks<S: AsRef<str>>(
    files: &[S],
    source_root: &Path,
    dest_root: &Path,
    subfolder: &str,
) -> Vec<CopyTask> {
    files
        .iter()
        .map(|file| {
            let file = file.as_ref();
            CopyTask {
                file: file.to_string(),
                source: resolve_path(source_root, &[file]),
                destination: resolve_path(dest_root, &[subfolder, file]),
            }
        })
        .collect()
}

/// Run every task concurrently and wait for all of them to settle.
/// Results come back in task order.
pub async fn execute_copy_tasks(tasks: Vec<CopyTask>) -> Vec<CopyResult> {
    let copies = tasks.into_iter().map(|task| async move {
        match copy_file(&task.source, &task.destination).await {
            Ok(bytes) => {
                debug!(
                    "Copied {} -> {} ({} bytes)",
                    task.source.display(),
                    task.destination.display(),
                    bytes
                );
                CopyResult::Success { task, bytes }
            }
            Err(error) => {
                error!("{}", error);
                CopyResult::Error { task, error }
            }
        }
    });

    join_all(copies).await
}

/// Copy `files` from `source_root` into `dest_root/subfolder`.
///
/// Every copy runs in parallel and a failure never stops its siblings. One
/// status line is returned per file, in the order of `files`.
pub async fn copy_files<S: AsRef<str>>(
    files: &[S],
    source_root: &Path,
    dest_root: &Path,
    subfolder: &str,
    config: &FileCopyConfig,
) -> Vec<StatusLine> {
    let tasks = plan_copy_tasks(files, source_root, dest_root, subfolder);
    info!(
        "Copying {} files from {} to {}",
        tasks.len(),
        source_root.display(),
        resolve_path(dest_root, &[subfolder]).display()
    );

    let results = execute_copy_tasks(tasks).await;

    let (success, errors) = reduce_copy_results(&results);
    info!("File copy completed. Success: {}, Errors: {}", success, errors);

    results
        .iter()
        .map(|result| result.to_status_line(subfolder, config))
        .collect()
}

/// Reduce copy results to (success, error) counts
pub fn reduce_copy_results(results: &[CopyResult]) -> (usize, usize) {
    results.iter().fold((0, 0), |(success, errors), result| {
        if result.is_success() {
            (success + 1, errors)
        } else {
            (success, errors + 1)
        }
    })
}
