pub mod hooks;

use crate::error::PluginError;
use crate::models::{BuildOptions, Compilation, Severity, StatusBuffer, StatusLine};
use crate::services::{copy_files, ensure_destination_dir, FileCopyConfig};
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

pub use hooks::{AfterEmitHook, BuildHooks};

const BANNER: &str = "Copy files after emit";

/// Options the plugin is constructed with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Destination root; files land in `<to>/<library>/`
    pub to: PathBuf,
    #[serde(default)]
    pub verbose_errors: bool,
}

impl PluginConfig {
    pub fn new<P: Into<PathBuf>>(to: P) -> Self {
        Self {
            to: to.into(),
            verbose_errors: false,
        }
    }
}

/// Status lines printed for each chunk of one after-emit run
#[derive(Debug, Clone, Default)]
pub struct EmitReport {
    pub chunks: Vec<Vec<StatusLine>>,
}

impl EmitReport {
    pub fn lines(&self) -> impl Iterator<Item = &StatusLine> {
        self.chunks.iter().flatten()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lines().filter(|line| line.severity() == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.lines().any(StatusLine::is_error)
    }
}

/// Copies every emitted chunk file into `<to>/<lowercase library>/` once the
/// build has written its output.
#[derive(Debug, Clone)]
pub struct CopyAfterBuildPlugin {
    config: PluginConfig,
}

impl CopyAfterBuildPlugin {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    /// Register on the host's after-emit hook
    pub fn apply(self, hooks: &mut BuildHooks) {
        hooks.tap_after_emit(self);
    }

    /// Ensure the module directory and copy each chunk's files into it.
    ///
    /// Each chunk's lines are printed as soon as that chunk settles. Failures
    /// only ever become error lines.
    pub async fn run(&self, options: &BuildOptions, compilation: &Compilation) -> EmitReport {
        let mut report = EmitReport::default();

        let Some(module) = options.module_name() else {
            error!("Cannot copy build output: {}", PluginError::MissingLibrary);
            let mut buffer = StatusBuffer::new();
            buffer.push(StatusLine::banner(BANNER));
            buffer.push(StatusLine::error("Resolve module", "output.library"));
            report.chunks.push(buffer.flush());
            return report;
        };

        let from = &options.output.path;
        let to = &self.config.to;
        let copy_config = FileCopyConfig {
            verbose_errors: self.config.verbose_errors,
        };

        info!(
            "Copying {} chunks from {} into {}/{}",
            compilation.chunks.len(),
            from.display(),
            to.display(),
            module
        );

        for chunk in &compilation.chunks {
            let mut buffer = StatusBuffer::new();
            buffer.push(StatusLine::banner(BANNER));

            let check = ensure_destination_dir(to, &module, self.config.verbose_errors).await;
            buffer.push(check.status.clone());

            if check.is_ready() {
                buffer.extend(copy_files(&chunk.files, from, to, &module, &copy_config).await);
            } else {
                error!(
                    "Skipping {} files of chunk {}: {} is unavailable",
                    chunk.files.len(),
                    chunk.name.as_deref().unwrap_or("<unnamed>"),
                    check.path.display()
                );
            }

            report.chunks.push(buffer.flush());
        }

        report
    }
}

impl AfterEmitHook for CopyAfterBuildPlugin {
    fn name(&self) -> &str {
        "CopyAfterBuildPlugin"
    }

    fn after_emit<'a>(
        &'a self,
        options: &'a BuildOptions,
        compilation: &'a Compilation,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let report = self.run(options, compilation).await;
            info!(
                "After-emit copy finished. Success: {}, Errors: {}",
                report.count(Severity::Success),
                report.count(Severity::Error)
            );
        })
    }
}
