pub mod error;
pub mod models;
pub mod plugin;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::{PluginError, PluginResult};
pub use models::{BuildManifest, BuildOptions, Chunk, Compilation, Severity, StatusLine};
pub use plugin::{AfterEmitHook, BuildHooks, CopyAfterBuildPlugin, EmitReport, PluginConfig};
pub use services::{copy_files, ensure_destination_dir, FileCopyConfig};
pub use utils::copy_file;

// Runner configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub manifest: std::path::PathBuf,
    pub plugin: PluginConfig,
    pub log_level: String,
}
