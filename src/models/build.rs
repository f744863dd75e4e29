use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output section of the host build configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    pub path: PathBuf,
    #[serde(default)]
    pub library: Option<String>,
}

/// Host build configuration, read-only to the plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    pub output: OutputOptions,
}

impl BuildOptions {
    pub fn new<P: Into<PathBuf>>(output_path: P, library: &str) -> Self {
        Self {
            output: OutputOptions {
                path: output_path.into(),
                library: Some(library.to_string()),
            },
        }
    }

    /// Destination subfolder: the library name, lower-cased.
    /// An empty name resolves to the destination root itself.
    pub fn module_name(&self) -> Option<String> {
        self.output.library.as_deref().map(str::to_lowercase)
    }
}

/// A group of emitted files, paths relative to the output directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Chunk {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// What the host hands the after-emit hook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compilation {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// On-disk description of a finished build, consumed by the runner binary
#[derive(Debug, Clone, Deserialize)]
pub struct BuildManifest {
    #[serde(flatten)]
    pub options: BuildOptions,
    #[serde(flatten)]
    pub compilation: Compilation,
}

impl BuildManifest {
    /// Read a JSON manifest written by the build
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read build manifest: {:?}", path))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid build manifest: {:?}", path))
    }
}
