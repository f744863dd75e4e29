pub mod build;
pub mod status;

pub use build::{BuildManifest, BuildOptions, Chunk, Compilation, OutputOptions};
pub use status::{Severity, StatusBuffer, StatusLine};
