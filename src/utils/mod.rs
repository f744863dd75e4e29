pub mod file_operations;

pub use file_operations::{copy_file, resolve_path};
