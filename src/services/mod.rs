pub mod directory;
pub mod file_copy;

pub use directory::{ensure_destination_dir, DirectoryCheck, DirectoryState};
pub use file_copy::{
    copy_files, execute_copy_tasks, plan_copy_tasks, reduce_copy_results, CopyResult, CopyTask,
    FileCopyConfig,
};
