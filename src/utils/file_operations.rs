use crate::error::{PluginError, PluginResult};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncWriteExt};

/// Join `segments` onto `base` and make the result absolute against the
/// current directory. An absolute segment replaces everything before it.
pub fn resolve_path<S: AsRef<Path>>(base: &Path, segments: &[S]) -> PathBuf {
    let joined = segments
        .iter()
        .fold(base.to_path_buf(), |acc, segment| acc.join(segment));

    std::path::absolute(&joined).unwrap_or(joined)
}

/// Stream `source` into `destination`, returning the number of bytes copied.
///
/// The destination's parent directory must already exist. On failure a
/// partially written destination file is left in place.
pub async fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> PluginResult<u64> {
    let from = source.as_ref();
    let to = destination.as_ref();
    let fail = |cause: io::Error| PluginError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        cause,
    };

    // Source first: a missing source never creates an empty destination
    let mut reader = File::open(from).await.map_err(fail)?;
    let mut writer = File::create(to).await.map_err(fail)?;

    let bytes = io::copy(&mut reader, &mut writer).await.map_err(fail)?;
    writer.flush().await.map_err(fail)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_path_joins_segments() {
        let resolved = resolve_path(Path::new("/out"), &["mylib", "a.js"]);
        assert_eq!(resolved, PathBuf::from("/out/mylib/a.js"));
    }

    #[test]
    fn test_resolve_path_relative_base_becomes_absolute() {
        let resolved = resolve_path(Path::new("dist"), &["a.js"]);
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("dist/a.js"));
    }

    #[test]
    fn test_resolve_path_absolute_segment_wins() {
        let resolved = resolve_path(Path::new("/out"), &["/elsewhere/a.js"]);
        assert_eq!(resolved, PathBuf::from("/elsewhere/a.js"));
    }

    #[tokio::test]
    async fn test_copy_file_is_byte_identical() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("bundle.js");
        let destination = dir.path().join("copy.js");
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&source, &content).unwrap();

        let bytes = copy_file(&source, &destination).await.unwrap();

        assert_eq!(bytes, content.len() as u64);
        assert_eq!(std::fs::read(&destination).unwrap(), content);
    }

    #[tokio::test]
    async fn test_copy_file_overwrites_existing_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.js");
        let destination = dir.path().join("b.js");
        std::fs::write(&source, b"new").unwrap();
        std::fs::write(&destination, b"old content that is longer").unwrap();

        copy_file(&source, &destination).await.unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_copy_file_missing_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.js");
        let destination = dir.path().join("out.js");

        let err = copy_file(&source, &destination).await.unwrap_err();

        match err {
            PluginError::Copy { cause, .. } => {
                assert_eq!(cause.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_copy_file_missing_destination_parent() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.js");
        std::fs::write(&source, b"x").unwrap();
        let destination = dir.path().join("no_such_dir").join("a.js");

        let result = copy_file(&source, &destination).await;

        assert!(result.is_err());
    }
}
