mod secret;

pub use secret::*;

use std::io::Write;
use std::path::Path;

use log::error;
use tempfile::NamedTempFile;

use crate::error::ChaosmarkError;
use crate::result::Result;

pub(crate) fn is_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Writes `bytes` to a temporary file next to `target` and renames it into place.
pub(crate) fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let to_write_error = |source: std::io::Error| {
        error!("Error writing {}: {source}", target.display());
        ChaosmarkError::WriteError { source }
    };

    let mut file = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    file.write_all(bytes).map_err(to_write_error)?;
    file.as_file().sync_all().map_err(to_write_error)?;
    file.persist(target)
        .map_err(|e| to_write_error(e.error))?;

    Ok(())
}

/// Reads a whole file, logging and wrapping the failure as [`ChaosmarkError::ReadError`].
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        error!("Error reading {}: {source}", path.display());
        ChaosmarkError::ReadError { source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_recognize_png_extensions() {
        assert!(is_png_extension(Path::new("a/b.png")));
        assert!(is_png_extension(Path::new("B.PNG")));
        assert!(!is_png_extension(Path::new("b.jpg")));
        assert!(!is_png_extension(Path::new("png")));
    }

    #[test]
    fn should_replace_the_target_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.png");
        std::fs::write(&target, b"old").unwrap();

        write_atomically(&target, b"new content").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new content");
        assert_eq!(dir.path().read_dir().unwrap().count(), 1);
    }

    #[test]
    fn should_fail_for_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.png");
        assert!(matches!(
            write_atomically(&target, b"x"),
            Err(ChaosmarkError::WriteError { .. })
        ));
        assert!(matches!(
            read_file(&target),
            Err(ChaosmarkError::ReadError { .. })
        ));
    }
}
