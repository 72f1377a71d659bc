//! # Source Reader
//!
//! Loads a Compact source file into memory. The extension check happens
//! before the filesystem is touched, so a wrongly named path is rejected
//! even if it does not exist.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::ReviewError;

/// File extension every analyzed source must carry.
pub const COMPACT_EXTENSION: &str = ".compact";

/// A source file held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
}

impl SourceFile {
    /// Load a `.compact` file.
    ///
    /// The file handle lives only for the duration of this call and is
    /// released on both the success and the error path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReviewError> {
        let path = path.as_ref();
        check_extension(path)?;

        let mut file = File::open(path).map_err(|e| classify_io(path, e))?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| classify_io(path, e))?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source file");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Wrap in-memory text. No extension check is performed.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full source text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Reject any path whose file name does not end in `.compact`.
pub fn check_extension(path: &Path) -> Result<(), ReviewError> {
    let has_ext = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(COMPACT_EXTENSION));
    if has_ext {
        Ok(())
    } else {
        Err(ReviewError::WrongExtension(path.to_path_buf()))
    }
}

fn classify_io(path: &Path, source: std::io::Error) -> ReviewError {
    if source.kind() == ErrorKind::NotFound {
        ReviewError::NotFound(path.to_path_buf())
    } else {
        ReviewError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_skips_extension_check() {
        let src = SourceFile::from_text("inline", "circuit f(): [] {}");
        assert_eq!(src.path(), Path::new("inline"));
        assert_eq!(src.text(), "circuit f(): [] {}");
    }

    #[test]
    fn load_reads_full_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.compact");
        std::fs::write(&path, "witness secret(): Field;\n").unwrap();

        let src = SourceFile::load(&path).unwrap();
        assert_eq!(src.text(), "witness secret(): Field;\n");
        assert_eq!(src.path(), path.as_path());
    }

    #[test]
    fn wrong_extension_rejected_before_io() {
        let err = SourceFile::load("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ReviewError::WrongExtension(_)));
    }

    #[test]
    fn bare_extension_name_is_accepted() {
        assert!(check_extension(Path::new(".compact")).is_ok());
        assert!(check_extension(Path::new("dir/a.compact")).is_ok());
        assert!(check_extension(Path::new("a.compact.bak")).is_err());
        assert!(check_extension(Path::new("compact")).is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceFile::load(dir.path().join("missing.compact")).unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }

    #[test]
    fn non_utf8_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.compact");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = SourceFile::load(&path).unwrap_err();
        assert!(matches!(err, ReviewError::Read { .. }));
    }

    #[test]
    fn directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dir.compact");
        std::fs::create_dir(&path).unwrap();
        let err = SourceFile::load(&path).unwrap_err();
        assert!(matches!(err, ReviewError::Read { .. }));
    }
}
