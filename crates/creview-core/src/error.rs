//! # Error Types
//!
//! The analysis itself never fails: a declaration or usage that does not
//! have the expected textual shape is skipped. The only fatal conditions are
//! the ones that stop a file from being read at all.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for compact-review.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The path does not carry the `.compact` extension.
    #[error("Not a .compact file: {}", .0.display())]
    WrongExtension(PathBuf),

    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read (permissions, non-UTF-8, ...).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ReviewError {
    /// True for errors raised before the filesystem was consulted.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::WrongExtension(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_extension_message() {
        let err = ReviewError::WrongExtension(PathBuf::from("contract.txt"));
        assert_eq!(err.to_string(), "Not a .compact file: contract.txt");
        assert!(err.is_usage_error());
    }

    #[test]
    fn not_found_message() {
        let err = ReviewError::NotFound(PathBuf::from("missing.compact"));
        assert_eq!(err.to_string(), "File not found: missing.compact");
        assert!(!err.is_usage_error());
    }

    #[test]
    fn read_error_keeps_source() {
        let err = ReviewError::Read {
            path: PathBuf::from("a.compact"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to read a.compact"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
