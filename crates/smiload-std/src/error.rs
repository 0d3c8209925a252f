//! Loader and cache errors.

use std::io;

/// Initialization status: the configuration file could not be read.
pub const INIT_CONFIG_UNREADABLE: i32 = 1;
/// Initialization status: the configuration file has a syntax error.
pub const INIT_CONFIG_SYNTAX: i32 = 2;
/// Initialization status: a configured preload module failed to load.
pub const INIT_PRELOAD_FAILED: i32 = 3;

/// Errors returned by [`Environment`](crate::Environment) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parse environment could not be initialized.
    #[error("initialization error {code}: {detail}")]
    Initialization {
        /// Status code (see the `INIT_*` constants).
        code: i32,
        /// Human-readable detail.
        detail: String,
    },

    /// The file could not be read or is not valid SMI.
    #[error("{reason} for module '{path}'")]
    Load {
        /// Path (or module name) that was being loaded.
        path: String,
        /// OS error text or the first syntax error.
        reason: String,
    },

    /// The file parsed but holds no module definition.
    #[error("no module found in {path}")]
    NoModule {
        /// Path that was loaded.
        path: String,
    },
}

impl Error {
    pub(crate) fn load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn init(code: i32, detail: impl Into<String>) -> Self {
        Self::Initialization {
            code,
            detail: detail.into(),
        }
    }
}

/// Errors reading or writing a module directory cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// File does not start with the expected magic bytes.
    #[error("invalid magic bytes (expected SMID)")]
    InvalidMagic,
    /// Schema version mismatch.
    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version.
        expected: u32,
        /// Found version.
        found: u32,
    },
    /// Fingerprint does not match the source file.
    #[error("fingerprint mismatch")]
    FingerprintMismatch,
    /// Header is truncated.
    #[error("truncated header")]
    TruncatedHeader,
    /// Postcard (de)serialization failed.
    #[error("postcard serialization failed: {0}")]
    Postcard(#[from] postcard::Error),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The source module could not be loaded.
    #[error(transparent)]
    Load(#[from] Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_loader_messages() {
        let err = Error::load("/nonexistent/path.mib", "No such file or directory (os error 2)");
        assert_eq!(
            err.to_string(),
            "No such file or directory (os error 2) for module '/nonexistent/path.mib'"
        );
        assert_eq!(
            Error::NoModule { path: "x.txt".into() }.to_string(),
            "no module found in x.txt"
        );
        assert_eq!(
            Error::init(INIT_CONFIG_SYNTAX, "smirc:3: unknown directive `hide`").to_string(),
            "initialization error 2: smirc:3: unknown directive `hide`"
        );
    }

    #[test]
    fn test_cache_error_wraps_loader_error() {
        let err: CacheError = Error::NoModule { path: "a".into() }.into();
        assert_eq!(err.to_string(), "no module found in a");
    }
}
