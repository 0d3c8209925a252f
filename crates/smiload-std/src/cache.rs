//! Persisted module directories.
//!
//! [`import_module`] loads a MIB file once and stores its name and OID
//! directory next to other imported modules, so later runs can read the
//! directory back with [`load_imported`] without parsing MIB sources.
//!
//! # File Format
//!
//! Files are named `<MODULE>.smid`:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header (9 or 41 bytes)                 │
//! │   magic: [u8; 4]        "SMID"         │
//! │   version: u32 (LE)     Schema version │
//! │   has_fingerprint: u8   0 or 1         │
//! │   fingerprint: [u8; 32] (if present)   │
//! ├────────────────────────────────────────┤
//! │ Payload (postcard ImportedModule)      │
//! └────────────────────────────────────────┘
//! ```
//!
//! The fingerprint is a SHA-256 of the schema version and the source file,
//! so [`is_import_current`] can tell when the source has changed.

use crate::environment::Environment;
use crate::error::CacheError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smiload_core::OidDirectory;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Current schema version. Bump on any breaking change to the payload.
pub const SCHEMA_VERSION: u32 = 1;

/// File extension of imported modules.
pub const EXTENSION: &str = "smid";

const MAGIC: [u8; 4] = *b"SMID";
const HEADER_LEN: usize = 9;
const FINGERPRINT_LEN: usize = 32;

/// A module name and its OID directory, as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedModule {
    /// Declared module name.
    pub name: String,
    /// Object name to dotted OID.
    pub directory: OidDirectory,
}

/// Fingerprint of a module source file.
#[must_use]
pub fn fingerprint(source: &[u8]) -> [u8; FINGERPRINT_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(SCHEMA_VERSION.to_le_bytes());
    hasher.update(source);
    hasher.finalize().into()
}

/// Encode an imported module, optionally embedding a fingerprint.
///
/// # Errors
///
/// Returns [`CacheError::Postcard`] if the payload cannot be encoded.
pub fn encode(
    module: &ImportedModule,
    fingerprint: Option<[u8; FINGERPRINT_LEN]>,
) -> Result<Vec<u8>, CacheError> {
    let payload = postcard::to_allocvec(module)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + FINGERPRINT_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    match fingerprint {
        Some(fp) => {
            bytes.push(1);
            bytes.extend_from_slice(&fp);
        }
        None => bytes.push(0),
    }
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Split cache bytes into the stored fingerprint and the payload.
fn split_header(bytes: &[u8]) -> Result<(Option<&[u8]>, &[u8]), CacheError> {
    let header = bytes.get(..HEADER_LEN).ok_or(CacheError::TruncatedHeader)?;
    if header[..4] != MAGIC {
        return Err(CacheError::InvalidMagic);
    }
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version != SCHEMA_VERSION {
        return Err(CacheError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    let rest = &bytes[HEADER_LEN..];
    if header[8] == 0 {
        return Ok((None, rest));
    }
    if rest.len() < FINGERPRINT_LEN {
        return Err(CacheError::TruncatedHeader);
    }
    let (fp, payload) = rest.split_at(FINGERPRINT_LEN);
    Ok((Some(fp), payload))
}

/// Decode an imported module. With `expected`, the stored fingerprint
/// must be present and equal to it.
///
/// # Errors
///
/// Header, version and fingerprint checks, then postcard decoding.
pub fn decode(
    bytes: &[u8],
    expected: Option<&[u8; FINGERPRINT_LEN]>,
) -> Result<ImportedModule, CacheError> {
    let (stored, payload) = split_header(bytes)?;
    if let Some(expected) = expected {
        if stored != Some(expected.as_slice()) {
            return Err(CacheError::FingerprintMismatch);
        }
    }
    Ok(postcard::from_bytes(payload)?)
}

/// Path of the imported file for `name` inside `dir`.
#[must_use]
pub fn imported_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{EXTENSION}"))
}

/// Load `file` through `env` and write `<out_dir>/<MODULE>.smid`.
///
/// Returns the path written.
///
/// # Errors
///
/// Loader errors, or IO errors reading the source or writing the output.
pub fn import_module(
    env: &mut Environment,
    file: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf, CacheError> {
    let file = file.as_ref();
    let (name, directory) = env.load(file)?;
    let source = fs::read(file)?;

    let out = imported_path(out_dir.as_ref(), &name);
    let bytes = encode(&ImportedModule { name, directory }, Some(fingerprint(&source)))?;
    fs::write(&out, bytes)?;
    info!(source = %file.display(), output = %out.display(), "module imported");
    Ok(out)
}

/// Read a cache file without fingerprint verification.
///
/// # Errors
///
/// IO errors, or any [`decode`] error.
pub fn load_cache(path: impl AsRef<Path>) -> Result<ImportedModule, CacheError> {
    let bytes = fs::read(path)?;
    decode(&bytes, None)
}

/// Read the imported directory for module `name` from `dir`.
///
/// # Errors
///
/// See [`load_cache`].
pub fn load_imported(dir: impl AsRef<Path>, name: &str) -> Result<ImportedModule, CacheError> {
    load_cache(imported_path(dir.as_ref(), name))
}

/// Whether `cache` exists and was written from the current `source`.
pub fn is_import_current(cache: impl AsRef<Path>, source: impl AsRef<Path>) -> bool {
    let (Ok(bytes), Ok(source)) = (fs::read(cache), fs::read(source)) else {
        return false;
    };
    matches!(
        split_header(&bytes),
        Ok((Some(stored), _)) if stored == fingerprint(&source).as_slice()
    )
}
