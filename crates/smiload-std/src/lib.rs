//! smiload: filesystem MIB loading.
//!
//! This crate wraps `smiload-core` with everything that touches the
//! filesystem: search-path configuration, a registry of loaded modules,
//! import resolution across files, persisted directories and a CLI.
//!
//! The one-call entry point is [`load_smi_module`]:
//!
//! ```no_run
//! let (name, oids) = smiload::load_smi_module("/usr/share/snmp/mibs/IF-MIB")?;
//! assert_eq!(name, "IF-MIB");
//! println!("ifIndex = {:?}", oids.get("ifIndex"));
//! # Ok::<(), smiload::Error>(())
//! ```
//!
//! Callers that want control over configuration and module lifetime use an
//! [`Environment`] directly.

pub mod cache;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

pub use config::Config;
pub use environment::Environment;
pub use error::{CacheError, Error};
pub use smiload_core;
pub use smiload_core::{Module, NodeKind, NodeKinds, Oid, OidDirectory};

use std::path::Path;
use std::sync::{Mutex, PoisonError};

static ENVIRONMENT: Mutex<Option<Environment>> = Mutex::new(None);

/// Load `path` into the process-wide environment and return the declared
/// module name with its OID directory.
///
/// The environment is created from [`Config::from_env`] on first use. If
/// that fails, nothing is stored and the next call tries again.
///
/// # Errors
///
/// [`Error::Initialization`], [`Error::Load`] or [`Error::NoModule`].
pub fn load_smi_module(path: impl AsRef<Path>) -> Result<(String, OidDirectory), Error> {
    let mut guard = ENVIRONMENT.lock().unwrap_or_else(PoisonError::into_inner);
    let env = match guard.as_mut() {
        Some(env) => env,
        None => guard.insert(Environment::init(Config::from_env()?)?),
    };
    env.load(path)
}
