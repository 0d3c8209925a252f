//! Built-in SMI definitions.
//!
//! Pre-seeded definitions the resolver needs before processing user
//! modules: the OID roots and the OID exports of the SMI base modules.
//!
//! # Usage
//!
//! ```
//! use smiload_core::resolver::builtins::resolve_builtin_import;
//!
//! let oid = resolve_builtin_import("SNMPv2-SMI", "enterprises").unwrap();
//! assert_eq!(oid.to_dotted(), "1.3.6.1.4.1");
//! ```

mod modules;
mod oid;

pub use modules::{is_base_module, rfc1213_fallback, BaseModule};
pub use oid::{idx as oid_idx, lookup_builtin_oid, lookup_root, BuiltinOidNode, BUILTIN_OID_NODES};

use crate::model::Oid;

/// Resolve a symbol imported from a base module to its OID.
///
/// Returns `None` for unknown modules and for symbols without an OID value.
#[must_use]
pub fn resolve_builtin_import(module: &str, symbol: &str) -> Option<Oid> {
    BaseModule::from_name(module)?.oid_export(symbol)
}
