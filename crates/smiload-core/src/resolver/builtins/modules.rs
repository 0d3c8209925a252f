//! SMI base module recognition.
//!
//! These are the RFC-defined modules that provide the SMI framework. They
//! are never read from disk; imports from them resolve against built-ins.

use super::oid::{idx, BUILTIN_OID_NODES};
use crate::model::Oid;

/// SMI base modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseModule {
    /// SNMPv2-SMI (RFC 2578) - SMIv2 base types, OIDs, MACROs.
    SnmpV2Smi,
    /// SNMPv2-TC (RFC 2579) - Textual conventions.
    SnmpV2Tc,
    /// SNMPv2-CONF (RFC 2580) - Conformance MACROs.
    SnmpV2Conf,
    /// RFC1155-SMI - SMIv1 base types, OIDs.
    Rfc1155Smi,
    /// RFC1065-SMI - Original SMIv1 base (predates RFC 1155).
    Rfc1065Smi,
    /// RFC-1212 - SMIv1 OBJECT-TYPE MACRO.
    Rfc1212,
    /// RFC-1215 - SMIv1 TRAP-TYPE MACRO.
    Rfc1215,
}

/// OID exports of the SMIv1 base modules.
const SMIV1_OID_EXPORTS: &[usize] = &[
    idx::ORG,
    idx::DOD,
    idx::INTERNET,
    idx::DIRECTORY,
    idx::MGMT,
    idx::EXPERIMENTAL,
    idx::PRIVATE,
    idx::ENTERPRISES,
];

impl BaseModule {
    /// Get the canonical module name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SnmpV2Smi => "SNMPv2-SMI",
            Self::SnmpV2Tc => "SNMPv2-TC",
            Self::SnmpV2Conf => "SNMPv2-CONF",
            Self::Rfc1155Smi => "RFC1155-SMI",
            Self::Rfc1065Smi => "RFC1065-SMI",
            Self::Rfc1212 => "RFC-1212",
            Self::Rfc1215 => "RFC-1215",
        }
    }

    /// Check if this is an SMIv2 module.
    #[must_use]
    pub const fn is_smiv2(self) -> bool {
        matches!(self, Self::SnmpV2Smi | Self::SnmpV2Tc | Self::SnmpV2Conf)
    }

    /// Look up a base module by name. Case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|m| m.name() == name)
    }

    /// Iterate over all base modules.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::SnmpV2Smi,
            Self::SnmpV2Tc,
            Self::SnmpV2Conf,
            Self::Rfc1155Smi,
            Self::Rfc1065Smi,
            Self::Rfc1212,
            Self::Rfc1215,
        ]
        .into_iter()
    }

    /// Resolve an OID-valued symbol exported by this module.
    ///
    /// Types, textual conventions and macros have no OID and yield `None`.
    #[must_use]
    pub fn oid_export(self, symbol: &str) -> Option<Oid> {
        let (index, node) = BUILTIN_OID_NODES
            .iter()
            .enumerate()
            .find(|(_, node)| node.name == symbol)?;
        let exported = match self {
            Self::SnmpV2Smi => !node.is_root(),
            Self::Rfc1155Smi | Self::Rfc1065Smi => SMIV1_OID_EXPORTS.contains(&index),
            Self::SnmpV2Tc | Self::SnmpV2Conf | Self::Rfc1212 | Self::Rfc1215 => false,
        };
        exported.then(|| node.oid())
    }
}

/// Check if a module name is a recognized base module.
#[must_use]
pub fn is_base_module(name: &str) -> bool {
    BaseModule::from_name(name).is_some()
}

/// `mib-2` and `transmission` as exported by RFC1213-MIB, used when that
/// module is imported from but not available.
#[must_use]
pub fn rfc1213_fallback(module: &str, symbol: &str) -> Option<Oid> {
    if module != "RFC1213-MIB" {
        return None;
    }
    match symbol {
        "mib-2" => Some(BUILTIN_OID_NODES[idx::MIB_2].oid()),
        "transmission" => Some(BUILTIN_OID_NODES[idx::TRANSMISSION].oid()),
        _ => None,
    }
}
