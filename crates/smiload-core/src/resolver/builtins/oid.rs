//! Built-in OID tree nodes.
//!
//! The three ISO/ITU roots are in scope in every module. The remaining
//! nodes are the OID exports of the SMI base modules.

use crate::model::Oid;
use alloc::vec::Vec;

/// Index constants for built-in OID nodes.
///
/// These indices correspond to positions in [`BUILTIN_OID_NODES`].
pub mod idx {
    /// `ccitt(0)`
    pub const CCITT: usize = 0;
    /// `iso(1)`
    pub const ISO: usize = 1;
    /// `joint-iso-ccitt(2)`
    pub const JOINT_ISO_CCITT: usize = 2;
    /// `org(3)` (1.3)
    pub const ORG: usize = 3;
    /// `dod(6)` (1.3.6)
    pub const DOD: usize = 4;
    /// `internet(1)` (1.3.6.1)
    pub const INTERNET: usize = 5;
    /// `directory(1)` (1.3.6.1.1)
    pub const DIRECTORY: usize = 6;
    /// `mgmt(2)` (1.3.6.1.2)
    pub const MGMT: usize = 7;
    /// `mib-2(1)` (1.3.6.1.2.1)
    pub const MIB_2: usize = 8;
    /// `transmission(10)` (1.3.6.1.2.1.10)
    pub const TRANSMISSION: usize = 9;
    /// `experimental(3)` (1.3.6.1.3)
    pub const EXPERIMENTAL: usize = 10;
    /// `private(4)` (1.3.6.1.4)
    pub const PRIVATE: usize = 11;
    /// `enterprises(1)` (1.3.6.1.4.1)
    pub const ENTERPRISES: usize = 12;
    /// `security(5)` (1.3.6.1.5)
    pub const SECURITY: usize = 13;
    /// `snmpV2(6)` (1.3.6.1.6)
    pub const SNMPV2: usize = 14;
    /// `snmpDomains(1)` (1.3.6.1.6.1)
    pub const SNMP_DOMAINS: usize = 15;
    /// `snmpProxys(2)` (1.3.6.1.6.2)
    pub const SNMP_PROXYS: usize = 16;
    /// `snmpModules(3)` (1.3.6.1.6.3)
    pub const SNMP_MODULES: usize = 17;
    /// `zeroDotZero` (0.0)
    pub const ZERO_DOT_ZERO: usize = 18;
}

/// A built-in OID tree node.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinOidNode {
    /// Node name.
    pub name: &'static str,
    /// The arc (subidentifier) at this position.
    pub arc: u32,
    /// Index of the parent node in [`BUILTIN_OID_NODES`], or `None` for roots.
    pub parent: Option<usize>,
}

const fn node(name: &'static str, arc: u32, parent: Option<usize>) -> BuiltinOidNode {
    BuiltinOidNode { name, arc, parent }
}

/// All built-in OID nodes, ordered to match [`idx`].
pub static BUILTIN_OID_NODES: &[BuiltinOidNode] = &[
    node("ccitt", 0, None),
    node("iso", 1, None),
    node("joint-iso-ccitt", 2, None),
    node("org", 3, Some(idx::ISO)),
    node("dod", 6, Some(idx::ORG)),
    node("internet", 1, Some(idx::DOD)),
    node("directory", 1, Some(idx::INTERNET)),
    node("mgmt", 2, Some(idx::INTERNET)),
    node("mib-2", 1, Some(idx::MGMT)),
    node("transmission", 10, Some(idx::MIB_2)),
    node("experimental", 3, Some(idx::INTERNET)),
    node("private", 4, Some(idx::INTERNET)),
    node("enterprises", 1, Some(idx::PRIVATE)),
    node("security", 5, Some(idx::INTERNET)),
    node("snmpV2", 6, Some(idx::INTERNET)),
    node("snmpDomains", 1, Some(idx::SNMPV2)),
    node("snmpProxys", 2, Some(idx::SNMPV2)),
    node("snmpModules", 3, Some(idx::SNMPV2)),
    node("zeroDotZero", 0, Some(idx::CCITT)),
];

impl BuiltinOidNode {
    /// Compute the full numeric OID for this node.
    #[must_use]
    pub fn oid(&self) -> Oid {
        let mut path = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            path.push(node.arc);
            current = node.parent.map(|i| &BUILTIN_OID_NODES[i]);
        }
        path.reverse();
        Oid::new(path)
    }

    /// Check if this node is a tree root, in scope without import.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Look up a built-in OID node by name.
#[must_use]
pub fn lookup_builtin_oid(name: &str) -> Option<&'static BuiltinOidNode> {
    BUILTIN_OID_NODES.iter().find(|node| node.name == name)
}

/// Look up one of the always-visible roots (`ccitt`, `iso`,
/// `joint-iso-ccitt`).
#[must_use]
pub fn lookup_root(name: &str) -> Option<Oid> {
    lookup_builtin_oid(name)
        .filter(|node| node.is_root())
        .map(BuiltinOidNode::oid)
}
