//! Resolved nodes and node-kind filters.

use super::Oid;
use crate::ast::Status;
use alloc::string::String;
use bitflags::bitflags;

/// Node kind inferred from definition context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// OBJECT-IDENTITY, MODULE-IDENTITY, or value assignment.
    Node,
    /// OBJECT-TYPE not in a table.
    Scalar,
    /// SYNTAX is SEQUENCE OF.
    Table,
    /// Has INDEX or AUGMENTS clause, or SYNTAX names a row type.
    Row,
    /// Parent is a row (column object).
    Column,
    /// NOTIFICATION-TYPE or TRAP-TYPE.
    Notification,
    /// OBJECT-GROUP or NOTIFICATION-GROUP.
    Group,
    /// MODULE-COMPLIANCE.
    Compliance,
    /// AGENT-CAPABILITIES.
    Capabilities,
}

impl NodeKind {
    /// The filter bit for this kind.
    #[must_use]
    pub const fn flag(self) -> NodeKinds {
        match self {
            Self::Node => NodeKinds::NODE,
            Self::Scalar => NodeKinds::SCALAR,
            Self::Table => NodeKinds::TABLE,
            Self::Row => NodeKinds::ROW,
            Self::Column => NodeKinds::COLUMN,
            Self::Notification => NodeKinds::NOTIFICATION,
            Self::Group => NodeKinds::GROUP,
            Self::Compliance => NodeKinds::COMPLIANCE,
            Self::Capabilities => NodeKinds::CAPABILITIES,
        }
    }

    /// Lowercase name, as shown by the CLI and in traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Scalar => "scalar",
            Self::Table => "table",
            Self::Row => "row",
            Self::Column => "column",
            Self::Notification => "notification",
            Self::Group => "group",
            Self::Compliance => "compliance",
            Self::Capabilities => "capabilities",
        }
    }

    /// Check if this is an OBJECT-TYPE kind.
    #[must_use]
    pub const fn is_object_type(self) -> bool {
        matches!(self, Self::Scalar | Self::Table | Self::Row | Self::Column)
    }
}

bitflags! {
    /// Set of node kinds used to filter module enumeration.
    ///
    /// ```
    /// use smiload_core::model::{NodeKind, NodeKinds};
    ///
    /// assert!(NodeKinds::OBJECTS.contains(NodeKind::Column.flag()));
    /// assert!(!NodeKinds::OBJECTS.contains(NodeKind::Group.flag()));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeKinds: u16 {
        /// Value assignments and identities.
        const NODE = 1 << 0;
        /// Scalar objects.
        const SCALAR = 1 << 1;
        /// Tables.
        const TABLE = 1 << 2;
        /// Conceptual rows.
        const ROW = 1 << 3;
        /// Columns.
        const COLUMN = 1 << 4;
        /// Notifications and traps.
        const NOTIFICATION = 1 << 5;
        /// Object and notification groups.
        const GROUP = 1 << 6;
        /// Compliance statements.
        const COMPLIANCE = 1 << 7;
        /// Agent capabilities.
        const CAPABILITIES = 1 << 8;

        /// Kinds that appear in an OID directory.
        const OBJECTS = Self::NODE.bits()
            | Self::SCALAR.bits()
            | Self::TABLE.bits()
            | Self::ROW.bits()
            | Self::COLUMN.bits()
            | Self::NOTIFICATION.bits();
    }
}

impl NodeKinds {
    /// Check whether `kind` passes this filter.
    #[must_use]
    pub fn matches(self, kind: NodeKind) -> bool {
        self.contains(kind.flag())
    }
}

/// A resolved definition with a numeric OID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Symbolic name, unique within the module.
    pub name: String,
    /// Inferred kind.
    pub kind: NodeKind,
    /// Resolved OID.
    pub oid: Oid,
    /// `STATUS` clause, when the definition has one.
    pub status: Option<Status>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objects_filter() {
        for kind in [
            NodeKind::Node,
            NodeKind::Scalar,
            NodeKind::Table,
            NodeKind::Row,
            NodeKind::Column,
            NodeKind::Notification,
        ] {
            assert!(NodeKinds::OBJECTS.matches(kind), "{kind:?}");
        }
        for kind in [NodeKind::Group, NodeKind::Compliance, NodeKind::Capabilities] {
            assert!(!NodeKinds::OBJECTS.matches(kind), "{kind:?}");
        }
    }

    #[test]
    fn test_custom_filter() {
        let filter = NodeKinds::TABLE | NodeKinds::ROW;
        assert!(filter.matches(NodeKind::Row));
        assert!(!filter.matches(NodeKind::Column));
        assert!(NodeKinds::all().matches(NodeKind::Capabilities));
        assert!(!NodeKinds::empty().matches(NodeKind::Node));
    }

    #[test]
    fn test_object_type_kinds() {
        assert!(NodeKind::Column.is_object_type());
        assert!(!NodeKind::Notification.is_object_type());
        assert_eq!(NodeKind::Capabilities.as_str(), "capabilities");
    }
}
