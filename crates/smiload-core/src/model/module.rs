//! Resolved module.

use super::{Node, NodeKinds, Oid, OidDirectory};
use crate::lexer::{Diagnostic, Span};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// SMI language version of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// SMIv1 (RFC 1155/1212/1215).
    Smiv1,
    /// SMIv2 (RFC 2578-2580).
    Smiv2,
}

impl Language {
    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smiv1 => "SMIv1",
            Self::Smiv2 => "SMIv2",
        }
    }
}

/// A definition whose OID could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unresolved {
    /// The definition name.
    pub name: String,
    /// The component that failed to resolve (`name` or `Module.name`).
    pub component: String,
    /// Location of the OID value.
    pub span: Span,
}

/// A resolved MIB module. Read-only once built.
#[derive(Clone, Debug)]
pub struct Module {
    pub(crate) name: String,
    pub(crate) language: Language,
    pub(crate) imports: Vec<String>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) symbols: BTreeMap<String, Oid>,
    pub(crate) unresolved: Vec<Unresolved>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Module {
    /// Declared module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred SMI language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Names of modules this module imports from, in source order.
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Resolved nodes in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes whose kind passes `kinds`, in declaration order.
    pub fn nodes_of(&self, kinds: NodeKinds) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| kinds.matches(node.kind))
    }

    /// Look up a node by name. A redefined name yields the last definition,
    /// matching [`Module::oid_directory`].
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().rev().find(|node| node.name == name)
    }

    /// Look up any OID-valued name defined in this module, including names
    /// bound by `name(number)` components.
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&Oid> {
        self.symbols.get(name)
    }

    /// Definitions that could not be resolved.
    #[must_use]
    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    /// Diagnostics reported for this module.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Attach source diagnostics (lexer/parser) ahead of resolver ones.
    #[must_use]
    pub fn with_source_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        let resolver = core::mem::take(&mut self.diagnostics);
        self.diagnostics = diagnostics;
        self.diagnostics.extend(resolver);
        self
    }

    /// Build the `name → OID` directory for the object kinds.
    #[must_use]
    pub fn oid_directory(&self) -> OidDirectory {
        self.directory_of(NodeKinds::OBJECTS)
    }

    /// Build a `name → OID` directory for an arbitrary kind filter.
    #[must_use]
    pub fn directory_of(&self, kinds: NodeKinds) -> OidDirectory {
        let mut dir = OidDirectory::new();
        for node in self.nodes_of(kinds) {
            dir.insert(node.name.as_str(), node.oid.to_dotted());
        }
        dir
    }
}
