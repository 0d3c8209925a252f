//! Abstract syntax tree for parsed MIB modules.
//!
//! The AST records what the loader needs from a module as written: the
//! header, imports, and every OID-bearing definition with the few clauses
//! that decide its node kind. Resolution happens in [`crate::resolver`].

mod common;
mod definition;
mod module;
mod oid;

pub use common::Ident;
pub use definition::{
    Definition, MacroDefinition, MacroInvocation, MacroKind, MacroValue, Status, SyntaxHead,
    TypeAssignment, ValueAssignment,
};
pub use module::{DefinitionsKind, ImportClause, Module};
pub use oid::{OidAssignment, OidComponent};
