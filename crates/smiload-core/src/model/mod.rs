//! Resolved MIB model.
//!
//! The model sits at the end of the pipeline:
//!
//! ```text
//! Source → Lexer → Parser → AST → Resolver → [Model]
//! ```
//!
//! A [`Module`] holds its resolved [`Node`]s in declaration order. The
//! [`OidDirectory`] is the flat `name → dotted OID` view handed to callers.
//!
//! # Usage
//!
//! ```ignore
//! let module = resolver::resolve_module(&ast, &registry);
//! for node in module.nodes_of(NodeKinds::TABLE | NodeKinds::ROW) {
//!     println!("{} {}", node.name, node.oid);
//! }
//! let dir = module.oid_directory();
//! ```

mod directory;
mod module;
mod node;
mod oid;

pub use directory::OidDirectory;
pub use module::{Language, Module, Unresolved};
pub use node::{Node, NodeKind, NodeKinds};
pub use oid::{Oid, ParseOidError};
