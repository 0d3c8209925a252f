//! smiload-core: MIB module parsing and OID resolution.
//!
//! This crate turns SMIv1/SMIv2 MIB source into resolved modules whose
//! definitions carry numeric OIDs and inferred node kinds. It is `no_std`
//! compatible and IO-free; locating files and loading imported modules is
//! left to the caller (see the `smiload` crate).
//!
//! ```text
//! Source → Lexer → Parser → AST → Resolver → Model
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ast;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod resolver;

pub use model::{Module, Node, NodeKind, NodeKinds, Oid, OidDirectory};
pub use parser::{ParseOutput, Parser};
pub use resolver::{resolve_module, ImportLookup, NoImports};
