//! OID resolution for MIB modules.
//!
//! The resolver turns one parsed [`ast::Module`] into a resolved
//! [`Module`]. It handles:
//!
//! - Import binding (from built-ins and already-resolved modules)
//! - OID resolution with forward references
//! - Node-kind inference (table, row, column, scalar, ...)
//!
//! # Pipeline
//!
//! ```text
//! AST Module → Resolver → Model Module
//! ```
//!
//! # Built-in Definitions
//!
//! The OID roots `ccitt`, `iso` and `joint-iso-ccitt` are always in scope.
//! Imports from the SMI base modules (SNMPv2-SMI, RFC1155-SMI, ...) resolve
//! against built-in tables without any base module file. Imports from other
//! modules go through an [`ImportLookup`].
//!
//! # Usage
//!
//! ```
//! use smiload_core::parser::Parser;
//! use smiload_core::resolver::{resolve_module, NoImports};
//!
//! let parsed = Parser::new(b"
//!     DEMO-MIB DEFINITIONS ::= BEGIN
//!     IMPORTS enterprises FROM SNMPv2-SMI;
//!     demo OBJECT IDENTIFIER ::= { enterprises 99999 }
//!     END
//! ").parse();
//! let module = resolve_module(&parsed.modules[0], &NoImports);
//! assert_eq!(module.oid_directory().get("demo"), Some("1.3.6.1.4.1.99999"));
//! ```

pub mod builtins;
mod context;
mod phases;
#[cfg(feature = "tracing")]
pub mod tracing;

use crate::ast::{self, Definition, MacroKind};
use crate::model::{Language, Module, Node, Oid};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use context::ResolverContext;
use phases::{infer_kinds, resolve_imports, resolve_oids, NoopResolveTracer, ResolveTracer};

#[cfg(feature = "tracing")]
use self::tracing::Tracer;

/// Resolution phase identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Import binding.
    Imports,
    /// OID resolution.
    Oids,
    /// Node-kind inference.
    Kinds,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Phase::Imports => "imports",
            Phase::Oids => "oids",
            Phase::Kinds => "kinds",
        })
    }
}

/// Source of symbols exported by modules other than the one being resolved.
pub trait ImportLookup {
    /// Resolve `symbol` as exported by `module`, if that module is known.
    fn lookup(&self, module: &str, symbol: &str) -> Option<Oid>;
}

/// An [`ImportLookup`] that knows no modules.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImports;

impl ImportLookup for NoImports {
    fn lookup(&self, _module: &str, _symbol: &str) -> Option<Oid> {
        None
    }
}

impl ImportLookup for BTreeMap<String, Module> {
    fn lookup(&self, module: &str, symbol: &str) -> Option<Oid> {
        self.get(module)?.symbol(symbol).cloned()
    }
}

impl ImportLookup for Vec<Module> {
    fn lookup(&self, module: &str, symbol: &str) -> Option<Oid> {
        self.iter()
            .rev()
            .find(|m| m.name() == module)?
            .symbol(symbol)
            .cloned()
    }
}

/// Resolve a parsed module.
///
/// Never fails: definitions whose OID cannot be resolved are listed in
/// [`Module::unresolved`] and reported as warnings.
#[must_use]
pub fn resolve_module(ast: &ast::Module, imports: &dyn ImportLookup) -> Module {
    resolve_inner(ast, imports, &mut NoopResolveTracer)
}

/// Resolve a parsed module with tracing support.
#[cfg(feature = "tracing")]
#[must_use]
pub fn resolve_module_traced<T: Tracer>(
    ast: &ast::Module,
    imports: &dyn ImportLookup,
    tracer: &mut T,
) -> Module {
    resolve_inner(ast, imports, &mut phases::TracingWrapper(tracer))
}

fn resolve_inner<TR: ResolveTracer>(
    ast: &ast::Module,
    imports: &dyn ImportLookup,
    tracer: &mut TR,
) -> Module {
    let name = ast.name.name.as_str();
    let mut ctx = ResolverContext::new(ast, imports);

    tracer.phase_start(name, Phase::Imports);
    resolve_imports(&mut ctx, tracer);
    tracer.phase_end(name, Phase::Imports);

    tracer.phase_start(name, Phase::Oids);
    resolve_oids(&mut ctx, tracer);
    tracer.phase_end(name, Phase::Oids);

    tracer.phase_start(name, Phase::Kinds);
    infer_kinds(&mut ctx, tracer);
    tracer.phase_end(name, Phase::Kinds);

    build_module(ctx)
}

fn build_module(ctx: ResolverContext<'_>) -> Module {
    let ast = ctx.ast;

    let nodes = ast
        .body
        .iter()
        .zip(ctx.oids)
        .zip(ctx.kinds)
        .filter_map(|((def, oid), kind)| {
            Some(Node {
                name: def.name().name.clone(),
                kind: kind?,
                oid: oid?,
                status: status_of(def),
            })
        })
        .collect();

    let imports = ast.imported_modules().map(String::from).collect();

    Module {
        name: ast.name.name.clone(),
        language: language_of(ast),
        imports,
        nodes,
        symbols: ctx.symbols,
        unresolved: ctx.unresolved,
        diagnostics: ctx.diagnostics,
    }
}

fn status_of(def: &Definition) -> Option<ast::Status> {
    match def {
        Definition::Macro(inv) => inv.status,
        _ => None,
    }
}

/// SMIv2 if the module imports from an SNMPv2 base module or declares a
/// MODULE-IDENTITY.
fn language_of(ast: &ast::Module) -> Language {
    let v2_import = ast.imports.iter().any(|clause| {
        builtins::BaseModule::from_name(&clause.from_module.name).is_some_and(|m| m.is_smiv2())
    });
    let identity = ast
        .body
        .iter()
        .any(|def| matches!(def, Definition::Macro(inv) if inv.kind == MacroKind::ModuleIdentity));
    if v2_import || identity {
        Language::Smiv2
    } else {
        Language::Smiv1
    }
}
