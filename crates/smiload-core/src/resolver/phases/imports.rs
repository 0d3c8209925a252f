//! Phase 1: Import binding.
//!
//! Bind each lowercase imported symbol to the OID its source module
//! exports. Uppercase symbols (types, textual conventions, macros) carry no
//! OID and are skipped.

use super::ResolveTracer;
use crate::lexer::Diagnostic;
use crate::resolver::context::ResolverContext;
use alloc::format;

/// Resolve all imports of the module in `ctx`.
pub fn resolve_imports<TR: ResolveTracer>(ctx: &mut ResolverContext<'_>, tracer: &mut TR) {
    let ast = ctx.ast;
    for clause in &ast.imports {
        let from = clause.from_module.name.as_str();
        for symbol in &clause.symbols {
            if symbol.is_uppercase() {
                continue;
            }

            let oid = ctx.lookup_import(from, &symbol.name);
            tracer.import_lookup(from, &symbol.name, oid.is_some());

            if let Some(oid) = oid {
                ctx.imported.insert(symbol.name.clone(), oid);
            } else {
                ctx.diagnostics.push(Diagnostic::warning(
                    symbol.span,
                    format!("cannot import `{}` from {from}", symbol.name),
                ));
            }
        }
    }
}
