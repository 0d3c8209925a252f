//! Resolver context.
//!
//! Holds the scope and intermediate results while one module is resolved.

use super::builtins::{lookup_root, resolve_builtin_import, rfc1213_fallback};
use super::ImportLookup;
use crate::ast::{self, Definition, MacroValue, OidAssignment};
use crate::lexer::{Diagnostic, Span};
use crate::model::{NodeKind, Oid, Unresolved};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Resolution state for one module.
pub(crate) struct ResolverContext<'a> {
    /// The module being resolved.
    pub ast: &'a ast::Module,
    /// Source of symbols imported from other modules.
    pub lookup: &'a dyn ImportLookup,
    /// Imported symbol → OID.
    pub imported: BTreeMap<String, Oid>,
    /// Local definitions and named-number bindings → OID.
    pub symbols: BTreeMap<String, Oid>,
    /// Resolved OID per body definition, indexed like `ast.body`.
    pub oids: Vec<Option<Oid>>,
    /// Inferred kind per body definition, indexed like `ast.body`.
    pub kinds: Vec<Option<NodeKind>>,
    /// Definitions whose OID could not be resolved.
    pub unresolved: Vec<Unresolved>,
    /// Resolver diagnostics (warnings).
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ResolverContext<'a> {
    pub fn new(ast: &'a ast::Module, lookup: &'a dyn ImportLookup) -> Self {
        let len = ast.body.len();
        Self {
            ast,
            lookup,
            imported: BTreeMap::new(),
            symbols: BTreeMap::new(),
            oids: vec![None; len],
            kinds: vec![None; len],
            unresolved: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Name of the module being resolved.
    pub fn module_name(&self) -> &'a str {
        &self.ast.name.name
    }

    /// Look up an unqualified name: local scope, then imports, then roots.
    pub fn lookup_name(&self, name: &str) -> Option<Oid> {
        self.symbols
            .get(name)
            .or_else(|| self.imported.get(name))
            .cloned()
            .or_else(|| lookup_root(name))
    }

    /// Look up a symbol exported by another module.
    pub fn lookup_import(&self, module: &str, symbol: &str) -> Option<Oid> {
        resolve_builtin_import(module, symbol)
            .or_else(|| self.lookup.lookup(module, symbol))
            .or_else(|| rfc1213_fallback(module, symbol))
    }

    /// Look up `Module.name`.
    pub fn lookup_qualified(&self, module: &str, name: &str) -> Option<Oid> {
        if module == self.module_name() {
            return self.symbols.get(name).cloned();
        }
        self.lookup_import(module, name)
    }

    /// Record a definition whose OID could not be resolved.
    pub fn record_unresolved(&mut self, name: &str, component: &str, span: Span) {
        let message = if component.is_empty() {
            format!("empty OID value for `{name}`")
        } else {
            format!("cannot resolve `{component}` in OID of `{name}`")
        };
        self.diagnostics.push(Diagnostic::warning(span, message));
        self.unresolved.push(Unresolved {
            name: name.into(),
            component: component.into(),
            span,
        });
    }
}

/// The OID value of a definition, if it carries one directly.
pub(crate) fn oid_value(def: &Definition) -> Option<&OidAssignment> {
    match def {
        Definition::ValueAssignment(d) => Some(&d.oid),
        Definition::Macro(d) => match &d.value {
            MacroValue::Oid(oid) => Some(oid),
            MacroValue::TrapNumber { .. } => None,
        },
        Definition::TypeAssignment(_) | Definition::MacroDefinition(_) => None,
    }
}

/// A TRAP-TYPE definition's enterprise (if present) and trap number.
pub(crate) fn trap_value(def: &Definition) -> Option<(Option<&OidAssignment>, u32)> {
    match def {
        Definition::Macro(d) => match d.value {
            MacroValue::TrapNumber { value, .. } => Some((d.enterprise.as_ref(), value)),
            MacroValue::Oid(_) => None,
        },
        _ => None,
    }
}
