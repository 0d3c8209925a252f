//! Phase 2: OID resolution.
//!
//! Resolve every definition's OID value to numeric arcs. Definitions may
//! reference names defined later in the module, so resolution runs in
//! passes until a pass makes no progress. TRAP-TYPE OIDs are derived last,
//! as `enterprise.0.trapNumber`.

use super::ResolveTracer;
use crate::ast::{OidAssignment, OidComponent};
use crate::model::Oid;
use crate::resolver::context::{oid_value, trap_value, ResolverContext};
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A successful resolution: the OID plus names bound by `name(number)`
/// components along the way.
struct Resolution {
    oid: Oid,
    bindings: Vec<(String, Oid)>,
}

/// Resolve all OIDs of the module in `ctx`.
pub fn resolve_oids<TR: ResolveTracer>(ctx: &mut ResolverContext<'_>, tracer: &mut TR) {
    let ast = ctx.ast;

    // (definition index, last failing component)
    let mut pending: Vec<(usize, String)> = ast
        .body
        .iter()
        .enumerate()
        .filter(|(_, def)| oid_value(def).is_some())
        .map(|(i, _)| (i, String::new()))
        .collect();

    let mut pass = 0;
    while !pending.is_empty() {
        tracer.pass_start(pass, pending.len());

        let mut still_pending = Vec::new();
        let mut resolved = 0;

        for (index, _) in pending {
            let def = &ast.body[index];
            let Some(value) = oid_value(def) else {
                continue;
            };
            let name = def.name().name.as_str();
            match resolve_value(ctx, name, value, tracer) {
                Ok(resolution) => {
                    commit(ctx, index, name, resolution, tracer);
                    resolved += 1;
                }
                Err(component) => still_pending.push((index, component)),
            }
        }

        tracer.pass_end(pass, resolved, still_pending.len());

        if resolved == 0 {
            for (index, component) in still_pending {
                let def = &ast.body[index];
                let name = def.name().name.as_str();
                let span = oid_value(def).map_or(def.span(), |v| v.span);
                tracer.unresolved(name, &component);
                ctx.record_unresolved(name, &component, span);
            }
            break;
        }

        pending = still_pending;
        pass += 1;
    }

    resolve_traps(ctx, tracer);
}

/// Derive TRAP-TYPE OIDs from `ENTERPRISE` and the trap number.
fn resolve_traps<TR: ResolveTracer>(ctx: &mut ResolverContext<'_>, tracer: &mut TR) {
    let ast = ctx.ast;
    for (index, def) in ast.body.iter().enumerate() {
        let Some((enterprise, number)) = trap_value(def) else {
            continue;
        };
        let name = def.name().name.as_str();

        let Some(enterprise) = enterprise else {
            tracer.unresolved(name, "ENTERPRISE");
            ctx.record_unresolved(name, "ENTERPRISE", def.span());
            continue;
        };

        match resolve_value(ctx, name, enterprise, tracer) {
            Ok(Resolution { oid, bindings }) => {
                let resolution = Resolution {
                    oid: oid.child(0).child(number),
                    bindings,
                };
                commit(ctx, index, name, resolution, tracer);
            }
            Err(component) => {
                tracer.unresolved(name, &component);
                ctx.record_unresolved(name, &component, enterprise.span);
            }
        }
    }
}

fn commit<TR: ResolveTracer>(
    ctx: &mut ResolverContext<'_>,
    index: usize,
    name: &str,
    resolution: Resolution,
    tracer: &mut TR,
) {
    tracer.resolved(name, &resolution.oid);
    for (bound, oid) in resolution.bindings {
        ctx.symbols.entry(bound).or_insert(oid);
    }
    ctx.symbols.insert(name.into(), resolution.oid.clone());
    ctx.oids[index] = Some(resolution.oid);
}

/// Walk an OID value's components. On failure, returns the text of the
/// component that could not be resolved (empty for an empty value).
fn resolve_value<TR: ResolveTracer>(
    ctx: &ResolverContext<'_>,
    def_name: &str,
    value: &OidAssignment,
    tracer: &mut TR,
) -> Result<Resolution, String> {
    let mut current: Option<Oid> = None;
    let mut bindings = Vec::new();

    for component in &value.components {
        let next = match component {
            OidComponent::Name(ident) => {
                let found = ctx.lookup_name(&ident.name);
                tracer.lookup(def_name, &ident.name, found.is_some());
                found.ok_or_else(|| ident.name.clone())?
            }
            OidComponent::Number { value, .. } => extend(current.as_ref(), *value),
            OidComponent::NamedNumber { name, number, .. } => {
                let found = if current.is_none() {
                    ctx.lookup_name(&name.name)
                } else {
                    None
                };
                found.unwrap_or_else(|| {
                    let oid = extend(current.as_ref(), *number);
                    bindings.push((name.name.clone(), oid.clone()));
                    oid
                })
            }
            OidComponent::QualifiedName { module, name, .. } => {
                let found = ctx.lookup_qualified(&module.name, &name.name);
                let label = format!("{}.{}", module.name, name.name);
                tracer.lookup(def_name, &label, found.is_some());
                found.ok_or(label)?
            }
            OidComponent::QualifiedNamedNumber {
                module,
                name,
                number,
                ..
            } => {
                let found = if current.is_none() {
                    ctx.lookup_qualified(&module.name, &name.name)
                } else {
                    None
                };
                found.unwrap_or_else(|| extend(current.as_ref(), *number))
            }
        };
        current = Some(next);
    }

    current
        .map(|oid| Resolution { oid, bindings })
        .ok_or_else(String::new)
}

fn extend(current: Option<&Oid>, arc: u32) -> Oid {
    match current {
        Some(oid) => oid.child(arc),
        None => Oid::new(vec![arc]),
    }
}
