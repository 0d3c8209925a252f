//! Resolution phases.
//!
//! A module is resolved in three ordered phases:
//!
//! 1. **Imports**: bind imported names to OIDs
//! 2. **OIDs**: resolve every definition's OID, with forward references
//! 3. **Kinds**: infer node kinds from SYNTAX, INDEX and tree position

pub mod imports;
pub mod kinds;
pub mod oids;

pub use imports::resolve_imports;
pub use kinds::infer_kinds;
pub use oids::resolve_oids;

use super::Phase;
use crate::model::{NodeKind, Oid};

#[cfg(feature = "tracing")]
use super::tracing::{TraceEvent, TraceLevel, Tracer};

/// Optional resolution tracing.
///
/// Methods default to no-ops, so one implementation of each phase serves
/// both traced and non-traced resolution.
pub(crate) trait ResolveTracer {
    fn phase_start(&mut self, _module: &str, _phase: Phase) {}
    fn phase_end(&mut self, _module: &str, _phase: Phase) {}
    fn import_lookup(&mut self, _from_module: &str, _symbol: &str, _found: bool) {}
    fn pass_start(&mut self, _pass: usize, _pending: usize) {}
    fn pass_end(&mut self, _pass: usize, _resolved: usize, _remaining: usize) {}
    fn lookup(&mut self, _def_name: &str, _component: &str, _found: bool) {}
    fn resolved(&mut self, _def_name: &str, _oid: &Oid) {}
    fn unresolved(&mut self, _def_name: &str, _component: &str) {}
    fn kind(&mut self, _def_name: &str, _kind: NodeKind) {}
}

/// No-op tracer for non-traced resolution.
pub(crate) struct NoopResolveTracer;

impl ResolveTracer for NoopResolveTracer {}

/// Adapts a public [`Tracer`] to [`ResolveTracer`].
#[cfg(feature = "tracing")]
pub(crate) struct TracingWrapper<'a, T: Tracer>(pub &'a mut T);

#[cfg(feature = "tracing")]
impl<T: Tracer> ResolveTracer for TracingWrapper<'_, T> {
    fn phase_start(&mut self, module: &str, phase: Phase) {
        crate::trace_event!(
            self.0,
            TraceLevel::Info,
            TraceEvent::PhaseStart { module, phase }
        );
    }

    fn phase_end(&mut self, module: &str, phase: Phase) {
        crate::trace_event!(
            self.0,
            TraceLevel::Info,
            TraceEvent::PhaseEnd { module, phase }
        );
    }

    fn import_lookup(&mut self, from_module: &str, symbol: &str, found: bool) {
        let level = if found {
            TraceLevel::Debug
        } else {
            TraceLevel::Warn
        };
        crate::trace_event!(
            self.0,
            level,
            TraceEvent::ImportLookup {
                from_module,
                symbol,
                found,
            }
        );
    }

    fn pass_start(&mut self, pass: usize, pending: usize) {
        crate::trace_event!(
            self.0,
            TraceLevel::Debug,
            TraceEvent::OidPassStart { pass, pending }
        );
    }

    fn pass_end(&mut self, pass: usize, resolved: usize, remaining: usize) {
        crate::trace_event!(
            self.0,
            TraceLevel::Debug,
            TraceEvent::OidPassEnd {
                pass,
                resolved,
                remaining,
            }
        );
    }

    fn lookup(&mut self, def_name: &str, component: &str, found: bool) {
        crate::trace_event!(
            self.0,
            TraceLevel::Trace,
            TraceEvent::OidLookup {
                def_name,
                component,
                found,
            }
        );
    }

    fn resolved(&mut self, def_name: &str, oid: &Oid) {
        if TraceLevel::Trace <= self.0.level() {
            let oid = oid.to_dotted();
            self.0.trace(
                TraceLevel::Trace,
                TraceEvent::OidResolved {
                    def_name,
                    oid: &oid,
                },
            );
        }
    }

    fn unresolved(&mut self, def_name: &str, component: &str) {
        crate::trace_event!(
            self.0,
            TraceLevel::Warn,
            TraceEvent::OidUnresolved {
                def_name,
                component,
            }
        );
    }

    fn kind(&mut self, def_name: &str, kind: NodeKind) {
        crate::trace_event!(
            self.0,
            TraceLevel::Trace,
            TraceEvent::KindInferred { def_name, kind }
        );
    }
}
