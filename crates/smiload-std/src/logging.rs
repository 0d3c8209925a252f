//! Forwarding of resolver trace events to `tracing`.

use smiload_core::resolver::tracing::{TraceEvent, TraceLevel, Tracer};
use tracing::level_filters::LevelFilter;

/// A [`Tracer`] that emits every resolver event as a `tracing` event.
///
/// The minimum level follows the currently installed subscriber, so
/// events nobody listens to are never built.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn level(&self) -> TraceLevel {
        level_for(LevelFilter::current())
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        match level {
            TraceLevel::Error => tracing::error!(target: "smiload::resolver", "{}", Display(&event)),
            TraceLevel::Warn => tracing::warn!(target: "smiload::resolver", "{}", Display(&event)),
            TraceLevel::Info => tracing::info!(target: "smiload::resolver", "{}", Display(&event)),
            TraceLevel::Debug => tracing::debug!(target: "smiload::resolver", "{}", Display(&event)),
            TraceLevel::Trace => tracing::trace!(target: "smiload::resolver", "{}", Display(&event)),
        }
    }
}

fn level_for(filter: LevelFilter) -> TraceLevel {
    if filter >= LevelFilter::TRACE {
        TraceLevel::Trace
    } else if filter >= LevelFilter::DEBUG {
        TraceLevel::Debug
    } else if filter >= LevelFilter::INFO {
        TraceLevel::Info
    } else if filter >= LevelFilter::WARN {
        TraceLevel::Warn
    } else {
        TraceLevel::Error
    }
}

struct Display<'e, 'a>(&'e TraceEvent<'a>);

impl std::fmt::Display for Display<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self.0 {
            TraceEvent::PhaseStart { module, phase } => write!(f, "{module}: {phase} phase start"),
            TraceEvent::PhaseEnd { module, phase } => write!(f, "{module}: {phase} phase end"),
            TraceEvent::ImportLookup {
                from_module,
                symbol,
                found: true,
            } => write!(f, "imported {symbol} from {from_module}"),
            TraceEvent::ImportLookup {
                from_module,
                symbol,
                found: false,
            } => write!(f, "cannot import {symbol} from {from_module}"),
            TraceEvent::OidPassStart { pass, pending } => {
                write!(f, "oid pass {pass}: {pending} pending")
            }
            TraceEvent::OidPassEnd {
                pass,
                resolved,
                remaining,
            } => write!(f, "oid pass {pass}: {resolved} resolved, {remaining} remaining"),
            TraceEvent::OidLookup {
                def_name,
                component,
                found,
            } => write!(f, "{def_name}: lookup {component} found={found}"),
            TraceEvent::OidResolved { def_name, oid } => write!(f, "{def_name} = {oid}"),
            TraceEvent::OidUnresolved {
                def_name,
                component,
            } => write!(f, "{def_name}: unresolved component {component}"),
            TraceEvent::KindInferred { def_name, kind } => {
                write!(f, "{def_name}: kind {}", kind.as_str())
            }
        }
    }
}
