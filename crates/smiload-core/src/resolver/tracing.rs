//! Resolver tracing support (feature-gated).
//!
//! Provides structured trace events for debugging resolution issues.
//! Zero overhead when the `tracing` feature is disabled.

pub use super::Phase;
use crate::model::NodeKind;

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages (phase boundaries, summary stats).
    Info,
    /// Detailed debugging (individual lookups, decisions).
    Debug,
    /// Verbose tracing (every operation).
    Trace,
}

/// Structured trace events emitted during resolution.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// A resolution phase is starting.
    PhaseStart {
        /// The module being resolved.
        module: &'a str,
        /// The phase.
        phase: Phase,
    },
    /// A resolution phase has ended.
    PhaseEnd {
        /// The module being resolved.
        module: &'a str,
        /// The phase.
        phase: Phase,
    },

    /// An imported symbol was looked up.
    ImportLookup {
        /// The module being imported from.
        from_module: &'a str,
        /// The imported symbol.
        symbol: &'a str,
        /// Whether an OID was found for it.
        found: bool,
    },

    /// An OID resolution pass is starting.
    OidPassStart {
        /// The pass number (0-indexed).
        pass: usize,
        /// Number of definitions pending resolution.
        pending: usize,
    },
    /// An OID resolution pass has ended.
    OidPassEnd {
        /// The pass number (0-indexed).
        pass: usize,
        /// Number of definitions resolved in this pass.
        resolved: usize,
        /// Number of definitions still pending.
        remaining: usize,
    },
    /// A symbol lookup occurred during OID resolution.
    OidLookup {
        /// The definition being resolved.
        def_name: &'a str,
        /// The symbol being looked up.
        component: &'a str,
        /// Whether the lookup succeeded.
        found: bool,
    },
    /// An OID was successfully resolved.
    OidResolved {
        /// The definition name.
        def_name: &'a str,
        /// The resolved OID as a dotted string.
        oid: &'a str,
    },
    /// An OID could not be resolved.
    OidUnresolved {
        /// The definition name.
        def_name: &'a str,
        /// The unresolved component name.
        component: &'a str,
    },

    /// A node kind was inferred.
    KindInferred {
        /// The definition name.
        def_name: &'a str,
        /// The inferred kind.
        kind: NodeKind,
    },
}

/// Trait for receiving trace events during resolution.
///
/// The tracer filters events by returning a minimum trace level from
/// `level()`.
pub trait Tracer {
    /// Returns the minimum trace level to emit.
    ///
    /// Events below this level will not be passed to `trace()`.
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event at or above the configured level.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>);
}

/// A tracer that discards all events.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent<'_>) {}
}

/// Emit a trace event if the tracer level permits.
///
/// The level is checked before the event is constructed.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}
